//! Push button that swaps in a darker copy of its icon while held down.
//!
//! The button paints its normal frame, icon and label like any other egui
//! button. While it is pressed, a pressed variant of the icon is painted over
//! the normal one. The variant is generated on the first pressed paint and
//! kept per widget until the configured icon changes.

use egui::{
    Color32, ColorImage, Context, Id, Key, Rect, Response, Sense, StrokeKind, TextStyle,
    TextWrapMode, TextureHandle, TextureOptions, Ui, Vec2, Widget, WidgetInfo, WidgetText,
    WidgetType, pos2, vec2,
};

use crate::ui::components::icons::ButtonIcon;

/// Brightness kept by the pressed icon variant.
const PRESSED_SHADE: f32 = 0.65;
const DEFAULT_ICON_SIZE: Vec2 = Vec2::splat(16.0);
const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

pub struct PushButton<'a> {
    text: WidgetText,
    icon: Option<&'a ButtonIcon>,
    icon_size: Vec2,
    min_size: Vec2,
}

impl<'a> PushButton<'a> {
    pub fn new(text: impl Into<WidgetText>) -> Self {
        Self {
            text: text.into(),
            icon: None,
            icon_size: DEFAULT_ICON_SIZE,
            min_size: Vec2::ZERO,
        }
    }

    pub fn icon(mut self, icon: Option<&'a ButtonIcon>) -> Self {
        self.icon = icon;
        self
    }

    pub fn icon_size(mut self, size: Vec2) -> Self {
        self.icon_size = size;
        self
    }

    pub fn min_size(mut self, size: Vec2) -> Self {
        self.min_size = size;
        self
    }
}

/// Copy of `image` with every color channel scaled down; alpha is untouched.
pub fn pressed_variant(image: &ColorImage) -> ColorImage {
    let mut pressed = image.clone();
    let shade = |c: u8| (c as f32 * PRESSED_SHADE).round() as u8;
    for pixel in &mut pressed.pixels {
        let [r, g, b, a] = pixel.to_array();
        *pixel = Color32::from_rgba_premultiplied(shade(r), shade(g), shade(b), a);
    }
    pressed
}

#[derive(Clone)]
pub(crate) struct CachedVariant<T> {
    source_key: u64,
    value: T,
}

/// Return the cached value for `source_key`, rebuilding it when the slot is
/// empty or was built from a different source.
pub(crate) fn cached_variant<T: Clone>(
    slot: &mut Option<CachedVariant<T>>,
    source_key: u64,
    build: impl FnOnce() -> T,
) -> T {
    match slot {
        Some(cached) if cached.source_key == source_key => cached.value.clone(),
        _ => {
            let value = build();
            *slot = Some(CachedVariant {
                source_key,
                value: value.clone(),
            });
            value
        }
    }
}

/// Pressed texture for the button `id`, kept in egui's temp storage.
pub(crate) fn pressed_texture(ctx: &Context, id: Id, icon: &ButtonIcon) -> TextureHandle {
    let cache_id = id.with("pressed_icon");
    // The slot is taken out first: uploading a texture locks the context
    let mut slot = ctx.data_mut(|d| d.get_temp::<CachedVariant<TextureHandle>>(cache_id));
    let texture = cached_variant(&mut slot, icon.key(), || {
        tracing::trace!(icon = icon.name(), "Building pressed icon variant");
        ctx.load_texture(
            format!("{}#pressed", icon.name()),
            pressed_variant(icon.image()),
            TextureOptions::default(),
        )
    });
    if let Some(slot) = slot {
        ctx.data_mut(|d| d.insert_temp(cache_id, slot));
    }
    texture
}

fn is_down(ui: &Ui, response: &Response) -> bool {
    response.is_pointer_button_down_on()
        || (response.has_focus() && ui.input(|i| i.key_down(Key::Space) || i.key_down(Key::Enter)))
}

impl Widget for PushButton<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let padding = ui.spacing().button_padding;
        let galley = self.text.into_galley(
            ui,
            Some(TextWrapMode::Extend),
            f32::INFINITY,
            TextStyle::Button,
        );

        let icon_size = if self.icon.is_some() {
            self.icon_size
        } else {
            Vec2::ZERO
        };
        let gap = if self.icon.is_some() && !galley.text().is_empty() {
            ui.spacing().icon_spacing
        } else {
            0.0
        };
        let content = vec2(
            icon_size.x + gap + galley.size().x,
            icon_size.y.max(galley.size().y),
        );
        let desired = (content + 2.0 * padding).max(self.min_size);

        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());
        response.widget_info(|| {
            WidgetInfo::labeled(WidgetType::Button, ui.is_enabled(), galley.text())
        });

        if ui.is_rect_visible(rect) {
            let visuals = ui.style().interact(&response);
            ui.painter().rect(
                rect.expand(visuals.expansion),
                visuals.corner_radius,
                visuals.weak_bg_fill,
                visuals.bg_stroke,
                StrokeKind::Inside,
            );

            let content_rect = Rect::from_center_size(rect.center(), content);
            let mut x = content_rect.left();

            if let Some(icon) = self.icon {
                let icon_rect = Rect::from_min_size(
                    pos2(x, rect.center().y - icon_size.y / 2.0),
                    icon_size,
                );
                let tint = if ui.is_enabled() {
                    Color32::WHITE
                } else {
                    Color32::from_white_alpha(110)
                };
                let normal = icon.texture(ui.ctx());
                ui.painter().image(normal.id(), icon_rect, FULL_UV, tint);

                if is_down(ui, &response) {
                    let pressed = pressed_texture(ui.ctx(), response.id, icon);
                    ui.painter().image(pressed.id(), icon_rect, FULL_UV, tint);
                }
                x += icon_size.x + gap;
            }

            let text_pos = pos2(x, rect.center().y - galley.size().y / 2.0);
            ui.painter().galley(text_pos, galley, visuals.text_color());
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::icons::solid;

    #[test]
    fn pressed_variant_darkens_and_keeps_alpha() {
        let image = solid([2, 1], [200, 100, 0, 255]);
        let pressed = pressed_variant(&image);
        assert_eq!(pressed.size, image.size);
        assert_eq!(pressed.pixels[0].to_array(), [130, 65, 0, 255]);

        let transparent = solid([1, 1], [0, 0, 0, 0]);
        assert_eq!(pressed_variant(&transparent).pixels[0].a(), 0);
    }

    #[test]
    fn variant_is_built_lazily_once_per_source() {
        let mut slot = None;
        let mut builds = 0;
        let mut get = |slot: &mut Option<CachedVariant<u32>>, key| {
            cached_variant(slot, key, || {
                builds += 1;
                key as u32 * 10
            })
        };

        assert_eq!(get(&mut slot, 1), 10);
        assert_eq!(get(&mut slot, 1), 10);
        assert_eq!(get(&mut slot, 2), 20);
        assert_eq!(get(&mut slot, 2), 20);
        drop(get);
        assert_eq!(builds, 2);
    }

    #[test]
    fn pressed_texture_follows_icon_changes() {
        let ctx = egui::Context::default();
        let id = Id::new("button");
        let red = ButtonIcon::from_image("icon", solid([2, 2], [255, 0, 0, 255]));
        let blue = ButtonIcon::from_image("icon", solid([2, 2], [0, 0, 255, 255]));

        let first = pressed_texture(&ctx, id, &red);
        assert_eq!(first.id(), pressed_texture(&ctx, id, &red).id());

        let changed = pressed_texture(&ctx, id, &blue);
        assert_ne!(first.id(), changed.id());
        assert_eq!(changed.id(), pressed_texture(&ctx, id, &blue).id());
    }

    #[test]
    fn button_renders_headless() {
        let ctx = egui::Context::default();
        let icon = ButtonIcon::from_image("icon", solid([4, 4], [0, 141, 228, 255]));
        let mut clicked = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                clicked = ui.add(PushButton::new("Send").icon(Some(&icon))).clicked();
            });
        });
        assert!(!clicked);
    }
}
