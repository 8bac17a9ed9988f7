use egui::{
    Button, CentralPanel, Context, CornerRadius, Frame, Margin, Response, RichText, Stroke,
    TextEdit, Ui, Vec2,
};

use crate::ui::theme::{CrtColors, Shape, Spacing, Typography};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
}

/// Plain text button in the Crowntium colors.
pub struct StyledButton {
    text: String,
    variant: ButtonVariant,
    enabled: bool,
    min_width: Option<f32>,
}

impl StyledButton {
    pub fn primary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: ButtonVariant::Primary,
            enabled: true,
            min_width: None,
        }
    }

    pub fn secondary(text: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Secondary,
            ..Self::primary(text)
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Danger,
            ..Self::primary(text)
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let dark_mode = ui.ctx().style().visuals.dark_mode;

        let (text_color, fill, stroke) = match self.variant {
            ButtonVariant::Primary => (CrtColors::WHITE, CrtColors::CROWN_BLUE, None),
            ButtonVariant::Secondary => (
                CrtColors::CROWN_BLUE,
                CrtColors::surface(dark_mode),
                Some(Stroke::new(1.0, CrtColors::CROWN_BLUE)),
            ),
            ButtonVariant::Danger => (CrtColors::WHITE, CrtColors::ERROR, None),
        };

        let mut button = Button::new(RichText::new(self.text).font(Typography::body()).color(text_color))
            .fill(if self.enabled {
                fill
            } else {
                CrtColors::border(dark_mode)
            })
            .corner_radius(CornerRadius::same(Shape::RADIUS_SM));
        if let Some(stroke) = stroke {
            button = button.stroke(stroke);
        }
        if let Some(width) = self.min_width {
            button = button.min_size(Vec2::new(width, 0.0));
        }

        let response = ui.add_enabled(self.enabled, button);
        if response.hovered() && self.enabled {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        response
    }
}

pub fn styled_text_edit_singleline(text: &mut String, dark_mode: bool) -> TextEdit<'_> {
    TextEdit::singleline(text)
        .text_color(CrtColors::text_primary(dark_mode))
        .background_color(CrtColors::input_background(dark_mode))
}

/// Central panel whose content sits on a rounded surface.
pub fn island_central_panel<R>(ctx: &Context, content: impl FnOnce(&mut Ui) -> R) -> R {
    let dark_mode = ctx.style().visuals.dark_mode;

    CentralPanel::default()
        .frame(
            Frame::new()
                .fill(CrtColors::background(dark_mode))
                .inner_margin(Margin::symmetric(10, 10)),
        )
        .show(ctx, |ui| {
            Frame::new()
                .fill(CrtColors::surface(dark_mode))
                .stroke(Stroke::new(1.0, CrtColors::border(dark_mode)))
                .inner_margin(Margin::same(Spacing::MD_I8))
                .corner_radius(CornerRadius::same(Shape::RADIUS_MD))
                .show(ui, content)
                .inner
        })
        .inner
}
