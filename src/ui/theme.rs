use egui::{Color32, FontFamily, FontId, Stroke, Vec2};
use serde::Deserialize;

/// Color scheme preference, read from `CRT_THEME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }
}

pub fn detect_system_theme() -> Result<ThemeMode, String> {
    match dark_light::detect().map_err(|e| e.to_string())? {
        dark_light::Mode::Dark => Ok(ThemeMode::Dark),
        dark_light::Mode::Light | dark_light::Mode::Unspecified => Ok(ThemeMode::Light),
    }
}

/// `System` resolves to whatever the desktop reports, light if unknown.
pub fn resolve_theme_mode(preference: ThemeMode) -> ThemeMode {
    match preference {
        ThemeMode::System => detect_system_theme()
            .inspect_err(|e| tracing::warn!("Failed to detect system theme: {}", e))
            .unwrap_or(ThemeMode::Light),
        other => other,
    }
}

/// Crowntium palette
pub struct CrtColors;

impl CrtColors {
    /// Crown blue (#1c64b4)
    pub const CROWN_BLUE: Color32 = Color32::from_rgb(28, 100, 180);
    /// Crown gold (#d4a72c)
    pub const CROWN_GOLD: Color32 = Color32::from_rgb(212, 167, 44);
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(20, 24, 32);

    pub const SUCCESS: Color32 = Color32::from_rgb(39, 174, 96);
    pub const WARNING: Color32 = Color32::from_rgb(241, 196, 15);
    pub const ERROR: Color32 = Color32::from_rgb(222, 76, 76);
    pub const INFO: Color32 = Color32::from_rgb(52, 152, 219);

    const BACKGROUND: Color32 = Color32::from_rgb(243, 244, 248);
    const SURFACE: Color32 = Color32::WHITE;
    const INPUT_BACKGROUND: Color32 = Color32::from_rgb(249, 250, 252);
    const BORDER: Color32 = Color32::from_rgb(222, 226, 234);
    const TEXT_SECONDARY: Color32 = Color32::from_rgb(100, 112, 130);
    const HOVER: Color32 = Color32::from_rgb(214, 228, 246);
    const SELECTED: Color32 = Color32::from_rgb(196, 216, 242);

    const DARK_BACKGROUND: Color32 = Color32::from_rgb(20, 21, 24);
    const DARK_SURFACE: Color32 = Color32::from_rgb(32, 34, 38);
    const DARK_INPUT_BACKGROUND: Color32 = Color32::from_rgb(40, 42, 46);
    const DARK_BORDER: Color32 = Color32::from_rgb(62, 64, 70);
    const DARK_TEXT_PRIMARY: Color32 = Color32::from_rgb(238, 238, 240);
    const DARK_TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 164, 170);
    const DARK_HOVER: Color32 = Color32::from_rgb(46, 50, 60);
    const DARK_SELECTED: Color32 = Color32::from_rgb(44, 66, 100);

    pub fn background(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_BACKGROUND
        } else {
            Self::BACKGROUND
        }
    }

    pub fn surface(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_SURFACE
        } else {
            Self::SURFACE
        }
    }

    pub fn input_background(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_INPUT_BACKGROUND
        } else {
            Self::INPUT_BACKGROUND
        }
    }

    pub fn border(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_BORDER
        } else {
            Self::BORDER
        }
    }

    pub fn text_primary(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_TEXT_PRIMARY
        } else {
            Self::BLACK
        }
    }

    pub fn text_secondary(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_TEXT_SECONDARY
        } else {
            Self::TEXT_SECONDARY
        }
    }

    pub fn hover(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_HOVER
        } else {
            Self::HOVER
        }
    }

    pub fn selected(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_SELECTED
        } else {
            Self::SELECTED
        }
    }

    pub fn error_color(dark_mode: bool) -> Color32 {
        if dark_mode {
            Color32::from_rgb(255, 110, 110)
        } else {
            Color32::DARK_RED
        }
    }
}

pub struct Typography;

impl Typography {
    pub const SCALE_SM: f32 = 13.0;
    pub const SCALE_BASE: f32 = 15.0;
    pub const SCALE_XL: f32 = 20.0;

    pub fn heading() -> FontId {
        FontId::new(Self::SCALE_XL, FontFamily::Proportional)
    }

    pub fn body() -> FontId {
        FontId::new(Self::SCALE_BASE, FontFamily::Proportional)
    }

    pub fn caption() -> FontId {
        FontId::new(Self::SCALE_SM, FontFamily::Proportional)
    }

    pub fn monospace() -> FontId {
        FontId::new(Self::SCALE_SM, FontFamily::Monospace)
    }
}

pub struct Spacing;

impl Spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;

    pub const MD_I8: i8 = 16;
}

pub struct Shape;

impl Shape {
    pub const RADIUS_SM: u8 = 6;
    pub const RADIUS_MD: u8 = 10;
}

/// Install the Crowntium look on `ctx` for the given preference.
pub fn apply_theme(ctx: &egui::Context, theme_mode: ThemeMode) {
    let dark_mode = resolve_theme_mode(theme_mode) == ThemeMode::Dark;
    tracing::debug!(dark_mode, "Applying theme");

    let mut visuals = if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.dark_mode = dark_mode;
    visuals.window_fill = CrtColors::surface(dark_mode);
    visuals.panel_fill = CrtColors::background(dark_mode);
    visuals.extreme_bg_color = CrtColors::input_background(dark_mode);
    visuals.faint_bg_color = CrtColors::background(dark_mode);
    visuals.window_stroke = Stroke::new(1.0, CrtColors::border(dark_mode));

    let widgets = &mut visuals.widgets;
    widgets.inactive.bg_fill = CrtColors::surface(dark_mode);
    widgets.inactive.weak_bg_fill = CrtColors::surface(dark_mode);
    widgets.inactive.bg_stroke = Stroke::new(1.0, CrtColors::border(dark_mode));
    widgets.inactive.fg_stroke.color = CrtColors::text_primary(dark_mode);

    widgets.hovered.bg_fill = CrtColors::hover(dark_mode);
    widgets.hovered.weak_bg_fill = CrtColors::hover(dark_mode);
    widgets.hovered.bg_stroke = Stroke::new(1.0, CrtColors::CROWN_BLUE);
    widgets.hovered.expansion = 1.0;

    widgets.active.bg_fill = CrtColors::CROWN_BLUE;
    widgets.active.weak_bg_fill = CrtColors::CROWN_BLUE;
    widgets.active.fg_stroke.color = CrtColors::WHITE;
    widgets.active.expansion = 0.0;

    widgets.noninteractive.fg_stroke.color = CrtColors::text_primary(dark_mode);
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, CrtColors::border(dark_mode));

    visuals.selection.bg_fill = CrtColors::selected(dark_mode);
    visuals.selection.stroke = Stroke::new(1.0, CrtColors::CROWN_BLUE);
    visuals.hyperlink_color = CrtColors::CROWN_BLUE;

    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = Vec2::new(Spacing::SM, Spacing::SM);
        style.spacing.button_padding = Vec2::new(12.0, 6.0);
        style.spacing.icon_spacing = 6.0;
    });
}

/// Banner severities shown at the top of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
    Info,
}

impl MessageType {
    pub fn color(&self) -> Color32 {
        match self {
            MessageType::Success => CrtColors::SUCCESS,
            MessageType::Error => CrtColors::ERROR,
            MessageType::Info => CrtColors::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_resolve_to_themselves() {
        assert_eq!(resolve_theme_mode(ThemeMode::Dark), ThemeMode::Dark);
        assert_eq!(resolve_theme_mode(ThemeMode::Light), ThemeMode::Light);
    }

    #[test]
    fn apply_theme_switches_dark_mode() {
        let ctx = egui::Context::default();
        apply_theme(&ctx, ThemeMode::Dark);
        assert!(ctx.style().visuals.dark_mode);
        apply_theme(&ctx, ThemeMode::Light);
        assert!(!ctx.style().visuals.dark_mode);
    }
}
