use egui::{ColorImage, Context, RichText, TextureHandle, TextureOptions, Vec2};
use image::Luma;
use qrcode::QrCode;

use crate::app::AppAction;
use crate::ui::MessageType;
use crate::ui::components::clipboard::Clipboard;
use crate::ui::components::styled::StyledButton;
use crate::ui::theme::{CrtColors, Spacing, Typography};

const QR_SIZE: f32 = 180.0;

/// Render `text` as a black on white QR code.
pub fn generate_qr_code_image(text: &str) -> Result<ColorImage, qrcode::types::QrError> {
    let code = QrCode::new(text.as_bytes())?;
    let image = code.render::<Luma<u8>>().quiet_zone(true).build();

    let size = [image.width() as usize, image.height() as usize];
    let rgba: Vec<u8> = image
        .into_raw()
        .into_iter()
        .flat_map(|luma| [luma, luma, luma, 255])
        .collect();
    Ok(ColorImage::from_rgba_unmultiplied(size, &rgba))
}

/// Shows the address that receives the selected token.
#[derive(Default)]
pub struct ReceiveTokenPage {
    open: bool,
    enabled: bool,
    address: String,
    symbol: String,
    qr_texture: Option<(String, TextureHandle)>,
}

impl ReceiveTokenPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.to_string();
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        self.symbol = symbol.to_string();
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn qr_texture(&mut self, ctx: &Context) -> Option<TextureHandle> {
        if let Some((address, texture)) = &self.qr_texture {
            if *address == self.address {
                return Some(texture.clone());
            }
        }
        match generate_qr_code_image(&self.address) {
            Ok(image) => {
                let texture = ctx.load_texture("receive_qr", image, TextureOptions::NEAREST);
                self.qr_texture = Some((self.address.clone(), texture.clone()));
                Some(texture)
            }
            Err(err) => {
                tracing::warn!(%err, "Failed to render receive address QR code");
                None
            }
        }
    }

    pub fn ui(&mut self, ctx: &Context, clipboard: &mut dyn Clipboard) -> AppAction {
        let mut action = AppAction::None;
        if !self.open {
            return action;
        }

        let dark_mode = ctx.style().visuals.dark_mode;
        let texture = if self.address.is_empty() {
            None
        } else {
            self.qr_texture(ctx)
        };
        let mut open = self.open;

        egui::Window::new("Receive token")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_enabled_ui(self.enabled, |ui| {
                    ui.vertical_centered(|ui| {
                        if self.address.is_empty() {
                            ui.label("No token selected");
                            return;
                        }
                        ui.label(
                            RichText::new(format!("Receive {}", self.symbol))
                                .font(Typography::heading()),
                        );
                        if let Some(texture) = &texture {
                            ui.image((texture.id(), Vec2::splat(QR_SIZE)));
                        }
                        ui.label(
                            RichText::new(&self.address)
                                .font(Typography::monospace())
                                .color(CrtColors::text_primary(dark_mode)),
                        );
                        ui.add_space(Spacing::SM);
                        if StyledButton::secondary("Copy address").show(ui).clicked() {
                            action = match clipboard.set_text(&self.address) {
                                Ok(()) => AppAction::DisplayMessage(
                                    "Address copied to clipboard".to_string(),
                                    MessageType::Success,
                                ),
                                Err(err) => {
                                    AppAction::DisplayMessage(err.to_string(), MessageType::Error)
                                }
                            };
                        }
                    });
                });
            });
        self.open = open;
        action
    }
}
