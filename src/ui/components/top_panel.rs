use crate::VERSION;
use crate::app::AppAction;
use crate::config::Network;
use crate::context::AppContext;
use crate::ui::MessageType;
use crate::ui::theme::{CrtColors, Shape, Spacing, Typography};
use egui::{Align, Context, CornerRadius, Frame, Layout, Margin, RichText, Stroke, TopBottomPanel, Ui};

fn network_badge(ui: &mut Ui, network: Network) {
    let color = match network {
        Network::Mainnet => CrtColors::CROWN_GOLD,
        Network::Testnet => CrtColors::INFO,
        Network::Regtest => CrtColors::WARNING,
    };
    Frame::new()
        .stroke(Stroke::new(1.0, color))
        .corner_radius(CornerRadius::same(Shape::RADIUS_SM))
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(network.as_str()).font(Typography::caption()).color(color));
        });
}

/// Title bar with the network, the current status line and a refresh button.
pub fn add_top_panel(
    ctx: &Context,
    app_context: &AppContext,
    status: Option<&(String, MessageType)>,
) -> AppAction {
    let mut action = AppAction::None;
    let dark_mode = ctx.style().visuals.dark_mode;

    TopBottomPanel::top("top_panel")
        .frame(
            Frame::new()
                .fill(CrtColors::surface(dark_mode))
                .inner_margin(Margin::symmetric(12, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Crowntium Tokens")
                        .font(Typography::heading())
                        .color(CrtColors::text_primary(dark_mode)),
                );
                ui.label(
                    RichText::new(format!("v{}", VERSION))
                        .font(Typography::caption())
                        .color(CrtColors::text_secondary(dark_mode)),
                );
                network_badge(ui, app_context.config.network);

                if let Some((message, message_type)) = status {
                    ui.add_space(Spacing::LG);
                    ui.label(RichText::new(message).color(message_type.color()));
                    if ui.small_button("Dismiss").clicked() {
                        action = AppAction::ClearMessage;
                    }
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Refresh").clicked() {
                        action = AppAction::Refresh;
                    }
                });
            });
        });

    action
}
