//! Drawing only. The view reads and edits the input fields of [`AppState`]
//! and reports clicks as [`UiAction`]s; it never starts work itself.

use eframe::egui;
use stockview_core::{Period, SegmentStyle, StyledSegment};

use crate::app::{AppState, ErrorDialog, OutputRegion, RegionContent};
use crate::controller::UiAction;

const ACCENT_GREEN: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const ACCENT_RED: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);
const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(51, 51, 68);

const SUMMARY_FONT_SIZE: f32 = 18.0;
const REGION_HEIGHT: f32 = 260.0;

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.window_rounding = egui::Rounding::same(8.0);
    style.visuals.widgets.inactive.rounding = egui::Rounding::same(6.0);
    style.visuals.widgets.hovered.rounding = egui::Rounding::same(6.0);
    style.visuals.widgets.active.rounding = egui::Rounding::same(6.0);
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    ctx.set_style(style);
}

/// Draw one frame and collect what the user asked for.
pub fn show(ctx: &egui::Context, state: &mut AppState) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let modal_open = state.dialog.is_some();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_enabled_ui(!modal_open, |ui| {
            inputs(ui, state, &mut actions);
            ui.add_space(8.0);
            buttons(ui, state, &mut actions);
            ui.add_space(8.0);
            region(ui, "primary", &state.primary);
            ui.add_space(8.0);
            region(ui, "secondary", &state.secondary);
        });
    });

    if let Some(dialog) = &state.dialog {
        if error_dialog(ctx, dialog) {
            actions.push(UiAction::DismissDialog);
        }
    }

    actions
}

fn inputs(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    let busy = state.is_busy();

    egui::Grid::new("inputs")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Stock Ticker:");
            let ticker = ui.add(
                egui::TextEdit::singleline(&mut state.ticker)
                    .hint_text("e.g. AAPL")
                    .desired_width(200.0),
            );
            if !busy && ticker.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.push(UiAction::GetStockData);
            }
            ui.end_row();

            ui.label("Select Time Period:");
            egui::ComboBox::from_id_salt("period")
                .selected_text(state.period_label.as_str())
                .width(200.0)
                .show_ui(ui, |ui| {
                    for period in Period::SELECTABLE {
                        ui.selectable_value(
                            &mut state.period_label,
                            period.label().to_owned(),
                            period.label(),
                        );
                    }
                });
            ui.end_row();
        });
}

fn buttons(ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    let busy = state.is_busy();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!busy, egui::Button::new("Get Stock Data"))
            .clicked()
        {
            actions.push(UiAction::GetStockData);
        }
        if ui
            .add_enabled(!busy, egui::Button::new("Upload CSV"))
            .clicked()
        {
            actions.push(UiAction::UploadCsv);
        }
        if ui
            .add_enabled(!busy, egui::Button::new("Check Percentage Change"))
            .clicked()
        {
            actions.push(UiAction::CheckPercentageChange);
        }

        if let Some(task) = &state.pending {
            ui.add_space(12.0);
            ui.spinner();
            ui.label(egui::RichText::new(task.kind.busy_label()).color(TEXT_SECONDARY));
            if ui.button("Cancel").clicked() {
                actions.push(UiAction::Cancel);
            }
        }
    });
}

fn region(ui: &mut egui::Ui, id: &str, region: &OutputRegion) {
    egui::Frame::none()
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            if let Some(caption) = &region.caption {
                ui.label(egui::RichText::new(caption).small().color(TEXT_SECONDARY));
            }
            egui::ScrollArea::both()
                .id_salt(id)
                .max_height(REGION_HEIGHT)
                .min_scrolled_height(REGION_HEIGHT)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| match &region.content {
                        RegionContent::Empty => {}
                        RegionContent::Text(text) => {
                            ui.add(
                                egui::Label::new(egui::RichText::new(text).monospace()).extend(),
                            );
                        }
                        RegionContent::Styled(segments) => {
                            ui.label(summary_job(segments));
                        }
                    });
                });
        });
}

fn summary_job(segments: &[StyledSegment]) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob {
        halign: egui::Align::Center,
        ..Default::default()
    };
    for segment in segments {
        let color = match segment.style {
            SegmentStyle::Default => egui::Color32::PLACEHOLDER,
            SegmentStyle::Positive => ACCENT_GREEN,
            SegmentStyle::Negative => ACCENT_RED,
        };
        let size = match segment.style {
            SegmentStyle::Default => SUMMARY_FONT_SIZE,
            SegmentStyle::Positive | SegmentStyle::Negative => SUMMARY_FONT_SIZE + 2.0,
        };
        job.append(
            &segment.text,
            0.0,
            egui::TextFormat {
                font_id: egui::FontId::proportional(size),
                color,
                ..Default::default()
            },
        );
    }
    job
}

/// Returns `true` once the user acknowledges the error.
fn error_dialog(ctx: &egui::Context, dialog: &ErrorDialog) -> bool {
    let mut acknowledged = false;

    egui::Window::new(dialog.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(280.0);
            ui.label(dialog.message.as_str());
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });

    acknowledged
}
