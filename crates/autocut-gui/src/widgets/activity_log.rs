//! Activity log widget

use crate::ui_state::{LogEntry, LogLevel};

/// Render the activity log, newest entries at the bottom, pinned to the end.
///
/// Returns the URL of a download link the user clicked this frame, if any.
pub fn render(ui: &mut egui::Ui, entries: &[LogEntry]) -> Option<String> {
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .max_height(220.0)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in entries {
                ui.horizontal(|ui| {
                    if let Some(url) = &entry.link {
                        ui.label("-");
                        if ui.link(&entry.message).clicked() {
                            clicked = Some(url.clone());
                        }
                    } else {
                        let text = format!("[{}] {}", entry.timestamp, entry.message);
                        match entry.level {
                            LogLevel::Info => {
                                ui.label(text);
                            }
                            LogLevel::Error => {
                                ui.colored_label(egui::Color32::RED, text);
                            }
                        }
                    }
                });
            }
        });

    clicked
}
