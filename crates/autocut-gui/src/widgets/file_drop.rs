//! Drop area and file selection readout.

use autocut_core::file::SelectedFile;

/// What the user asked the file selector to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDropAction {
    Browse,
    Clear,
}

/// Render the drop target and the current selection, if any.
pub fn render(
    ui: &mut egui::Ui,
    selected: Option<&SelectedFile>,
    drag_active: bool,
) -> Option<FileDropAction> {
    let mut action = None;

    let stroke = if drag_active {
        egui::Stroke::new(2.0, ui.visuals().selection.stroke.color)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                if drag_active {
                    ui.label(egui::RichText::new("Drop the MP3 file to select it").strong());
                } else {
                    ui.label(egui::RichText::new("Drag & drop an MP3 file here").strong());
                }
                ui.label("or");
                ui.horizontal(|ui| {
                    if ui.button("Browse...").clicked() {
                        action = Some(FileDropAction::Browse);
                    }
                    // Clearing with nothing selected is legal; it only logs.
                    if ui.button("Clear").clicked() {
                        action = Some(FileDropAction::Clear);
                    }
                });
            });
        });

    if let Some(file) = selected {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Selected:");
            ui.label(egui::RichText::new(&file.name).monospace());
            ui.label(format!("({} MB)", file.size_display()));
        });
    }

    action
}
