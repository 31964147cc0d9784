//! Output directory row.

use std::path::PathBuf;

use crate::dialogs;

/// What the user asked the output path field to do this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPathAction {
    /// Open the prompt with the current path as the default.
    Edit,
    /// A directory was picked from the folder dialog.
    Picked(PathBuf),
}

pub fn render(ui: &mut egui::Ui, current: &str) -> Option<OutputPathAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label("Output directory:");
        ui.label(egui::RichText::new(current).monospace());
        if ui.button("Change...").clicked() {
            action = Some(OutputPathAction::Edit);
        }
        if ui.button("Browse...").clicked()
            && let Some(path) = dialogs::pick_output_directory()
        {
            action = Some(OutputPathAction::Picked(path));
        }
    });

    action
}
