//! Progress bar widget

use autocut_core::progress::ProgressIndicator;

/// Render the submission progress bar with its percentage or error label.
pub fn render(ui: &mut egui::Ui, progress: &ProgressIndicator) {
    ui.vertical(|ui| {
        ui.add(
            egui::ProgressBar::new(f32::from(progress.percent()) / 100.0)
                .text(progress.label().to_string()),
        );
    });
}
