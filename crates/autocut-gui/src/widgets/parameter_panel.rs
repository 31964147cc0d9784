//! Splitting parameter sliders.

use autocut_core::params::{
    DURATION_RANGE, MIN_SILENCE_RANGE, Parameters, SPEED_RANGE, SPEED_STEP, THRESHOLD_RANGE,
    WINDOW_RANGE,
};

/// Render the five parameter sliders.
/// Returns true if any value was changed
pub fn render(ui: &mut egui::Ui, params: &mut Parameters) -> bool {
    ui.vertical(|ui| {
        let mut changed = false;

        if ui
            .add(
                egui::Slider::new(&mut params.duration_secs, DURATION_RANGE)
                    .text("Chunk duration")
                    .suffix(" s"),
            )
            .on_hover_text("Target duration of each produced chunk")
            .changed()
        {
            changed = true;
        }

        if ui
            .add(
                egui::Slider::new(&mut params.window_secs, WINDOW_RANGE)
                    .text("Search window")
                    .suffix(" s"),
            )
            .on_hover_text("How far around each cut point to look for silence")
            .changed()
        {
            changed = true;
        }

        if ui
            .add(
                egui::Slider::new(&mut params.threshold_db, THRESHOLD_RANGE)
                    .text("Silence threshold")
                    .suffix(" dB"),
            )
            .on_hover_text("Audio below this level counts as silence")
            .changed()
        {
            changed = true;
        }

        if ui
            .add(
                egui::Slider::new(&mut params.min_silence_ms, MIN_SILENCE_RANGE)
                    .text("Min silence")
                    .suffix(" ms"),
            )
            .on_hover_text("Shortest gap treated as a silence")
            .changed()
        {
            changed = true;
        }

        if ui
            .add(
                egui::Slider::new(&mut params.speed, SPEED_RANGE)
                    .step_by(SPEED_STEP)
                    .text("Speed")
                    .suffix("x"),
            )
            .on_hover_text("Playback speed multiplier applied to the output")
            .changed()
        {
            changed = true;
        }

        changed
    })
    .inner
}
