//! MP3 AutoCut GUI module using eframe/egui.
//!
//! A desktop front end for the MP3 AutoCut processing server: pick a file,
//! tune the splitting parameters, submit, watch progress and the log.

pub mod app;
pub mod async_bridge;
pub mod dialogs;
pub mod state;
pub mod submission;
pub mod ui_state;
pub mod widgets;

/// Main entry point for the GUI
pub fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([680.0, 560.0])
            .with_resizable(true)
            .with_title("MP3 AutoCut"),
        ..Default::default()
    };

    eframe::run_native(
        "MP3 AutoCut",
        native_options,
        Box::new(|cc| Ok(Box::new(app::AutocutApp::new(cc)))),
    )
    .map_err(|e| format!("{e:?}"))
    .map_err(|e| {
        Box::new(std::io::Error::other(e)) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(())
}
