//! Main application structure for the AutoCut GUI

use crate::async_bridge::{AsyncBridge, DownloadLink, SubmitUpdate};
use crate::dialogs;
use crate::state::AppState;
use crate::submission;
use crate::ui_state::{LogEntry, LogLevel, PathPrompt, UiState};
use crate::widgets;
use crate::widgets::file_drop::FileDropAction;
use crate::widgets::output_path::OutputPathAction;
use autocut_core::client::ProcessRequest;
use autocut_core::config::ThemePreference;
use autocut_core::file::SelectError;
use autocut_core::output::apply_path_edit;
use chrono::Local;
use std::path::Path;
use std::time::{Duration, Instant};

/// Main application struct implementing eframe::App
pub struct AutocutApp {
    /// Domain state
    state: AppState,

    /// UI state
    ui_state: UiState,

    /// Async runtime bridge
    async_bridge: AsyncBridge,

    /// Last config save time
    last_save: Instant,

    /// Config dirty flag
    config_dirty: bool,
}

enum PromptOutcome {
    Pending,
    Confirmed(String),
    Cancelled,
}

impl AutocutApp {
    /// Create a new AutocutApp
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new();
        let theme = state.config.ui.theme;

        let mut app = Self {
            state,
            ui_state: UiState::new(theme),
            async_bridge: AsyncBridge::new(),
            last_save: Instant::now(),
            config_dirty: false,
        };

        app.add_log(
            LogLevel::Info,
            "MP3 AutoCut interface ready. Select an MP3 file to begin.",
        );

        app
    }

    /// Add an activity log entry
    fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.ui_state.push_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
            link: None,
        });
    }

    /// Add a clickable download entry
    fn add_download_entry(&mut self, download: DownloadLink) {
        self.ui_state.push_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level: LogLevel::Info,
            message: download.file_name,
            link: Some(download.url),
        });
    }

    /// Apply theme to egui context
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.ui_state.theme {
            ThemePreference::Dark => egui::Visuals::dark(),
            ThemePreference::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    /// Auto-save configuration if dirty and enough time has passed
    fn handle_auto_save(&mut self) {
        if self.config_dirty && self.last_save.elapsed() > Duration::from_millis(300) {
            if let Err(e) = self.state.save_config() {
                self.add_log(LogLevel::Error, format!("Failed to save config: {e}"));
            } else {
                self.config_dirty = false;
                self.last_save = Instant::now();
            }
        }
    }

    /// Mark configuration as dirty
    fn mark_dirty(&mut self) {
        self.config_dirty = true;
    }

    /// Take the first file of a drop, if any.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.ui_state.drag_active = ctx.input(|i| !i.raw.hovered_files.is_empty());

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.into_iter().next()
            && let Some(path) = file.path
        {
            self.select_from_drop(&path);
        }
    }

    fn select_from_drop(&mut self, path: &Path) {
        match self.state.select_dropped(path) {
            Ok(file) => self.add_log(
                LogLevel::Info,
                format!("File selected: {} ({} MB)", file.name, file.size_display()),
            ),
            Err(SelectError::UnsupportedType(_)) => {
                self.add_log(LogLevel::Error, "Error: Please select an MP3 file.");
            }
            Err(err) => self.add_log(LogLevel::Error, format!("Error: {err}")),
        }
    }

    fn select_from_dialog(&mut self, path: &Path) {
        match self.state.select_picked(path) {
            Ok(file) => self.add_log(
                LogLevel::Info,
                format!("File selected: {} ({} MB)", file.name, file.size_display()),
            ),
            Err(SelectError::UnsupportedType(_)) => {
                self.add_log(LogLevel::Error, "Error: Please select an MP3 file.");
            }
            Err(err) => self.add_log(LogLevel::Error, format!("Error: {err}")),
        }
    }

    /// Start a submission for the selected file.
    fn start_submission(&mut self) {
        if !self.state.gate.can_submit() {
            return;
        }

        let Some(file) = self.state.selected.clone() else {
            self.add_log(LogLevel::Error, "Error: No file selected.");
            return;
        };

        self.ui_state.progress.reveal();
        self.add_log(LogLevel::Info, "Starting file processing...");
        let summary = self.state.config.params.summary();
        self.add_log(LogLevel::Info, summary);

        let request = ProcessRequest::snapshot(
            &file,
            &self.state.config.params,
            &self.state.config.output_dir,
        );

        self.state.gate.begin();
        let rx = submission::start_submission(
            &self.async_bridge,
            &self.state.config.server.base_url,
            request,
        );
        self.async_bridge.register_update_receiver(rx);
    }

    /// Handle one update from the in-flight submission.
    fn handle_submit_update(&mut self, update: SubmitUpdate) {
        match update {
            SubmitUpdate::Uploading { file_name } => {
                self.ui_state.progress.advance(10);
                self.add_log(LogLevel::Info, format!("Uploading {file_name}..."));
            }
            SubmitUpdate::RemoteProcessing => {
                self.ui_state.progress.advance(50);
                self.add_log(LogLevel::Info, "Processing file on server...");
            }
            SubmitUpdate::Completed { message, downloads } => {
                self.ui_state.progress.advance(100);
                self.add_log(LogLevel::Info, format!("Processing complete! {message}"));
                if !downloads.is_empty() {
                    self.add_log(LogLevel::Info, "Generated files:");
                    for download in downloads {
                        self.add_download_entry(download);
                    }
                }
                self.state.gate.settle(Instant::now());
            }
            SubmitUpdate::Rejected { error } => {
                self.ui_state.progress.advance(100);
                self.add_log(LogLevel::Error, format!("Error: {error}"));
                self.state.gate.settle(Instant::now());
            }
            SubmitUpdate::Failed { error } => {
                self.ui_state.progress.mark_error();
                self.add_log(
                    LogLevel::Error,
                    format!("Error while processing file: {error}"),
                );
                self.state.gate.settle(Instant::now());
            }
        }
    }

    /// Render the top panel with title and theme toggle
    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("MP3 AutoCut");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.ui_state.theme {
                        ThemePreference::Dark => "☀ Light",
                        ThemePreference::Light => "🌙 Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.ui_state.theme = match self.ui_state.theme {
                            ThemePreference::Dark => ThemePreference::Light,
                            ThemePreference::Light => ThemePreference::Dark,
                        };
                        self.state.config.ui.theme = self.ui_state.theme;
                        self.mark_dirty();
                    }
                });
            });
        });
    }

    /// Render the main UI content
    fn render_main_ui(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // File selection
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.heading("Input File");
                    let action = widgets::file_drop::render(
                        ui,
                        self.state.selected.as_ref(),
                        self.ui_state.drag_active,
                    );
                    match action {
                        Some(FileDropAction::Browse) => {
                            if let Some(path) = dialogs::pick_mp3() {
                                self.select_from_dialog(&path);
                            }
                        }
                        Some(FileDropAction::Clear) => {
                            self.state.clear_selection();
                            self.add_log(LogLevel::Info, "File selection cleared.");
                        }
                        None => {}
                    }
                });

                ui.add_space(8.0);

                // Splitting parameters
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.heading("Parameters");
                    if widgets::parameter_panel::render(ui, &mut self.state.config.params) {
                        self.mark_dirty();
                    }
                });

                ui.add_space(8.0);

                // Output directory
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    match widgets::output_path::render(ui, &self.state.config.output_dir) {
                        Some(OutputPathAction::Edit) => {
                            self.ui_state.path_prompt = Some(PathPrompt {
                                buffer: self.state.config.output_dir.clone(),
                            });
                        }
                        Some(OutputPathAction::Picked(path)) => {
                            let answer = path.to_string_lossy().to_string();
                            if let Some(new_path) =
                                apply_path_edit(&mut self.state.config.output_dir, Some(&answer))
                            {
                                self.add_log(
                                    LogLevel::Info,
                                    format!("Output directory changed to: {new_path}"),
                                );
                                self.mark_dirty();
                            }
                        }
                        None => {}
                    }
                });

                ui.add_space(16.0);

                // Process button
                ui.separator();
                self.render_run_section(ui);
                ui.separator();

                ui.add_space(8.0);

                // Progress (once a submission has started)
                if self.ui_state.progress.is_visible() {
                    ui.group(|ui| {
                        ui.set_min_width(ui.available_width());
                        widgets::progress_display::render(ui, &self.ui_state.progress);
                    });

                    ui.add_space(8.0);
                }

                // Activity log
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.heading("Activity Log");
                    if let Some(url) = widgets::activity_log::render(ui, &self.ui_state.activity_log)
                    {
                        self.open_download(&url);
                    }
                });
            });
    }

    /// Render run section
    fn render_run_section(&mut self, ui: &mut egui::Ui) {
        let can_submit = self.state.gate.can_submit();
        let button_size = egui::vec2(ui.available_width(), 48.0);
        let button = egui::Button::new(egui::RichText::new("▶ Process File").size(20.0))
            .fill(egui::Color32::from_rgb(0, 150, 0))
            .min_size(button_size);

        if ui.add_enabled(can_submit, button).clicked() {
            self.start_submission();
        }
    }

    /// Open a produced file in the system browser.
    fn open_download(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            self.add_log(LogLevel::Error, format!("Failed to open {url}: {e}"));
        }
    }

    /// Render the output-path prompt, if open.
    fn render_path_prompt(&mut self, ctx: &egui::Context) {
        let mut outcome = PromptOutcome::Pending;

        if let Some(prompt) = self.ui_state.path_prompt.as_mut() {
            egui::Window::new("Output Directory")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Enter the destination path for processed files:");
                    ui.text_edit_singleline(&mut prompt.buffer);
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        if ui.button("OK").clicked() {
                            outcome = PromptOutcome::Confirmed(prompt.buffer.clone());
                        }
                        if ui.button("Cancel").clicked() {
                            outcome = PromptOutcome::Cancelled;
                        }
                    });
                });
        }

        match outcome {
            PromptOutcome::Pending => {}
            PromptOutcome::Cancelled => {
                self.ui_state.path_prompt = None;
            }
            PromptOutcome::Confirmed(answer) => {
                self.ui_state.path_prompt = None;
                if let Some(new_path) =
                    apply_path_edit(&mut self.state.config.output_dir, Some(&answer))
                {
                    self.add_log(
                        LogLevel::Info,
                        format!("Output directory changed to: {new_path}"),
                    );
                    self.mark_dirty();
                }
            }
        }
    }
}

impl eframe::App for AutocutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme
        self.apply_theme(ctx);

        // Poll for submission updates - collect first to avoid borrow checker issues
        let mut updates = Vec::new();
        self.async_bridge.poll_updates(|update| {
            updates.push(update);
        });

        // Process updates
        for update in updates {
            self.handle_submit_update(update);
        }

        // Re-enable the process button once the cooldown has elapsed
        self.state.gate.tick(Instant::now());

        // Drag-over highlight and dropped files
        self.handle_dropped_files(ctx);

        // Request continuous repaint so the cooldown timer advances
        ctx.request_repaint();

        // Top panel
        self.render_top_panel(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_main_ui(ui);
        });

        // Output-path prompt
        self.render_path_prompt(ctx);

        // Auto-save
        self.handle_auto_save();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.config_dirty {
            if let Err(e) = self.state.save_config() {
                tracing::error!("failed to save config on exit: {e}");
            }
        }
    }
}
