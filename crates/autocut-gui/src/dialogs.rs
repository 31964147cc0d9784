//! File and folder dialog utilities

use std::path::PathBuf;

/// Pick an MP3 file for processing.
pub fn pick_mp3() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select MP3 File")
        .add_filter("MP3 Audio", &["mp3"])
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Pick the output directory for produced files.
pub fn pick_output_directory() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Output Directory")
        .pick_folder()
}
