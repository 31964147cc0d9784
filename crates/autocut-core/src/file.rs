//! Selected-file bookkeeping and MP3 type checking.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The only media type the server accepts.
pub const MP3_MIME: &str = "audio/mpeg";

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Errors that can arise while taking a candidate file.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("unsupported media type {0}")]
    UnsupportedType(String),
    #[error("failed to inspect file: {0}")]
    Io(#[from] io::Error),
}

/// The single file the user has chosen for processing.
///
/// At most one exists at a time; it is owned by the file selector and only
/// read by the submission path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub mime: String,
}

impl SelectedFile {
    /// Inspect a candidate path and accept it only when its declared media
    /// type is exactly `audio/mpeg`.
    pub fn inspect(path: &Path) -> Result<Self, SelectError> {
        let mime = declared_mime(path);
        if mime != MP3_MIME {
            return Err(SelectError::UnsupportedType(mime.to_string()));
        }

        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size_bytes: metadata.len(),
            mime: mime.to_string(),
        })
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }

    /// Size in megabytes with two decimal places, as shown to the user.
    pub fn size_display(&self) -> String {
        format!("{:.2}", self.size_mb())
    }
}

/// Media type declared by a path, judged from its extension the way the
/// browser judges a picked file.
pub fn declared_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp3" => MP3_MIME,
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mp3_extension_maps_to_mpeg() {
        assert_eq!(declared_mime(Path::new("mix.mp3")), MP3_MIME);
        assert_eq!(declared_mime(Path::new("MIX.MP3")), MP3_MIME);
    }

    #[test]
    fn other_extensions_are_not_mpeg() {
        assert_eq!(declared_mime(Path::new("mix.wav")), "audio/wav");
        assert_eq!(
            declared_mime(Path::new("notes.txt")),
            "application/octet-stream"
        );
        assert_eq!(declared_mime(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn inspect_rejects_non_mp3() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clip.wav");
        fs::write(&path, b"RIFF").expect("write fixture");

        let err = SelectedFile::inspect(&path).expect_err("wav must be rejected");
        assert!(matches!(err, SelectError::UnsupportedType(ref mime) if mime == "audio/wav"));
    }

    #[test]
    fn inspect_accepts_mp3_and_records_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("episode.mp3");
        let mut f = fs::File::create(&path).expect("create fixture");
        f.write_all(&[0u8; 2048]).expect("write fixture");

        let selected = SelectedFile::inspect(&path).expect("mp3 accepted");
        assert_eq!(selected.name, "episode.mp3");
        assert_eq!(selected.size_bytes, 2048);
        assert_eq!(selected.mime, MP3_MIME);
    }

    #[test]
    fn size_display_is_mb_with_two_decimals() {
        let selected = SelectedFile {
            path: PathBuf::from("a.mp3"),
            name: "a.mp3".to_string(),
            size_bytes: 2_621_440, // 2.5 MB
            mime: MP3_MIME.to_string(),
        };
        assert_eq!(selected.size_display(), "2.50");

        let small = SelectedFile {
            size_bytes: 1_048_576 / 4,
            ..selected
        };
        assert_eq!(small.size_display(), "0.25");
    }
}
