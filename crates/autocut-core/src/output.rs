//! Output directory field and its edit rule.

/// Default destination directory, matching the server's own default.
pub const DEFAULT_OUTPUT_DIR: &str = "ready_mp3";

/// Apply a prompt-style edit of the output path.
///
/// `answer` is `None` when the prompt was cancelled. A non-blank trimmed
/// answer replaces `current` and is returned so the caller can log it;
/// anything else is discarded and `current` keeps its prior value.
pub fn apply_path_edit(current: &mut String, answer: Option<&str>) -> Option<String> {
    let trimmed = answer?.trim();
    if trimmed.is_empty() {
        return None;
    }
    *current = trimmed.to_string();
    Some(current.clone())
}
