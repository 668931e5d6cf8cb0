use std::path::Path;

const ELLIPSIS: &str = "...";

/// Build the display name of a track: its file name, cut down to `max_chars`
/// characters with a trailing `...` when it is longer.
pub fn display_name(path: &Path, max_chars: usize) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if name.chars().count() <= max_chars {
        return name;
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = name.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
