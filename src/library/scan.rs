use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;
use walkdir::WalkDir;

use crate::config::PlaylistSettings;

/// Extensions the player accepts, lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["mp3", "wav"];

/// True when `path` ends in `.mp3` or `.wav` (any case).
pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Collect the supported audio files below `dir`, ordered by file name
/// (case-insensitive).
pub fn scan(dir: &Path, settings: &PlaylistSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Depth 1 = direct children only.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_supported_audio(path))
        .collect();

    files.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    files
}

/// Turn command-line inputs into a flat list of files: directories are
/// scanned, everything else is passed through untouched so the controller can
/// report or skip it.
pub fn expand_inputs(inputs: &[PathBuf], settings: &PlaylistSettings) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = scan(input, settings);
            debug!(dir = %input.display(), count = found.len(), "scanned directory");
            out.extend(found);
        } else {
            out.push(input.clone());
        }
    }
    out
}

/// Extract local audio files from text pasted or dropped into the terminal.
///
/// Terminals hand over drops either as `file://` URLs (one per line) or as
/// shell-quoted paths separated by spaces. Non-local URLs and files with an
/// unsupported extension are ignored.
pub fn paths_from_drop(text: &str) -> Vec<PathBuf> {
    let mut out = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // A raw path containing spaces, pasted as-is.
        let raw = Path::new(line);
        if raw.is_file() {
            if is_supported_audio(raw) {
                out.push(raw.to_path_buf());
            }
            continue;
        }

        for token in split_quoted(line) {
            if let Some(path) = local_path(&token) {
                if is_supported_audio(&path) {
                    out.push(path);
                }
            }
        }
    }

    out
}

fn local_path(token: &str) -> Option<PathBuf> {
    if token.contains("://") {
        let url = Url::parse(token).ok()?;
        if url.scheme() != "file" {
            debug!(%url, "ignoring non-local drop");
            return None;
        }
        return url.to_file_path().ok();
    }
    Some(PathBuf::from(token))
}

/// Split on whitespace, honouring single quotes, double quotes and backslash
/// escapes.
pub(super) fn split_quoted(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                        in_token = true;
                    }
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}
