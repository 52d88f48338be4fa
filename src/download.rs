//! Saving resolved audio to local disk.

use crate::api::{Client, Track};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// `"<artist> - <title>.mp3"` with every character outside alphanumerics,
/// space, '.', '_' and '-' replaced by a space, then trimmed. This is the
/// only place user-controlled text reaches the filesystem.
pub fn sanitized_filename(artist: &str, title: &str) -> String {
    format!("{artist} - {title}.mp3")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Resolve the track, fetch the stream body and write it under `dir`.
/// The directory is created if missing; an existing file of the same name
/// is overwritten.
pub async fn download_track(api: &Client, track: &Track, dir: &Path) -> anyhow::Result<PathBuf> {
    let url = api.resolve(&track.id, track.source).await?;
    let bytes = api.fetch_bytes(&url).await?;

    std::fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    let path = dir.join(sanitized_filename(&track.artist, &track.title));
    std::fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "download complete");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_path_hostile_characters() {
        assert_eq!(sanitized_filename("A/B:C", "D?E"), "A B C - D E.mp3");
    }

    #[test]
    fn keeps_allowed_punctuation() {
        assert_eq!(
            sanitized_filename("some_artist", "track.v2 - live"),
            "some_artist - track.v2 - live.mp3"
        );
    }

    #[test]
    fn keeps_non_ascii_letters() {
        assert_eq!(sanitized_filename("周杰伦", "晴天"), "周杰伦 - 晴天.mp3");
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        assert_eq!(sanitized_filename(" A ", "B"), "A  - B.mp3");
    }
}
