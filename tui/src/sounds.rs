//! Sound file discovery
//!
//! Looks for `wheel/` and `winner/` under the configured sounds directory and
//! collects the `.mp3` files in each. A missing directory is an empty list;
//! the core then skips that cue.

use std::path::{Path, PathBuf};

use lottery_core::{SoundCategory, SoundLibrary};

/// Extension of playable sound files (case-insensitive)
pub const SOUND_EXTENSION: &str = "mp3";

/// Discover both sound pools under `sounds_dir`
pub async fn discover(sounds_dir: &Path) -> SoundLibrary {
    let wheel = list_sounds(&sounds_dir.join(SoundCategory::Wheel.dir_name())).await;
    let winner = list_sounds(&sounds_dir.join(SoundCategory::Winner.dir_name())).await;

    tracing::info!(
        dir = %sounds_dir.display(),
        wheel = wheel.len(),
        winner = winner.len(),
        "Sound files discovered"
    );
    SoundLibrary::new(wheel, winner)
}

/// Sorted `.mp3` files directly inside `dir`
pub async fn list_sounds(dir: &Path) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Sound directory unavailable");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
                if is_file && is_sound_file(&path) {
                    files.push(path);
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Error while listing sounds");
                break;
            }
        }
    }

    files.sort();
    files
}

fn is_sound_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOUND_EXTENSION))
}
