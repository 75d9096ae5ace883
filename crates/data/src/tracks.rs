use anyhow::Context;
use sakura_core::GameConfig;
use std::fs;
use std::path::Path;

/// File names in `dir` ending in `.{extension}`, sorted.
pub fn list_tracks(dir: &Path, extension: &str) -> anyhow::Result<Vec<String>> {
    let suffix = format!(".{}", extension.trim_start_matches('.').to_ascii_lowercase());
    let entries = fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        if !entry.file_type().map(|kind| kind.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.to_ascii_lowercase().ends_with(&suffix) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Listing for the playback controller: a read failure means no playlist.
pub fn list_tracks_or_empty(dir: &Path, extension: &str) -> Vec<String> {
    match list_tracks(dir, extension) {
        Ok(names) => names,
        Err(err) => {
            log::warn!("music listing unavailable: {err:#}");
            Vec::new()
        }
    }
}

/// Track references (`/music/<file>`) for every file in the music directory.
pub fn track_references(config: &GameConfig, root: &Path) -> Vec<String> {
    let dir = root.join(&config.assets.music_dir);
    list_tracks_or_empty(&dir, &config.assets.music_extension)
        .iter()
        .map(|name| config.track_reference(name))
        .collect()
}
