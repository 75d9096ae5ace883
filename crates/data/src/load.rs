use anyhow::Context;
use sakura_core::GameConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const GAME_CONFIG_FILE: &str = "game.json";

/// Reads `dir/game.json`; a missing file yields the defaults.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(GAME_CONFIG_FILE);
    if !path.exists() {
        log::debug!("{} not found, using default config", path.display());
        return Ok(GameConfig::default());
    }
    load_json(&path)
}

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or("en_US").trim();
    if raw.is_empty() {
        return "en_US".to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "th" | "th_th" | "thai" => "th_TH".to_string(),
        "en" | "en_us" => "en_US".to_string(),
        _ => raw.replace('-', "_"),
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sakura_core::QuestionPolicy;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) fn temp_root(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "sakura_data_{}_{}_{}",
            std::process::id(),
            name,
            nanos
        ));
        let _ = fs::create_dir_all(&path);
        path
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = temp_root("missing");
        let config = load_game_config(&dir).expect("config");
        assert_eq!(config, GameConfig::default());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn reads_partial_config() {
        let dir = temp_root("partial");
        fs::write(
            dir.join(GAME_CONFIG_FILE),
            r#"{"questions":{"kind":"random","count":8},"timer":{"enabled":false}}"#,
        )
        .expect("write");
        let config = load_game_config(&dir).expect("config");
        assert_eq!(config.questions, QuestionPolicy::Random { count: 8 });
        assert!(!config.timer.enabled);
        assert_eq!(config.timer.tick_millis, 1000);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn broken_config_reports_the_path() {
        let dir = temp_root("broken");
        fs::write(dir.join(GAME_CONFIG_FILE), "{ nope").expect("write");
        let err = load_game_config(&dir).expect_err("should fail");
        assert!(format!("{err:#}").contains(GAME_CONFIG_FILE));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn normalizes_locale_aliases() {
        assert_eq!(normalize_locale(None), "en_US");
        assert_eq!(normalize_locale(Some(" ")), "en_US");
        assert_eq!(normalize_locale(Some("th")), "th_TH");
        assert_eq!(normalize_locale(Some("TH-th")), "th_TH");
        assert_eq!(normalize_locale(Some("en-us")), "en_US");
        assert_eq!(normalize_locale(Some("ja-JP")), "ja_JP");
    }
}
