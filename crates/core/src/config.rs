use crate::QuestionPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimerRule {
    pub enabled: bool,
    pub tick_millis: u64,
}

impl Default for TimerRule {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_millis: 1000,
        }
    }
}

impl TimerRule {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioRule {
    pub music_volume: f32,
    pub flip_volume: f32,
    pub flip_sound: String,
}

impl Default for AudioRule {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            flip_volume: 0.4,
            flip_sound: "sfx/flip.mp3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetRule {
    pub cards_dir: String,
    pub music_dir: String,
    pub sfx_dir: String,
    pub music_extension: String,
    pub music_url_prefix: String,
}

impl Default for AssetRule {
    fn default() -> Self {
        Self {
            cards_dir: "public/cards".to_string(),
            music_dir: "public/music".to_string(),
            sfx_dir: "public/sfx".to_string(),
            music_extension: "mp3".to_string(),
            music_url_prefix: "/music/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerRule {
    pub host: String,
    pub port: u16,
}

impl Default for ServerRule {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub questions: QuestionPolicy,
    pub timer: TimerRule,
    pub audio: AudioRule,
    pub assets: AssetRule,
    pub server: ServerRule,
}

impl GameConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// URL path of a track file, e.g. `/music/night.mp3`.
    pub fn track_reference(&self, file: &str) -> String {
        format!("{}{}", self.assets.music_url_prefix, file)
    }
}
