//! Configuration management for kanadrill

use crate::error::{DrillError, Result};
use crate::kana::{KanaMask, SYLLABLES};
use crate::queue::DEFAULT_QUEUE_LENGTH;
use crate::session::DEFAULT_KANJI_RETRY_CAP;
use crate::timer::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kana writing drill settings
    pub kana: KanaConfig,
    /// Kanji reading drill settings
    pub kanji: KanjiConfig,
    /// Session timer settings
    pub timer: TimerConfig,
    /// Random source settings
    pub rng: RngConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DrillError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to parse {}", path.display())))?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Check the configuration for values no session can run with
    pub fn validate(&self) -> Result<()> {
        let mask = self.kana.mask()?;
        if mask.is_empty() {
            return Err(DrillError::Config(
                "no kana syllables are enabled".to_string(),
            ));
        }
        if self.kana.queue_length == 0 {
            return Err(DrillError::Config("kana.queue_length must be positive".to_string()));
        }
        if self.kana.retry_cap == 0 {
            return Err(DrillError::Config("kana.retry_cap must be positive".to_string()));
        }
        if self.kanji.retry_cap == 0 {
            return Err(DrillError::Config("kanji.retry_cap must be positive".to_string()));
        }
        if self.timer.timeout_secs == 0 {
            return Err(DrillError::Config("timer.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Kana writing drill configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanaConfig {
    /// Enabled hiragana syllables, by romaji
    pub hiragana: Vec<String>,
    /// Enabled katakana syllables, by romaji
    pub katakana: Vec<String>,
    /// Number of items per drill
    pub queue_length: usize,
    /// Wrong attempts allowed on one item before the answer is revealed
    pub retry_cap: u32,
    /// Mistakes after which the time display is frozen
    pub failure_threshold: u32,
}

impl KanaConfig {
    /// Build the enable mask from the romaji lists
    pub fn mask(&self) -> Result<KanaMask> {
        KanaMask::from_romaji(self.hiragana.as_slice(), self.katakana.as_slice())
    }
}

impl Default for KanaConfig {
    fn default() -> Self {
        let all: Vec<String> = SYLLABLES.iter().map(|s| s.romaji.to_string()).collect();
        Self {
            hiragana: all.clone(),
            katakana: all,
            queue_length: DEFAULT_QUEUE_LENGTH,
            retry_cap: 2,
            failure_threshold: 3,
        }
    }
}

/// Kanji reading drill configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanjiConfig {
    /// Wrong attempts allowed on one reading before the answer is revealed
    pub retry_cap: u32,
}

impl Default for KanjiConfig {
    fn default() -> Self {
        Self {
            retry_cap: DEFAULT_KANJI_RETRY_CAP,
        }
    }
}

/// Session timer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Seconds after which the time display stops
    pub timeout_secs: u64,
}

impl TimerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Random source configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    /// Fixed seed for reproducible drills
    pub seed: Option<u64>,
}
