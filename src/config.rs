// Session configuration, read once at startup from an optional TOML file.
// Missing keys fall back to the defaults below, so a file may set only what it changes.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Radius of the erasing disk, in surface pixels.
    pub brush_radius: f32,
    /// Coverage (0..100) that must be strictly exceeded to reveal.
    pub reveal_threshold_percent: f32,
    /// The artwork under the cover.
    pub image_path: PathBuf,
    /// How long the cover takes to fade out once revealed.
    pub fade_duration_ms: u64,
    /// How long the artwork takes to fade in after it finishes loading.
    pub image_fade_ms: u64,
    /// Text stamped in the middle of the cover.
    pub label: String,
    /// Page heading above the card.
    pub heading: String,
    /// Smaller line under the heading.
    pub subtitle: String,
    /// Number of 2x2 noise marks scattered over the gradient.
    pub noise_marks: usize,
    pub window_width: usize,
    pub window_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brush_radius: 5.0,
            reveal_threshold_percent: 70.0,
            image_path: PathBuf::from("regalo.jpg"),
            fade_duration_ms: 1000,
            image_fade_ms: 700,
            label: String::from("SCRATCH HERE!"),
            heading: String::from("HAPPY BIRTHDAY"),
            subtitle: String::from("SCRATCH TO DISCOVER YOUR GIFT"),
            noise_marks: 1000,
            window_width: 960,
            window_height: 640,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Like `load`, but any failure is logged and replaced by the defaults.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.brush_radius.is_finite() || self.brush_radius <= 0.0 {
            return Err(Error::ConfigInvalid(format!(
                "brush_radius must be > 0, got {}",
                self.brush_radius
            )));
        }
        let t = self.reveal_threshold_percent;
        if !(t > 0.0 && t < 100.0) {
            return Err(Error::ConfigInvalid(format!(
                "reveal_threshold_percent must be in (0, 100), got {t}"
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::ConfigInvalid("window size must be non-zero".into()));
        }
        Ok(())
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    pub fn image_fade(&self) -> Duration {
        Duration::from_millis(self.image_fade_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brush_radius, 5.0);
        assert_eq!(config.reveal_threshold_percent, 70.0);
        assert_eq!(config.fade_duration(), Duration::from_secs(1));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str("brush_radius = 12.5\nlabel = \"HI\"\n").unwrap();
        assert_eq!(config.brush_radius, 12.5);
        assert_eq!(config.label, "HI");
        assert_eq!(config.noise_marks, 1000);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        for bad in ["reveal_threshold_percent = 0.0", "reveal_threshold_percent = 100.0"] {
            assert!(matches!(Config::from_toml_str(bad), Err(Error::ConfigInvalid(_))));
        }
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(matches!(
            Config::from_toml_str("brush_radius = 0.0"),
            Err(Error::ConfigInvalid(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(Config::from_toml_str("brush_radius = ["), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("scratch-reveal-does-not-exist.toml");
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("scratch-reveal-{}.toml", std::process::id()));
        std::fs::write(&path, "reveal_threshold_percent = 55.0\n").unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.reveal_threshold_percent, 55.0);
    }
}
