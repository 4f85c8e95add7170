//! Match save files
//!
//! Persists the minimal per-fighter subset (position, health, facing)
//! as TOML. Timers and action flags are deliberately not saved; a
//! loaded match resumes with every fighter on a neutral footing.

use scrim_core::Result;
use scrim_fighter::FighterSnapshot;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A saved match: one snapshot per fighter, in session index order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSave {
    pub fighters: Vec<FighterSnapshot>,
}

impl MatchSave {
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Write the save to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load a save from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchSave {
        MatchSave {
            fighters: vec![
                FighterSnapshot {
                    x: 100.0,
                    y: 418.0,
                    health: 72.0,
                    facing_right: true,
                },
                FighterSnapshot {
                    x: 300.0,
                    y: 418.0,
                    health: 100.0,
                    facing_right: false,
                },
            ],
        }
    }

    #[test]
    fn toml_round_trip() {
        let save = sample();
        let text = save.to_toml_string().unwrap();
        let loaded = MatchSave::from_toml_str(&text).unwrap();
        assert_eq!(loaded, save);
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join("scrim_save_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("match.toml");

        let save = sample();
        save.save_to_file(&path).expect("save failed");
        let loaded = MatchSave::load_from_file(&path).expect("load failed");
        assert_eq!(loaded, save);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = MatchSave::from_toml_str("fighters = 3").unwrap_err();
        assert!(matches!(err, scrim_core::ScrimError::TomlParseError(_)));
    }
}
