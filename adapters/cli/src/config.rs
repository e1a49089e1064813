//! Optional TOML settings layered over the default tuning.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use pantry_maze_core::{AbilityDuration, IngredientKind, Tuning};
use serde::Deserialize;
use thiserror::Error;

/// Balancing values read from the optional TOML file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Movement, countdown and tutorial parameters.
    #[serde(flatten)]
    pub(crate) tuning: Tuning,
    /// Ability lifetimes granted by each ingredient.
    pub(crate) pickups: PickupDurations,
}

/// Seconds each ingredient's ability lasts; zero or less never expires.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct PickupDurations {
    pub(crate) chili_secs: f32,
    pub(crate) butter_secs: f32,
    pub(crate) bread_secs: f32,
    pub(crate) garlic_secs: f32,
    pub(crate) honey_secs: f32,
}

impl PickupDurations {
    /// Lifetime of the ability granted by `ingredient`.
    pub(crate) fn duration(&self, ingredient: IngredientKind) -> AbilityDuration {
        let seconds = match ingredient {
            IngredientKind::Chili => self.chili_secs,
            IngredientKind::Butter => self.butter_secs,
            IngredientKind::Bread => self.bread_secs,
            IngredientKind::Garlic => self.garlic_secs,
            IngredientKind::Honey => self.honey_secs,
        };
        AbilityDuration::from_secs_f32(seconds)
    }
}

impl Default for PickupDurations {
    fn default() -> Self {
        Self {
            chili_secs: 0.0,
            butter_secs: 12.0,
            bread_secs: 0.0,
            garlic_secs: 12.0,
            honey_secs: 8.0,
        }
    }
}

/// Failures encountered while loading the settings file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("could not read config '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid settings TOML.
    #[error("could not parse config '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads settings from `path`, or the defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse(source: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = parse("").expect("empty config parses");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let settings = parse(
            r#"
            [level]
            time_limit_secs = 60.0

            [movement]
            sticky_slow_factor = 0.5

            [pickups]
            honey_secs = 3.0
            "#,
        )
        .expect("partial config parses");

        assert_eq!(settings.tuning.level.time_limit(), Duration::from_secs(60));
        assert_eq!(settings.tuning.level.star_thresholds_secs, [24.0, 48.0, 72.0, 96.0]);
        assert!((settings.tuning.movement.sticky_slow_factor - 0.5).abs() < f32::EPSILON);
        assert!((settings.tuning.movement.sweet_speed_factor - 1.25).abs() < f32::EPSILON);
        assert_eq!(
            settings.pickups.duration(IngredientKind::Honey),
            AbilityDuration::Limited(Duration::from_secs(3))
        );
        assert_eq!(settings.pickups.duration(IngredientKind::Chili), AbilityDuration::Unlimited);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(parse("[level]\ntime_limit_secs = \"soon\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load(Some(Path::new("/nonexistent/pantry-maze.toml")))
            .expect_err("missing file must fail");
        assert!(error.to_string().contains("pantry-maze.toml"));
    }
}
