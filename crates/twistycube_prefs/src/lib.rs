//! User preferences for the cube: size, turn speed, shuffle length, and cubie
//! template.

use std::path::Path;

use eyre::{Context, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use twistycube_core::MIN_SIZE;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");
const ENV_PREFIX: &str = "TWISTYCUBE";

lazy_static! {
    /// Built-in preferences, used for any value not set by the user.
    pub static ref DEFAULT_PREFS: CubePreferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// Visual template instantiated for each cubie.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CubieTemplate {
    /// Name given to every cubie created from the template.
    pub name: String,
}

/// Settings read when the cube is generated or turned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CubePreferences {
    /// Edge length of the cube, in cubies. At least [`MIN_SIZE`].
    pub size: u32,
    /// Duration of one animated quarter turn, in seconds. Never negative.
    pub turn_duration: f32,
    /// Number of random moves applied when shuffling.
    pub shuffle_steps: u32,
    /// Template for each cubie. Generating the cube does nothing if this is
    /// `None`.
    pub cubie_template: Option<CubieTemplate>,
}

impl Default for CubePreferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}

impl CubePreferences {
    /// Loads preferences from the defaults, then the file at `path` (if any),
    /// then environment variables prefixed with `TWISTYCUBE_`. If loading
    /// fails, logs a warning and returns the default preferences.
    pub fn load(path: Option<&Path>) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            Self::default()
        })
    }

    /// Loads preferences like [`CubePreferences::load()`], but returns an
    /// error instead of falling back to the defaults.
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        if let Some(path) = path {
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        config = config.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let mut prefs: Self = config
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err("error reading preferences")?;
        prefs.validate();
        Ok(prefs)
    }

    /// Saves the preferences as YAML to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml)
            .wrap_err_with(|| format!("error saving preferences to {}", path.display()))
    }

    /// Serializes the preferences as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).wrap_err("error serializing preferences")
    }

    /// Clamps every value into its valid range.
    pub fn validate(&mut self) {
        self.size = self.size.max(MIN_SIZE);
        if !self.turn_duration.is_finite() || self.turn_duration < 0.0 {
            self.turn_duration = 0.0;
        }
    }

    /// Returns the name of the cubie template, or `None` if no template is
    /// configured.
    pub fn template_name(&self) -> Option<&str> {
        self.cubie_template.as_ref().map(|t| t.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs() {
        let prefs = CubePreferences::default();
        assert_eq!(3, prefs.size);
        assert_eq!(0.5, prefs.turn_duration);
        assert_eq!(100, prefs.shuffle_steps);
        assert_eq!(Some("Cubie"), prefs.template_name());

        let mut validated = prefs.clone();
        validated.validate();
        assert_eq!(prefs, validated);
    }

    #[test]
    fn test_validate_clamps() {
        let mut prefs = CubePreferences {
            size: 0,
            turn_duration: -2.0,
            shuffle_steps: 0,
            cubie_template: None,
        };
        prefs.validate();
        assert_eq!(MIN_SIZE, prefs.size);
        assert_eq!(0.0, prefs.turn_duration);

        for duration in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            prefs.turn_duration = duration;
            prefs.validate();
            assert_eq!(0.0, prefs.turn_duration);
        }
    }

    #[test]
    fn test_load_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "size: 1\nturn_duration: 0.25\n").unwrap();

        let prefs = CubePreferences::try_load(Some(path.as_path())).unwrap();
        assert_eq!(MIN_SIZE, prefs.size); // clamped
        assert_eq!(0.25, prefs.turn_duration);
        assert_eq!(DEFAULT_PREFS.shuffle_steps, prefs.shuffle_steps);
        assert_eq!(DEFAULT_PREFS.cubie_template, prefs.cubie_template);
    }

    #[test]
    fn test_load_infinite_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "turn_duration: .inf\n").unwrap();

        let prefs = CubePreferences::try_load(Some(path.as_path())).unwrap();
        assert_eq!(0.0, prefs.turn_duration);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        let prefs = CubePreferences {
            size: 5,
            turn_duration: 1.5,
            shuffle_steps: 7,
            cubie_template: Some(CubieTemplate {
                name: "Block".to_owned(),
            }),
        };
        prefs.save(&path).unwrap();
        assert_eq!(prefs, CubePreferences::try_load(Some(path.as_path())).unwrap());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.yaml");
        assert!(CubePreferences::try_load(Some(path.as_path())).is_err());
        assert_eq!(DEFAULT_PREFS.clone(), CubePreferences::load(Some(path.as_path())));
    }
}
