use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::constants::DEFAULT_MIN_COUNT;
use super::error::ConfigError;
use super::worker_status::RunKind;

/// Structure representing the application configuration. Contains the input
/// file lists and analysis parameters.
/// Configs are serializable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub signal_files: Vec<PathBuf>,
    pub background_files: Vec<PathBuf>,
    pub output_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub layout_path: Option<PathBuf>,
    pub title: String,
    pub min_count: usize,
    pub show_progress: bool,
}

impl Default for Config {
    /// Generate a new Config object. All fields will be empty/invalid
    fn default() -> Self {
        Self {
            signal_files: vec![],
            background_files: vec![],
            output_path: PathBuf::from("None"),
            config_path: None,
            layout_path: None,
            title: String::from(""),
            min_count: DEFAULT_MIN_COUNT,
            show_progress: false,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Input files of a logical run, in analysis order
    pub fn files_for(&self, run: RunKind) -> &[PathBuf] {
        match run {
            RunKind::Signal => &self.signal_files,
            RunKind::Background => &self.background_files,
        }
    }

    /// Get the path to the output summary file of a logical run
    pub fn get_summary_file_name(&self, run: RunKind) -> Result<PathBuf, ConfigError> {
        let file_path = self
            .output_path
            .join(format!("{}_{}.h5", self.get_title_str(), run.suffix()));
        if self.output_path.exists() {
            Ok(file_path)
        } else {
            Err(ConfigError::BadFilePath(self.output_path.clone()))
        }
    }

    /// Construct the file name stem from the plot title
    fn get_title_str(&self) -> String {
        self.title.replace(' ', "_")
    }

    pub fn has_channel_masks(&self) -> bool {
        self.config_path.is_some()
    }

    pub fn is_min_count_valid(&self) -> bool {
        self.min_count >= 1
    }
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_file_name() {
        let config = Config {
            output_path: std::env::temp_dir(),
            title: String::from("2023-10-23 Long Fiber"),
            ..Default::default()
        };
        let path = config.get_summary_file_name(RunKind::Signal).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2023-10-23_Long_Fiber_sig.h5"
        );
        let path = config.get_summary_file_name(RunKind::Background).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2023-10-23_Long_Fiber_bkg.h5"
        );
    }

    #[test]
    fn test_missing_output_dir() {
        let config = Config::default();
        assert!(config.get_summary_file_name(RunKind::Signal).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            Config::read_config_file(Path::new("/does/not/exist.yml")),
            Err(ConfigError::BadFilePath(_))
        ));
    }
}
