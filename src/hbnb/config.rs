use crate::console::DEFAULT_PROMPT;
use crate::error::{HbnbError, Result};
use crate::store::fs::DEFAULT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "hbnb.config.json";

/// Console settings, stored in `hbnb.config.json` next to the data file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Text shown before each interactive read
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Registry document, relative to the config directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_NAME)
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            data_file: default_data_file(),
        }
    }
}

impl ConsoleConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(HbnbError::Io)?;
        let config: ConsoleConfig =
            serde_json::from_str(&content).map_err(HbnbError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(HbnbError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(HbnbError::Serialization)?;
        fs::write(config_path, content).map_err(HbnbError::Io)?;
        Ok(())
    }

    /// Where the registry document lives for a console started in `dir`.
    pub fn data_path<P: AsRef<Path>>(&self, dir: P) -> PathBuf {
        if self.data_file.is_absolute() {
            self.data_file.clone()
        } else {
            dir.as_ref().join(&self.data_file)
        }
    }
}
