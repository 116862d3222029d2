use super::Config;
use super::schema::app_dir;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let realmscribe_dir = app_dir();
        if !realmscribe_dir.exists() {
            fs::create_dir_all(&realmscribe_dir)
                .context("Failed to create .realmscribe directory")?;
        }
        Self::load_or_init_at(&realmscribe_dir.join("config.toml"))
    }

    /// Read `config_path`, or write defaults there when it does not exist yet.
    pub fn load_or_init_at(config_path: &Path) -> Result<Self> {
        let config = if config_path.exists() {
            let contents =
                fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            config
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
