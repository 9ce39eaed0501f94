use std::net::SocketAddr;
use std::path::PathBuf;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::BotSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "tictactoe_server.yaml";

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    /// Directory served for every path the API does not claim.
    pub static_files_path: Option<PathBuf>,
    /// Fixed seed for every request's RNG; fresh entropy when absent.
    pub rng_seed: Option<u64>,
    pub bot: BotSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:5000".to_string(),
            static_files_path: None,
            rng_seed: None,
            bot: BotSettings::default(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.address.is_empty() {
            return Err("address must not be empty".to_string());
        }
        self.address
            .parse::<SocketAddr>()
            .map_err(|e| format!("address '{}' is not a socket address: {}", self.address, e))?;
        self.bot.validate()?;
        Ok(())
    }
}
