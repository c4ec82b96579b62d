use color_eyre::Result;
use serde::Deserialize;
use std::{env, fs, net::SocketAddr};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub listen: SocketAddr,
    pub cookie_secret: String,
    pub db: Option<String>,
    pub accounts: Vec<Account>,
}

/// A forum account. The user directory lives in the config file; the
/// database only ever stores account names.
#[derive(Debug, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env = env::var("ROPUCHA_CONFIG");
        let path = env.as_deref().unwrap_or("ropucha.toml");
        let config_str = fs::read_to_string(path)?;
        Ok(toml::from_str(&config_str)?)
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }
}
