//! Handles settings for the service. Configuration is read from an optional
//! `settings.toml` in the working directory, then from `EVENSPLIT__*`
//! environment variables (`EVENSPLIT__MONGODB__URI`, `EVENSPLIT__SERVER__PORT`,
//! ...). The plain `MONGODB_URI` variable is used when neither sets a URI.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Mongodb {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub mongodb: Mongodb,
    pub server: Server,
    pub log: Log,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("mongodb.database", "OpenSplit")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("log.level", "info")?;
        if let Ok(uri) = std::env::var("MONGODB_URI") {
            builder = builder.set_default("mongodb.uri", uri)?;
        }
        let settings = builder
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("EVENSPLIT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
