use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_storage_dir() -> String {
    ".jobby".into()
}

fn default_service_name() -> String {
    "jobby".into()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
