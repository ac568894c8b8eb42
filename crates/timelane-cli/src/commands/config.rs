use std::path::Path;

use clap::Subcommand;
use timelane_core::TimelineConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration as TOML
    Show,
    /// Write a default configuration file
    Init,
    /// Get a config value by dot-separated key
    Get {
        /// Key such as `snap_minutes` or `zoom.step_factor`
        key: String,
    },
    /// Set a config value by dot-separated key
    Set {
        key: String,
        value: String,
    },
}

pub fn run(action: ConfigAction, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = super::load_config(config_path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            let config = TimelineConfig::default();
            match config_path {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
            println!("config written");
        }
        ConfigAction::Get { key } => {
            let config = super::load_config(config_path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = super::load_config(config_path)?;
            config.set(&key, &value)?;
            match config_path {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
            println!("{key} = {value}");
        }
    }
    Ok(())
}
