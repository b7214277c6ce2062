use clap::Subcommand;
use pomoflow_core::{validate, ConfigError, Settings, SettingsInput, SettingsStore};

use super::print_json;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "focusDuration", "bgColor")
        key: String,
    },
    /// Set a settings value; invalid values are corrected, not rejected
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings as JSON
    List,
    /// Reset settings to defaults
    Reset,
    /// Print the resolved theme as JSON
    Theme,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open_default()?;

    match action {
        ConfigAction::Get { key } => {
            let settings = store.load_or_default();
            let value = settings.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let previous = store.load_or_default();
            let mut input = SettingsInput::default();
            input.set_field(&key, &value)?;
            let next = validate(&input, &previous);
            store.save(&next)?;
            println!("{key} = {}", next.get(&key).unwrap_or_default());
        }
        ConfigAction::List => {
            print_json(&store.load_or_default())?;
        }
        ConfigAction::Reset => {
            store.save(&Settings::default())?;
            println!("settings reset to defaults");
        }
        ConfigAction::Theme => {
            print_json(&store.load_or_default().theme())?;
        }
    }
    Ok(())
}
