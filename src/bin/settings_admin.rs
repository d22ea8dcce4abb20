// src/bin/settings_admin.rs
//! Operator tool for inspecting and editing settings from a shell

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use showcase_settings::consts::REDACTED_VALUE;
use showcase_settings::storage::PublicBucketStorage;
use showcase_settings::{
    export_settings_json, global, install_global, load_config, SettingCategory, SettingsManager,
    SqliteSettingsStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: settings_admin <command>

  get <key>                     print one setting
  list [CATEGORY]               print all settings, or one category
  set <key> <value> [CATEGORY]  create or update a setting
  media <key>                   print the resolved URL of a media setting
  export <path>                 write a redacted JSON snapshot
  sensitive                     list keys encrypted at rest";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = load_config().context("failed to load settings config")?;
    let store = SqliteSettingsStore::open(&config.database.path)
        .with_context(|| format!("failed to open settings db at {}", config.database.path))?;
    let storage = PublicBucketStorage::from_config(&config.storage)?;
    let manager = SettingsManager::from_config(config, Arc::new(store), Arc::new(storage))
        .context("invalid configuration — is ENCRYPTION_KEY set to 64 hex characters?")?;
    if install_global(manager).is_err() {
        bail!("settings manager already initialised");
    }
    let Some(manager) = global() else {
        bail!("settings manager not initialised");
    };

    let actor = std::env::var("SETTINGS_ACTOR").ok();

    match (command.as_str(), &args[1..]) {
        ("get", [key]) => match manager.get_setting(key) {
            Some(value) => println!("{value}"),
            None => bail!("setting {key} not found or unreadable"),
        },
        ("list", rest) => {
            let category = match rest {
                [] => None,
                [name] => Some(name.parse::<SettingCategory>()?),
                _ => bail!("{USAGE}"),
            };
            for (key, value) in manager.get_settings(category) {
                let shown = if manager.is_sensitive_field(&key) {
                    REDACTED_VALUE.to_string()
                } else {
                    value
                };
                println!("{key} = {shown}");
            }
        }
        ("set", [key, value, rest @ ..]) => {
            let category = match rest {
                [] => None,
                [name] => Some(name.parse::<SettingCategory>()?),
                _ => bail!("{USAGE}"),
            };
            let updated = manager
                .update_setting(key, value, actor.as_deref(), category)
                .with_context(|| format!("failed to update {key}"))?;
            info!(key = %updated.key, category = %updated.category, "saved");
        }
        ("media", [key]) => match manager.get_media_setting_url(key) {
            Some(url) => println!("{url}"),
            None => bail!("no displayable URL for {key}"),
        },
        ("export", [path]) => {
            let total = export_settings_json(manager, path)?;
            println!("Exported {total} setting(s) → {path}");
        }
        ("sensitive", []) => {
            for key in manager.sensitive_fields() {
                println!("{key}");
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}
