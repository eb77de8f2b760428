//! Config command - show and change settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use storefront_core::config::{Config, SETTINGS_FILE};

use super::get_storefront_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a setting in settings.json (e.g. `sf config set cache.ttlSecs 60`)
    Set {
        /// Setting path, such as api.baseUrl or auth.tokenTtlHours
        key: String,
        /// New value
        value: String,
    },
}

pub fn run(command: Option<ConfigCommands>) -> Result<()> {
    let storefront_dir = get_storefront_dir()?;

    match command.unwrap_or(ConfigCommands::Show { json: false }) {
        ConfigCommands::Set { key, value } => {
            // Environment overrides must not end up in the file
            let mut config = Config::load_file(&storefront_dir)?;
            config.set(&key, &value)?;
            std::fs::create_dir_all(&storefront_dir)?;
            config.save(&storefront_dir)?;
            output::success(&format!(
                "Set {} in {}",
                key,
                storefront_dir.join(SETTINGS_FILE).display()
            ));
            Ok(())
        }
        ConfigCommands::Show { json } => {
            let config = Config::load(&storefront_dir)?;
            if json {
                let value = serde_json::json!({
                    "directory": storefront_dir,
                    "apiBaseUrl": config.api_base_url,
                    "apiTimeoutMs": config.api_timeout.as_millis() as u64,
                    "cacheTtlSecs": config.cache_ttl.as_secs(),
                    "demoUsername": config.credentials.username,
                    "tokenTtlHours": config.token_ttl.as_secs() / 3600,
                    "loginDelayMs": config.login_delay.as_millis() as u64,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{}", "Storefront Configuration".bold());
            println!();

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.add_row(vec!["Directory".to_string(), storefront_dir.display().to_string()]);
            table.add_row(vec!["API base URL".to_string(), config.api_base_url.clone()]);
            table.add_row(vec![
                "API timeout".to_string(),
                format!("{} ms", config.api_timeout.as_millis()),
            ]);
            table.add_row(vec![
                "Cache window".to_string(),
                format!("{} s", config.cache_ttl.as_secs()),
            ]);
            table.add_row(vec!["Demo username".to_string(), config.credentials.username.clone()]);
            table.add_row(vec![
                "Token lifetime".to_string(),
                format!("{} h", config.token_ttl.as_secs() / 3600),
            ]);
            table.add_row(vec![
                "Login delay".to_string(),
                format!("{} ms", config.login_delay.as_millis()),
            ]);
            println!("{}", table);
            Ok(())
        }
    }
}
