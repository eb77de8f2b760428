//! Cart and favorites commands
//!
//! Both lists take the same subcommands; only the store differs.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use storefront_core::services::ListKind;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Show the list
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product by ID
    Add {
        /// Product ID
        id: u64,
    },
    /// Remove a product by ID
    Remove {
        /// Product ID
        id: u64,
    },
    /// Remove every product
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

fn title(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Cart => "Shopping Cart",
        ListKind::Favorites => "Favorites",
    }
}

pub async fn run(kind: ListKind, command: Option<ListCommands>) -> Result<()> {
    let mut ctx = get_context()?;
    ctx.session.require_user()?;

    match command.unwrap_or(ListCommands::List { json: false }) {
        ListCommands::List { json } => {
            let store = ctx.list(kind);
            if json {
                println!("{}", serde_json::to_string_pretty(store.items())?);
                return Ok(());
            }

            println!("{}", title(kind).bold());
            println!();

            if store.is_empty() {
                output::warning(&format!("Nothing in your {} yet", kind));
                return Ok(());
            }

            println!("{}", output::product_table(store.items()));
            if kind == ListKind::Cart {
                println!(
                    "Items: {}   Total: {}",
                    store.len(),
                    output::format_price(store.total()).bold()
                );
            } else {
                println!("{}", format!("{} item(s)", store.len()).dimmed());
            }
        }
        ListCommands::Add { id } => {
            if ctx.list(kind).contains(id) {
                output::info(&format!("Product {} is already in your {}", id, kind));
                return Ok(());
            }
            let product = ctx.catalog.get_product(id).await?;
            let product_title = product.title.clone();
            ctx.list_mut(kind).add(product)?;
            output::success(&format!("Added \"{}\" to your {}", product_title, kind));
        }
        ListCommands::Remove { id } => {
            if !ctx.list(kind).contains(id) {
                output::info(&format!("Product {} is not in your {}", id, kind));
                return Ok(());
            }
            ctx.list_mut(kind).remove(id)?;
            output::success(&format!("Removed product {} from your {}", id, kind));
        }
        ListCommands::Clear { force } => {
            if ctx.list(kind).is_empty() {
                output::info(&format!("Your {} is already empty", kind));
                return Ok(());
            }
            if !force
                && !Confirm::new()
                    .with_prompt(format!("Remove all items from your {}?", kind))
                    .default(false)
                    .interact()?
            {
                println!("{}", "Cancelled".dimmed());
                return Ok(());
            }
            ctx.list_mut(kind).clear()?;
            output::success(&format!("Cleared your {}", kind));
        }
    }

    Ok(())
}
