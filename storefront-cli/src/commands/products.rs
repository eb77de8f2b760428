//! Products command - catalog listing with title search

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(search: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let products = ctx.catalog.search(search.unwrap_or_default()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    println!("{}", "Product Catalog".bold());
    println!();

    if products.is_empty() {
        match search {
            Some(query) => output::warning(&format!("No products found matching \"{}\"", query)),
            None => output::warning("No products available"),
        }
        return Ok(());
    }

    println!("{}", output::product_table(&products));
    println!(
        "{}",
        format!("{} product(s). Run 'sf product <id>' for details.", products.len()).dimmed()
    );
    Ok(())
}
