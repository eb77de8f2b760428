//! Product command - details for one product

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::get_context;
use crate::output;

pub async fn run(id: u64, json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.session.require_user()?;

    let product = ctx.catalog.get_product(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&product)?);
        return Ok(());
    }

    println!("{}", product.title.bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID", &product.id.to_string()]);
    table.add_row(vec!["Category", &product.category]);
    table.add_row(vec!["Price", &output::format_price(product.price)]);
    table.add_row(vec![
        "Rating",
        &format!("{:.1} ({} reviews)", product.rating.rate, product.rating.count),
    ]);
    table.add_row(vec!["Image", &product.image]);
    println!("{}", table);
    println!();

    if !product.description.is_empty() {
        println!("{}", product.description);
        println!();
    }

    let in_cart = ctx.cart.contains(product.id);
    let favorite = ctx.favorites.contains(product.id);
    println!(
        "In cart: {}   Favorite: {}",
        if in_cart { "yes".green() } else { "no".dimmed() },
        if favorite { "yes".green() } else { "no".dimmed() },
    );

    Ok(())
}
