//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;
use storefront_core::Product;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a price as `$12.30`
pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

/// Product table with one row per product
pub fn product_table(products: &[Product]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Title", "Category", "Price", "Rating"]);
    for product in products {
        table.add_row(vec![
            product.id.to_string(),
            product.title.clone(),
            product.category.clone(),
            format_price(product.price),
            format!("{:.1} ({})", product.rating.rate, product.rating.count),
        ]);
    }
    table
}
