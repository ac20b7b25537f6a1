//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use crud_core::view::{product_lines, user_lines, Indicator};
use crud_core::{Level, ListView, Notification, Product, StatusView, User};

/// Print a notification in its level's colour
pub fn notification(n: &Notification) {
    match n.level {
        Level::Success => println!("{}", n.message.green()),
        Level::Error => eprintln!("{}", n.message.red()),
    }
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a dimmed informational line
pub fn muted(msg: &str) {
    println!("{}", msg.dimmed());
}

pub fn status(status: &StatusView) {
    println!("Backend:  {}", indicator(status.backend));
    println!("Database: {}", indicator(status.database));
}

fn indicator(indicator: Indicator) -> String {
    if indicator.ok {
        indicator.text.green().to_string()
    } else {
        indicator.text.red().to_string()
    }
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn users(view: &ListView<User>) {
    render(view, |user| {
        vec![user.name.clone(), user_lines(user).join("\n"), user.id.to_string()]
    });
}

pub fn products(view: &ListView<Product>) {
    render(view, |product| {
        vec![product.name.clone(), product_lines(product).join("\n"), product.id.to_string()]
    });
}

fn render<T>(view: &ListView<T>, row: impl Fn(&T) -> Vec<String>) {
    match view {
        ListView::Loading => muted("Loading..."),
        ListView::Empty(placeholder) => muted(placeholder),
        ListView::Failed(message) => eprintln!("{}", message.red()),
        ListView::Items(items) => {
            let mut table = create_table();
            table.set_header(vec!["Name", "Details", "ID"]);
            for item in items {
                table.add_row(row(item));
            }
            println!("{table}");
        }
    }
}
