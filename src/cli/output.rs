use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::OutputMode;

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }
    let table = Table::new(data).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print rows as a table in table mode, `value` as JSON otherwise.
pub fn print_output<T: Tabled>(value: &serde_json::Value, rows: &[T], mode: OutputMode) {
    match mode {
        OutputMode::Json => print_json(value),
        OutputMode::Table => print_table(rows),
    }
}

pub fn print_error(err: &crate::error::AppError) {
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&err.to_json()).unwrap_or_default()
    );
}

/// `-` for empty cells.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
