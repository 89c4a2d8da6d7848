//! Transaction display formatting
//!
//! Formats transactions for terminal output: the paged register table used by
//! `pocketbook list` and the detail view used by `show`.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::LocaleConfig;
use crate::models::Transaction;
use crate::services::Page;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, locale: &LocaleConfig) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format(&locale.date_format).to_string(),
            description: truncate(&txn.description, 32),
            kind: txn.kind.label(),
            amount: format_signed_amount(txn, locale),
        }
    }
}

/// Amount with an explicit sign: "+3.500,00 €" or "-89,99 €"
pub fn format_signed_amount(txn: &Transaction, locale: &LocaleConfig) -> String {
    let formatted = locale.format_money(txn.amount);
    if txn.is_deposit() {
        format!("+{}", formatted)
    } else {
        format!("-{}", formatted)
    }
}

/// Format one page of the register as a table with a page footer
pub fn format_transaction_table(page: &Page, locale: &LocaleConfig) -> String {
    if page.items.is_empty() {
        return if page.total_matched == 0 {
            "No transactions found.\n".to_string()
        } else {
            format!(
                "Page {} is empty ({} pages).\n",
                page.page, page.page_count
            )
        };
    }

    let rows: Vec<RegisterRow> = page
        .items
        .iter()
        .map(|txn| RegisterRow::new(txn, locale))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    format!(
        "{}\nPage {} of {} ({} transactions)\n",
        table, page.page, page.page_count, page.total_matched
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, locale: &LocaleConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", txn.date.format(&locale.date_format)));
    output.push_str(&format!("Type:        {}\n", txn.kind.label()));
    output.push_str(&format!("Amount:      {}\n", format_signed_amount(txn, locale)));
    output.push_str(&format!("Description: {}\n", txn.description));

    output
}

/// Format a short transaction summary (one line)
pub fn format_transaction_short(txn: &Transaction, locale: &LocaleConfig) -> String {
    format!(
        "{} {} {} {}",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        txn.description,
        format_signed_amount(txn, locale)
    )
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
