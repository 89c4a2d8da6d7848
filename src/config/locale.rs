//! Locale presets for money and date display
//!
//! Only affects formatting. Ledger arithmetic is locale-independent.

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Default locale code
pub const DEFAULT_LOCALE: &str = "de-DE";

/// How amounts and dates are rendered for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// BCP-47 style code ("de-DE")
    pub code: String,
    /// ISO 4217 currency code of the ledger
    pub currency: String,
    /// Currency symbol
    pub symbol: String,
    /// Separator between units and cents
    pub decimal_separator: char,
    /// Separator between thousands groups
    pub group_separator: char,
    /// Whether the symbol follows the number ("12,50 €")
    pub symbol_after: bool,
    /// strftime pattern for dates
    pub date_format: String,
}

impl LocaleConfig {
    fn preset(
        code: &str,
        currency: &str,
        symbol: &str,
        decimal_separator: char,
        group_separator: char,
        symbol_after: bool,
        date_format: &str,
    ) -> Self {
        Self {
            code: code.to_string(),
            currency: currency.to_string(),
            symbol: symbol.to_string(),
            decimal_separator,
            group_separator,
            symbol_after,
            date_format: date_format.to_string(),
        }
    }

    /// All built-in locales
    pub fn supported() -> Vec<Self> {
        vec![
            Self::preset("de-DE", "EUR", "€", ',', '.', true, "%d.%m.%Y"),
            Self::preset("en-US", "USD", "$", '.', ',', false, "%m/%d/%Y"),
            Self::preset("en-GB", "GBP", "£", '.', ',', false, "%d/%m/%Y"),
            Self::preset("fr-FR", "EUR", "€", ',', ' ', true, "%d/%m/%Y"),
        ]
    }

    /// Look up a built-in locale, falling back to the default for unknown codes
    pub fn resolve(code: &str) -> Self {
        match Self::supported()
            .into_iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
        {
            Some(locale) => locale,
            None => {
                tracing::warn!("Locale \"{}\" not supported. Using default.", code);
                Self::default()
            }
        }
    }

    /// Render an amount with grouping, separators and the currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        let number = self.format_number(amount.units().abs(), amount.cents_part());
        let sign = if amount.is_negative() { "-" } else { "" };
        if self.symbol_after {
            format!("{}{} {}", sign, number, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, number)
        }
    }

    /// Render a foreign-currency value (already converted) with a currency code
    pub fn format_foreign(&self, value: f64, currency: &str) -> String {
        let cents = (value.abs() * 100.0).round() as i64;
        let number = self.format_number(cents / 100, cents % 100);
        let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
        format!("{}{} {}", sign, currency, number)
    }

    fn format_number(&self, units: i64, cents: i64) -> String {
        let digits = units.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(ch);
        }
        format!("{}{}{:02}", grouped, self.decimal_separator, cents)
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::preset("de-DE", "EUR", "€", ',', '.', true, "%d.%m.%Y")
    }
}
