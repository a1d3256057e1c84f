//! The fixed set of supported currencies and amount formatting.

use numfmt::{Formatter, Precision};
use serde::{Deserialize, Serialize};

/// A supported currency.
///
/// IDR and JPY have no minor unit and format with zero decimal places; every
/// other currency formats with two. This rounding is display-only, stored
/// amounts keep full precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indonesian Rupiah.
    #[default]
    Idr,
    /// US Dollar.
    Usd,
    /// Euro.
    Eur,
    /// British Pound.
    Gbp,
    /// Japanese Yen.
    Jpy,
    /// Singapore Dollar.
    Sgd,
    /// Malaysian Ringgit.
    Myr,
    /// Australian Dollar.
    Aud,
}

/// All currencies in display order.
pub const ALL_CURRENCIES: [Currency; 8] = [
    Currency::Idr,
    Currency::Usd,
    Currency::Eur,
    Currency::Gbp,
    Currency::Jpy,
    Currency::Sgd,
    Currency::Myr,
    Currency::Aud,
];

impl Currency {
    /// Parse a currency from its ISO code, falling back to the default (IDR)
    /// for unrecognized values.
    pub fn from_code(code: &str) -> Self {
        match code {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "JPY" => Currency::Jpy,
            "SGD" => Currency::Sgd,
            "MYR" => Currency::Myr,
            "AUD" => Currency::Aud,
            _ => Currency::Idr,
        }
    }

    /// The ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Idr => "IDR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Sgd => "SGD",
            Currency::Myr => "MYR",
            Currency::Aud => "AUD",
        }
    }

    /// The symbol shown before formatted amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Idr => "Rp",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Sgd => "S$",
            Currency::Myr => "RM",
            Currency::Aud => "A$",
        }
    }

    /// The full display name, e.g. for the currency select on the budget form.
    pub fn name(self) -> &'static str {
        match self {
            Currency::Idr => "Indonesian Rupiah",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
            Currency::Sgd => "Singapore Dollar",
            Currency::Myr => "Malaysian Ringgit",
            Currency::Aud => "Australian Dollar",
        }
    }

    /// The BCP 47 locale tag the currency is conventionally formatted for.
    pub fn locale(self) -> &'static str {
        match self {
            Currency::Idr => "id-ID",
            Currency::Usd => "en-US",
            Currency::Eur => "de-DE",
            Currency::Gbp => "en-GB",
            Currency::Jpy => "ja-JP",
            Currency::Sgd => "en-SG",
            Currency::Myr => "ms-MY",
            Currency::Aud => "en-AU",
        }
    }

    /// The number of minor-unit digits shown for this currency.
    pub fn decimal_places(self) -> u8 {
        match self {
            Currency::Idr | Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Format `amount` with the currency symbol, a thousands separator, and
    /// the currency's fixed number of decimal places.
    pub fn format(self, amount: f64) -> String {
        if self.decimal_places() == 0 {
            format_zero_decimal(self.symbol(), amount)
        } else {
            format_two_decimal(self.symbol(), amount)
        }
    }

    /// Format `amount` as a bare fixed-decimal number without a symbol or
    /// grouping, e.g. for CSV summary lines that must stay unquoted.
    pub fn format_plain(self, amount: f64) -> String {
        format!(
            "{:.precision$}",
            amount,
            precision = self.decimal_places() as usize
        )
    }
}

fn format_zero_decimal(symbol: &str, amount: f64) -> String {
    let amount = amount.round();

    if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{symbol} 0");
    }

    currency_formatter(symbol, amount, 0).fmt_string(amount.abs())
}

fn format_two_decimal(symbol: &str, amount: f64) -> String {
    if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{symbol} 0.00");
    }

    let mut formatted_string = currency_formatter(symbol, amount, 2).fmt_string(amount.abs());

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

fn currency_formatter(symbol: &str, amount: f64, decimals: u8) -> Formatter {
    let prefix = if amount < 0.0 {
        format!("-{symbol} ")
    } else {
        format!("{symbol} ")
    };

    Formatter::currency(&prefix)
        .expect("currency prefix within numfmt length limit")
        .precision(Precision::Decimals(decimals))
}
