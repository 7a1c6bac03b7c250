use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display currencies with their formatting rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Brazilian Real (shown without cents on the dashboard)
    BRL,
    /// US Dollar (2 decimal places)
    USD,
    /// Indonesian Rupiah (no decimal places)
    IDR,
}

impl Currency {
    /// Returns the number of decimal places shown for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::BRL | Currency::IDR => 0,
            Currency::USD => 2,
        }
    }

    /// Display symbol placed before the amount
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "US$",
            Currency::IDR => "Rp",
        }
    }

    pub fn thousands_separator(&self) -> char {
        match self {
            Currency::BRL | Currency::IDR => '.',
            Currency::USD => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Currency::BRL | Currency::IDR => ',',
            Currency::USD => '.',
        }
    }

    /// Rounds a decimal value to the display scale (banker's rounding)
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Formats an amount with symbol, thousands grouping and the display scale
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{} {}", self.symbol(), self.format_number(amount))
    }

    /// Formats a number with this currency's separators but no symbol
    pub fn format_number(&self, amount: Decimal) -> String {
        let rendered = format!("{:.width$}", self.round(amount), width = self.scale() as usize);
        let (negative, digits) = match rendered.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, rendered.as_str()),
        };
        let (integer, fraction) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        let mut out = String::with_capacity(rendered.len() + integer.len() / 3);
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(integer, self.thousands_separator()));
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator());
            out.push_str(fraction);
        }
        out
    }
}

/// Inserts `separator` between every group of three digits
pub fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::BRL => write!(f, "BRL"),
            Currency::USD => write!(f, "USD"),
            Currency::IDR => write!(f, "IDR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BRL" => Ok(Currency::BRL),
            "USD" => Ok(Currency::USD),
            "IDR" => Ok(Currency::IDR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
