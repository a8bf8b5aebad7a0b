//! Prices and their `fr-FR` currency rendering

use std::fmt;

/// A non-negative price, in hundredths of the currency unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub u64);

/// ISO 4217 currency code (`EUR`, `CHF`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(pub String);

/// Raised when a price cannot be rendered in currency style
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    UnknownCurrency(String),
}

impl Amount {
    pub fn from_units(units: u64) -> Self {
        Self(units * 100)
    }

    /// Read `"180"`, `"180.5"`, `"180,50"` (surrounding spaces allowed)
    ///
    /// At most two decimals are accepted, negative or signed values are not.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (units, cents) = match s.find(|c: char| c == '.' || c == ',') {
            Some(idx) => (&s[..idx], &s[idx + 1..]),
            None => (s, ""),
        };
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if units.is_empty() || !digits(units) || !digits(cents) || cents.len() > 2 {
            return None;
        }
        let units = units.parse::<u64>().ok()?;
        let cents = match cents.len() {
            0 => 0,
            1 => cents.parse::<u64>().ok()? * 10,
            _ => cents.parse::<u64>().ok()?,
        };
        units.checked_mul(100)?.checked_add(cents).map(Self)
    }

    pub fn units(self) -> u64 {
        self.0 / 100
    }

    pub fn cents(self) -> u64 {
        self.0 % 100
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cents() == 0 {
            write!(f, "{}", self.units())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents())
        }
    }
}

impl Currency {
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Symbol used by the `fr-FR` locale
    fn symbol(&self) -> Option<&'static str> {
        Some(match self.0.as_str() {
            "EUR" => "€",
            "CHF" => "CHF",
            "USD" => "$US",
            "GBP" => "£GB",
            _ => return None,
        })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::UnknownCurrency(code) => write!(f, "no symbol known for currency '{}'", code),
        }
    }
}

const GROUP_SEP: char = '\u{202f}';
const SYMBOL_SEP: char = '\u{a0}';

/// Currency style rendering: `180,00 €`, `1 234,50 €`
pub fn format_price(amount: Amount, currency: &Currency) -> Result<String, MoneyError> {
    let symbol = currency
        .symbol()
        .ok_or_else(|| MoneyError::UnknownCurrency(currency.code().to_string()))?;
    let digits = amount.units().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEP);
        }
        grouped.push(c);
    }
    Ok(format!("{},{:02}{}{}", grouped, amount.cents(), SYMBOL_SEP, symbol))
}

/// Plain fallback when currency style is unavailable: `180 XPF`
pub fn format_price_plain(amount: Amount, currency: &Currency) -> String {
    format!("{} {}", amount, currency.code())
}

/// Currency style when possible, plain representation otherwise
pub fn display_price(amount: Amount, currency: &Currency) -> String {
    format_price(amount, currency).unwrap_or_else(|err| {
        tracing::debug!(%err, "falling back to plain price");
        format_price_plain(amount, currency)
    })
}
