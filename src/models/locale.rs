//! Currency display conventions
//!
//! A locale decides the currency symbol, digit grouping and decimal
//! separator used when amounts are rendered for the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LocaleTag {
    /// Brazilian real, e.g. "R$ 1.234,56"
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// US dollar, e.g. "$1,234.56"
    #[serde(rename = "en-US")]
    EnUs,
}

impl LocaleTag {
    /// The formatting rules for this locale
    pub fn currency(&self) -> CurrencyLocale {
        match self {
            Self::PtBr => CurrencyLocale::pt_br(),
            Self::EnUs => CurrencyLocale::en_us(),
        }
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PtBr => write!(f, "pt-BR"),
            Self::EnUs => write!(f, "en-US"),
        }
    }
}

impl FromStr for LocaleTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" | "br" => Ok(Self::PtBr),
            "en-us" | "en" | "us" => Ok(Self::EnUs),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}

/// Formatting rules for a currency amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyLocale {
    pub symbol: String,
    pub grouping_separator: char,
    pub decimal_separator: char,
    /// Whether a space sits between the symbol and the digits
    pub symbol_spacing: bool,
}

impl CurrencyLocale {
    pub fn pt_br() -> Self {
        Self {
            symbol: "R$".to_string(),
            grouping_separator: '.',
            decimal_separator: ',',
            symbol_spacing: true,
        }
    }

    pub fn en_us() -> Self {
        Self {
            symbol: "$".to_string(),
            grouping_separator: ',',
            decimal_separator: '.',
            symbol_spacing: false,
        }
    }

    /// Insert the grouping separator every three digits from the right
    pub fn group_digits(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(ch);
        }
        out
    }
}

impl Default for CurrencyLocale {
    fn default() -> Self {
        LocaleTag::default().currency()
    }
}
