//! Expense categories
//!
//! The category set is fixed. Records store the internal key; the display
//! layer shows a label for the configured locale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language for labels and amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Brazilian Portuguese (default)
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// English
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// Decimal separator used when formatting amounts
    pub fn decimal_separator(&self) -> char {
        match self {
            Self::PtBr => ',',
            Self::En => '.',
        }
    }

    /// Parse a locale tag such as "pt-BR" or "en"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Some(Self::PtBr),
            "en" | "en-us" | "en_us" | "en-gb" => Some(Self::En),
            _ => None,
        }
    }

    /// The canonical tag for this locale
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Food and groceries
    Alimentacao,
    /// Transport
    Transporte,
    /// Entertainment
    Lazer,
    /// Shopping
    Compras,
    /// Bills and utilities
    Contas,
    /// Health
    Saude,
    /// Education
    Educacao,
    /// Travel
    Viagem,
    /// Anything else
    Outros,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Category::Alimentacao,
        Category::Transporte,
        Category::Lazer,
        Category::Compras,
        Category::Contas,
        Category::Saude,
        Category::Educacao,
        Category::Viagem,
        Category::Outros,
    ];

    /// The internal key persisted with each record
    pub fn key(&self) -> &'static str {
        match self {
            Self::Alimentacao => "alimentacao",
            Self::Transporte => "transporte",
            Self::Lazer => "lazer",
            Self::Compras => "compras",
            Self::Contas => "contas",
            Self::Saude => "saude",
            Self::Educacao => "educacao",
            Self::Viagem => "viagem",
            Self::Outros => "outros",
        }
    }

    /// Look up a category by key (case-insensitive, surrounding whitespace ignored)
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Label shown to the user
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::PtBr => match self {
                Self::Alimentacao => "Alimentação",
                Self::Transporte => "Transporte",
                Self::Lazer => "Lazer",
                Self::Compras => "Compras",
                Self::Contas => "Contas",
                Self::Saude => "Saúde",
                Self::Educacao => "Educação",
                Self::Viagem => "Viagem",
                Self::Outros => "Outros",
            },
            Locale::En => match self {
                Self::Alimentacao => "Food",
                Self::Transporte => "Transport",
                Self::Lazer => "Entertainment",
                Self::Compras => "Shopping",
                Self::Contas => "Bills & Utilities",
                Self::Saude => "Health",
                Self::Educacao => "Education",
                Self::Viagem => "Travel",
                Self::Outros => "Other",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for unknown category keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
