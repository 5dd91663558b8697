use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A display currency from the fixed currency table.
///
/// The table is closed: there is no way to build a currency outside of it.
/// All amounts are stored in the base unit (USD) and converted with
/// [`Currency::rate`] only when displayed.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    UGX,
    USD,
    EUR,
    GBP,
    KES,
    TZS,
    NGN,
    ZAR,
}

impl Currency {
    /// Every currency in table order. The first entry is the default.
    pub const ALL: [Currency; 8] = [
        Currency::UGX,
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::KES,
        Currency::TZS,
        Currency::NGN,
        Currency::ZAR,
    ];

    /// The base currency all stored amounts are expressed in.
    pub const BASE: Currency = Currency::USD;

    /// ISO-like code, the unique key of the table.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::UGX => "UGX",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::KES => "KES",
            Currency::TZS => "TZS",
            Currency::NGN => "NGN",
            Currency::ZAR => "ZAR",
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::UGX => "UGX",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::KES => "KSh",
            Currency::TZS => "TSh",
            Currency::NGN => "₦",
            Currency::ZAR => "R",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Currency::UGX => "Uganda Shilling",
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::KES => "Kenyan Shilling",
            Currency::TZS => "Tanzanian Shilling",
            Currency::NGN => "Nigerian Naira",
            Currency::ZAR => "South African Rand",
        }
    }

    /// Units of this currency per one base unit. Always > 0; 1 for the base.
    #[must_use]
    pub fn rate(&self) -> Decimal {
        match self {
            Currency::UGX => Decimal::new(3700, 0),
            Currency::USD => Decimal::ONE,
            Currency::EUR => Decimal::new(92, 2),
            Currency::GBP => Decimal::new(79, 2),
            Currency::KES => Decimal::new(129, 0),
            Currency::TZS => Decimal::new(2500, 0),
            Currency::NGN => Decimal::new(780, 0),
            Currency::ZAR => Decimal::new(185, 1),
        }
    }

    /// Zero-decimal currencies are displayed rounded to whole units.
    #[must_use]
    pub fn is_zero_decimal(&self) -> bool {
        matches!(
            self,
            Currency::UGX | Currency::KES | Currency::TZS | Currency::NGN
        )
    }

    /// Look a code up in the table (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Currency> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| CoreError::UnknownCurrency(s.trim().to_string()))
    }
}
