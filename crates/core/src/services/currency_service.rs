use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::currency::Currency;
use crate::models::money::Money;
use crate::models::settings::Settings;
use crate::storage::preferences::{PreferenceStore, SELECTED_CURRENCY_KEY};

/// The display currency of one user session, plus where it is persisted.
///
/// There is no process-wide "current currency": each session (a user, a tab,
/// a request) owns its own `CurrencySession`, so concurrent sessions never see
/// each other's selection.
///
/// Amounts passed in are always in the base unit; conversion happens only
/// here, at display time, and never touches the stored amount.
#[derive(Debug)]
pub struct CurrencySession<S: PreferenceStore> {
    current: Currency,
    store: S,
}

impl<S: PreferenceStore> CurrencySession<S> {
    /// Start a session from whatever is persisted in `store`.
    ///
    /// A persisted code that is missing from the table (or unreadable) is
    /// ignored and `default` stays current.
    pub fn load(store: S, default: Currency) -> Self {
        let current = match store.get(SELECTED_CURRENCY_KEY) {
            Ok(Some(code)) => match Currency::from_code(&code) {
                Some(found) => found,
                None => {
                    warn!("Ignoring persisted currency '{code}': not in the currency table");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!("Could not read persisted currency, using {default}: {e}");
                default
            }
        };
        debug!("Currency session started with {current}");
        Self { current, store }
    }

    /// [`CurrencySession::load`] with `settings.default_currency` as the fallback.
    pub fn load_with_settings(store: S, settings: &Settings) -> Self {
        Self::load(store, settings.default_currency)
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.current
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Make `currency` current and persist its code.
    ///
    /// If persisting fails the selection is left unchanged.
    pub fn set_currency(&mut self, currency: Currency) -> Result<(), CoreError> {
        self.store.set(SELECTED_CURRENCY_KEY, currency.code())?;
        debug!("Display currency changed {} -> {}", self.current, currency);
        self.current = currency;
        Ok(())
    }

    /// Select a currency by code. An unknown code is a no-op and returns
    /// `Ok(false)`; the current selection is kept.
    pub fn select_code(&mut self, code: &str) -> Result<bool, CoreError> {
        match Currency::from_code(code) {
            Some(currency) => {
                self.set_currency(currency)?;
                Ok(true)
            }
            None => {
                warn!("Ignoring unknown currency code '{code}', keeping {}", self.current);
                Ok(false)
            }
        }
    }

    /// `amount * rate` in the current currency. Not rounded.
    #[must_use]
    pub fn convert(&self, amount: Money) -> Decimal {
        convert(amount, self.current)
    }

    /// Display string for a base-unit amount in the current currency.
    #[must_use]
    pub fn format(&self, amount: Money) -> String {
        format_amount(amount, self.current)
    }

    /// Display string with an explicit `+` or `-` in front of the absolute
    /// amount, for income/expense rows.
    #[must_use]
    pub fn format_signed(&self, amount: Money, positive: bool) -> String {
        let sign = if positive { '+' } else { '-' };
        format!("{sign}{}", self.format(amount.abs()))
    }
}

/// `amount * rate` for `currency`. Not rounded.
///
/// Saturates at `Decimal::MAX` / `Decimal::MIN` for amounts too large to
/// convert. Validated records never get there (see
/// [`crate::models::money::MAX_ABS_UNITS`]).
#[must_use]
pub fn convert(amount: Money, currency: Currency) -> Decimal {
    amount
        .amount()
        .checked_mul(currency.rate())
        .unwrap_or(if amount.is_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Render a base-unit amount in `currency`.
///
/// Zero-decimal currencies: `"UGX 3,700"` (symbol, space, whole units).
/// Others: `"$1,234.50"` (symbol glued to a two-decimal number).
/// Negative values keep their `-` after the symbol.
#[must_use]
pub fn format_amount(amount: Money, currency: Currency) -> String {
    let converted = convert(amount, currency);
    if currency.is_zero_decimal() {
        let whole = converted.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{} {}", currency.symbol(), group_thousands(whole, 0))
    } else {
        let cents = converted.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{}", currency.symbol(), group_thousands(cents, 2))
    }
}

/// Format `value` with exactly `dp` decimals and commas every three
/// integer digits.
fn group_thousands(value: Decimal, dp: usize) -> String {
    let plain = format!("{:.*}", dp, value.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = value.is_sign_negative() && !value.is_zero();
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
