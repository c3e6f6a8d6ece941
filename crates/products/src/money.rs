use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clientbook_core::{DomainError, DomainResult, ValueObject};

/// Currencies a product amount can be denominated in.
///
/// Serialized as the ISO code; deserialized through [`FromStr`], so codes and
/// names are accepted in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Currency {
    #[serde(rename = "EUR")]
    Euro,
    #[serde(rename = "INR")]
    IndianRupee,
    #[serde(rename = "USD")]
    UsDollar,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Euro => "EUR",
            Currency::IndianRupee => "INR",
            Currency::UsDollar => "USD",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" | "EURO" => Ok(Currency::Euro),
            "INR" | "INDIAN_RUPEE" => Ok(Currency::IndianRupee),
            "USD" | "US_DOLLAR" => Ok(Currency::UsDollar),
            other => Err(DomainError::validation(format!("unknown currency: {other}"))),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A decimal value paired with the currency it is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    pub value: Decimal,
    pub currency: Currency,
}

impl ValueObject for Amount {}

impl Amount {
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Add two amounts of the same currency.
    pub fn checked_add(&self, other: &Amount) -> DomainResult<Amount> {
        if self.currency != other.currency {
            return Err(DomainError::currency_mismatch(self.currency, other.currency));
        }
        let value = self
            .value
            .checked_add(other.value)
            .ok_or_else(|| DomainError::invariant("amount overflow"))?;
        Ok(Amount::new(value, self.currency))
    }

    /// Sum a sequence of amounts sharing one currency.
    ///
    /// The currency of the first amount wins; any later amount in a different
    /// currency is a `CurrencyMismatch`. An empty sequence sums to zero in
    /// `default_currency`.
    pub fn sum<'a, I>(amounts: I, default_currency: Currency) -> DomainResult<Amount>
    where
        I: IntoIterator<Item = &'a Amount>,
    {
        let mut amounts = amounts.into_iter();
        let Some(first) = amounts.next() else {
            return Ok(Amount::zero(default_currency));
        };

        amounts.try_fold(*first, |total, next| total.checked_add(next))
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
