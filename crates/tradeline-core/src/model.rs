use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Postal address of an account holder. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.line1.is_empty()
            && self.line2.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
    }
}

/// Non-empty parts joined by ", ".
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [
            &self.line1,
            &self.line2,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|part| !part.is_empty())
        .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// One tradeline as reported by the bureau.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    /// Subscriber (lender) name, trimmed.
    pub bank: String,
    pub account_number: String,
    /// Raw bureau portfolio code (e.g. "R" for revolving).
    pub portfolio_type: String,
    /// Raw bureau account type code (e.g. "10").
    pub account_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_past_due: Decimal,
    /// Bureau-native date text, kept as reported.
    pub open_date: String,
    pub date_reported: String,
    pub holder_name: String,
    pub holder_address: Address,
}

impl Account {
    pub fn status(&self) -> AccountStatus {
        if self.current_balance > Decimal::ZERO {
            AccountStatus::Active
        } else {
            AccountStatus::Closed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Closed,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "Active"),
            AccountStatus::Closed => write!(f, "Closed"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicDetails {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    /// Backfilled from the first account carrying a tax identifier.
    pub pan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_accounts: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub active_accounts: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub closed_accounts: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub outstanding_all: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub outstanding_secured: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub outstanding_unsecured: Decimal,
    #[serde(rename = "last7daysEnquiries", with = "rust_decimal::serde::float")]
    pub last_7_days_enquiries: Decimal,
}

/// The canonical credit report produced from one bureau document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub basic: BasicDetails,
    pub summary: Summary,
    /// Tradelines in source document order.
    pub accounts: Vec<Account>,
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
}
