use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Account;

/// Which view a tradeline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    CreditCard,
    Loan,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::CreditCard => write!(f, "Credit card"),
            AccountKind::Loan => write!(f, "Loan"),
        }
    }
}

/// A report's accounts split into disjoint views.
///
/// Every input account appears in exactly one list, in its original
/// relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountViews {
    pub credit_cards: Vec<Account>,
    pub loans: Vec<Account>,
}

impl AccountViews {
    pub fn len(&self) -> usize {
        self.credit_cards.len() + self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credit_cards.is_empty() && self.loans.is_empty()
    }
}
