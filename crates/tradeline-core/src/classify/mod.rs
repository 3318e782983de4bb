pub mod engine;
pub mod outcome;

pub use engine::{account_kind, classify, CARD_ACCOUNT_TYPES, REVOLVING_PORTFOLIO};
pub use outcome::{AccountKind, AccountViews};
