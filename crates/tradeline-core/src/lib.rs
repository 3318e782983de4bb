pub mod classify;
pub mod error;
pub mod model;
pub mod parsing;
pub mod tree;

pub use classify::{account_kind, classify, AccountKind, AccountViews};
pub use parsing::{normalize, NormalizeWarning, NormalizedReport};

use error::TradelineError;
use model::Report;

/// Main API entry point: turn raw bureau XML into a canonical report.
///
/// Builds the element tree and normalizes it. Only malformed XML or a
/// document without a usable root fails; every field-level problem is
/// defaulted and listed in the returned warnings.
pub fn normalize_xml(xml: &[u8]) -> Result<NormalizedReport, TradelineError> {
    let tree = tree::parse_tree(xml)?;
    let normalized = normalize(&tree)?;

    tracing::info!(
        accounts = normalized.report.accounts.len(),
        warnings = normalized.warnings.len(),
        pan_found = !normalized.report.basic.pan.is_empty(),
        "normalized bureau report"
    );

    Ok(normalized)
}

/// Load a previously normalized report from its JSON form.
pub fn report_from_json(json: &[u8]) -> Result<Report, TradelineError> {
    Ok(serde_json::from_slice(json)?)
}
