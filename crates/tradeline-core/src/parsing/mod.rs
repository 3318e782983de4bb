pub mod account;
pub mod list;
pub mod values;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TradelineError;
use crate::model::{Account, BasicDetails, Report, Summary};
use list::{as_list, first_of};
use values::{coerce_number, coerce_text};

/// Envelope some bureau responses are wrapped in.
pub const PROFILE_ENVELOPE: &str = "INProfileResponse";

const APPLICANT_PATH: &[&str] = &[
    "Current_Application",
    "Current_Application_Details",
    "Current_Applicant_Details",
];
const CREDIT_ACCOUNT_PATH: &[&str] = &["CAIS_Account", "CAIS_Summary", "Credit_Account"];
const OUTSTANDING_PATH: &[&str] = &["CAIS_Account", "CAIS_Summary", "Total_Outstanding_Balance"];
const ENQUIRIES_PATH: &[&str] = &["TotalCAPS_Summary"];
const ACCOUNTS_PARENT_PATH: &[&str] = &["CAIS_Account"];
const ACCOUNTS_KEY: &str = "CAIS_Account_DETAILS";
const SCORE_PATH: &[&str] = &["SCORE"];

/// A field that was present in the source but could not be used, and was
/// replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeWarning {
    /// Canonical field path, e.g. `accounts[1].currentBalance`.
    pub field: String,
    pub reason: String,
}

/// Output of the normalizer: the report plus everything that was defaulted
/// because it was malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedReport {
    pub report: Report,
    pub warnings: Vec<NormalizeWarning>,
}

/// Reads leaves through the coercion rules and records a warning for every
/// value that had to be discarded.
pub struct FieldReader<'w> {
    prefix: String,
    warnings: &'w mut Vec<NormalizeWarning>,
}

impl<'w> FieldReader<'w> {
    pub fn new(prefix: impl Into<String>, warnings: &'w mut Vec<NormalizeWarning>) -> Self {
        FieldReader {
            prefix: prefix.into(),
            warnings,
        }
    }

    pub fn text(&mut self, node: Option<&Value>, key: &str, field: &str) -> String {
        let (text, reason) = coerce_text(node.and_then(|n| n.get(key)));
        if let Some(reason) = reason {
            self.warn(field, reason);
        }
        text
    }

    pub fn number(&mut self, node: Option<&Value>, key: &str, field: &str) -> Decimal {
        let (value, reason) = coerce_number(node.and_then(|n| n.get(key)));
        if let Some(reason) = reason {
            self.warn(field, reason);
        }
        value
    }

    pub fn warn(&mut self, field: &str, reason: impl Into<String>) {
        let warning = NormalizeWarning {
            field: format!("{}{}", self.prefix, field),
            reason: reason.into(),
        };
        tracing::warn!(field = %warning.field, reason = %warning.reason, "defaulted malformed field");
        self.warnings.push(warning);
    }
}

/// Walk `path` from `node`. Intermediate elements that repeat are entered
/// through their first occurrence.
pub fn lookup<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(node, |current, key| first_of(current.get(*key)))
}

/// Map one parsed bureau document into a canonical report.
///
/// Accepts the document with or without its profile envelope. Missing or
/// malformed fields fall back to their defaults; the only error is a tree
/// whose root is not an element map at all.
pub fn normalize(tree: &Value) -> Result<NormalizedReport, TradelineError> {
    let root = tree.as_object().ok_or_else(|| {
        TradelineError::NotATree(format!("expected an element map at the root, found {}", kind_of(tree)))
    })?;
    let profile = first_of(root.get(PROFILE_ENVELOPE)).unwrap_or(tree);
    tracing::debug!(
        wrapped = root.contains_key(PROFILE_ENVELOPE),
        "normalizing bureau profile"
    );

    let mut warnings = Vec::new();
    let mut fields = FieldReader::new("", &mut warnings);

    let mut basic = read_basic(profile, &mut fields);
    let summary = read_summary(profile, &mut fields);

    let entries = as_list(lookup(profile, ACCOUNTS_PARENT_PATH).and_then(|p| p.get(ACCOUNTS_KEY)));
    let mut accounts = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            fields.warn(
                &format!("accounts[{i}]"),
                format!("account entry is {}, not an element map", kind_of(entry)),
            );
            accounts.push(Account::default());
            continue;
        }
        let mut account_fields = FieldReader::new(format!("accounts[{i}]."), fields.warnings);
        let (account, pan_candidate) = account::map_account(entry, &mut account_fields);
        if basic.pan.is_empty() {
            if let Some(pan) = pan_candidate {
                tracing::debug!(account = i, "backfilled PAN from account");
                basic.pan = pan;
            }
        }
        accounts.push(account);
    }

    let score = read_score(profile, &mut fields);

    tracing::debug!(
        accounts = accounts.len(),
        warnings = warnings.len(),
        "normalized bureau profile"
    );

    Ok(NormalizedReport {
        report: Report {
            basic,
            summary,
            accounts,
            score,
        },
        warnings,
    })
}

fn read_basic(profile: &Value, fields: &mut FieldReader<'_>) -> BasicDetails {
    let applicant = lookup(profile, APPLICANT_PATH);
    BasicDetails {
        first_name: fields.text(applicant, "First_Name", "basic.firstName"),
        last_name: fields.text(applicant, "Last_Name", "basic.lastName"),
        mobile: fields.text(applicant, "MobilePhoneNumber", "basic.mobile"),
        pan: String::new(),
    }
}

fn read_summary(profile: &Value, fields: &mut FieldReader<'_>) -> Summary {
    let credit = lookup(profile, CREDIT_ACCOUNT_PATH);
    let outstanding = lookup(profile, OUTSTANDING_PATH);
    let enquiries = lookup(profile, ENQUIRIES_PATH);
    Summary {
        total_accounts: fields.number(credit, "CreditAccountTotal", "summary.totalAccounts"),
        active_accounts: fields.number(credit, "CreditAccountActive", "summary.activeAccounts"),
        closed_accounts: fields.number(credit, "CreditAccountClosed", "summary.closedAccounts"),
        outstanding_all: fields.number(outstanding, "Outstanding_Balance_All", "summary.outstandingAll"),
        outstanding_secured: fields.number(
            outstanding,
            "Outstanding_Balance_Secured",
            "summary.outstandingSecured",
        ),
        outstanding_unsecured: fields.number(
            outstanding,
            "Outstanding_Balance_UnSecured",
            "summary.outstandingUnsecured",
        ),
        last_7_days_enquiries: fields.number(
            enquiries,
            "TotalCAPSLast7Days",
            "summary.last7daysEnquiries",
        ),
    }
}

fn read_score(profile: &Value, fields: &mut FieldReader<'_>) -> Decimal {
    let score = fields.number(lookup(profile, SCORE_PATH), "BureauScore", "score");
    if score < Decimal::ZERO {
        fields.warn("score", format!("negative score {score} clamped to 0"));
        return Decimal::ZERO;
    }
    score
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an element map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn profile(body: Value) -> Value {
        json!({ "INProfileResponse": body })
    }

    #[test]
    fn test_root_must_be_a_map() {
        for tree in [json!("text"), json!([1, 2]), json!(null), json!(42)] {
            assert!(matches!(normalize(&tree), Err(TradelineError::NotATree(_))));
        }
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let out = normalize(&json!({})).unwrap();
        assert_eq!(out.report, Report::default());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_wrapped_and_unwrapped_agree() {
        let body = json!({
            "Current_Application": {"Current_Application_Details": {"Current_Applicant_Details": {
                "First_Name": "Sagar", "Last_Name": "Ugle", "MobilePhoneNumber": "9999999999"
            }}},
            "SCORE": {"BureauScore": "745"}
        });
        let wrapped = normalize(&profile(body.clone())).unwrap().report;
        let bare = normalize(&body).unwrap().report;
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.basic.first_name, "Sagar");
        assert_eq!(wrapped.basic.mobile, "9999999999");
        assert_eq!(wrapped.score, dec!(745));
    }

    #[test]
    fn test_summary_counters() {
        let tree = profile(json!({
            "CAIS_Account": {"CAIS_Summary": {
                "Credit_Account": {
                    "CreditAccountTotal": "4",
                    "CreditAccountActive": "3",
                    "CreditAccountClosed": "1"
                },
                "Total_Outstanding_Balance": {
                    "Outstanding_Balance_All": "245000",
                    "Outstanding_Balance_Secured": "200000",
                    "Outstanding_Balance_UnSecured": "45000"
                }
            }},
            "TotalCAPS_Summary": {"TotalCAPSLast7Days": "2"}
        }));
        let summary = normalize(&tree).unwrap().report.summary;
        assert_eq!(summary.total_accounts, dec!(4));
        assert_eq!(summary.active_accounts, dec!(3));
        assert_eq!(summary.closed_accounts, dec!(1));
        assert_eq!(summary.outstanding_all, dec!(245000));
        assert_eq!(summary.outstanding_secured, dec!(200000));
        assert_eq!(summary.outstanding_unsecured, dec!(45000));
        assert_eq!(summary.last_7_days_enquiries, dec!(2));
    }

    #[test]
    fn test_non_numeric_counter_defaults_with_warning() {
        let tree = profile(json!({
            "TotalCAPS_Summary": {"TotalCAPSLast7Days": "lots"},
            "SCORE": {"BureauScore": ""}
        }));
        let out = normalize(&tree).unwrap();
        assert_eq!(out.report.summary.last_7_days_enquiries, Decimal::ZERO);
        assert_eq!(out.report.score, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].field, "summary.last7daysEnquiries");
    }

    #[test]
    fn test_negative_score_is_clamped() {
        let out = normalize(&profile(json!({"SCORE": {"BureauScore": "-1"}}))).unwrap();
        assert_eq!(out.report.score, Decimal::ZERO);
        assert_eq!(out.warnings[0].field, "score");
    }

    #[test]
    fn test_single_account_is_wrapped() {
        let tree = profile(json!({
            "CAIS_Account": {"CAIS_Account_DETAILS": {"Account_Number": "XXXX1234"}}
        }));
        let accounts = normalize(&tree).unwrap().report.accounts;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].account_number, "XXXX1234");
    }

    #[test]
    fn test_missing_accounts_is_empty_list() {
        let tree = profile(json!({"CAIS_Account": {"CAIS_Summary": {}}}));
        let out = normalize(&tree).unwrap();
        assert!(out.report.accounts.is_empty());
        assert_eq!(out.report.summary, Summary::default());
    }

    #[test]
    fn test_accounts_keep_document_order() {
        let tree = profile(json!({"CAIS_Account": {"CAIS_Account_DETAILS": [
            {"Account_Number": "A"}, {"Account_Number": "B"}, {"Account_Number": "C"}
        ]}}));
        let numbers: Vec<String> = normalize(&tree)
            .unwrap()
            .report
            .accounts
            .into_iter()
            .map(|a| a.account_number)
            .collect();
        assert_eq!(numbers, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_pan_backfill_takes_first_in_document_order() {
        let tree = profile(json!({"CAIS_Account": {"CAIS_Account_DETAILS": [
            {"Account_Number": "1"},
            {"Account_Number": "2", "CAIS_Holder_Details": {"Income_TAX_PAN": "FIRST1234A"}},
            {"Account_Number": "3", "CAIS_Holder_ID_Details": {"Income_TAX_PAN": "LATER1234B"}}
        ]}}));
        let report = normalize(&tree).unwrap().report;
        assert_eq!(report.basic.pan, "FIRST1234A");
        assert_eq!(report.accounts.len(), 3);
    }

    #[test]
    fn test_non_object_account_entry_still_counts() {
        let tree = profile(json!({"CAIS_Account": {"CAIS_Account_DETAILS": [
            {"Account_Number": "1"}, "stray text"
        ]}}));
        let out = normalize(&tree).unwrap();
        assert_eq!(out.report.accounts.len(), 2);
        assert_eq!(out.report.accounts[1], Account::default());
        assert_eq!(out.warnings[0].field, "accounts[1]");
    }

    #[test]
    fn test_field_paths_in_account_warnings() {
        let tree = profile(json!({"CAIS_Account": {"CAIS_Account_DETAILS": [
            {"Current_Balance": "12"}, {"Current_Balance": "twelve"}
        ]}}));
        let out = normalize(&tree).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].field, "accounts[1].currentBalance");
    }

    #[test]
    fn test_lookup_enters_first_repeated_intermediate() {
        let tree = json!({"A": [{"B": "first"}, {"B": "second"}]});
        assert_eq!(lookup(&tree, &["A", "B"]), Some(&json!("first")));
        assert_eq!(lookup(&tree, &["A", "C"]), None);
        assert_eq!(lookup(&tree, &[]), Some(&tree));
    }
}
