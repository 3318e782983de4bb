use serde_json::Value;

use super::list::{as_list, first_of};
use super::values::{leaf, Leaf};
use super::FieldReader;
use crate::model::{Account, Address};

const HOLDER_KEY: &str = "CAIS_Holder_Details";
const ADDRESS_KEY: &str = "CAIS_Holder_Address_Details";
const ID_KEY: &str = "CAIS_Holder_ID_Details";
const PAN_KEY: &str = "Income_TAX_PAN";

/// Map one account element into an [`Account`].
///
/// Also returns the account's PAN candidate, if it carries one: the ID
/// details are checked before the holder details.
pub fn map_account(node: &Value, fields: &mut FieldReader<'_>) -> (Account, Option<String>) {
    let entry = Some(node);
    let holder = first_of(node.get(HOLDER_KEY));
    let address = first_of(node.get(ADDRESS_KEY));

    let account = Account {
        bank: fields.text(entry, "Subscriber_Name", "bank").trim().to_string(),
        account_number: fields.text(entry, "Account_Number", "accountNumber"),
        portfolio_type: fields.text(entry, "Portfolio_Type", "portfolioType"),
        account_type: fields.text(entry, "Account_Type", "accountType"),
        current_balance: fields.number(entry, "Current_Balance", "currentBalance"),
        amount_past_due: fields.number(entry, "Amount_Past_Due", "amountPastDue"),
        open_date: fields.text(entry, "Open_Date", "openDate"),
        date_reported: fields.text(entry, "Date_Reported", "dateReported"),
        holder_name: holder_name(holder, fields),
        holder_address: holder_address(address, fields),
    };

    (account, pan_candidate(node))
}

/// Non-normalized first name and surname joined by a single space; a
/// missing part is left out.
fn holder_name(holder: Option<&Value>, fields: &mut FieldReader<'_>) -> String {
    let first = fields.text(holder, "First_Name_Non_Normalized", "holderName");
    let last = fields.text(holder, "Surname_Non_Normalized", "holderName");
    [first.trim(), last.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn holder_address(address: Option<&Value>, fields: &mut FieldReader<'_>) -> Address {
    Address {
        line1: fields.text(
            address,
            "First_Line_Of_Address_non_normalized",
            "holderAddress.line1",
        ),
        line2: fields.text(
            address,
            "Second_Line_Of_Address_non_normalized",
            "holderAddress.line2",
        ),
        city: fields.text(address, "City_non_normalized", "holderAddress.city"),
        state: fields.text(address, "State_non_normalized", "holderAddress.state"),
        postal_code: fields.text(
            address,
            "ZIP_Postal_Code_non_normalized",
            "holderAddress.postalCode",
        ),
        country: fields.text(address, "CountryCode_non_normalized", "holderAddress.country"),
    }
}

fn pan_candidate(node: &Value) -> Option<String> {
    as_list(node.get(ID_KEY))
        .into_iter()
        .chain(as_list(node.get(HOLDER_KEY)))
        .find_map(|section| match leaf(section.get(PAN_KEY)) {
            Leaf::Text(pan) if !pan.is_empty() => Some(pan.into_owned()),
            _ => None,
        })
}
