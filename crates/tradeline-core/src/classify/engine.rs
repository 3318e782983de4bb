use crate::classify::outcome::{AccountKind, AccountViews};
use crate::model::Account;

/// Portfolio code for revolving credit.
pub const REVOLVING_PORTFOLIO: &str = "R";

/// Account type codes reserved for card products.
pub const CARD_ACCOUNT_TYPES: &[&str] = &["10", "11", "12", "13"];

/// Decide whether a tradeline is a credit card or a loan.
///
/// A card is either in the revolving portfolio (case-insensitive) or carries
/// one of the card account type codes. Everything else is a loan.
pub fn account_kind(account: &Account) -> AccountKind {
    let portfolio = account.portfolio_type.trim();
    let account_type = account.account_type.trim();

    if portfolio.eq_ignore_ascii_case(REVOLVING_PORTFOLIO)
        || CARD_ACCOUNT_TYPES.contains(&account_type)
    {
        AccountKind::CreditCard
    } else {
        AccountKind::Loan
    }
}

/// Partition accounts into credit-card and loan views, keeping input order.
pub fn classify(accounts: &[Account]) -> AccountViews {
    let mut views = AccountViews::default();
    for account in accounts {
        match account_kind(account) {
            AccountKind::CreditCard => views.credit_cards.push(account.clone()),
            AccountKind::Loan => views.loans.push(account.clone()),
        }
    }
    tracing::debug!(
        credit_cards = views.credit_cards.len(),
        loans = views.loans.len(),
        "classified accounts"
    );
    views
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(number: &str, portfolio: &str, account_type: &str) -> Account {
        Account {
            account_number: number.into(),
            portfolio_type: portfolio.into(),
            account_type: account_type.into(),
            ..Default::default()
        }
    }

    fn numbers(accounts: &[Account]) -> Vec<&str> {
        accounts.iter().map(|a| a.account_number.as_str()).collect()
    }

    #[test]
    fn test_revolving_portfolio_is_card_regardless_of_type() {
        for portfolio in ["R", "r", " R ", "\tr\n"] {
            let a = account("1", portfolio, "05");
            assert_eq!(account_kind(&a), AccountKind::CreditCard, "{portfolio:?}");
        }
    }

    #[test]
    fn test_card_type_codes_with_empty_portfolio() {
        for code in ["10", "11", "12", "13", " 11 "] {
            let a = account("1", "", code);
            assert_eq!(account_kind(&a), AccountKind::CreditCard, "{code:?}");
        }
    }

    #[test]
    fn test_other_codes_are_loans() {
        assert_eq!(account_kind(&account("1", "I", "01")), AccountKind::Loan);
        assert_eq!(account_kind(&account("1", "M", "02")), AccountKind::Loan);
        assert_eq!(account_kind(&account("1", "", "")), AccountKind::Loan);
        assert_eq!(account_kind(&account("1", "RR", "")), AccountKind::Loan);
        assert_eq!(account_kind(&account("1", "", "1")), AccountKind::Loan);
        assert_eq!(account_kind(&account("1", "", "010")), AccountKind::Loan);
    }

    #[test]
    fn test_empty_input() {
        let views = classify(&[]);
        assert!(views.is_empty());
        assert_eq!(views.len(), 0);
    }

    #[test]
    fn test_partition_is_total_and_ordered() {
        let accounts = vec![
            account("A", "I", "01"),
            account("B", "R", "10"),
            account("C", "", ""),
            account("D", "", "12"),
            account("E", "M", "02"),
            account("F", "r", "05"),
        ];
        let views = classify(&accounts);

        assert_eq!(numbers(&views.credit_cards), vec!["B", "D", "F"]);
        assert_eq!(numbers(&views.loans), vec!["A", "C", "E"]);
        assert_eq!(views.len(), accounts.len());

        for a in &accounts {
            let in_cards = views.credit_cards.contains(a) as usize;
            let in_loans = views.loans.contains(a) as usize;
            assert_eq!(in_cards + in_loans, 1, "{}", a.account_number);
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let accounts = vec![account("A", " r ", "10")];
        let before = accounts.clone();
        let _ = classify(&accounts);
        assert_eq!(accounts, before);
    }
}
