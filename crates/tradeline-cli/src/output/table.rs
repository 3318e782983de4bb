use rust_decimal::Decimal;
use std::fmt::Write;
use tradeline_core::classify::{account_kind, AccountViews};
use tradeline_core::model::{Account, Report};

pub fn format_report(report: &Report) -> String {
    let mut out = String::new();
    let basic = &report.basic;
    let summary = &report.summary;

    let _ = writeln!(out, "=== Basic Details ===\n");
    let _ = writeln!(out, "  Name:    {} {}", basic.first_name, basic.last_name);
    let _ = writeln!(out, "  Mobile:  {}", or_dash(&basic.mobile));
    let _ = writeln!(out, "  PAN:     {}", or_dash(&basic.pan));
    let _ = writeln!(out, "  Score:   {}\n", report.score);

    let _ = writeln!(out, "=== Report Summary ===\n");
    let rows = [
        ("Total accounts", summary.total_accounts.to_string()),
        ("Active accounts", summary.active_accounts.to_string()),
        ("Closed accounts", summary.closed_accounts.to_string()),
        ("Outstanding balance", amount(summary.outstanding_all)),
        ("Secured amount", amount(summary.outstanding_secured)),
        ("Unsecured amount", amount(summary.outstanding_unsecured)),
        ("Last 7 days enquiries", summary.last_7_days_enquiries.to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<22} {}", label, value);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "=== Accounts ({}) ===\n", report.accounts.len());
    write_accounts(&mut out, &report.accounts, true);

    out.trim_end().to_string()
}

pub fn print_views(views: &AccountViews) {
    let mut out = String::new();

    let _ = writeln!(out, "=== Credit Cards ({}) ===\n", views.credit_cards.len());
    write_accounts(&mut out, &views.credit_cards, false);

    let _ = writeln!(out, "=== Loan Accounts ({}) ===\n", views.loans.len());
    write_accounts(&mut out, &views.loans, false);

    println!("{}", out.trim_end());
}

fn write_accounts(out: &mut String, accounts: &[Account], with_kind: bool) {
    if accounts.is_empty() {
        let _ = writeln!(out, "  No records available\n");
        return;
    }

    let bank_width = accounts
        .iter()
        .map(|a| a.bank.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let number_width = accounts
        .iter()
        .map(|a| a.account_number.chars().count())
        .max()
        .unwrap_or(10)
        .max(10);

    let _ = write!(
        out,
        "  {:<bw$}  {:<nw$}  {:<7}  {:>14}  {:>12}",
        "Bank",
        "Account No",
        "Status",
        "Balance",
        "Overdue",
        bw = bank_width,
        nw = number_width
    );
    if with_kind {
        let _ = write!(out, "  {:<11}", "Type");
    }
    let _ = writeln!(out);

    for a in accounts {
        let _ = write!(
            out,
            "  {:<bw$}  {:<nw$}  {:<7}  {:>14}  {:>12}",
            a.bank,
            a.account_number,
            a.status().to_string(),
            amount(a.current_balance),
            amount(a.amount_past_due),
            bw = bank_width,
            nw = number_width
        );
        if with_kind {
            let _ = write!(out, "  {:<11}", account_kind(a).to_string());
        }
        let _ = writeln!(out);

        let address = a.holder_address.to_string();
        let _ = writeln!(
            out,
            "    holder: {}  address: {}",
            or_dash(&a.holder_name),
            or_dash(&address)
        );
    }
    let _ = writeln!(out);
}

fn amount(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
