use std::path::PathBuf;
use tradeline_core::error::TradelineError;
use tradeline_core::model::Report;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), TradelineError> {
    let bytes = std::fs::read(&input_file)?;

    // Determine input type by extension
    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let report: Report = if is_json {
        tradeline_core::report_from_json(&bytes)?
    } else {
        tradeline_core::normalize_xml(&bytes)?.report
    };

    let views = tradeline_core::classify(&report.accounts);

    match output_format {
        "json" => output::json::print(&views)?,
        _ => output::table::print_views(&views),
    }

    Ok(())
}
