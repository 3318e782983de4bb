use std::path::PathBuf;
use tradeline_core::error::TradelineError;

use crate::output;

pub fn run(
    xml_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), TradelineError> {
    let xml = std::fs::read(&xml_file)?;
    let parsed = tradeline_core::normalize_xml(&xml)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed.report)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Normalized {} account(s), written to {}",
                parsed.report.accounts.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&parsed.report)?,
            _ => println!("{}", output::table::format_report(&parsed.report)),
        },
    }

    if !parsed.warnings.is_empty() {
        eprintln!("  {} field(s) defaulted:", parsed.warnings.len());
        for w in &parsed.warnings {
            eprintln!("  warning: {}: {}", w.field, w.reason);
        }
    }

    Ok(())
}
