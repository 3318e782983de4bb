use serde::Serialize;
use tradeline_core::error::TradelineError;

pub fn print<T: Serialize>(value: &T) -> Result<(), TradelineError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
