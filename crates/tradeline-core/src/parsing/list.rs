use serde_json::Value;

/// List coercion for repeated elements.
///
/// A tag that repeats arrives as an array, a tag that occurs once arrives as
/// the element itself, and a missing or empty tag arrives as nothing or as
/// empty text. Every shape comes back as a list in document order.
pub fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// First entry of a possibly-repeated element.
pub fn first_of(value: Option<&Value>) -> Option<&Value> {
    as_list(value).into_iter().next()
}
