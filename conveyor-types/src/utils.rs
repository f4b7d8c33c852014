use std::time::{SystemTime, UNIX_EPOCH};

/// Get the current unix timestamp in milliseconds
pub fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Validate a provided browse/instance name
///
/// Names form part of node identifiers so they must not be empty and must not
/// contain the path separator or identifier delimiters.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name string must not be empty".into());
    }
    for c in name.chars() {
        if matches!(c, '/' | ';' | '.') {
            return Err(format!(
                "name string {name} cannot contain '/', ';' or '.' characters"
            ));
        }
    }
    Ok(())
}
