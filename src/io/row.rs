//! Single-line CSV field splitter.
//!
//! The dataset is plain comma-separated text where some names are quoted
//! because they contain commas (e.g. `"Bonaire, Sint Eustatius and Saba"`).
//! Quotes only toggle the "inside quotes" state; doubled `""` escapes are not
//! recognized.

/// Split one line into trimmed field values.
///
/// Always yields one value per comma-separated segment, so an empty line
/// produces a single empty field.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
