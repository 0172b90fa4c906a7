//! Display formatting for sizes and long text cells

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const KIB: u64 = 1024;

/// Suffix appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Format a byte count using 1024-based units.
///
/// The unit is the largest power of 1024 not exceeding the value (capped at
/// GB) and the number is rounded to two decimals with trailing zeros
/// dropped, so 1536 renders as `1.5 KB` and 1024 as `1 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut divisor = 1u64;
    while exponent < UNITS.len() - 1 && bytes >= divisor * KIB {
        divisor *= KIB;
        exponent += 1;
    }

    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// Cut `text` to at most `max_chars` characters, appending [`ELLIPSIS`]
/// when anything was removed. Counts Unicode scalar values, not bytes.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
