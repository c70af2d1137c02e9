//! Human-readable byte sizes.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// Format a byte count with two decimal places, e.g. `1536 -> "1.5 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with(bytes, 2)
}

/// Format a byte count using binary units, rounded to at most `decimals`
/// places. Trailing zeros are dropped, so `1024` renders as `"1 KB"`.
///
/// The unit is `floor(log1024(bytes))`, clamped to GB.
pub fn format_bytes_with(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // Integer search keeps exact powers of 1024 on the right unit.
    let mut index = 0;
    let mut divisor = 1u64;
    while index + 1 < UNITS.len() && bytes / divisor >= STEP {
        divisor *= STEP;
        index += 1;
    }

    let value = bytes as f64 / divisor as f64;
    let mut rendered = format!("{:.*}", decimals, value);
    if rendered.contains('.') {
        let trimmed = rendered.trim_end_matches('0').trim_end_matches('.').len();
        rendered.truncate(trimmed);
    }

    format!("{} {}", rendered, UNITS[index])
}
