use unicode_width::UnicodeWidthStr;

const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Scale a byte count by powers of 1024 and print it with two decimals,
/// e.g. `1536` -> `"1.50KB"`. Values past the petabyte tier stay in "P".
pub fn format_size(bytes: u64, suffix: &str) -> String {
    let mut value = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{value:.2}{unit}{suffix}");
        }
        value /= 1024.0;
    }
    format!("{value:.2}{}{suffix}", UNITS[UNITS.len() - 1])
}

pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, "B")
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Left-align `s` in a column of `width` terminal cells.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Right-align `s` in a column of `width` terminal cells.
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{s}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_stay_in_bytes() {
        assert_eq!(format_bytes(0), "0.00B");
        assert_eq!(format_bytes(1), "1.00B");
        assert_eq!(format_bytes(1023), "1023.00B");
    }

    #[test]
    fn binary_tiers() {
        assert_eq!(format_bytes(1024), "1.00KB");
        assert_eq!(format_bytes(1536), "1.50KB");
        assert_eq!(format_bytes(8_589_934_592), "8.00GB");
        assert_eq!(format_bytes(3 * 1024u64.pow(4)), "3.00TB");
    }

    #[test]
    fn custom_suffix() {
        assert_eq!(format_size(2048, "B/s"), "2.00KB/s");
        assert_eq!(format_size(512, ""), "512.00");
    }

    #[test]
    fn petabyte_tier_is_not_reduced_further() {
        assert_eq!(format_bytes(1024u64.pow(5)), "1.00PB");
        assert_eq!(format_bytes(2048 * 1024u64.pow(5)), "2048.00PB");
        assert!(format_bytes(u64::MAX).ends_with("PB"));
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        assert_eq!(pad_right("°C", 3), "°C ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
