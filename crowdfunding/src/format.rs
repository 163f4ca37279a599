//! Display formatting for counts and Swiss franc amounts.

const THOUSANDS_SEPARATOR: char = '’';

/// Formats an integer count with Swiss thousands grouping: `12’345`.
pub fn count_format(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Formats minor units as francs, dropping the cents when they are zero.
///
/// `150000` becomes `CHF 1’500`, `1050` becomes `CHF 10.50`.
pub fn chf_format(minor_units: u64) -> String {
    let francs = count_format(minor_units / 100);
    match minor_units % 100 {
        0 => format!("CHF {}", francs),
        cents => format!("CHF {}.{:02}", francs, cents),
    }
}

/// Formats minor units as a plain decimal for an input field: `1050` → `10.50`.
pub fn major_units(minor_units: u64) -> String {
    match minor_units % 100 {
        0 => (minor_units / 100).to_string(),
        cents => format!("{}.{:02}", minor_units / 100, cents),
    }
}

/// Parses a franc amount typed by the user into minor units.
///
/// Accepts `.` or `,` as decimal mark and ignores grouping marks. Digits past the
/// second decimal place are cut off. Returns `None` for anything that is not a
/// non-negative number.
pub fn parse_minor_units(input: &str) -> Option<u64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|ch| *ch != THOUSANDS_SEPARATOR && *ch != '\'' && *ch != ' ')
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let cents: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction[..2].parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_format() {
        assert_eq!(count_format(0), "0");
        assert_eq!(count_format(999), "999");
        assert_eq!(count_format(1000), "1’000");
        assert_eq!(count_format(1234567), "1’234’567");
    }

    #[test]
    fn test_chf_format() {
        assert_eq!(chf_format(100), "CHF 1");
        assert_eq!(chf_format(1050), "CHF 10.50");
        assert_eq!(chf_format(75_000_000), "CHF 750’000");
        assert_eq!(chf_format(5), "CHF 0.05");
    }

    #[test]
    fn test_major_units() {
        assert_eq!(major_units(24000), "240");
        assert_eq!(major_units(1234), "12.34");
    }

    #[test]
    fn test_parse_minor_units() {
        assert_eq!(parse_minor_units("240"), Some(24000));
        assert_eq!(parse_minor_units("12.5"), Some(1250));
        assert_eq!(parse_minor_units("12,05"), Some(1205));
        assert_eq!(parse_minor_units("1’000"), Some(100000));
        assert_eq!(parse_minor_units("0.999"), Some(99));
        assert_eq!(parse_minor_units(".5"), Some(50));
        assert_eq!(parse_minor_units(""), None);
        assert_eq!(parse_minor_units("-5"), None);
        assert_eq!(parse_minor_units("abc"), None);
        assert_eq!(parse_minor_units("1.2.3"), None);
    }
}
