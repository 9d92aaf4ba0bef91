/// Format a phone number for display
/// Normalizes local 10-digit numbers to paired groups (06 12 34 56 78)
/// and strips the +212 country prefix down to the same local form.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = if digits.len() == 12 && digits.starts_with("212") {
        format!("0{}", &digits[3..])
    } else {
        digits
    };

    if local.len() == 10 {
        format!(
            "{} {} {} {} {}",
            &local[0..2],
            &local[2..4],
            &local[4..6],
            &local[6..8],
            &local[8..10]
        )
    } else {
        phone.to_string() // Return original if can't format
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

/// Format an amount with thousands separators, e.g. 12500.5 -> "12,500.50"
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("0612345678"), "06 12 34 56 78");
        assert_eq!(format_phone("+212612345678"), "06 12 34 56 78");
        assert_eq!(format_phone("06-12-34-56-78"), "06 12 34 56 78");
        assert_eq!(format_phone("123"), "123"); // Too short, return as-is
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-03-15T10:30:00+00:00"), "Mar 15, 2026");
        assert_eq!(format_date("2026-03-15"), "2026-03-15");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(12500.5), "12,500.50");
        assert_eq!(format_money(1234567.0), "1,234,567.00");
        assert_eq!(format_money(-42.0), "-42.00");
    }
}
