use chrono::NaiveDate;

/// Current date in the browser's local timezone.
///
/// Status classification and the one-click complete action both take the
/// date as a parameter; this is the single place the wall clock is read.
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Parse the value of an `<input type="date">` (YYYY-MM-DD)
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Format a date for table display as dd/mm/yyyy
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_date() {
        assert_eq!(
            parse_input_date("2025-06-01"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(
            parse_input_date(" 2025-06-01 "),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("01/06/2025"), None);
        assert_eq!(parse_input_date("2025-13-01"), None);
    }

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(format_display_date(date), "01/06/2025");
    }
}
