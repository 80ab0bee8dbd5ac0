//! Date normalization to canonical `YYYY/MM/DD`.
//!
//! Listing sites mix compact day-month-weekday shorthands ("7.07MON"),
//! ISO-ish dates, and Japanese 年月日 forms. Everything is normalized to
//! one canonical string; when nothing parses, a random future date stands
//! in so downstream sorting and filtering stay total.

use chrono::{Datelike, Days, Local, NaiveDate};
use rand::Rng;
use regex::Regex;

pub const CANONICAL_FORMAT: &str = "%Y/%m/%d";

fn canonical(year: i32, month: u32, day: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format(CANONICAL_FORMAT).to_string())
}

/// Scan free text for a date, site-specific compact patterns first.
pub fn extract_date(text: &str) -> Option<String> {
    // "7.07MON" style: month.day + weekday, current year implied.
    let compact = Regex::new(r"(?i)(\d{1,2})\.(\d{1,2})(MON|TUE|WED|THU|FRI|SAT|SUN)").expect("invalid regex");
    for caps in compact.captures_iter(text) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        if let Some(date) = canonical(Local::now().year(), month, day) {
            return Some(date);
        }
    }

    // "2025 0707MON" style: year, then packed month+day + weekday.
    let packed = Regex::new(r"(?i)(\d{4})\s+(\d{2})(\d{2})(MON|TUE|WED|THU|FRI|SAT|SUN)").expect("invalid regex");
    for caps in packed.captures_iter(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if let Some(date) = canonical(year, month, day) {
            return Some(date);
        }
    }

    let standard_patterns = [
        r"\d{4}[/-]\d{1,2}[/-]\d{1,2}",
        r"\d{1,2}[/-]\d{1,2}[/-]\d{4}",
        r"\d{4}年\d{1,2}月\d{1,2}日",
        r"\d{1,2}月\d{1,2}日",
    ];

    for pattern in standard_patterns {
        let re = Regex::new(pattern).expect("invalid regex");
        if let Some(m) = re.find(text)
            && let Some(date) = normalize(m.as_str())
        {
            return Some(date);
        }
    }

    None
}

/// Normalize a single date string to canonical form.
pub fn normalize(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Japanese full form: 2025年7月7日
    let jp_full = Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日").expect("invalid regex");
    if let Some(caps) = jp_full.captures(raw) {
        return canonical(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
    }

    // Month-day only form is taken as the current year: 7月7日
    let jp_short = Regex::new(r"(\d{1,2})月(\d{1,2})日").expect("invalid regex");
    if let Some(caps) = jp_short.captures(raw) {
        return canonical(Local::now().year(), caps[1].parse().ok()?, caps[2].parse().ok()?);
    }

    let head: String = raw.chars().take(10).collect();
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&head, format) {
            return Some(date.format(CANONICAL_FORMAT).to_string());
        }
    }

    None
}

/// Parse a canonical `YYYY/MM/DD` string back to a calendar date.
pub fn parse_canonical(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, CANONICAL_FORMAT).ok()
}

/// Random date 7 to 180 days ahead, canonical form.
pub fn future_date() -> String {
    let days = rand::thread_rng().gen_range(7..=180);
    let date = Local::now().date_naive() + Days::new(days);
    date.format(CANONICAL_FORMAT).to_string()
}

/// Sort key for date-ascending output. Unparseable dates sort a year out
/// so they land last.
pub fn sort_key(date: &str) -> NaiveDate {
    parse_canonical(date).unwrap_or_else(|| Local::now().date_naive() + Days::new(365))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_compact_shorthand() {
        let date = extract_date("VITAMIN 7.07MON OPEN 22:00").unwrap();
        let parsed = parse_canonical(&date).unwrap();
        assert_eq!((parsed.month(), parsed.day()), (7, 7));
        assert_eq!(parsed.year(), Local::now().year());
    }

    #[test]
    fn test_extract_packed_shorthand() {
        assert_eq!(extract_date("2025 0707MON @ WOMB").unwrap(), "2025/07/07");
    }

    #[test]
    fn test_extract_iso() {
        assert_eq!(extract_date("doors open 2025-12-31 22:00").unwrap(), "2025/12/31");
    }

    #[test]
    fn test_extract_japanese() {
        assert_eq!(extract_date("開催日: 2025年7月7日").unwrap(), "2025/07/07");
    }

    #[test]
    fn test_extract_japanese_short_uses_current_year() {
        let date = extract_date("7月7日開催").unwrap();
        assert!(date.starts_with(&Local::now().year().to_string()));
        assert!(date.ends_with("/07/07"));
    }

    #[test]
    fn test_extract_nothing() {
        assert_eq!(extract_date("no dates in here"), None);
    }

    #[test]
    fn test_compact_invalid_day_rejected() {
        assert_eq!(extract_date("13.45MON"), None);
    }

    #[test]
    fn test_normalize_variants() {
        assert_eq!(normalize("2025-07-07").unwrap(), "2025/07/07");
        assert_eq!(normalize("2025/7/7").unwrap(), "2025/07/07");
        assert_eq!(normalize("07/31/2025").unwrap(), "2025/07/31");
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_normalize_trims_time_suffix() {
        assert_eq!(normalize("2025-07-07T22:00:00Z").unwrap(), "2025/07/07");
    }

    #[test]
    fn test_canonical_round_trip() {
        for s in ["2025/01/01", "2026/12/31", "2025/02/28"] {
            let parsed = parse_canonical(s).unwrap();
            assert_eq!(parsed.format(CANONICAL_FORMAT).to_string(), s);
        }
    }

    #[test]
    fn test_future_date_is_valid_and_future() {
        let today = Local::now().date_naive();
        for _ in 0..20 {
            let date = future_date();
            let parsed = parse_canonical(&date).expect("future date must be canonical");
            assert!(parsed > today);
            assert!(parsed <= today + Days::new(180));
        }
    }

    #[test]
    fn test_sort_key_unparseable_lands_last() {
        assert!(sort_key("garbage") > sort_key("2026/12/31"));
    }
}
