use chrono::Weekday;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of one output slot in minutes
pub const SLOT_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Day abbreviations recognised in report header rows, Sunday first
pub const DAY_ABBREVS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

lazy_static! {
    static ref TIME_RANGE_RE: Regex = Regex::new(
        r"(?i)^(\d{1,2}(?::\d{2})?)\s*(AM|PM)\s*[-–]\s*(\d{1,2}(?::\d{2})?)\s*(AM|PM)"
    )
    .expect("time range pattern");
    static ref CLOCK_TIME_RE: Regex =
        Regex::new(r"^(\d{1,2}):(\d{2})\s*(AM|PM|A|P)").expect("clock time pattern");
    static ref COMPACT_TIME_RE: Regex =
        Regex::new(r"^(\d{1,4})\s*(AM|PM|A|P)").expect("compact time pattern");
}

/// A wall-clock time of day, stored as minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimePoint(u32);

impl TimePoint {
    /// Create a time from an hour (0-23) and minute (0-59)
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// Create a time from minutes since midnight
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TimePoint {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        TimePoint::from_minutes(minutes)
            .ok_or_else(|| format!("{minutes} is not a valid minute of the day"))
    }
}

impl From<TimePoint> for u32 {
    fn from(time: TimePoint) -> Self {
        time.0
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: TimePoint,
    end: TimePoint,
}

/// A same-day time range with `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: TimePoint,
    end: TimePoint,
}

impl TimeRange {
    /// Create a range, rejecting empty or reversed ones
    pub fn new(start: TimePoint, end: TimePoint) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> TimePoint {
        self.start
    }

    pub fn end(&self) -> TimePoint {
        self.end
    }

    /// Whether `time` falls in the half-open range `[start, end)`
    pub fn contains(&self, time: TimePoint) -> bool {
        self.start <= time && time < self.end
    }

    /// Compact label such as `9A-530P`
    pub fn format_short(&self) -> String {
        format!(
            "{}-{}",
            format_time_short(self.start),
            format_time_short(self.end)
        )
    }
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = String;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::new(raw.start, raw.end)
            .ok_or_else(|| format!("range {} - {} does not move forward", raw.start, raw.end))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Convert a 12-hour clock reading into a time of day
fn from_twelve_hour(hour: u32, minute: u32, is_pm: bool) -> Option<TimePoint> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    TimePoint::new(hour, minute)
}

/// Parse `10:00` or `10` together with an AM/PM marker
fn parse_meridiem_time(time_str: &str, meridiem: &str) -> Option<TimePoint> {
    let (hour, minute) = match time_str.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_str.parse::<u32>().ok()?, 0),
    };
    from_twelve_hour(hour, minute, meridiem.eq_ignore_ascii_case("PM"))
}

/// Parse a report cell such as `10:00 AM - 2:00 PM` or `9 AM-5 PM`
pub fn parse_time_range(text: &str) -> Option<TimeRange> {
    let caps = TIME_RANGE_RE.captures(text.trim())?;
    let start = parse_meridiem_time(&caps[1], &caps[2])?;
    let end = parse_meridiem_time(&caps[3], &caps[4])?;
    TimeRange::new(start, end)
}

/// Parse a hand-typed time such as `9A`, `930A`, `1145P` or `12:30 PM`
pub fn parse_compact_time(text: &str) -> Option<TimePoint> {
    let text = text.trim().to_uppercase().replace('.', "");

    if let Some(caps) = CLOCK_TIME_RE.captures(&text) {
        let hour = caps[1].parse::<u32>().ok()?;
        let minute = caps[2].parse::<u32>().ok()?;
        return from_twelve_hour(hour, minute, caps[3].starts_with('P'));
    }

    let caps = COMPACT_TIME_RE.captures(&text)?;
    let digits = &caps[1];
    let (hour, minute) = match digits.len() {
        1 | 2 => (digits.parse::<u32>().ok()?, 0),
        3 => (digits[..1].parse::<u32>().ok()?, digits[1..].parse::<u32>().ok()?),
        _ => (digits[..2].parse::<u32>().ok()?, digits[2..].parse::<u32>().ok()?),
    };
    from_twelve_hour(hour, minute, caps[2].starts_with('P'))
}

/// Format a time as a compact label like `9A`, `930A` or `12P`
pub fn format_time_short(time: TimePoint) -> String {
    let (display_hour, suffix) = match time.hour() {
        0 => (12, 'A'),
        h if h < 12 => (h, 'A'),
        12 => (12, 'P'),
        h => (h - 12, 'P'),
    };
    match time.minute() {
        0 => format!("{display_hour}{suffix}"),
        m => format!("{display_hour}{m:02}{suffix}"),
    }
}

/// Half-hour slots from `start_hour:00` through `end_hour:00` inclusive.
///
/// An end hour past 23 stops at the last slot of the day, 23:30.
pub fn generate_time_slots(start_hour: u32, end_hour: u32) -> Vec<TimePoint> {
    if start_hour > end_hour {
        return Vec::new();
    }
    let last = (end_hour * 60).min(MINUTES_PER_DAY - SLOT_MINUTES);
    (start_hour * 60..=last)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(TimePoint::from_minutes)
        .collect()
}

/// Match one of the seven header abbreviations exactly
pub fn weekday_from_abbrev(text: &str) -> Option<Weekday> {
    match text {
        "Sun" => Some(Weekday::Sun),
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_abbrev(day: Weekday) -> &'static str {
    DAY_ABBREVS[day.num_days_from_sunday() as usize]
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tp(hour: u32, minute: u32) -> TimePoint {
        TimePoint::new(hour, minute).unwrap()
    }

    fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
        TimeRange::new(tp(start.0, start.1), tp(end.0, end.1)).unwrap()
    }

    #[test]
    fn test_parse_time_range() {
        // Valid cases
        assert_eq!(
            parse_time_range("10:00 AM - 2:00 PM"),
            Some(range((10, 0), (14, 0)))
        );
        assert_eq!(parse_time_range("9 AM-5 PM"), Some(range((9, 0), (17, 0))));
        assert_eq!(
            parse_time_range("11:30 am – 8:00 pm"),
            Some(range((11, 30), (20, 0)))
        );
        assert_eq!(
            parse_time_range("12 AM - 12 PM"),
            Some(range((0, 0), (12, 0)))
        );
        assert_eq!(
            parse_time_range("  6:15AM-12:45PM  "),
            Some(range((6, 15), (12, 45)))
        );

        // Invalid cases
        assert_eq!(parse_time_range("garbage"), None);
        assert_eq!(parse_time_range(""), None);
        assert_eq!(parse_time_range("10:00 - 2:00"), None); // No meridiem
        assert_eq!(parse_time_range("13 PM - 2 PM"), None); // Not a 12-hour clock
        assert_eq!(parse_time_range("10 PM - 2 AM"), None); // Wraps past midnight
        assert_eq!(parse_time_range("Time Off"), None);
    }

    #[test]
    fn test_parse_compact_time() {
        assert_eq!(parse_compact_time("9A"), Some(tp(9, 0)));
        assert_eq!(parse_compact_time("930A"), Some(tp(9, 30)));
        assert_eq!(parse_compact_time("1145P"), Some(tp(23, 45)));
        assert_eq!(parse_compact_time("12P"), Some(tp(12, 0)));
        assert_eq!(parse_compact_time("12A"), Some(tp(0, 0)));
        assert_eq!(parse_compact_time("12:30 PM"), Some(tp(12, 30)));
        assert_eq!(parse_compact_time("4:30 p"), Some(tp(16, 30)));
        assert_eq!(parse_compact_time("5 p.m."), Some(tp(17, 0)));

        assert_eq!(parse_compact_time("930"), None);
        assert_eq!(parse_compact_time("1375P"), None);
        assert_eq!(parse_compact_time(""), None);
    }

    #[test]
    fn test_format_time_short() {
        assert_eq!(format_time_short(tp(0, 0)), "12A");
        assert_eq!(format_time_short(tp(9, 0)), "9A");
        assert_eq!(format_time_short(tp(9, 30)), "930A");
        assert_eq!(format_time_short(tp(12, 0)), "12P");
        assert_eq!(format_time_short(tp(12, 30)), "1230P");
        assert_eq!(format_time_short(tp(21, 0)), "9P");
    }

    #[test]
    fn test_compact_format_round_trip() {
        for slot in generate_time_slots(0, 23) {
            assert_eq!(parse_compact_time(&format_time_short(slot)), Some(slot));
        }
        let last = tp(23, 30);
        assert_eq!(parse_compact_time(&format_time_short(last)), Some(last));
    }

    #[test]
    fn test_generate_time_slots() {
        assert_eq!(
            generate_time_slots(9, 11),
            vec![tp(9, 0), tp(9, 30), tp(10, 0), tp(10, 30), tp(11, 0)]
        );
        assert_eq!(generate_time_slots(9, 9), vec![tp(9, 0)]);
        assert!(generate_time_slots(9, 8).is_empty());
        assert_eq!(generate_time_slots(22, 23).last(), Some(&tp(23, 0)));
        assert_eq!(generate_time_slots(22, 24).last(), Some(&tp(23, 30)));
        assert!(generate_time_slots(24, 24).is_empty());
    }

    #[test]
    fn test_time_range_bounds() {
        assert!(TimeRange::new(tp(9, 0), tp(9, 0)).is_none());
        assert!(TimeRange::new(tp(10, 0), tp(9, 0)).is_none());

        let shift = range((9, 0), (17, 0));
        assert!(shift.contains(tp(9, 0)));
        assert!(shift.contains(tp(16, 30)));
        assert!(!shift.contains(tp(17, 0)));
        assert_eq!(shift.format_short(), "9A-5P");
    }

    #[test]
    fn test_time_point_serde() {
        let json = serde_json::to_string(&tp(9, 30)).unwrap();
        assert_eq!(json, "570");
        assert_eq!(serde_json::from_str::<TimePoint>("570").unwrap(), tp(9, 30));
        assert!(serde_json::from_str::<TimePoint>("1440").is_err());
        assert!(serde_json::from_str::<TimeRange>(r#"{"start":600,"end":540}"#).is_err());
    }

    #[test]
    fn test_weekday_vocabulary() {
        assert_eq!(weekday_from_abbrev("Mon"), Some(Weekday::Mon));
        assert_eq!(weekday_from_abbrev("mon"), None);
        assert_eq!(weekday_from_abbrev("Monday"), None);
        assert_eq!(weekday_abbrev(Weekday::Sat), "Sat");
        assert_eq!(weekday_name(Weekday::Thu), "Thursday");
    }
}
