use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use log::trace;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

use crate::core::{PipelineConfig, TimeFallback};
use crate::parser::RecordView;

pub const TBD: &str = "TBD";

/// Epoch values above this are milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})[:.](\d{2})$").expect("valid clock pattern"))
}

fn compact_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{14}$").expect("valid compact pattern"))
}

fn epoch_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{9,13}$").expect("valid epoch pattern"))
}

/// Kickoff rendered in the target zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTime {
    pub date: String,
    pub time: String,
    /// Unix seconds of the kickoff; only used for ordering.
    pub sort_instant: i64,
}

impl NormalizedTime {
    pub fn sentinel() -> Self {
        Self {
            date: TBD.to_string(),
            time: TBD.to_string(),
            sort_instant: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.date == TBD && self.time == TBD && self.sort_instant == 0
    }
}

/// The recognised kickoff encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickoffEncoding {
    /// RFC 3339 / ISO-8601 with `Z` or an explicit offset.
    Iso(DateTime<FixedOffset>),
    /// `YYYYMMDDHHmmss`, UTC.
    Compact(NaiveDateTime),
    /// Unix seconds (milliseconds are scaled down).
    Epoch(i64),
    /// A bare `HH:MM` wall-clock reading meaning today in the target zone.
    Clock(NaiveTime),
    /// A date field plus a clock field, read in the target zone.
    Local(NaiveDateTime),
    /// A status word or anything else that is not a fixed kickoff.
    Opaque,
}

impl KickoffEncoding {
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::Opaque;
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Self::Iso(instant);
        }

        if compact_pattern().is_match(raw) {
            return NaiveDateTime::parse_from_str(raw, "%Y%m%d%H%M%S")
                .map(Self::Compact)
                .unwrap_or(Self::Opaque);
        }

        if epoch_pattern().is_match(raw) {
            return raw.parse::<i64>().map(Self::from_epoch).unwrap_or(Self::Opaque);
        }

        if let Some(caps) = clock_pattern().captures(raw) {
            let hour = caps[1].parse::<u32>().unwrap_or(u32::MAX);
            let minute = caps[2].parse::<u32>().unwrap_or(u32::MAX);
            return NaiveTime::from_hms_opt(hour, minute, 0)
                .map(Self::Clock)
                .unwrap_or(Self::Opaque);
        }

        Self::Opaque
    }

    fn from_epoch(value: i64) -> Self {
        if value > EPOCH_MILLIS_THRESHOLD {
            Self::Epoch(value / 1000)
        } else {
            Self::Epoch(value)
        }
    }

    pub fn classify_value(value: &Value) -> Self {
        match value {
            Value::String(raw) => Self::classify(raw),
            Value::Number(n) => match n.as_i64() {
                Some(v) if v > 0 => {
                    // Same digit bounds as text, so minute counters stay opaque.
                    let digits = v.to_string();
                    if compact_pattern().is_match(&digits) {
                        Self::classify(&digits)
                    } else if epoch_pattern().is_match(&digits) {
                        Self::from_epoch(v)
                    } else {
                        Self::Opaque
                    }
                }
                _ => Self::Opaque,
            },
            _ => Self::Opaque,
        }
    }

    /// The first kickoff alias that parses wins. A bare clock is placed on
    /// the record's separate date field when it has one.
    pub fn of_record(view: &RecordView<'_>) -> Self {
        let encoding = view
            .kickoff_values()
            .map(Self::classify_value)
            .find(|encoding| *encoding != Self::Opaque)
            .unwrap_or(Self::Opaque);

        let date = view
            .match_date()
            .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok());
        match (encoding, date) {
            (Self::Clock(clock), Some(date)) => Self::Local(date.and_time(clock)),
            (encoding, _) => encoding,
        }
    }
}

/// Turns any recognised kickoff encoding into a date/time pair in a fixed
/// target offset. Never fails: anything unusable becomes the fallback.
#[derive(Debug, Clone)]
pub struct TimeNormalizer {
    offset: FixedOffset,
    fallback: TimeFallback,
    reference: DateTime<Utc>,
}

impl TimeNormalizer {
    pub fn new(offset: FixedOffset, fallback: TimeFallback) -> Self {
        Self {
            offset,
            fallback,
            reference: Utc::now(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.target_offset, config.time_fallback)
    }

    /// Pins "now": the day used for bare clock readings and the `Now`
    /// fallback instant.
    pub fn with_reference(mut self, reference: DateTime<Utc>) -> Self {
        self.reference = reference;
        self
    }

    fn render(&self, instant: DateTime<Utc>) -> NormalizedTime {
        let local = instant.with_timezone(&self.offset);
        NormalizedTime {
            date: local.format("%Y-%m-%d").to_string(),
            time: local.format("%H:%M").to_string(),
            sort_instant: instant.timestamp(),
        }
    }

    fn fallback(&self) -> NormalizedTime {
        match self.fallback {
            TimeFallback::Sentinel => NormalizedTime::sentinel(),
            TimeFallback::Now => self.render(self.reference),
        }
    }

    pub fn resolve(&self, encoding: KickoffEncoding) -> NormalizedTime {
        let instant = match encoding {
            KickoffEncoding::Iso(instant) => Some(instant.with_timezone(&Utc)),
            KickoffEncoding::Compact(naive) => Some(Utc.from_utc_datetime(&naive)),
            KickoffEncoding::Epoch(seconds) => DateTime::from_timestamp(seconds, 0),
            KickoffEncoding::Clock(clock) => {
                let today = self.reference.with_timezone(&self.offset).date_naive();
                self.offset
                    .from_local_datetime(&today.and_time(clock))
                    .single()
                    .map(|local| local.with_timezone(&Utc))
            }
            KickoffEncoding::Local(naive) => self
                .offset
                .from_local_datetime(&naive)
                .single()
                .map(|local| local.with_timezone(&Utc)),
            KickoffEncoding::Opaque => None,
        };

        match instant {
            Some(instant) => self.render(instant),
            None => self.fallback(),
        }
    }

    pub fn normalize(&self, raw: &str) -> NormalizedTime {
        let encoding = KickoffEncoding::classify(raw);
        trace!("Kickoff {:?} classified as {:?}", raw, encoding);
        self.resolve(encoding)
    }

    pub fn normalize_value(&self, value: Option<&Value>) -> NormalizedTime {
        match value {
            Some(value) => self.resolve(KickoffEncoding::classify_value(value)),
            None => self.fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc7() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn normalizer(fallback: TimeFallback) -> TimeNormalizer {
        let reference = Utc.with_ymd_and_hms(2026, 1, 7, 20, 0, 0).unwrap();
        TimeNormalizer::new(utc7(), fallback).with_reference(reference)
    }

    #[test]
    fn iso_utc_crosses_midnight_into_target_zone() {
        let time = normalizer(TimeFallback::Sentinel).normalize("2026-01-07T17:30:00Z");
        assert_eq!(time.date, "2026-01-08");
        assert_eq!(time.time, "00:30");
        assert_eq!(
            time.sort_instant,
            Utc.with_ymd_and_hms(2026, 1, 7, 17, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn iso_with_explicit_offset() {
        let time = normalizer(TimeFallback::Sentinel).normalize("2026-01-07T20:00:00+01:00");
        assert_eq!((time.date.as_str(), time.time.as_str()), ("2026-01-08", "02:00"));
    }

    #[test]
    fn compact_numeric_form_is_utc() {
        let n = normalizer(TimeFallback::Sentinel);
        let from_text = n.normalize("20260107173000");
        assert_eq!((from_text.date.as_str(), from_text.time.as_str()), ("2026-01-08", "00:30"));
        assert_eq!(n.normalize_value(Some(&json!(20260107173000_i64))), from_text);
    }

    #[test]
    fn epoch_seconds_and_millis() {
        let n = normalizer(TimeFallback::Sentinel);
        let seconds = Utc.with_ymd_and_hms(2026, 1, 7, 17, 30, 0).unwrap().timestamp();
        let a = n.normalize_value(Some(&json!(seconds)));
        let b = n.normalize_value(Some(&json!(seconds * 1000)));
        assert_eq!(a, b);
        assert_eq!(a.time, "00:30");
    }

    #[test]
    fn bare_clock_means_today_in_target_zone() {
        // Reference is 2026-01-08 03:00 at UTC+7.
        let time = normalizer(TimeFallback::Sentinel).normalize("19:30");
        assert_eq!(time.date, "2026-01-08");
        assert_eq!(time.time, "19:30");
        assert_eq!(
            time.sort_instant,
            Utc.with_ymd_and_hms(2026, 1, 8, 12, 30, 0).unwrap().timestamp()
        );
        assert_eq!(normalizer(TimeFallback::Sentinel).normalize("19.30"), time);
    }

    #[test]
    fn malformed_and_empty_inputs_yield_sentinel() {
        let n = normalizer(TimeFallback::Sentinel);
        for raw in ["", "   ", "FT", "Postponed", "25:99", "2026-13-45T99:00:00Z", "N/A"] {
            assert!(n.normalize(raw).is_sentinel(), "{raw:?} should be a sentinel");
        }
        assert!(n.normalize_value(None).is_sentinel());
        assert!(n.normalize_value(Some(&json!({"a": 1}))).is_sentinel());
        assert!(n.normalize_value(Some(&json!(-5))).is_sentinel());
    }

    #[test]
    fn small_numbers_are_not_epochs() {
        let n = normalizer(TimeFallback::Sentinel);
        assert!(n.normalize_value(Some(&json!(67))).is_sentinel());
        assert_eq!(KickoffEncoding::classify_value(&json!(90)), KickoffEncoding::Opaque);
        assert_eq!(
            KickoffEncoding::classify_value(&json!(1767807000)),
            KickoffEncoding::Epoch(1767807000)
        );
    }

    fn record_time(n: &TimeNormalizer, record: &Value) -> NormalizedTime {
        n.resolve(KickoffEncoding::of_record(&RecordView::new(record).unwrap()))
    }

    #[test]
    fn unparseable_alias_does_not_hide_a_later_one() {
        let n = normalizer(TimeFallback::Sentinel);
        let time = record_time(&n, &json!({"kickoff": "TBA", "startTimestamp": 1767807000}));
        assert_eq!((time.date.as_str(), time.time.as_str()), ("2026-01-08", "00:30"));

        let time = record_time(&n, &json!({"kickoff": "TBA", "time": 67}));
        assert!(time.is_sentinel());
    }

    #[test]
    fn separate_date_and_clock_fields_combine() {
        let n = normalizer(TimeFallback::Sentinel);
        let time = record_time(&n, &json!({"date": "2026-01-10", "time": "19:30"}));
        assert_eq!((time.date.as_str(), time.time.as_str()), ("2026-01-10", "19:30"));
        assert_eq!(
            time.sort_instant,
            Utc.with_ymd_and_hms(2026, 1, 10, 12, 30, 0).unwrap().timestamp()
        );

        // A date with no clock has no fixed kickoff.
        assert!(record_time(&n, &json!({"date": "2026-01-10"})).is_sentinel());
    }

    #[test]
    fn now_fallback_uses_reference_instant() {
        let time = normalizer(TimeFallback::Now).normalize("TBA");
        assert_eq!(time.date, "2026-01-08");
        assert_eq!(time.time, "03:00");
        assert_eq!(
            time.sort_instant,
            Utc.with_ymd_and_hms(2026, 1, 7, 20, 0, 0).unwrap().timestamp()
        );
    }
}
