//! Date to juz mapping.
//!
//! Days are counted from a fixed anchor date and wrapped modulo 30, so any
//! 30 consecutive dates visit every juz exactly once. The anchor itself maps
//! to juz 1; dates before the anchor wrap backwards.

use crate::error::{Error, Result};
use crate::types::{JUZ_COUNT, JuzNumber};
use chrono::NaiveDate;

/// How the juz for a run was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Derived from a calendar date
    Date { date: NaiveDate, juz: JuzNumber },
    /// Explicitly requested
    Override { juz: JuzNumber },
}

impl Selection {
    pub fn juz(&self) -> JuzNumber {
        match self {
            Selection::Date { juz, .. } | Selection::Override { juz } => *juz,
        }
    }
}

/// Map a date onto a juz relative to `anchor`
pub fn juz_for_date(date: NaiveDate, anchor: NaiveDate) -> JuzNumber {
    let days = date.signed_duration_since(anchor).num_days();
    let offset = days.rem_euclid(i64::from(JUZ_COUNT));
    // rem_euclid keeps offset in 0..30
    JuzNumber(offset as u8 + 1)
}

/// Parse an externally supplied juz number, rejecting anything outside 1..=30
pub fn parse_override(raw: &str) -> Result<JuzNumber> {
    let trimmed = raw.trim();
    let n: u8 = trimmed
        .parse()
        .map_err(|_| Error::InvalidJuz(trimmed.to_string()))?;
    JuzNumber::new(n).map_err(|_| Error::InvalidJuz(trimmed.to_string()))
}

/// Pick the juz for a run; an override takes precedence over the date
pub fn select(date: NaiveDate, juz_override: Option<&str>, anchor: NaiveDate) -> Result<Selection> {
    match juz_override {
        Some(raw) => Ok(Selection::Override {
            juz: parse_override(raw)?,
        }),
        None => Ok(Selection::Date {
            date,
            juz: juz_for_date(date, anchor),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 17).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_anchor_is_first_juz() {
        assert_eq!(juz_for_date(anchor(), anchor()).get(), 1);
        assert_eq!(juz_for_date(date(2026, 2, 23), anchor()).get(), 7);
        assert_eq!(juz_for_date(date(2026, 3, 18), anchor()).get(), 30);
        assert_eq!(juz_for_date(date(2026, 3, 19), anchor()).get(), 1);
    }

    #[test]
    fn test_same_date_same_juz() {
        for offset in -400..400 {
            let d = anchor() + chrono::Duration::days(offset);
            assert_eq!(juz_for_date(d, anchor()), juz_for_date(d, anchor()));
        }
    }

    #[test]
    fn test_thirty_consecutive_days_cover_every_juz() {
        for start_offset in [-1000, -31, -1, 0, 1, 17, 365, 10_000] {
            let start = anchor() + chrono::Duration::days(start_offset);
            let seen: BTreeSet<u8> = (0..30)
                .map(|i| juz_for_date(start + chrono::Duration::days(i), anchor()).get())
                .collect();
            assert_eq!(seen.len(), 30, "start offset {}", start_offset);
            assert_eq!(seen.first(), Some(&1));
            assert_eq!(seen.last(), Some(&30));
        }
    }

    #[test]
    fn test_dates_before_anchor_wrap() {
        assert_eq!(juz_for_date(date(2026, 2, 16), anchor()).get(), 30);
        assert_eq!(juz_for_date(date(2026, 1, 18), anchor()).get(), 1);
    }

    #[test]
    fn test_parse_override_valid() {
        assert_eq!(parse_override("15").unwrap().get(), 15);
        assert_eq!(parse_override(" 1 ").unwrap().get(), 1);
        assert_eq!(parse_override("30").unwrap().get(), 30);
    }

    #[test]
    fn test_parse_override_rejects_out_of_range() {
        for raw in ["0", "31", "-1", "300", "abc", "", "7.5"] {
            let err = parse_override(raw).unwrap_err();
            assert!(
                matches!(err, Error::InvalidJuz(_)),
                "expected InvalidJuz for {:?}",
                raw
            );
        }
        assert!(
            parse_override("31")
                .unwrap_err()
                .to_string()
                .contains("between 1 and 30")
        );
    }

    #[test]
    fn test_select_prefers_override() {
        let today = date(2026, 2, 23);
        let selection = select(today, Some("15"), anchor()).unwrap();
        assert_eq!(selection, Selection::Override { juz: JuzNumber::new(15).unwrap() });

        let selection = select(today, None, anchor()).unwrap();
        assert_eq!(selection.juz().get(), 7);
        assert!(matches!(selection, Selection::Date { date, .. } if date == today));

        assert!(select(today, Some("31"), anchor()).is_err());
    }
}
