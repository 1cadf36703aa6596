use super::{SelectionArgs, load_config};
use anyhow::Result;
use chrono::{Days, NaiveDate};
use daily_juz_core::{JuzNumber, Selection, juz_for_date};
use std::path::PathBuf;

/// Print the juz a date maps to, and optionally the days after it
pub async fn run(config_path: Option<PathBuf>, selection: SelectionArgs, days: u32) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let (date, selected) = selection.resolve(&config)?;

    println!("📅 {}", describe(date, selected.juz()));
    if let Selection::Override { .. } = selected {
        println!("   (override; date schedule would pick Juz {})", juz_for_date(date, config.schedule.anchor_date));
    }

    if days > 1 {
        println!();
        println!("Upcoming:");
        for (day, juz) in schedule(date, config.schedule.anchor_date, days).into_iter().skip(1) {
            println!("   {}", describe(day, juz));
        }
    }

    Ok(())
}

fn describe(date: NaiveDate, juz: JuzNumber) -> String {
    format!("{}  Juz {:>2}  {}", date, juz, juz.name())
}

/// Dates from `start` for `days` days, each with its scheduled juz
fn schedule(start: NaiveDate, anchor: NaiveDate, days: u32) -> Vec<(NaiveDate, JuzNumber)> {
    (0..u64::from(days))
        .map_while(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| (date, juz_for_date(date, anchor)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_follows_consecutive_days() {
        let anchor = date(2026, 2, 17);
        let days = schedule(date(2026, 3, 17), anchor, 4);
        let juz: Vec<u8> = days.iter().map(|(_, j)| j.get()).collect();
        assert_eq!(juz, vec![29, 30, 1, 2]);
        assert_eq!(days[3].0, date(2026, 3, 20));
    }

    #[test]
    fn test_describe_line() {
        let juz = JuzNumber::new(7).unwrap();
        assert_eq!(describe(date(2026, 2, 23), juz), "2026-02-23  Juz  7  Wa Iza Sami'oo");
    }

    #[tokio::test]
    async fn test_run_rejects_bad_override() {
        let args = SelectionArgs {
            juz: Some("0".to_string()),
            date: None,
        };
        assert!(run(None, args, 1).await.is_err());
    }
}
