use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::Serialize;

use crate::emotion::Emotion;
use crate::error::AppError;

/// Consecutive days journaled, counting back from today. A streak is still
/// alive if the latest entry was yesterday; any older latest entry resets
/// it to zero.
pub fn journal_streak(entry_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = entry_dates.iter().copied().collect();
    let latest = match dates.iter().max() {
        Some(latest) => *latest,
        None => return 0,
    };

    let start = if latest == today {
        today
    } else {
        today - Duration::days(1)
    };
    if latest < start {
        return 0;
    }

    let mut streak = 0;
    let mut cursor = start;
    while dates.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub day_number: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub emotion: Option<&'static str>,
    pub date: String,
}

/// Build the dashboard month grid: full Monday-first weeks covering the
/// current month, each day tagged with the emotion of its first entry.
/// Returns the weeks plus the "August 2026" style heading.
pub fn month_calendar(
    day_emotions: &[(NaiveDate, Option<Emotion>)],
    today: NaiveDate,
) -> (Vec<Vec<CalendarDay>>, String) {
    let first = today.with_day(1).expect("first of month is valid");
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .expect("first of next month is valid");
    let last = next_month - Duration::days(1);

    let mut cursor = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    let mut weeks = Vec::new();

    while cursor <= last {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            let emotion = day_emotions
                .iter()
                .find(|(date, _)| *date == cursor)
                .and_then(|(_, emotion)| emotion.map(|e| e.as_str()));

            week.push(CalendarDay {
                day_number: cursor.day(),
                in_month: cursor.month() == today.month(),
                is_today: cursor == today,
                emotion,
                date: cursor.format("%Y-%m-%d").to_string(),
            });
            cursor += Duration::days(1);
        }
        weeks.push(week);
    }

    (weeks, today.format("%B %Y").to_string())
}

pub struct ExportRow {
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub emotion: Option<Emotion>,
    pub confidence: Option<f64>,
}

/// Render the settings-page export: one row per entry, newest first as
/// given, `N/A` for entries that were never analyzed.
pub fn entries_csv(rows: &[ExportRow]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Date", "Journal Text", "Emotion", "Confidence"])
        .map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        writer
            .write_record([
                row.created_at.format("%Y-%m-%d %H:%M").to_string(),
                row.content.clone(),
                row.emotion
                    .map(|e| e.display().to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                row.confidence
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

/// Monday-first weekday check used by the calendar tests.
pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let today = date(2026, 8, 7);
        let dates = vec![date(2026, 8, 7), date(2026, 8, 6), date(2026, 8, 5)];
        assert_eq!(journal_streak(&dates, today), 3);
    }

    #[test]
    fn test_streak_allows_yesterday_start() {
        let today = date(2026, 8, 7);
        let dates = vec![date(2026, 8, 6), date(2026, 8, 5)];
        assert_eq!(journal_streak(&dates, today), 2);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let today = date(2026, 8, 7);
        assert_eq!(journal_streak(&[date(2026, 8, 4)], today), 0);
        assert_eq!(journal_streak(&[], today), 0);

        // A hole inside the run stops the count.
        let dates = vec![date(2026, 8, 7), date(2026, 8, 5)];
        assert_eq!(journal_streak(&dates, today), 1);
    }

    #[test]
    fn test_month_calendar_shape() {
        let today = date(2026, 8, 7);
        let (weeks, heading) = month_calendar(&[], today);

        assert_eq!(heading, "August 2026");
        // August 2026 starts on a Saturday and spans six Monday-first weeks.
        assert_eq!(weeks.len(), 6);
        for week in &weeks {
            assert_eq!(week.len(), 7);
        }

        // First cell is Monday July 27th, outside the month.
        assert_eq!(weeks[0][0].day_number, 27);
        assert!(!weeks[0][0].in_month);
        assert!(is_week_start(date(2026, 7, 27)));

        let today_cells: Vec<_> = weeks
            .iter()
            .flatten()
            .filter(|day| day.is_today)
            .collect();
        assert_eq!(today_cells.len(), 1);
        assert_eq!(today_cells[0].day_number, 7);
    }

    #[test]
    fn test_month_calendar_marks_emotions() {
        let today = date(2026, 8, 7);
        let entries = vec![(date(2026, 8, 3), Some(Emotion::JoyExcitement))];
        let (weeks, _) = month_calendar(&entries, today);

        let marked: Vec<_> = weeks
            .iter()
            .flatten()
            .filter(|day| day.emotion.is_some())
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].day_number, 3);
        assert_eq!(marked[0].emotion, Some("joy_excitement"));
        assert_eq!(marked[0].date, "2026-08-03");
    }

    #[test]
    fn test_entries_csv() {
        let rows = vec![
            ExportRow {
                created_at: Utc.with_ymd_and_hms(2026, 8, 6, 9, 30, 0).unwrap(),
                content: "Feeling good, slept well".to_string(),
                emotion: Some(Emotion::JoyExcitement),
                confidence: Some(0.9),
            },
            ExportRow {
                created_at: Utc.with_ymd_and_hms(2026, 8, 5, 22, 0, 0).unwrap(),
                content: "not analyzed yet".to_string(),
                emotion: None,
                confidence: None,
            },
        ];

        let csv = entries_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Date,Journal Text,Emotion,Confidence"));
        assert_eq!(
            lines.next(),
            Some("2026-08-06 09:30,\"Feeling good, slept well\",Joy & Excitement,0.9")
        );
        assert_eq!(lines.next(), Some("2026-08-05 22:00,not analyzed yet,N/A,N/A"));
    }
}
