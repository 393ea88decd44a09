use crate::models::{
    CalendarDay, CalendarMonth, DayCount, LedgerData, ProgressResponse, TypeCount,
};
use chrono::{Datelike, Duration, Local, NaiveDate};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

/// Days needed to fill the streak progress bar.
pub const STREAK_GOAL_DAYS: u32 = 30;

/// Where the streak run is counted back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreakAnchor {
    /// The most recent date with logged tasks, however long ago that was.
    #[default]
    LatestLog,
    /// Today; the streak is zero unless something was logged today.
    Today,
}

impl StreakAnchor {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latest" | "latest_log" => Some(Self::LatestLog),
            "today" => Some(Self::Today),
            _ => None,
        }
    }
}

impl fmt::Display for StreakAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatestLog => f.write_str("latest"),
            Self::Today => f.write_str("today"),
        }
    }
}

pub fn build_progress(data: &LedgerData, anchor: StreakAnchor) -> ProgressResponse {
    build_progress_at(Local::now().date_naive(), data, anchor)
}

pub fn build_progress_at(
    today: NaiveDate,
    data: &LedgerData,
    anchor: StreakAnchor,
) -> ProgressResponse {
    let streak = streak_length(data, anchor, today);

    ProgressResponse {
        today: date_key(today),
        calendar: calendar_month_at(today, data),
        streak,
        streak_ratio: streak_ratio(streak),
        streak_anchor: anchor.to_string(),
        total_tasks: data.total_tasks(),
        type_distribution: type_distribution(data),
        tasks_per_day: tasks_per_day(data),
    }
}

/// Every day of `today`'s month, flagged when the ledger has a bucket for it.
pub fn calendar_month_at(today: NaiveDate, data: &LedgerData) -> CalendarMonth {
    let first = today - Duration::days(i64::from(today.day0()));

    let days: Vec<CalendarDay> = first
        .iter_days()
        .take_while(|date| date.month() == first.month())
        .map(|date| {
            let key = date_key(date);
            CalendarDay {
                has_tasks: data.tasks.contains_key(&key),
                date: key,
                day: date.day(),
                weekday: weekday_index(date),
            }
        })
        .collect();

    CalendarMonth {
        year: first.year(),
        month: first.month(),
        label: first.format("%B %Y").to_string(),
        leading_blanks: weekday_index(first),
        days,
    }
}

/// Length of the run of consecutive logged days ending at the anchor.
pub fn streak_length(data: &LedgerData, anchor: StreakAnchor, today: NaiveDate) -> u32 {
    let logged = logged_dates(data);
    let start = match anchor {
        StreakAnchor::LatestLog => match logged.last() {
            Some(latest) => *latest,
            None => return 0,
        },
        StreakAnchor::Today => today,
    };

    let mut streak = 0;
    let mut cursor = Some(start);
    while let Some(day) = cursor {
        if !logged.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

pub fn streak_ratio(streak: u32) -> f64 {
    (f64::from(streak) / f64::from(STREAK_GOAL_DAYS)).min(1.0)
}

/// Task counts per type, in order of each type's first appearance.
pub fn type_distribution(data: &LedgerData) -> Vec<TypeCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for entry in data.tasks.values().flatten() {
        *counts.entry(entry.kind.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(kind, count)| TypeCount {
            kind: kind.to_string(),
            count,
        })
        .collect()
}

/// One point per bucket, in ledger order.
pub fn tasks_per_day(data: &LedgerData) -> Vec<DayCount> {
    data.tasks
        .iter()
        .map(|(date, entries)| DayCount {
            date: date.clone(),
            count: entries.len(),
        })
        .collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

fn logged_dates(data: &LedgerData) -> BTreeSet<NaiveDate> {
    data.tasks
        .keys()
        .filter_map(|key| match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(err) => {
                warn!(key = %key, "skipping malformed date bucket: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskEntry, TaskKind};

    fn entry(kind: TaskKind) -> TaskEntry {
        TaskEntry {
            kind,
            description: String::new(),
            priority: Priority::Medium,
        }
    }

    fn ledger_with(dates: &[&str]) -> LedgerData {
        let mut data = LedgerData::default();
        for date in dates {
            data.tasks
                .insert(date.to_string(), vec![entry(TaskKind::Coding)]);
        }
        data
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn streak_counts_contiguous_run_to_latest_date() {
        let data = ledger_with(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(
            streak_length(&data, StreakAnchor::LatestLog, day(2024, 6, 1)),
            3
        );
    }

    #[test]
    fn streak_restarts_after_gap() {
        let data = ledger_with(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-05"]);
        assert_eq!(
            streak_length(&data, StreakAnchor::LatestLog, day(2024, 1, 5)),
            1
        );
    }

    #[test]
    fn streak_anchor_ignores_insertion_order() {
        let data = ledger_with(&["2024-01-03", "2024-01-01", "2024-01-02"]);
        assert_eq!(
            streak_length(&data, StreakAnchor::LatestLog, day(2024, 1, 3)),
            3
        );
    }

    #[test]
    fn streak_is_zero_for_empty_ledger() {
        let data = LedgerData::default();
        assert_eq!(
            streak_length(&data, StreakAnchor::LatestLog, day(2024, 1, 1)),
            0
        );
        assert_eq!(streak_length(&data, StreakAnchor::Today, day(2024, 1, 1)), 0);
    }

    #[test]
    fn today_anchor_drops_stale_streaks() {
        let data = ledger_with(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(streak_length(&data, StreakAnchor::Today, day(2024, 1, 6)), 0);
        assert_eq!(streak_length(&data, StreakAnchor::Today, day(2024, 1, 3)), 3);
        assert_eq!(
            streak_length(&data, StreakAnchor::LatestLog, day(2024, 1, 6)),
            3
        );
    }

    #[test]
    fn streak_skips_malformed_keys() {
        let data = ledger_with(&["2024-01-01", "not-a-date", "2024-01-02"]);
        assert_eq!(
            streak_length(&data, StreakAnchor::LatestLog, day(2024, 1, 2)),
            2
        );
    }

    #[test]
    fn streak_ratio_caps_at_one() {
        assert_eq!(streak_ratio(0), 0.0);
        assert_eq!(streak_ratio(15), 0.5);
        assert_eq!(streak_ratio(30), 1.0);
        assert_eq!(streak_ratio(45), 1.0);
    }

    #[test]
    fn calendar_marks_only_logged_days() {
        let data = ledger_with(&["2024-02-05", "2024-02-06", "2024-03-05"]);
        let calendar = calendar_month_at(day(2024, 2, 20), &data);

        assert_eq!(calendar.days.len(), 29);
        assert_eq!(calendar.label, "February 2024");
        let marked: Vec<u32> = calendar
            .days
            .iter()
            .filter(|d| d.has_tasks)
            .map(|d| d.day)
            .collect();
        assert_eq!(marked, vec![5, 6]);
    }

    #[test]
    fn calendar_places_days_by_weekday() {
        let calendar = calendar_month_at(day(2024, 2, 1), &LedgerData::default());
        // 2024-02-01 was a Thursday.
        assert_eq!(calendar.leading_blanks, 3);
        assert_eq!(calendar.days[0].weekday, 3);
        assert_eq!(calendar.days[4].weekday, 0);
        assert!(calendar.days.windows(2).all(|w| w[0].day + 1 == w[1].day));
    }

    #[test]
    fn calendar_handles_december() {
        let calendar = calendar_month_at(day(2024, 12, 31), &LedgerData::default());
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.days.last().unwrap().date, "2024-12-31");
    }

    #[test]
    fn distribution_counts_each_type_once() {
        let mut data = LedgerData::default();
        data.tasks.insert(
            "2024-01-01".to_string(),
            vec![entry(TaskKind::Coding), entry(TaskKind::Coding)],
        );
        data.tasks
            .insert("2024-01-02".to_string(), vec![entry(TaskKind::Reading)]);

        assert_eq!(
            type_distribution(&data),
            vec![
                TypeCount {
                    kind: "Coding".to_string(),
                    count: 2
                },
                TypeCount {
                    kind: "Reading".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn tasks_per_day_keeps_ledger_order() {
        let mut data = ledger_with(&["2024-01-05", "2024-01-02"]);
        data.tasks
            .get_mut("2024-01-02")
            .unwrap()
            .push(entry(TaskKind::Exercise));

        let series = tasks_per_day(&data);
        assert_eq!(
            series,
            vec![
                DayCount {
                    date: "2024-01-05".to_string(),
                    count: 1
                },
                DayCount {
                    date: "2024-01-02".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn progress_for_empty_ledger() {
        let progress =
            build_progress_at(day(2024, 2, 10), &LedgerData::default(), StreakAnchor::LatestLog);
        assert_eq!(progress.today, "2024-02-10");
        assert_eq!(progress.streak, 0);
        assert_eq!(progress.streak_ratio, 0.0);
        assert_eq!(progress.total_tasks, 0);
        assert!(progress.type_distribution.is_empty());
        assert!(progress.tasks_per_day.is_empty());
        assert!(progress.calendar.days.iter().all(|d| !d.has_tasks));
    }

    #[test]
    fn anchor_names_parse() {
        assert_eq!(StreakAnchor::parse("Today"), Some(StreakAnchor::Today));
        assert_eq!(StreakAnchor::parse(" latest "), Some(StreakAnchor::LatestLog));
        assert_eq!(StreakAnchor::parse("yesterday"), None);
    }
}
