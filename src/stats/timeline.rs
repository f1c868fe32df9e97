//! Time-based views: timelines, activity maps and the weekly heatmap.
//!
//! | View | Grouped by | Order |
//! |------|------------|-------|
//! | [`monthly_timeline`] | year + month | chronological |
//! | [`daily_timeline`] | calendar date | chronological |
//! | [`week_activity_map`] | weekday name | busiest first |
//! | [`month_activity_map`] | month name | busiest first |
//! | [`activity_heatmap`] | weekday × hour bucket | Monday first, midnight first |

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::message::period_label;
use crate::stats::rank_by_count;
use crate::table::ChatTable;

/// Message count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub year: i32,
    pub month_num: u32,
    /// English month name.
    pub month: String,
    pub count: usize,
    /// Axis label, `"<Month>-<Year>"`.
    pub label: String,
}

/// Message count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub count: usize,
}

/// Message count for one label (a weekday or a month name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    pub label: String,
    pub count: usize,
}

/// Weekday by hour-of-day message counts.
///
/// Always holds all seven weekdays and all 24 hour buckets, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    /// Weekday names, Monday first.
    pub days: Vec<String>,
    /// Hour bucket labels, `"00-1"` first.
    pub periods: Vec<String>,
    /// `counts[day][hour]`.
    pub counts: Vec<Vec<usize>>,
}

impl ActivityHeatmap {
    /// Count for a weekday name and period label.
    pub fn get(&self, day: &str, period: &str) -> Option<usize> {
        let row = self.days.iter().position(|d| d == day)?;
        let col = self.periods.iter().position(|p| p == period)?;
        Some(self.counts[row][col])
    }

    /// Largest cell value.
    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub(crate) fn monthly_timeline(table: &ChatTable) -> Vec<TimelinePoint> {
    let mut buckets: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();
    for msg in table {
        buckets
            .entry((msg.year(), msg.month_num()))
            .or_insert_with(|| (msg.month_name(), 0))
            .1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month_num), (month, count))| TimelinePoint {
            label: format!("{month}-{year}"),
            year,
            month_num,
            month,
            count,
        })
        .collect()
}

pub(crate) fn daily_timeline(table: &ChatTable) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for msg in table {
        *days.entry(msg.only_date()).or_default() += 1;
    }
    days.into_iter()
        .map(|(date, count)| DailyPoint { date, count })
        .collect()
}

pub(crate) fn week_activity_map(table: &ChatTable) -> Vec<ActivityCount> {
    to_activity(rank_by_count(table.iter().map(|m| m.day_name())))
}

pub(crate) fn month_activity_map(table: &ChatTable) -> Vec<ActivityCount> {
    to_activity(rank_by_count(table.iter().map(|m| m.month_name())))
}

fn to_activity(ranked: Vec<(String, usize)>) -> Vec<ActivityCount> {
    ranked
        .into_iter()
        .map(|(label, count)| ActivityCount { label, count })
        .collect()
}

pub(crate) fn activity_heatmap(table: &ChatTable) -> ActivityHeatmap {
    let mut counts = vec![vec![0usize; 24]; WEEK.len()];
    for msg in table {
        let row = msg.timestamp.date().weekday().num_days_from_monday() as usize;
        counts[row][msg.hour() as usize] += 1;
    }

    ActivityHeatmap {
        days: WEEK.iter().map(|d| weekday_name(*d).to_string()).collect(),
        periods: (0..24).map(period_label).collect(),
        counts,
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Selection;
    use crate::parser::preprocess;
    use crate::stats::{
        activity_heatmap, daily_timeline, month_activity_map, monthly_timeline,
        week_activity_map,
    };
    use chrono::NaiveDate;

    // 2024-01-01 is a Monday
    const CHAT: &str = "01/01/24, 10:00 - Alice: new year
01/01/24, 23:30 - Bob: late
03/01/24, 00:15 - Alice: later
15/02/24, 09:00 - Bob: feb
16/02/24, 09:10 - Alice: feb again
05/12/23, 08:00 - Bob: out of order";

    #[test]
    fn test_monthly_timeline_chronological() {
        let table = preprocess(CHAT);
        let points = monthly_timeline(&Selection::Overall, &table);
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["December-2023", "January-2024", "February-2024"]);
        assert_eq!(points[1].count, 3);
        assert_eq!(points[1].month_num, 1);
        assert_eq!(points.iter().map(|p| p.count).sum::<usize>(), table.len());
    }

    #[test]
    fn test_daily_timeline() {
        let table = preprocess(CHAT);
        let days = daily_timeline(&"Alice".into(), &table);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_week_activity_map_busiest_first() {
        let table = preprocess(CHAT);
        let week = week_activity_map(&Selection::Overall, &table);
        assert_eq!(week[0].label, "Monday");
        assert_eq!(week[0].count, 2);
        assert!(week.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_month_activity_map() {
        let table = preprocess(CHAT);
        let months = month_activity_map(&Selection::Overall, &table);
        assert_eq!(months[0].label, "January");
        assert_eq!(months[0].count, 3);
        assert_eq!(months[1].label, "February");
    }

    #[test]
    fn test_heatmap_cells() {
        let table = preprocess(CHAT);
        let heat = activity_heatmap(&Selection::Overall, &table);
        assert_eq!(heat.days.len(), 7);
        assert_eq!(heat.periods.len(), 24);
        assert_eq!(heat.get("Monday", "10-11"), Some(1));
        assert_eq!(heat.get("Monday", "23-00"), Some(1));
        assert_eq!(heat.get("Wednesday", "00-1"), Some(1));
        assert_eq!(heat.get("Funday", "00-1"), None);
        assert_eq!(heat.total(), table.len());
        assert_eq!(heat.max(), 1);
    }

    #[test]
    fn test_empty_views() {
        let table = preprocess("");
        assert!(monthly_timeline(&Selection::Overall, &table).is_empty());
        assert!(daily_timeline(&Selection::Overall, &table).is_empty());
        assert!(week_activity_map(&Selection::Overall, &table).is_empty());
        assert_eq!(activity_heatmap(&Selection::Overall, &table).max(), 0);
    }
}
