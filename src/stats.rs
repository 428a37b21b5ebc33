use crate::model::attendance::{AttendanceDay, AttendanceStatus, AttendanceSummary, HistoryEntry};

/// Builds a student's attendance summary from the ledger days that mention them.
///
/// Days are visited in ascending date order; a day without an entry for `name`
/// is skipped, and a day with several entries for `name` counts its first one.
pub fn summarize(name: &str, days: impl IntoIterator<Item = AttendanceDay>) -> AttendanceSummary {
    let mut days: Vec<AttendanceDay> = days.into_iter().collect();
    days.sort_by_key(|day| day.date);

    let history: Vec<HistoryEntry> = days
        .iter()
        .filter_map(|day| {
            day.status_of(name).map(|status| HistoryEntry {
                date: day.date,
                status,
            })
        })
        .collect();

    let total = history.len() as u32;
    let present = history
        .iter()
        .filter(|entry| entry.status == AttendanceStatus::Present)
        .count() as u32;

    AttendanceSummary {
        name: name.to_string(),
        present,
        total,
        percentage: percentage(present, total),
        history,
    }
}

/// Percentage rounded to two decimals; 0 when nothing was recorded.
pub fn percentage(present: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(present) / f64::from(total) * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceEntry;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn day(d: &str, records: &[(&str, AttendanceStatus)]) -> AttendanceDay {
        AttendanceDay {
            date: date(d),
            records: records
                .iter()
                .map(|(name, status)| AttendanceEntry {
                    name: name.to_string(),
                    status: *status,
                })
                .collect(),
        }
    }

    #[test]
    fn test_two_of_three_present() {
        use AttendanceStatus::*;
        let days = vec![
            day("2024-01-03", &[("A", Absent), ("B", Present)]),
            day("2024-01-01", &[("A", Present)]),
            day("2024-01-02", &[("B", Absent), ("A", Present)]),
        ];

        let summary = summarize("A", days);

        assert_eq!(summary.present, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.percentage, 66.67);
        let dates: Vec<_> = summary.history.iter().map(|h| h.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-01"), date("2024-01-02"), date("2024-01-03")]
        );
        assert_eq!(summary.history[2].status, Absent);
    }

    #[test]
    fn test_no_matching_days() {
        let days = vec![day("2024-01-01", &[("B", AttendanceStatus::Present)])];

        let summary = summarize("A", days);

        assert_eq!(summary.name, "A");
        assert_eq!(summary.present, 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.percentage, 0.0);
        assert!(summary.history.is_empty());
    }

    #[test]
    fn test_name_match_is_exact() {
        let days = vec![day("2024-01-01", &[("alice", AttendanceStatus::Present)])];
        assert_eq!(summarize("Alice", days).total, 0);
    }

    #[test]
    fn test_duplicate_entry_counts_once() {
        use AttendanceStatus::*;
        let days = vec![day("2024-01-01", &[("A", Present), ("A", Absent)])];

        let summary = summarize("A", days);

        assert_eq!(summary.total, 1);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.percentage, 100.0);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(5, 6), 83.33);
        assert_eq!(percentage(3, 3), 100.0);
    }
}
