//! Participant ranking.

use serde::{Deserialize, Serialize};

use crate::stats::rank_by_count;
use crate::table::ChatTable;

/// Messages sent by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    pub name: String,
    pub count: usize,
}

/// A participant's share of the chat, in percent rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserShare {
    pub name: String,
    pub percent: f64,
}

/// Result of [`most_busy_users`](crate::stats::most_busy_users).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusyUsers {
    /// The busiest participants, most messages first.
    pub top: Vec<UserCount>,
    /// Every participant's share of all participant messages.
    pub shares: Vec<UserShare>,
}

impl BusyUsers {
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Ranks senders by message count.
///
/// Group notifications are not a participant and are left out of both the
/// ranking and the percentage base.
pub(crate) fn most_busy_users(table: &ChatTable, top_n: usize) -> BusyUsers {
    let ranked = rank_by_count(
        table
            .iter()
            .filter(|m| !m.is_notification())
            .map(|m| m.sender.as_str()),
    );
    let total: usize = ranked.iter().map(|(_, count)| count).sum();

    let shares = ranked
        .iter()
        .map(|&(name, count)| UserShare {
            name: name.to_string(),
            percent: round2(count as f64 * 100.0 / total as f64),
        })
        .collect();

    let top = ranked
        .into_iter()
        .take(top_n)
        .map(|(name, count)| UserCount {
            name: name.to_string(),
            count,
        })
        .collect();

    BusyUsers { top, shares }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use crate::parser::preprocess;
    use crate::stats::{StatsEngine, most_busy_users};
    use crate::config::AnalysisConfig;

    #[test]
    fn test_scenario_ranking() {
        let table = preprocess(
            "01/01/24, 10:00 - Alice: Hello there
01/01/24, 10:01 - Bob: <Media omitted>
01/01/24, 10:02 - Alice: https://example.com check this",
        );
        let busy = most_busy_users(&table);
        assert_eq!(busy.top[0].name, "Alice");
        assert_eq!(busy.top[0].count, 2);
        assert_eq!(busy.top[1].name, "Bob");
        assert_eq!(busy.top[1].count, 1);
        assert_eq!(busy.shares[0].percent, 66.67);
        assert_eq!(busy.shares[1].percent, 33.33);
    }

    #[test]
    fn test_notifications_excluded() {
        let table = preprocess(
            "01/01/24, 09:00 - Alice created group \"Trip\"
01/01/24, 09:01 - Bob added Carol
01/01/24, 09:02 - Carol: hi",
        );
        let busy = most_busy_users(&table);
        assert_eq!(busy.top.len(), 1);
        assert_eq!(busy.shares[0].percent, 100.0);
    }

    #[test]
    fn test_top_n_limit_and_ties() {
        let mut lines = Vec::new();
        for (i, name) in ["F", "E", "D", "C", "B", "A"].iter().enumerate() {
            lines.push(format!("01/01/24, 10:{i:02} - {name}: hi"));
        }
        let table = preprocess(&lines.join("\n"));

        let busy = most_busy_users(&table);
        assert_eq!(busy.top.len(), 5);
        assert_eq!(busy.shares.len(), 6);
        // equal counts keep first-seen order
        assert_eq!(busy.top[0].name, "F");

        let engine = StatsEngine::new(AnalysisConfig::new().with_top_users(2)).unwrap();
        assert_eq!(engine.most_busy_users(&table).top.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let busy = most_busy_users(&preprocess(""));
        assert!(busy.is_empty());
        assert!(busy.top.is_empty());
    }
}
