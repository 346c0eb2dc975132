use serde::{Deserialize, Serialize};

use crate::watched::WatchedMovie;

/// Aggregate statistics shown above the watch list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchSummary {
    /// Derive the summary from a watch list.
    ///
    /// Entries with an unknown upstream rating or runtime are left out of
    /// that particular average. Every average of an empty set is 0.
    pub fn from_watched(watched: &[WatchedMovie]) -> Self {
        Self {
            count: watched.len(),
            avg_imdb_rating: average(watched.iter().filter_map(|m| m.imdb_rating.map(f64::from))),
            avg_user_rating: average(watched.iter().map(|m| f64::from(m.user_rating))),
            avg_runtime: average(watched.iter().filter_map(|m| m.runtime.map(f64::from))),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watched(id: &str, imdb: Option<f32>, runtime: Option<u32>, user: u8) -> WatchedMovie {
        WatchedMovie {
            imdb_id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2020".to_string(),
            poster: None,
            imdb_rating: imdb,
            runtime,
            user_rating: user,
            count_rating_decisions: 1,
            added_at: None,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = WatchSummary::from_watched(&[]);
        assert_eq!(summary, WatchSummary::default());
    }

    #[test]
    fn test_averages() {
        let list = vec![
            watched("tt1", Some(8.0), Some(120), 10),
            watched("tt2", Some(6.0), Some(100), 6),
        ];
        let summary = WatchSummary::from_watched(&list);
        assert_eq!(summary.count, 2);
        assert!((summary.avg_imdb_rating - 7.0).abs() < 1e-9);
        assert!((summary.avg_user_rating - 8.0).abs() < 1e-9);
        assert!((summary.avg_runtime - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_values_skipped() {
        let list = vec![
            watched("tt1", None, None, 4),
            watched("tt2", Some(9.0), Some(90), 8),
        ];
        let summary = WatchSummary::from_watched(&list);
        assert_eq!(summary.count, 2);
        assert!((summary.avg_imdb_rating - 9.0).abs() < 1e-9);
        assert!((summary.avg_runtime - 90.0).abs() < 1e-9);
        assert!((summary.avg_user_rating - 6.0).abs() < 1e-9);
    }
}
