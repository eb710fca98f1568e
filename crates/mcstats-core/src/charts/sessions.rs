//! Login-session scatter: one point per login, colored by user

use crate::models::LoginEvent;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::BTreeSet;

/// One login on the date × time-of-day plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterPoint {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub user_name: String,
    /// Hover detail
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionScatter {
    pub points: Vec<ScatterPoint>,
    /// Series (legend) order
    pub users: Vec<String>,
}

impl SessionScatter {
    pub const TITLE: &'static str = "Minecraft Sessions";

    pub fn build(logins: &[LoginEvent]) -> Self {
        let points: Vec<ScatterPoint> = logins
            .iter()
            .map(|event| ScatterPoint {
                date: event.date(),
                time: event.time(),
                user_name: event.user_name.clone(),
                timestamp: event.timestamp,
            })
            .collect();

        let users = points
            .iter()
            .map(|p| p.user_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self { points, users }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Legend index of a user
    pub fn series_index(&self, user_name: &str) -> Option<usize> {
        self.users.iter().position(|u| u == user_name)
    }

    /// First and last login date
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.points.iter().map(|p| p.date).min()?;
        let last = self.points.iter().map(|p| p.date).max()?;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn login(user: &str, ts: &str) -> LoginEvent {
        LoginEvent {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            source: "Server thread/INFO".to_string(),
            message: format!("{} joined the game", user),
            user_name: user.to_string(),
            log_file: PathBuf::from("log.gz"),
        }
    }

    #[test]
    fn test_one_point_per_login() {
        let scatter = SessionScatter::build(&[
            login("Zed", "2024-03-10 14:23:01"),
            login("Alice", "2024-03-11 09:00:00"),
            login("Zed", "2024-03-12 20:15:30"),
        ]);

        assert_eq!(scatter.points.len(), 3);
        assert_eq!(scatter.users, vec!["Alice", "Zed"]);
        assert_eq!(scatter.series_index("Zed"), Some(1));
        assert_eq!(scatter.points[0].time, NaiveTime::from_hms_opt(14, 23, 1).unwrap());
        assert_eq!(
            scatter.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
            ))
        );
    }

    #[test]
    fn test_empty() {
        let scatter = SessionScatter::build(&[]);
        assert!(scatter.is_empty());
        assert_eq!(scatter.date_range(), None);
    }
}
