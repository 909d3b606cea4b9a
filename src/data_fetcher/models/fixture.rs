use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::club;

/// Whether a fixture has been played yet.
///
/// `Live` is part of the published model but nothing produces it: the feed
/// carries no duration, so an in-progress window cannot be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Upcoming,
    Completed,
    Live,
}

impl FixtureStatus {
    /// Status of an event starting at `date`, observed at `now`.
    pub fn at(date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if date < now {
            FixtureStatus::Completed
        } else {
            FixtureStatus::Upcoming
        }
    }
}

/// Outcome from the club's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Draw,
}

impl MatchResult {
    pub fn from_scores(titans: u64, opponent: u64) -> Self {
        match titans.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Loss,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "W",
            MatchResult::Loss => "L",
            MatchResult::Draw => "D",
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled match or club event as shown by the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: String,
    pub date: DateTime<Utc>,
    /// Empty for events that are not a match
    pub opponent: String,
    pub team_name: String,
    pub is_home: bool,
    pub location: String,
    pub competition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_tag: Option<String>,
    pub status: FixtureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
}

impl Fixture {
    /// True for a match against another side carrying the club's name.
    pub fn is_derby(&self) -> bool {
        self.opponent.to_lowercase().contains(club::NAME_ROOT)
    }

    /// True when the event has no opponent (training, socials on weekdays).
    pub fn is_club_only(&self) -> bool {
        self.opponent.is_empty()
    }
}
