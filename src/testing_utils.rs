//! Test utilities: fixture and feed builders, a scripted fetcher and a fixed clock

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;
use std::sync::Mutex;

use crate::constants::{club, labels};
use crate::data_fetcher::api::{Clock, Fetcher, status_error};
use crate::data_fetcher::ics::escape_text;
use crate::data_fetcher::models::{Fixture, FixtureStatus, MatchResult};
use crate::error::AppError;

/// Builds [`Fixture`] values with sensible defaults: a home fixture on
/// Saturday 9 March 2024 at 14:00 UTC that has not been played yet.
pub struct FixtureBuilder {
    fixture: Fixture,
}

impl FixtureBuilder {
    pub fn new(opponent: &str) -> Self {
        Self {
            fixture: Fixture {
                id: format!("fixture-{}", opponent.to_lowercase().replace(' ', "-")),
                date: Utc
                    .with_ymd_and_hms(2024, 3, 9, 14, 0, 0)
                    .single()
                    .unwrap_or_default(),
                opponent: opponent.to_string(),
                team_name: club::TEAM_NAME.to_string(),
                is_home: true,
                location: club::UNKNOWN_LOCATION.to_string(),
                competition: labels::FIXTURE.to_string(),
                competition_tag: None,
                status: FixtureStatus::Upcoming,
                score: None,
                result: None,
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.fixture.id = id.to_string();
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.fixture.date = date;
        self
    }

    pub fn away(mut self) -> Self {
        self.fixture.is_home = false;
        self
    }

    pub fn team_name(mut self, team_name: &str) -> Self {
        self.fixture.team_name = team_name.to_string();
        self
    }

    pub fn competition(mut self, competition: &str) -> Self {
        self.fixture.competition = competition.to_string();
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.fixture.competition_tag = Some(tag.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.fixture.location = location.to_string();
        self
    }

    /// Marks the fixture as played with the given score and result.
    pub fn completed(mut self, score: &str, result: MatchResult) -> Self {
        self.fixture.status = FixtureStatus::Completed;
        self.fixture.score = Some(score.to_string());
        self.fixture.result = Some(result);
        self
    }

    pub fn build(self) -> Fixture {
        self.fixture
    }
}

/// Builds calendar feeds the way Google Calendar serves them (CRLF, escaped text).
#[derive(Default)]
pub struct IcsFeedBuilder {
    lines: Vec<String>,
}

impl IcsFeedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event; `summary` and `description` are escaped.
    pub fn event(self, uid: &str, dtstart: &str, summary: &str, description: Option<&str>) -> Self {
        let mut lines = vec![
            "BEGIN:VEVENT".to_string(),
            format!("DTSTART:{dtstart}"),
            format!("UID:{uid}"),
            format!("SUMMARY:{}", escape_text(summary)),
        ];
        if let Some(description) = description {
            lines.push(format!("DESCRIPTION:{}", escape_text(description)));
        }
        lines.push("END:VEVENT".to_string());
        self.raw_lines(&lines)
    }

    /// Appends lines verbatim, for folded or malformed content.
    pub fn raw_lines<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        self.lines
            .extend(lines.iter().map(|line| line.as_ref().to_string()));
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from(
            "BEGIN:VCALENDAR\r\nPRODID:-//Google Inc//Google Calendar 70.9054//EN\r\nVERSION:2.0\r\nCALSCALE:GREGORIAN\r\n",
        );
        for line in &self.lines {
            out.push_str(line);
            out.push_str("\r\n");
        }
        out.push_str("END:VCALENDAR\r\n");
        out
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Canned outcome for a scripted request
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Body(String),
    Status(u16),
    Timeout,
    ConnectionRefused,
}

/// In-memory [`Fetcher`] answering by URL prefix and recording every request.
/// Unscripted URLs answer 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    replies: Vec<(String, ScriptedReply)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url_prefix: &str, reply: ScriptedReply) -> Self {
        self.replies.push((url_prefix.to_string(), reply));
        self
    }

    /// URLs requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn get_text(&self, url: &str) -> Result<String, AppError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());

        let reply = self
            .replies
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(ScriptedReply::Body(body)) => Ok(body),
            Some(ScriptedReply::Status(code)) => {
                let status =
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Err(status_error(status, url))
            }
            Some(ScriptedReply::Timeout) => Err(AppError::network_timeout(url, 25)),
            Some(ScriptedReply::ConnectionRefused) => {
                Err(AppError::network_connection(url, "connection refused"))
            }
            None => Err(AppError::api_not_found(url)),
        }
    }
}
