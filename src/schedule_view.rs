//! Filtering and plain-text rendering of fixture lists for the CLI

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::data_fetcher::models::{Fixture, FixtureStatus};
use crate::error::AppError;

/// Which side of the fixture list to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FilterType {
    #[default]
    All,
    Home,
    Away,
}

impl FilterType {
    pub fn matches(&self, fixture: &Fixture) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Home => fixture.is_home,
            FilterType::Away => !fixture.is_home,
        }
    }
}

/// A calendar month in local time, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| AppError::datetime_parse_error(format!("Invalid month {year}-{month:02}")))
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        let local = date.with_timezone(&Local);
        local.year() == self.year && local.month() == self.month
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first_day = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|e| {
                AppError::datetime_parse_error(format!("Invalid month '{s}', expected YYYY-MM: {e}"))
            })?;
        Ok(Self {
            year: first_day.year(),
            month: first_day.month(),
        })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Keeps the fixtures matching both filters, in their original order.
pub fn filter_fixtures(fixtures: &[Fixture], filter: FilterType, month: Option<Month>) -> Vec<&Fixture> {
    fixtures
        .iter()
        .filter(|f| filter.matches(f))
        .filter(|f| month.is_none_or(|m| m.contains(f.date)))
        .collect()
}

/// First upcoming fixture of a date-sorted list.
pub fn next_upcoming<'a, I>(fixtures: I) -> Option<&'a Fixture>
where
    I: IntoIterator<Item = &'a Fixture>,
{
    fixtures
        .into_iter()
        .find(|f| f.status == FixtureStatus::Upcoming)
}

fn badge(fixture: &Fixture) -> &'static str {
    if fixture.is_derby() {
        "DERBY"
    } else if fixture.is_home {
        "H"
    } else {
        "A"
    }
}

/// One line describing a fixture, with the start in local time.
pub fn format_fixture_line(fixture: &Fixture) -> String {
    let start = fixture.date.with_timezone(&Local).format("%a %d %b %Y %H:%M");

    let mut line = if fixture.is_club_only() {
        format!("{start}  {:<5}  {}", "-", fixture.team_name)
    } else {
        format!(
            "{start}  {:<5}  {} vs {}",
            badge(fixture),
            fixture.team_name,
            fixture.opponent
        )
    };

    line.push_str("  | ");
    line.push_str(&fixture.competition);
    if let Some(tag) = &fixture.competition_tag {
        line.push_str(&format!(" [{tag}]"));
    }

    if let (Some(score), Some(result)) = (&fixture.score, fixture.result) {
        line.push_str(&format!("  {score} {result}"));
    }

    line.push_str("  @ ");
    line.push_str(&fixture.location);
    line
}

/// Renders a list of fixtures, one per line.
pub fn render_fixtures(fixtures: &[&Fixture]) -> String {
    if fixtures.is_empty() {
        return "No fixtures found".to_string();
    }
    fixtures
        .iter()
        .map(|f| format_fixture_line(f))
        .collect::<Vec<_>>()
        .join("\n")
}
