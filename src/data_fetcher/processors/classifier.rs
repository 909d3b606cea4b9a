use chrono::{DateTime, Datelike, Local, Utc};
use tracing::debug;

use crate::constants::{club, labels};
use crate::data_fetcher::ics::{decode_date, text::flatten_text};
use crate::data_fetcher::models::{Fixture, FixtureStatus, RawEvent};

use super::competition::resolve_competition;
use super::score::{ScoreSource, extract_score, find_score};
use super::teams::{TitleKind, apply_identity_failsafe, assign_sides, clean_names};

/// Unescaped, single-line text fields of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventText {
    pub summary: String,
    pub location: String,
    pub description: String,
}

impl EventText {
    pub fn from_raw(event: &RawEvent) -> Self {
        let location = event
            .location()
            .map(flatten_text)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| club::UNKNOWN_LOCATION.to_string());
        Self {
            summary: flatten_text(event.summary().unwrap_or_default()),
            location,
            description: flatten_text(event.description().unwrap_or_default()),
        }
    }
}

fn generated_id() -> String {
    format!("generated-{:016x}", rand::random::<u64>())
}

/// Builds a fixture from an event whose start has already been decoded.
pub fn map_event_to_fixture(event: &RawEvent, date: DateTime<Utc>, now: DateTime<Utc>) -> Fixture {
    let text = EventText::from_raw(event);
    let weekday = date.with_timezone(&Local).weekday();

    let score = extract_score(&text.description, &text.summary);
    let summary_score = score
        .as_ref()
        .filter(|s| s.source == ScoreSource::Summary);

    // A score in the title can hold the separator even when the reported
    // score comes from the description.
    let title_score_span = find_score(&text.summary, ScoreSource::Summary).map(|s| s.span);
    let mut sides = assign_sides(&text.summary, weekday, title_score_span);
    apply_identity_failsafe(&mut sides);

    let result = score.as_ref().map(|s| s.result(sides.is_home));
    clean_names(&mut sides, summary_score.map(|s| s.raw.as_str()));

    let initial = if sides.kind == TitleKind::Training {
        labels::TRAINING
    } else {
        labels::FIXTURE
    };
    let competition = resolve_competition(
        initial,
        &text.description,
        &text.summary,
        &sides.opponent,
        sides.kind == TitleKind::Single,
    );

    Fixture {
        id: event
            .uid()
            .map(str::to_string)
            .unwrap_or_else(generated_id),
        date,
        opponent: sides.opponent,
        team_name: sides.team_name,
        is_home: sides.is_home,
        location: text.location,
        competition: competition.name,
        competition_tag: competition.tag,
        status: FixtureStatus::at(date, now),
        score: score.as_ref().map(|s| s.normalized()),
        result,
    }
}

/// Maps one raw event, dropping it when the start cannot be decoded.
pub fn classify_event(event: &RawEvent, now: DateTime<Utc>) -> Option<Fixture> {
    let dtstart = event.dtstart()?;
    event.summary()?;
    match decode_date(dtstart) {
        Ok(date) => Some(map_event_to_fixture(event, date, now)),
        Err(e) => {
            debug!(
                uid = event.uid().unwrap_or("-"),
                error = %e,
                "Dropping event with undecodable start"
            );
            None
        }
    }
}

/// Maps every usable event; order follows the feed.
pub fn classify_events(events: &[RawEvent], now: DateTime<Utc>) -> Vec<Fixture> {
    events
        .iter()
        .filter_map(|event| classify_event(event, now))
        .collect()
}
