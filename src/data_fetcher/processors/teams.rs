//! Home/away, team and opponent inference from free-form event titles
//!
//! The checks run in a fixed order: training first, then a head-to-head
//! separator, then a weekday/weekend fallback. A title like
//! `Titans Training vs Injuries` is therefore training, not a match.

use chrono::Weekday;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::constants::{MAX_SIDE_NAME_LENGTH, club, labels};

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)(\s+(?:v|vs|V|VS|Vs|against)\.?\s+|\s+[-–—]\s+)(.*)$")
        .expect("valid separator regex")
});

static CLUB_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(london )?titans\s+").expect("valid prefix regex"));

static FULL_CLUB_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", regex::escape(club::FULL_NAME))).expect("valid club name regex")
});

/// How a title was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    Training,
    HeadToHead,
    /// No separator; the whole title names the event
    Single,
}

/// Sides inferred from an event title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sides {
    pub team_name: String,
    pub opponent: String,
    pub is_home: bool,
    pub kind: TitleKind,
}

impl Default for Sides {
    fn default() -> Self {
        Self {
            team_name: club::TEAM_NAME.to_string(),
            opponent: String::new(),
            is_home: true,
            kind: TitleKind::Single,
        }
    }
}

fn mentions_club(text: &str) -> bool {
    text.to_lowercase().contains(club::NAME_ROOT)
}

fn is_bare_club_name(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    lower == "titans" || lower == "london titans"
}

/// Removes a leading `Titans ` or `London Titans `, keeping the title if nothing remains.
pub fn strip_club_prefix(summary: &str) -> String {
    let stripped = CLUB_PREFIX.replace(summary, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        summary.to_string()
    } else {
        stripped.to_string()
    }
}

/// Collapses every `London Titans` to `Titans`.
pub fn collapse_club_name(name: &str) -> String {
    FULL_CLUB_NAME
        .replace_all(name, club::TEAM_NAME)
        .trim()
        .to_string()
}

/// Splits `A <sep> B`, returning trimmed sides and the separator's byte range.
fn split_head_to_head(summary: &str) -> Option<(&str, &str, Range<usize>)> {
    let caps = SEPARATOR.captures(summary)?;
    let separator = caps.get(2)?;
    let home = caps.get(1).map_or("", |m| m.as_str());
    let away = caps.get(3).map_or("", |m| m.as_str());
    Some((home, away, separator.range()))
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Infers the club side and opponent from a title.
///
/// `score_span` is the byte range of a score found in the summary. When the
/// separator falls inside it (`Stonewall FC 2 - 3 London Titans`), the whole
/// score is used as the separator.
pub fn assign_sides(summary: &str, weekday: Weekday, score_span: Option<Range<usize>>) -> Sides {
    let mut sides = Sides::default();

    if summary.to_lowercase().contains("training") {
        sides.team_name = strip_club_prefix(summary);
        sides.opponent.clear();
        sides.kind = TitleKind::Training;
        return sides;
    }

    if let Some((raw_home, raw_away, separator)) = split_head_to_head(summary) {
        sides.kind = TitleKind::HeadToHead;

        let (raw_home, raw_away) = match score_span {
            Some(score) if overlaps(&score, &separator) => {
                (&summary[..score.start], &summary[score.end..])
            }
            _ => (raw_home, raw_away),
        };
        let (home, away) = (raw_home.trim(), raw_away.trim());

        if !home.is_empty() && !away.is_empty() {
            if mentions_club(away) {
                sides.is_home = false;
                sides.opponent = home.to_string();
                sides.team_name = away.to_string();
            } else if mentions_club(home) {
                sides.is_home = true;
                sides.opponent = away.to_string();
                sides.team_name = home.to_string();
            } else {
                sides.opponent = away.to_string();
                if raw_home.chars().count() < MAX_SIDE_NAME_LENGTH {
                    sides.team_name = home.to_string();
                }
            }
        }
        return sides;
    }

    let is_weekday = weekday.number_from_monday() <= 5;
    if is_weekday {
        sides.team_name = strip_club_prefix(summary);
        sides.opponent.clear();
        sides.is_home = true;
    } else if is_bare_club_name(summary) {
        sides.opponent = labels::INTERNAL_EVENT.to_string();
    } else if mentions_club(summary) {
        sides.team_name = summary.to_string();
        sides.opponent = labels::CLUB_EVENT.to_string();
    } else {
        sides.opponent = summary.to_string();
    }
    sides
}

/// True when `opponent` would name the club's own side.
///
/// Equal names collide, and so does a bare `Titans`/`London Titans` opponent
/// against any club side.
pub fn sides_collide(team_name: &str, opponent: &str) -> bool {
    if opponent.trim().is_empty() {
        return false;
    }
    team_name.trim().to_lowercase() == opponent.trim().to_lowercase()
        || (is_bare_club_name(opponent) && mentions_club(team_name))
}

/// Replaces a colliding opponent with the club event label.
///
/// A side literally named `Club Event` gets the internal event label instead.
pub fn apply_identity_failsafe(sides: &mut Sides) {
    if !sides_collide(&sides.team_name, &sides.opponent) {
        return;
    }
    sides.opponent = [labels::CLUB_EVENT, labels::INTERNAL_EVENT]
        .into_iter()
        .find(|label| !sides_collide(&sides.team_name, label))
        .unwrap_or(labels::INTERNAL_EVENT)
        .to_string();
}

fn trim_score_debris(name: &str) -> String {
    name.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—'))
        .to_string()
}

/// Final name cleanup once the score is known.
///
/// `summary_score` is the verbatim score text when the score came from the
/// summary; it is cut out of both names. A team name containing that text
/// verbatim loses it too.
pub fn clean_names(sides: &mut Sides, summary_score: Option<&str>) {
    sides.team_name = collapse_club_name(&sides.team_name);

    if let Some(raw) = summary_score {
        sides.opponent = trim_score_debris(&sides.opponent.replacen(raw, "", 1));
        sides.team_name = trim_score_debris(&sides.team_name.replacen(raw, "", 1));
    }

    if sides.team_name.is_empty() {
        sides.team_name = club::TEAM_NAME.to_string();
    }
    apply_identity_failsafe(sides);
}
