use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::data_fetcher::models::MatchResult;

static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]+)\s*[-–—]\s*([0-9]+)\b").expect("valid score regex"));

/// Where a score was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    Description,
    Summary,
}

/// A score as written in the event text, e.g. `2 - 3` or with a Unicode dash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatch {
    /// The matched text, verbatim
    pub raw: String,
    /// Byte range of `raw` in the text it was found in
    pub span: Range<usize>,
    pub first: u64,
    pub second: u64,
    pub source: ScoreSource,
}

impl ScoreMatch {
    /// The matched text with whitespace dropped and any dash as an ASCII hyphen
    pub fn normalized(&self) -> String {
        self.raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if matches!(c, '–' | '—') { '-' } else { c })
            .collect()
    }

    /// Result for the club given which side of the score it is on.
    pub fn result(&self, is_home: bool) -> MatchResult {
        let (titans, opponent) = if is_home {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        };
        MatchResult::from_scores(titans, opponent)
    }
}

/// First score-like pattern in `text`. Digit runs too long for a `u64` are not a score.
pub fn find_score(text: &str, source: ScoreSource) -> Option<ScoreMatch> {
    let caps = SCORE.captures(text)?;
    let whole = caps.get(0)?;
    let first = caps[1].parse().ok()?;
    let second = caps[2].parse().ok()?;
    Some(ScoreMatch {
        raw: whole.as_str().to_string(),
        span: whole.range(),
        first,
        second,
        source,
    })
}

/// Score from the description, falling back to the summary.
pub fn extract_score(description: &str, summary: &str) -> Option<ScoreMatch> {
    find_score(description, ScoreSource::Description)
        .or_else(|| find_score(summary, ScoreSource::Summary))
}
