use crate::constants::labels;

/// Competition label and short tag for a fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub name: String,
    pub tag: Option<String>,
}

struct TagRule {
    description_keywords: &'static [&'static str],
    summary_keywords: &'static [&'static str],
    tag: &'static str,
    name: Option<&'static str>,
}

/// Cups and shields are checked before the leagues they belong to.
const TAG_RULES: &[TagRule] = &[
    TagRule {
        description_keywords: &["gfsn shield"],
        summary_keywords: &["gfsn shield"],
        tag: "GFSN SHIELD",
        name: Some("GFSN Shield"),
    },
    TagRule {
        description_keywords: &["gfsn development"],
        summary_keywords: &["gfsn development"],
        tag: "GFSN DEV",
        name: Some("GFSN Development League"),
    },
    TagRule {
        description_keywords: &["lul cup"],
        summary_keywords: &["lul cup"],
        tag: "LUL CUP",
        name: Some("LUL Cup"),
    },
    TagRule {
        description_keywords: &["london dev league"],
        summary_keywords: &["london dev league"],
        tag: "LDL",
        name: Some("London Dev League"),
    },
    TagRule {
        description_keywords: &["gfsn matchweek", "gfsn"],
        summary_keywords: &["gfsn"],
        tag: "GFSN",
        name: None,
    },
    TagRule {
        description_keywords: &["lul matchweek", "lul"],
        summary_keywords: &["lul"],
        tag: "LUL",
        name: None,
    },
];

impl TagRule {
    fn matches(&self, description: &str, summary: &str) -> bool {
        self.description_keywords
            .iter()
            .any(|k| description.contains(k))
            || self.summary_keywords.iter().any(|k| summary.contains(k))
    }
}

fn contains_any(haystacks: &[&str], needle: &str) -> bool {
    haystacks.iter().any(|h| h.contains(needle))
}

/// Resolves the competition for a fixture.
///
/// `initial` is `Training` for training sessions and the `Fixture` sentinel
/// otherwise. `is_event` marks titles that were not read as a head-to-head
/// match; such entries default to `Club Event` like opponent-less ones.
pub fn resolve_competition(
    initial: &str,
    description: &str,
    summary: &str,
    opponent: &str,
    is_event: bool,
) -> Competition {
    let d = description.to_lowercase();
    let s = summary.to_lowercase();

    let mut name = initial.to_string();
    let mut tag = None;

    if let Some(rule) = TAG_RULES.iter().find(|rule| rule.matches(&d, &s)) {
        tag = Some(rule.tag.to_string());
        if let Some(rule_name) = rule.name {
            name = rule_name.to_string();
        }
    }

    if name == labels::FIXTURE {
        let texts = [d.as_str(), s.as_str()];
        if contains_any(&texts, "league") {
            name = labels::LEAGUE_MATCH.to_string();
        } else if contains_any(&texts, "cup") {
            name = labels::CUP_MATCH.to_string();
        } else if contains_any(&texts, "friendly") {
            name = labels::FRIENDLY.to_string();
        } else if opponent.is_empty() || is_event {
            name = labels::CLUB_EVENT.to_string();
        }
    }

    append_round_suffix(&mut name, &d);

    Competition { name, tag }
}

/// Appends the stage named in the (lowercased) description unless the
/// competition already mentions it.
fn append_round_suffix(name: &mut String, description: &str) {
    let lower = name.to_lowercase();

    if description.contains("quarter-final") || description.contains("quarter final") {
        if !lower.contains("quarter") {
            name.push_str(" Quarter-Final");
        }
    } else if description.contains("semi-final") || description.contains("semi final") {
        if !lower.contains("semi") {
            name.push_str(" Semi-Final");
        }
    } else if description.contains("final") && !description.contains("semi") && !lower.contains("final") {
        name.push_str(" Final");
    }

    if description.contains("plate") && !lower.contains("plate") {
        name.push_str(" Plate");
    }
    if description.contains("trophy") && !lower.contains("trophy") {
        name.push_str(" Trophy");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(description: &str, summary: &str) -> Competition {
        resolve_competition(labels::FIXTURE, description, summary, "Clapton FC", false)
    }

    #[test]
    fn test_tag_table() {
        let cases = [
            ("GFSN Shield Round 2", "GFSN SHIELD", "GFSN Shield"),
            ("GFSN Development League", "GFSN DEV", "GFSN Development League"),
            ("LUL Cup group stage", "LUL CUP", "LUL Cup"),
            ("London Dev League week 3", "LDL", "London Dev League"),
        ];
        for (description, tag, name) in cases {
            let competition = resolve(description, "Titans vs Clapton FC");
            assert_eq!(competition.tag.as_deref(), Some(tag), "{description}");
            assert!(competition.name.starts_with(name), "{description}");
        }
    }

    #[test]
    fn test_league_tags_keep_sentinel() {
        let competition = resolve("LUL Matchweek 4", "London Titans vs Clapton FC");
        assert_eq!(competition.tag.as_deref(), Some("LUL"));
        assert_eq!(competition.name, "Fixture");

        let competition = resolve("", "GFSN: Titans vs Clapton FC");
        assert_eq!(competition.tag.as_deref(), Some("GFSN"));
    }

    #[test]
    fn test_shield_beats_plain_gfsn() {
        let competition = resolve("GFSN matchweek", "GFSN Shield: Titans vs Rovers");
        assert_eq!(competition.tag.as_deref(), Some("GFSN SHIELD"));
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(resolve("Sunday league", "").name, "League Match");
        assert_eq!(resolve("", "Titans vs Rovers (cup)").name, "Cup Match");
        assert_eq!(resolve("Pre-season friendly", "").name, "Friendly");
        assert_eq!(resolve("", "Titans vs Rovers").name, "Fixture");
        assert_eq!(
            resolve_competition(labels::FIXTURE, "", "Committee", "", false).name,
            "Club Event"
        );
        assert_eq!(
            resolve_competition(labels::FIXTURE, "", "Social", "Social", true).name,
            "Club Event"
        );
    }

    #[test]
    fn test_training_is_not_defaulted() {
        let competition = resolve_competition(labels::TRAINING, "", "Titans training", "", false);
        assert_eq!(competition.name, "Training");
        assert_eq!(competition.tag, None);
    }

    #[test]
    fn test_round_suffixes() {
        assert_eq!(
            resolve("GFSN Shield Quarter-Final", "").name,
            "GFSN Shield Quarter-Final"
        );
        assert_eq!(resolve("LUL Cup semi final", "").name, "LUL Cup Semi-Final");
        assert_eq!(resolve("LUL Cup Final", "").name, "LUL Cup Final");
        assert_eq!(resolve("Plate competition", "").name, "Fixture Plate");
        assert_eq!(
            resolve("LUL Cup Plate Final, trophy day", "").name,
            "LUL Cup Final Plate Trophy"
        );
    }

    #[test]
    fn test_semi_excludes_final_suffix() {
        // "semi" anywhere suppresses the plain Final suffix
        let competition = resolve("semi-finalists meet in the final", "");
        assert_eq!(competition.name, "Fixture Semi-Final");
    }

    #[test]
    fn test_suffix_not_duplicated() {
        let mut name = "Shield Quarter-Final".to_string();
        append_round_suffix(&mut name, "quarter-final");
        assert_eq!(name, "Shield Quarter-Final");
    }
}
