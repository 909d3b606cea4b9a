pub mod classifier;
pub mod competition;
pub mod score;
pub mod teams;

pub use classifier::{EventText, classify_event, classify_events, map_event_to_fixture};
pub use competition::{Competition, resolve_competition};
pub use score::{ScoreMatch, ScoreSource, extract_score};
pub use teams::{Sides, TitleKind, assign_sides};
