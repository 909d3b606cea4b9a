pub mod fixture;
pub mod raw_event;

pub use fixture::{Fixture, FixtureStatus, MatchResult};
pub use raw_event::RawEvent;
