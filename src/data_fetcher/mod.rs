pub mod api;
pub mod ics;
pub mod models;
pub mod processors;

pub use api::{FixtureService, fetch_fixtures};
pub use models::{Fixture, FixtureStatus, MatchResult};
