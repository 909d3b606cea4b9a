//! London Titans fixture ingestion library
//!
//! This library fetches the club's public Google Calendar through a chain of
//! public relays, reads the iCalendar feed and classifies every event into a
//! fixture record (home/away, opponent, competition, score and result).
//!
//! # Examples
//!
//! ```rust,no_run
//! use titans_fixtures::config::Config;
//! use titans_fixtures::data_fetcher::fetch_fixtures;
//! use titans_fixtures::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let fixtures = fetch_fixtures(&config).await?;
//!
//!     for fixture in &fixtures {
//!         println!("{} vs {} ({})", fixture.team_name, fixture.opponent, fixture.competition);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod schedule_view;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{Fetcher, FixtureService, HttpFetcher};
pub use data_fetcher::fetch_fixtures;
pub use data_fetcher::models::{Fixture, FixtureStatus, MatchResult};
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
