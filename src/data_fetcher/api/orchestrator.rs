// src/data_fetcher/api/orchestrator.rs - Relay chain driving fetch, normalise, parse and classify

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::data_fetcher::ics::parse_events;
use crate::data_fetcher::models::Fixture;
use crate::data_fetcher::processors::classify_events;
use crate::error::AppError;

use super::envelope::normalize_payload;
use super::http_client::{Fetcher, HttpFetcher};
use super::relays::{Relay, build_ics_url, default_relays};

/// Source of the instant fixtures are compared against.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reads calendar text into fixtures sorted by start time.
///
/// Events without a decodable start or a summary are skipped. Events with the
/// same start keep their feed order.
pub fn parse_calendar(ics: &str, now: DateTime<Utc>) -> Vec<Fixture> {
    let events = parse_events(ics);
    let mut fixtures = classify_events(&events, now);
    fixtures.sort_by_key(|fixture| fixture.date);
    fixtures
}

/// Fetches the club calendar through the relay chain.
///
/// Holds no state between calls; each call walks the relays again.
pub struct FixtureService<F = HttpFetcher, C = SystemClock> {
    calendar_id: String,
    relays: Vec<Relay>,
    fetcher: F,
    clock: C,
}

impl FixtureService<HttpFetcher, SystemClock> {
    /// Service for the configured calendar using the built-in relays.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let fetcher = HttpFetcher::new(config.http_timeout_seconds)?;
        Ok(Self::new(config.calendar_id.clone(), fetcher, SystemClock))
    }
}

impl<F: Fetcher, C: Clock> FixtureService<F, C> {
    pub fn new(calendar_id: impl Into<String>, fetcher: F, clock: C) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            relays: default_relays(),
            fetcher,
            clock,
        }
    }

    /// Replaces the relay list; relays are tried in the given order.
    pub fn with_relays(mut self, relays: Vec<Relay>) -> Self {
        self.relays = relays;
        self
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    pub fn relays(&self) -> &[Relay] {
        &self.relays
    }

    /// Calendar URL the relays are asked to fetch
    pub fn ics_url(&self) -> String {
        build_ics_url(&self.calendar_id)
    }

    async fn fetch_through(&self, relay: &Relay, target: &str) -> Result<String, AppError> {
        let url = relay.wrap(target);
        let body = self.fetcher.get_text(&url).await?;
        normalize_payload(&body, relay.envelope, &url)
    }

    /// Returns the club's fixtures sorted by start time.
    ///
    /// Relays are tried one after another in order; the first usable calendar
    /// wins. When every relay fails the error carries the last failure.
    /// Dropping the returned future abandons the in-flight request and the
    /// remaining relays.
    ///
    /// # Example
    /// ```rust,no_run
    /// use titans_fixtures::data_fetcher::api::{FixtureService, HttpFetcher, SystemClock};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), titans_fixtures::AppError> {
    ///     let service = FixtureService::new(
    ///         "club@group.calendar.google.com",
    ///         HttpFetcher::new(25)?,
    ///         SystemClock,
    ///     );
    ///     for fixture in service.get_fixtures().await? {
    ///         println!("{} vs {}", fixture.team_name, fixture.opponent);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(calendar_id = %self.calendar_id))]
    pub async fn get_fixtures(&self) -> Result<Vec<Fixture>, AppError> {
        let target = self.ics_url();
        let mut last_error = None;

        for (index, relay) in self.relays.iter().enumerate() {
            info!(
                "Fetching calendar via relay {}/{} ({})",
                index + 1,
                self.relays.len(),
                relay.name
            );

            match self.fetch_through(relay, &target).await {
                Ok(ics) => {
                    let fixtures = parse_calendar(&ics, self.clock.now());
                    info!(
                        "Relay {} returned {} fixtures",
                        relay.name,
                        fixtures.len()
                    );
                    return Ok(fixtures);
                }
                Err(e) => {
                    warn!("Relay {} failed: {}", relay.name, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => {
                error!("All {} relays failed", self.relays.len());
                Err(AppError::all_relays_failed(self.relays.len(), last))
            }
            None => {
                error!("No relays configured");
                Err(AppError::NoRelaysConfigured)
            }
        }
    }
}

/// Fetches fixtures for the configured calendar with the built-in relays.
#[instrument(skip(config))]
pub async fn fetch_fixtures(config: &Config) -> Result<Vec<Fixture>, AppError> {
    info!("Starting to fetch fixtures");
    FixtureService::from_config(config)?.get_fixtures().await
}
