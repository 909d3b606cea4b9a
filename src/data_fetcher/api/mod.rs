pub mod envelope;
mod fetch_utils;
pub mod http_client;
pub mod orchestrator;
pub mod relays;

pub use envelope::{decode_data_uri, normalize_payload};
pub use fetch_utils::status_error;
pub use http_client::{Fetcher, HttpFetcher, create_http_client_with_timeout};
pub use orchestrator::{Clock, FixtureService, SystemClock, fetch_fixtures, parse_calendar};
pub use relays::{DEFAULT_RELAYS, Envelope, Relay, build_ics_url, default_relays};
