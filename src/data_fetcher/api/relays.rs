//! Relay registry and URL building
//!
//! The calendar feed is not served with CORS headers, so it is read through
//! public relays. Each relay wraps the percent-encoded feed URL and answers
//! with either the raw body or a JSON envelope.

use std::borrow::Cow;

/// Placeholder in a relay template replaced by the encoded target URL
pub const TARGET_PLACEHOLDER: &str = "{url}";

/// How a relay wraps the upstream body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// Body is the upstream text (possibly as a base64 data URI)
    RawText,
    /// Body is a JSON object whose `contents` field holds the upstream text
    JsonContents,
}

/// One relay: a URL template and the envelope it answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relay {
    pub name: Cow<'static, str>,
    template: Cow<'static, str>,
    pub envelope: Envelope,
}

impl Relay {
    pub const fn builtin(name: &'static str, template: &'static str, envelope: Envelope) -> Self {
        Self {
            name: Cow::Borrowed(name),
            template: Cow::Borrowed(template),
            envelope,
        }
    }

    /// A relay defined at runtime. `template` must contain [`TARGET_PLACEHOLDER`].
    pub fn custom(name: impl Into<String>, template: impl Into<String>, envelope: Envelope) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            template: Cow::Owned(template.into()),
            envelope,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Relay URL fetching `target_url`.
    ///
    /// # Example
    /// ```
    /// use titans_fixtures::data_fetcher::api::{Envelope, Relay};
    ///
    /// let relay = Relay::builtin("example", "https://relay.example/?{url}", Envelope::RawText);
    /// assert_eq!(
    ///     relay.wrap("https://a.example/x y"),
    ///     "https://relay.example/?https%3A%2F%2Fa.example%2Fx%20y"
    /// );
    /// ```
    pub fn wrap(&self, target_url: &str) -> String {
        self.template
            .replace(TARGET_PLACEHOLDER, &urlencoding::encode(target_url))
    }
}

/// Built-in relays in the order they are tried.
pub const DEFAULT_RELAYS: [Relay; 4] = [
    Relay::builtin("corsproxy.io", "https://corsproxy.io/?{url}", Envelope::RawText),
    Relay::builtin(
        "allorigins (json)",
        "https://api.allorigins.win/get?url={url}",
        Envelope::JsonContents,
    ),
    Relay::builtin(
        "codetabs",
        "https://api.codetabs.com/v1/proxy?quest={url}",
        Envelope::RawText,
    ),
    Relay::builtin(
        "allorigins (raw)",
        "https://api.allorigins.win/raw?url={url}",
        Envelope::RawText,
    ),
];

pub fn default_relays() -> Vec<Relay> {
    DEFAULT_RELAYS.to_vec()
}

/// Public iCalendar endpoint for a Google Calendar id.
///
/// # Example
/// ```
/// use titans_fixtures::data_fetcher::api::build_ics_url;
///
/// assert_eq!(
///     build_ics_url("club@group.calendar.google.com"),
///     "https://calendar.google.com/calendar/ical/club%40group.calendar.google.com/public/basic.ics"
/// );
/// ```
pub fn build_ics_url(calendar_id: &str) -> String {
    format!(
        "https://calendar.google.com/calendar/ical/{}/public/basic.ics",
        urlencoding::encode(calendar_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_relay_order_and_envelopes() {
        let relays = default_relays();
        assert_eq!(relays.len(), 4);
        assert!(relays[0].template().starts_with("https://corsproxy.io/"));
        assert!(relays[1].template().starts_with("https://api.allorigins.win/get"));
        assert!(relays[2].template().starts_with("https://api.codetabs.com/v1/proxy"));
        assert!(relays[3].template().starts_with("https://api.allorigins.win/raw"));
        assert_eq!(
            relays.iter().map(|r| r.envelope).collect::<Vec<_>>(),
            vec![
                Envelope::RawText,
                Envelope::JsonContents,
                Envelope::RawText,
                Envelope::RawText
            ]
        );
    }

    #[test]
    fn test_every_builtin_template_has_placeholder() {
        for relay in DEFAULT_RELAYS.iter() {
            assert!(relay.template().contains(TARGET_PLACEHOLDER), "{}", relay.name);
        }
    }

    #[test]
    fn test_wrap_encodes_whole_target() {
        let target = build_ics_url("club@group.calendar.google.com");
        let wrapped = DEFAULT_RELAYS[1].wrap(&target);
        assert_eq!(
            wrapped,
            "https://api.allorigins.win/get?url=https%3A%2F%2Fcalendar.google.com%2Fcalendar%2Fical%2Fclub%2540group.calendar.google.com%2Fpublic%2Fbasic.ics"
        );
    }

    #[test]
    fn test_custom_relay() {
        let relay = Relay::custom("local", "http://127.0.0.1:9/raw?url={url}", Envelope::RawText);
        assert_eq!(relay.name, "local");
        assert_eq!(relay.wrap("a b"), "http://127.0.0.1:9/raw?url=a%20b");
    }
}
