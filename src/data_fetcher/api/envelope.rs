//! Turns a relay response body into canonical calendar text

use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::relays::Envelope;
use crate::constants::payload;
use crate::error::AppError;

/// Accepts padded and unpadded input; relays are not consistent about it.
const FORGIVING_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Deserialize)]
struct JsonEnvelope {
    #[serde(default)]
    contents: Option<String>,
}

fn preview(text: &str) -> String {
    text.chars().take(payload::PREVIEW_CHARS).collect()
}

fn unwrap_json(body: &str, url: &str) -> Result<String, AppError> {
    let envelope: JsonEnvelope = serde_json::from_str(body).map_err(|e| {
        warn!("Relay JSON envelope did not parse: {e}");
        AppError::api_malformed_json(e.to_string(), url)
    })?;

    match envelope.contents {
        Some(contents) if !contents.is_empty() => Ok(contents),
        _ => Err(AppError::missing_contents(url)),
    }
}

/// Decodes a `data:...;base64,` payload. Anything else, or a payload that
/// fails to decode, is returned unchanged.
pub fn decode_data_uri(text: String) -> String {
    if !text.starts_with(payload::DATA_URI_PREFIX) {
        return text;
    }
    let Some(marker) = text.find(payload::BASE64_MARKER) else {
        return text;
    };

    let encoded: String = text[marker + payload::BASE64_MARKER.len()..]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    match FORGIVING_BASE64.decode(encoded.as_bytes()) {
        Ok(bytes) => {
            debug!("Decoded data URI payload ({} bytes)", bytes.len());
            String::from_utf8_lossy(&bytes).into_owned()
        }
        Err(e) => {
            warn!("Failed to decode base64 data URI, keeping it as text: {e}");
            text
        }
    }
}

fn looks_like_html(text: &str) -> bool {
    let start = text.trim_start();
    start.starts_with("<!DOCTYPE") || start.starts_with("<html")
}

/// Extracts calendar text from a relay body.
///
/// # Arguments
/// * `body` - Raw response body of a 2xx relay response
/// * `envelope` - How the relay wraps the upstream text
/// * `url` - Relay URL, used in errors
///
/// # Returns
/// * `Result<String, AppError>` - Text containing `BEGIN:VCALENDAR`, or the envelope failure
///
/// # Example
/// ```
/// use titans_fixtures::data_fetcher::api::{Envelope, normalize_payload};
///
/// let body = r#"{"contents":"BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\nEND:VCALENDAR"}"#;
/// let ics = normalize_payload(body, Envelope::JsonContents, "https://relay.example").unwrap();
/// assert!(ics.starts_with("BEGIN:VCALENDAR"));
/// ```
pub fn normalize_payload(body: &str, envelope: Envelope, url: &str) -> Result<String, AppError> {
    let text = match envelope {
        Envelope::JsonContents => unwrap_json(body, url)?,
        Envelope::RawText => body.to_string(),
    };

    let text = decode_data_uri(text);

    let length = text.chars().count();
    if length < payload::MIN_LENGTH {
        warn!("Relay payload too short ({length} chars): {}", preview(&text));
        return Err(AppError::payload_too_short(url, length));
    }

    if looks_like_html(&text) {
        warn!("Relay returned an HTML page: {}", preview(&text));
        return Err(AppError::html_error_page(url));
    }

    if !text.contains(payload::CALENDAR_MARKER) {
        warn!("Relay payload is not a calendar: {}", preview(&text));
        return Err(AppError::not_a_calendar(url));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

    const URL: &str = "https://relay.example/?q";
    const CALENDAR: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Google Inc//Google Calendar 70.9054//EN\r\nEND:VCALENDAR\r\n";

    #[test]
    fn test_raw_text_passes_through() {
        let text = normalize_payload(CALENDAR, Envelope::RawText, URL).unwrap();
        assert_eq!(text, CALENDAR);
    }

    #[test]
    fn test_json_contents() {
        let body = serde_json::json!({ "contents": CALENDAR, "status": { "http_code": 200 } });
        let text = normalize_payload(&body.to_string(), Envelope::JsonContents, URL).unwrap();
        assert_eq!(text, CALENDAR);
    }

    #[test]
    fn test_json_without_contents_fails() {
        let result = normalize_payload(r#"{"status":{"http_code":404}}"#, Envelope::JsonContents, URL);
        assert!(matches!(result, Err(AppError::MissingContents { .. })));

        let result = normalize_payload(r#"{"contents":null}"#, Envelope::JsonContents, URL);
        assert!(matches!(result, Err(AppError::MissingContents { .. })));
    }

    #[test]
    fn test_json_garbage_fails() {
        let result = normalize_payload(CALENDAR, Envelope::JsonContents, URL);
        assert!(matches!(result, Err(AppError::ApiMalformedJson { .. })));
    }

    #[test]
    fn test_data_uri_is_decoded() {
        let body = format!("data:text/calendar;base64,{}", STANDARD.encode(CALENDAR));
        let text = normalize_payload(&body, Envelope::RawText, URL).unwrap();
        assert_eq!(text, CALENDAR);

        let wrapped = serde_json::json!({ "contents": body });
        let text = normalize_payload(&wrapped.to_string(), Envelope::JsonContents, URL).unwrap();
        assert_eq!(text, CALENDAR);
    }

    #[test]
    fn test_data_uri_without_padding() {
        let body = format!(
            "data:text/calendar; charset=utf-8;base64,{}",
            STANDARD_NO_PAD.encode(CALENDAR)
        );
        assert_eq!(decode_data_uri(body), CALENDAR);
    }

    #[test]
    fn test_broken_data_uri_is_kept() {
        let body = "data:text/calendar;base64,@@not base64@@".to_string();
        assert_eq!(decode_data_uri(body.clone()), body);

        // Left unchanged, it then fails the calendar checks.
        assert!(normalize_payload(&body, Envelope::RawText, URL).is_err());
    }

    #[test]
    fn test_data_uri_without_base64_marker_is_kept() {
        let body = "data:text/plain,hello".to_string();
        assert_eq!(decode_data_uri(body.clone()), body);
    }

    #[test]
    fn test_short_payload_rejected() {
        let result = normalize_payload("BEGIN:VCALENDAR", Envelope::RawText, URL);
        assert!(matches!(
            result,
            Err(AppError::PayloadTooShort { length: 15, .. })
        ));

        let result = normalize_payload("", Envelope::RawText, URL);
        assert!(matches!(result, Err(AppError::PayloadTooShort { length: 0, .. })));
    }

    #[test]
    fn test_html_page_rejected() {
        let page = "  \n<!DOCTYPE html><html><head><title>Too Many Requests</title></head><body>BEGIN:VCALENDAR</body></html>";
        let result = normalize_payload(page, Envelope::RawText, URL);
        assert!(matches!(result, Err(AppError::HtmlErrorPage { .. })));

        let page = "<html><body>The requested proxy is temporarily disabled, please retry</body></html>";
        let result = normalize_payload(page, Envelope::RawText, URL);
        assert!(matches!(result, Err(AppError::HtmlErrorPage { .. })));
    }

    #[test]
    fn test_missing_calendar_marker_rejected() {
        let body = "This is a perfectly long response body that is not a calendar at all.";
        let result = normalize_payload(body, Envelope::RawText, URL);
        assert!(matches!(result, Err(AppError::NotACalendar { .. })));
    }
}
