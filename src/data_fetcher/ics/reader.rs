use tracing::debug;

use crate::data_fetcher::models::RawEvent;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// Splits on `\r\n`, `\n` or `\r`.
pub fn split_lines(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&input[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&input[start..]);
    lines
}

/// Joins folded lines.
///
/// A line starting with a space or tab continues the previous line; its
/// leading whitespace is dropped. Continuations with nothing before them are
/// discarded.
pub fn unfold_lines(input: &str) -> Vec<String> {
    let mut unfolded: Vec<String> = Vec::new();
    for line in split_lines(input) {
        if line.starts_with([' ', '\t']) {
            if let Some(previous) = unfolded.last_mut() {
                previous.push_str(line.trim_start());
            }
        } else {
            unfolded.push(line.to_string());
        }
    }
    unfolded
}

/// Splits `KEY;PARAM=VAL:VALUE` into the bare key and the verbatim value.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let key = name.split(';').next().unwrap_or(name);
    Some((key, value))
}

enum ReaderState {
    Outside,
    InEvent(RawEvent),
}

/// Extracts every complete `VEVENT` block from calendar text.
///
/// Blocks lacking `DTSTART` or `SUMMARY`, blocks reopened before being
/// closed, and a block left open at end of input are dropped silently.
pub fn parse_events(input: &str) -> Vec<RawEvent> {
    let mut events = Vec::new();
    let mut state = ReaderState::Outside;

    for line in unfold_lines(input) {
        if line.starts_with(BEGIN_EVENT) {
            if let ReaderState::InEvent(open) = &state {
                debug!(
                    properties = open.len(),
                    "Nested BEGIN:VEVENT, discarding the open event"
                );
            }
            state = ReaderState::InEvent(RawEvent::new());
            continue;
        }

        if line.starts_with(END_EVENT) {
            match std::mem::replace(&mut state, ReaderState::Outside) {
                ReaderState::InEvent(event) if event.is_complete() => events.push(event),
                ReaderState::InEvent(event) => {
                    debug!(
                        uid = event.uid().unwrap_or("-"),
                        "Dropping event without DTSTART or SUMMARY"
                    );
                }
                ReaderState::Outside => debug!("Ignoring unmatched END:VEVENT"),
            }
            continue;
        }

        if let ReaderState::InEvent(event) = &mut state
            && let Some((key, value)) = split_property(&line)
        {
            event.insert(key, value);
        }
    }

    if let ReaderState::InEvent(_) = state {
        debug!("Calendar ended inside an unterminated VEVENT, discarding it");
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_handles_all_terminators() {
        assert_eq!(split_lines("a\r\nb\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_unfold_joins_continuations() {
        let input = "SUMMARY:London Titans vs Clap\r\n ton FC\r\nDESCRIPTION:GFSN\r\n\t Shield";
        assert_eq!(
            unfold_lines(input),
            vec!["SUMMARY:London Titans vs Clapton FC", "DESCRIPTION:GFSNShield"]
        );
    }

    #[test]
    fn test_unfold_drops_leading_continuations() {
        let input = " orphan\n\tanother\nBEGIN:VCALENDAR";
        assert_eq!(unfold_lines(input), vec!["BEGIN:VCALENDAR"]);
    }

    #[test]
    fn test_unfold_is_idempotent() {
        let input = "BEGIN:VCALENDAR\r\nSUMMARY:Long\r\n  title\r\nEND:VCALENDAR\r\n";
        let once = unfold_lines(input);
        let twice = unfold_lines(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_property_parameters_are_stripped() {
        assert_eq!(
            split_property("DTSTART;TZID=Europe/London:20240309T140000"),
            Some(("DTSTART", "20240309T140000"))
        );
        assert_eq!(
            split_property("DESCRIPTION:Kick-off: 14:00"),
            Some(("DESCRIPTION", "Kick-off: 14:00"))
        );
        assert_eq!(split_property("no separator here"), None);
    }

    #[test]
    fn test_parse_events_keeps_only_complete_blocks() {
        let input = "BEGIN:VCALENDAR\n\
                     BEGIN:VEVENT\n\
                     UID:one\n\
                     DTSTART:20240309T140000Z\n\
                     SUMMARY:Titans vs Clapton FC\n\
                     END:VEVENT\n\
                     BEGIN:VEVENT\n\
                     UID:two\n\
                     SUMMARY:No start time\n\
                     END:VEVENT\n\
                     END:VCALENDAR";
        let events = parse_events(input);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid(), Some("one"));
        assert_eq!(events[0].dtstart(), Some("20240309T140000Z"));
    }

    #[test]
    fn test_nested_begin_discards_open_event() {
        let input = "BEGIN:VEVENT\n\
                     DTSTART:20240309T140000Z\n\
                     SUMMARY:Lost\n\
                     BEGIN:VEVENT\n\
                     DTSTART:20240310T140000Z\n\
                     SUMMARY:Kept\n\
                     END:VEVENT\n\
                     END:VEVENT";
        let events = parse_events(input);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary(), Some("Kept"));
    }

    #[test]
    fn test_unterminated_event_is_dropped() {
        let input = "BEGIN:VEVENT\nDTSTART:20240309T140000Z\nSUMMARY:Open";
        assert!(parse_events(input).is_empty());
    }

    #[test]
    fn test_properties_outside_events_are_ignored() {
        let input = "BEGIN:VCALENDAR\nSUMMARY:Calendar name\nDTSTART:20240101\nEND:VCALENDAR";
        assert!(parse_events(input).is_empty());
    }

    #[test]
    fn test_folded_summary_inside_event() {
        let input = "BEGIN:VEVENT\r\n\
                     DTSTART;VALUE=DATE:20240309\r\n\
                     SUMMARY:End of Season\r\n  Social\r\n\
                     END:VEVENT\r\n";
        let events = parse_events(input);
        assert_eq!(events[0].summary(), Some("End of SeasonSocial"));
        assert_eq!(events[0].dtstart(), Some("20240309"));
    }
}
