//! Minimal iCalendar reader for the public fixture feed
//!
//! Only the subset the feed actually uses is understood: folded lines,
//! `VEVENT` blocks, `KEY[;PARAM=VAL]:VALUE` properties, basic-format
//! date-times and the text escapes `\,` `\;` `\n` `\N` `\\`.

pub mod date;
pub mod reader;
pub mod text;

pub use date::decode_date;
pub use reader::{parse_events, split_lines, unfold_lines};
pub use text::{escape_text, unescape_text};
