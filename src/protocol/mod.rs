//! Batch Classification Wire Protocol
//!
//! The prompt sent to the model and the parser reading its reply are two
//! halves of one line-oriented protocol. Both import their tokens from here,
//! so a change to the format is a change to this module.
//!
//! ## Request
//!
//! One data line per record, in batch order:
//!
//! ```text
//! ID_<index>: <name> | <address>
//! ```
//!
//! followed by a fixed instruction block naming the category tokens and the
//! expected answer format.
//!
//! ## Reply grammar
//!
//! ```text
//! reply    := line ( "\n" line )*
//! line     := record | <anything else, ignored>
//! record   := prefix INDEX ws* SEP ws* CATEGORY ws* SEP ws* MESSAGE
//! prefix   := <any text containing no SEP; the first digit run is INDEX>
//! INDEX    := [0-9]+
//! SEP      := "|"
//! CATEGORY := <any text without SEP>; ALLEY if upper-cased form contains "GANG"
//! MESSAGE  := <rest of line, may itself contain SEP>
//! ```
//!
//! A line is only considered at all when it contains both `SEP` and the
//! `ID_` index prefix. Rejected lines are dropped individually.

pub mod prompt;
pub mod reply;

pub use prompt::build_prompt;
pub use reply::{parse_line, parse_reply, parse_reply_with_stats, LineError, ParseStats};

/// Bumped whenever the request or reply format changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Field separator in both request data lines and reply lines.
pub const FIELD_SEPARATOR: char = '|';

/// Prefix of the per-record index token (`ID_0`, `ID_1`, ...).
pub const INDEX_PREFIX: &str = "ID_";

/// Category token for small streets, alleys and residential blocks.
pub const ALLEY_TOKEN: &str = "GANG";

/// Category token for main roads.
pub const STREET_TOKEN: &str = "RAYA";

/// Index token for a batch position, e.g. `ID_3`.
pub fn index_token(index: usize) -> String {
    format!("{INDEX_PREFIX}{index}")
}
