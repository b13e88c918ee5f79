//! Reply half of the protocol: model text → `AnalysisMap`
//!
//! Total over all inputs. Each line is judged on its own; a bad line never
//! affects its neighbours.

use super::{ALLEY_TOKEN, FIELD_SEPARATOR, INDEX_PREFIX};
use crate::types::{AnalysisMap, Category, ClassificationResult};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, trace};

/// Why a single reply line was not turned into a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Line lacks the separator or the index prefix; ordinary chatter.
    #[error("not a record line")]
    NotARecord,

    /// No digit run before the first separator.
    #[error("no index before first separator")]
    MissingIndex,

    /// Digits present but not representable as an index.
    #[error("index '{0}' out of range")]
    InvalidIndex(String),

    /// Fewer than three separator-delimited fields.
    #[error("expected 3 fields, found {0}")]
    TooFewFields(usize),
}

/// Line counts from one reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines turned into results.
    pub kept: usize,
    /// Record-looking lines rejected as malformed.
    pub dropped: usize,
    /// Lines that never looked like records.
    pub skipped: usize,
}

// Literal pattern, checked by every parser test
#[allow(clippy::expect_used)]
fn index_regex() -> &'static Regex {
    static INDEX_RE: OnceLock<Regex> = OnceLock::new();
    INDEX_RE.get_or_init(|| Regex::new(r"[0-9]+").expect("static index pattern is valid"))
}

/// Parse one reply line.
pub fn parse_line(line: &str) -> Result<(usize, ClassificationResult), LineError> {
    if !line.contains(FIELD_SEPARATOR) || !line.contains(INDEX_PREFIX) {
        return Err(LineError::NotARecord);
    }

    // Fields past the third are ignored
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < 3 {
        return Err(LineError::TooFewFields(fields.len()));
    }

    let digits = index_regex()
        .find(fields[0])
        .ok_or(LineError::MissingIndex)?
        .as_str();
    let index: usize = digits
        .parse()
        .map_err(|_| LineError::InvalidIndex(digits.to_string()))?;

    let code = fields[1].trim().to_uppercase();
    let category = if code.contains(ALLEY_TOKEN) {
        Category::Alley
    } else {
        Category::Street
    };

    Ok((
        index,
        ClassificationResult {
            category,
            message: fields[2].trim().to_string(),
        },
    ))
}

/// Parse a full reply, also reporting how many lines were kept or dropped.
pub fn parse_reply_with_stats(reply: &str) -> (AnalysisMap, ParseStats) {
    let mut map = AnalysisMap::new();
    let mut stats = ParseStats::default();

    for line in reply.lines() {
        match parse_line(line) {
            Ok((index, result)) => {
                map.insert(index, result);
                stats.kept += 1;
            }
            Err(LineError::NotARecord) => stats.skipped += 1,
            Err(e) => {
                trace!(line = %line, error = %e, "Dropping malformed reply line");
                stats.dropped += 1;
            }
        }
    }

    (map, stats)
}

/// Parse a full reply into an index-keyed map.
pub fn parse_reply(reply: &str) -> AnalysisMap {
    let (map, stats) = parse_reply_with_stats(reply);
    debug!(
        kept = stats.kept,
        dropped = stats.dropped,
        skipped = stats.skipped,
        "Parsed model reply"
    );
    map
}
