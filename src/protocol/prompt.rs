//! Request half of the protocol: batch → prompt text

use super::{index_token, ALLEY_TOKEN, FIELD_SEPARATOR, INDEX_PREFIX, STREET_TOKEN};
use crate::types::{NormalizedRecord, RawRecord};
use std::fmt::Write;

const PROMPT_HEADER: &str = "Role: Laundry soap sales assistant.\n\
Task: Analyse the laundry businesses below.\n\
DATA:\n";

/// Build the classification prompt for a batch.
///
/// Records are numbered by their position in `records`; that position is the
/// join key the reply parser maps answers back to.
pub fn build_prompt(records: &[RawRecord]) -> String {
    let mut prompt = String::from(PROMPT_HEADER);

    for (i, raw) in records.iter().enumerate() {
        let record = NormalizedRecord::for_prompt(raw);
        let _ = writeln!(
            prompt,
            "{}: {} {FIELD_SEPARATOR} {}",
            index_token(i),
            record.name,
            record.address
        );
    }

    let _ = write!(
        prompt,
        "\nINSTRUCTIONS:\n\
1. CODE: \"{ALLEY_TOKEN}\" (small street, alley or residential area) or \"{STREET_TOKEN}\" (main road).\n\
2. SCRIPT: a short WhatsApp chat message (max 1 sentence, Indonesian) offering laundry soap.\n\
Answer with exactly one line per ID and nothing else.\n\
Answer format: {INDEX_PREFIX}0 {FIELD_SEPARATOR} [CODE] {FIELD_SEPARATOR} [SCRIPT]\n"
    );

    prompt
}
