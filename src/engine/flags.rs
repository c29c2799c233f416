//! Named engine flags.
//!
//! A search request can carry a pipe-delimited list of flag names; each name is
//! resolved against the fixed table below and OR-combined into the single `i64`
//! mask handed to the engine call. Requests without a `flags` parameter get
//! [`SEARCH_BY_ATTRIBUTES_DEFAULT_FLAGS`].

use super::types::EngineError;

pub const SEARCH_INCLUDE_RESOLVED: i64 = 1 << 0;
pub const SEARCH_INCLUDE_POSSIBLY_SAME: i64 = 1 << 1;
pub const SEARCH_INCLUDE_POSSIBLY_RELATED: i64 = 1 << 2;
pub const SEARCH_INCLUDE_NAME_ONLY: i64 = 1 << 3;
pub const SEARCH_INCLUDE_FEATURE_SCORES: i64 = 1 << 4;
pub const SEARCH_INCLUDE_STATS: i64 = 1 << 5;
pub const ENTITY_INCLUDE_ENTITY_NAME: i64 = 1 << 6;
pub const ENTITY_INCLUDE_RECORD_SUMMARY: i64 = 1 << 7;
pub const ENTITY_INCLUDE_RECORD_DATA: i64 = 1 << 8;
pub const ENTITY_INCLUDE_REPRESENTATIVE_FEATURES: i64 = 1 << 9;

/// Every match-level bucket a search can return.
pub const SEARCH_INCLUDE_ALL_ENTITIES: i64 = SEARCH_INCLUDE_RESOLVED
    | SEARCH_INCLUDE_POSSIBLY_SAME
    | SEARCH_INCLUDE_POSSIBLY_RELATED
    | SEARCH_INCLUDE_NAME_ONLY;

/// Mask applied when a request carries no `flags` parameter.
pub const SEARCH_BY_ATTRIBUTES_DEFAULT_FLAGS: i64 = SEARCH_INCLUDE_ALL_ENTITIES
    | SEARCH_INCLUDE_FEATURE_SCORES
    | ENTITY_INCLUDE_ENTITY_NAME
    | ENTITY_INCLUDE_RECORD_SUMMARY
    | ENTITY_INCLUDE_REPRESENTATIVE_FEATURES;

/// The fixed token table. Names are matched exactly, case-sensitively.
const FLAG_TABLE: &[(&str, i64)] = &[
    ("SEARCH_INCLUDE_RESOLVED", SEARCH_INCLUDE_RESOLVED),
    ("SEARCH_INCLUDE_POSSIBLY_SAME", SEARCH_INCLUDE_POSSIBLY_SAME),
    ("SEARCH_INCLUDE_POSSIBLY_RELATED", SEARCH_INCLUDE_POSSIBLY_RELATED),
    ("SEARCH_INCLUDE_NAME_ONLY", SEARCH_INCLUDE_NAME_ONLY),
    ("SEARCH_INCLUDE_FEATURE_SCORES", SEARCH_INCLUDE_FEATURE_SCORES),
    ("SEARCH_INCLUDE_STATS", SEARCH_INCLUDE_STATS),
    ("ENTITY_INCLUDE_ENTITY_NAME", ENTITY_INCLUDE_ENTITY_NAME),
    ("ENTITY_INCLUDE_RECORD_SUMMARY", ENTITY_INCLUDE_RECORD_SUMMARY),
    ("ENTITY_INCLUDE_RECORD_DATA", ENTITY_INCLUDE_RECORD_DATA),
    (
        "ENTITY_INCLUDE_REPRESENTATIVE_FEATURES",
        ENTITY_INCLUDE_REPRESENTATIVE_FEATURES,
    ),
    ("SEARCH_INCLUDE_ALL_ENTITIES", SEARCH_INCLUDE_ALL_ENTITIES),
    (
        "SEARCH_BY_ATTRIBUTES_DEFAULT_FLAGS",
        SEARCH_BY_ATTRIBUTES_DEFAULT_FLAGS,
    ),
];

/// Looks a single token up in the flag table.
pub fn resolve_flag(token: &str) -> Option<i64> {
    FLAG_TABLE
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, bits)| *bits)
}

/// OR-combines named flag tokens into one engine mask.
///
/// Unknown names are rejected; the engine is never called with a mask the
/// caller did not fully spell out.
pub fn combine_flags<'a, I>(tokens: I) -> Result<i64, EngineError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut mask = 0;
    for token in tokens {
        let token = token.trim();
        mask |= resolve_flag(token)
            .ok_or_else(|| EngineError::BadInput(format!("unknown engine flag: {token}")))?;
    }
    Ok(mask)
}
