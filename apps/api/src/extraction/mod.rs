//! Structuring pipeline: parse model CSV output into a record, repair its
//! fields against the posting text, enrich its tags. The parsing and repair
//! core is synchronous and deterministic; only `pipeline` and `handlers`
//! touch the network, through `llm_client` and `notion`.

pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod record;
pub mod repair;
pub mod schema;
pub mod sections;
pub mod tags;

use thiserror::Error;

/// Whole-record failures of the structuring pipeline.
///
/// Per-field recovery misses are deliberately NOT represented here: a field
/// that cannot be recovered settles on the sentinel value and the record
/// still succeeds. Partial data beats failing the request.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The model output contained no parseable data line.
    #[error("no parseable data line in model output: {0}")]
    MalformedOutput(String),

    /// The parsed record carried no fields at all.
    #[error("parsed record contains no fields")]
    EmptyRecord,
}
