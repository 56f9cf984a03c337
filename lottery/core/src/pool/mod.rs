//! Number pool: parsing user text and managing what's left to draw

mod manager;
mod parser;

pub use manager::{CommitOutcome, DrawPool};
pub use parser::{
    parse, parse_with, ParseOutcome, ParserConfig, RangePolicy, SkipReason, SkippedToken,
};
