//! Tag search
//!
//! Queries are ranked against a dictionary document mapping tags to weighted
//! references. The ranking is materialised as a transient playlist so it can
//! be displayed like any other.

mod dictionary;
mod ranker;

pub use dictionary::{Dictionary, Reference, Tag, Translation};
pub use ranker::{rank, search, tokenize, RankedReference};
