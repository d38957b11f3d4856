//! Community quote board: submission parsing, the board operations and an
//! in-memory store.

pub mod board;
pub mod memory;
pub mod submission;
pub mod types;

pub use board::QuoteBoard;
pub use types::{DisplayQuote, QuoteOrigin, QuoteRecord};
