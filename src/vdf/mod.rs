//! Valve KeyValues (VDF) Module
//!
//! Text format used by `libraryfolders.vdf` and `appmanifest_*.acf`.
//!
//! ## Structure
//! - `types`: parsed tree (`VdfObject` / `VdfValue`) and queries
//! - `parser`: tokenizer and recursive-descent parser

pub mod parser;
pub mod types;

pub use parser::{parse, parse_lenient, VdfDocument, VdfSyntaxError};
pub use types::{VdfObject, VdfValue};
