//! Table parsing for uploaded contact lists.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata, TableFormat};
