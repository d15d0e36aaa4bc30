//! Input parsing and dataset construction.

mod header;
mod parser;
mod source;

pub use header::{HeaderMode, build_dataset, detect_header_row};
pub use parser::{Parser, ParserConfig, RowLimit};
pub use source::{RawTable, SourceFormat, SourceMetadata};
