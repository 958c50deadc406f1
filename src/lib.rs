//! Convert JSON (array-of-objects or object-of-arrays), CSV or TSV input
//! into a normalized CSV file.
//!
//! Two halves compose sequentially: [`reader::read_rows`] materializes the
//! input as an ordered sequence of rows, then [`writer::write_csv`] unions
//! the column names across all rows and serializes them as comma-delimited
//! CSV, filling the gaps with empty cells.

pub mod reader;
pub mod writer;

pub use reader::{Row, read_rows};
pub use writer::write_csv;
