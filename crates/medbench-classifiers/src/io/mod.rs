//! Readers for the delimited source files behind each dataset.
pub mod delimited;

pub use delimited::{read_table, read_table_with_config, TableReaderConfig};
