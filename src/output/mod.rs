//! Feature table output

mod writer;

pub use writer::{feature_headers, write_feature_table, ColumnSelection, FEET_COLUMN};
