//! Groundwater well readings

mod table;

pub use table::{WellReading, WellTable, CURRENT_LEVEL, DATE, LATITUDE, LONGITUDE, REQUIRED_COLUMNS};
