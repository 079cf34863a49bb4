//! Sentinel-2 band codes

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// The spectral bands a survey can sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    B02,
    B03,
    B04,
    B08,
    B11,
    B12,
}

impl Band {
    /// Every band, in column order
    pub const ALL: [Band; 6] = [Band::B02, Band::B03, Band::B04, Band::B08, Band::B11, Band::B12];

    /// Code used in file names and column headers
    pub fn code(&self) -> &'static str {
        match self {
            Band::B02 => "B02",
            Band::B03 => "B03",
            Band::B04 => "B04",
            Band::B08 => "B08",
            Band::B11 => "B11",
            Band::B12 => "B12",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Band::B02 => "Blue",
            Band::B03 => "Green",
            Band::B04 => "Red",
            Band::B08 => "Near infrared",
            Band::B11 => "Shortwave infrared 1",
            Band::B12 => "Shortwave infrared 2",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Band::ALL
            .iter()
            .copied()
            .find(|band| band.code() == code)
            .ok_or_else(|| format!("Unknown band '{}', expected one of B02, B03, B04, B08, B11, B12", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_band_codes() {
        assert_eq!("B08".parse::<Band>().unwrap(), Band::B08);
        assert_eq!(" b11 ".parse::<Band>().unwrap(), Band::B11);
        assert!("B8A".parse::<Band>().is_err());
        assert_eq!(Band::B04.to_string(), "B04");
    }
}
