//! Pollutant identifiers.

use crate::error::{AirqError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A measured pollutant. The variant names double as CSV column names.
///
/// Deserialization goes through [`FromStr`], so JSON, TOML and CSV headers
/// all accept the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Pollutant {
    PM25,
    PM10,
    SO2,
    NO2,
    CO,
    O3,
}

impl Pollutant {
    /// All pollutants in sidebar order.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::PM25,
        Pollutant::PM10,
        Pollutant::SO2,
        Pollutant::NO2,
        Pollutant::CO,
        Pollutant::O3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pollutant::PM25 => "PM25",
            Pollutant::PM10 => "PM10",
            Pollutant::SO2 => "SO2",
            Pollutant::NO2 => "NO2",
            Pollutant::CO => "CO",
            Pollutant::O3 => "O3",
        }
    }

    /// Position of this pollutant in [`Pollutant::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Pollutant::PM25 => 0,
            Pollutant::PM10 => 1,
            Pollutant::SO2 => 2,
            Pollutant::NO2 => 3,
            Pollutant::CO => 4,
            Pollutant::O3 => 5,
        }
    }

    /// Match a CSV header cell, accepting the dotted `PM2.5` spelling.
    pub fn from_column(header: &str) -> Option<Self> {
        header.trim().parse().ok()
    }
}

impl FromStr for Pollutant {
    type Err = AirqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "PM25" | "PM2.5" => Ok(Pollutant::PM25),
            "PM10" => Ok(Pollutant::PM10),
            "SO2" => Ok(Pollutant::SO2),
            "NO2" => Ok(Pollutant::NO2),
            "CO" => Ok(Pollutant::CO),
            "O3" => Ok(Pollutant::O3),
            _ => Err(AirqError::UnknownPollutant(s.to_string())),
        }
    }
}

impl TryFrom<String> for Pollutant {
    type Error = AirqError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
