//! Typed views over the enumerated text columns of the tidy table.
//!
//! The tidy file stores `sex` and `area_type` as text. These enums give the
//! query layer compile-time checked filter values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Sex disaggregation used by the earnings indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Total,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Total];

    /// Returns the value as it appears in the tidy file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Total => "Total",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "total" => Ok(Sex::Total),
            _ => Err(ModelError::UnknownSex(s.to_string())),
        }
    }
}

/// Geographic scope of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AreaType {
    National,
    Urban,
    Rural,
}

impl AreaType {
    pub const ALL: [AreaType; 3] = [AreaType::National, AreaType::Urban, AreaType::Rural];

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::National => "National",
            AreaType::Urban => "Urban",
            AreaType::Rural => "Rural",
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "national" => Ok(AreaType::National),
            "urban" => Ok(AreaType::Urban),
            "rural" => Ok(AreaType::Rural),
            _ => Err(ModelError::UnknownAreaType(s.to_string())),
        }
    }
}
