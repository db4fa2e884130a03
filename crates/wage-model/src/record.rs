#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{AreaType, Sex, schema};

/// One row of the raw export, fields still in their labeled string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// `ref_area.label`
    pub ref_area: String,
    /// `source.label`
    pub source: String,
    /// `indicator.label`
    pub indicator: String,
    /// `sex.label`
    pub sex: String,
    /// `classif1.label`, e.g. `Area type: Rural`
    pub classif1: String,
    /// `classif2.label`
    pub classif2: String,
    /// `time`
    pub time: String,
    /// `obs_value`
    pub obs_value: String,
    /// `obs_status.label`
    pub obs_status: String,
    /// `note_indicator.label`
    pub note_indicator: String,
    /// `note_source.label`
    pub note_source: String,
}

/// One cleaned observation. Field order is the tidy file's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRecord {
    pub country: String,
    pub source: String,
    pub indicator: String,
    pub sex: String,
    pub area_type: String,
    pub currency_info: String,
    pub year: i32,
    /// Monthly earnings in PPP dollars. NaN when the observation is missing.
    pub earnings_ppp: f64,
    #[serde(default)]
    pub obs_status: String,
    #[serde(default)]
    pub note_indicator: String,
    #[serde(default)]
    pub note_source: String,
}

impl TidyRecord {
    pub fn sex_kind(&self) -> Option<Sex> {
        self.sex.parse().ok()
    }

    pub fn area_kind(&self) -> Option<AreaType> {
        self.area_type.parse().ok()
    }

    /// Text value of a tidy column by name; `None` for numeric or unknown columns.
    pub fn text(&self, column: &str) -> Option<&str> {
        let value = match column {
            schema::COUNTRY => &self.country,
            schema::SOURCE => &self.source,
            schema::INDICATOR => &self.indicator,
            schema::SEX => &self.sex,
            schema::AREA_TYPE => &self.area_type,
            schema::CURRENCY_INFO => &self.currency_info,
            schema::OBS_STATUS => &self.obs_status,
            schema::NOTE_INDICATOR => &self.note_indicator,
            schema::NOTE_SOURCE => &self.note_source,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Returns the earnings value unless it is missing (NaN).
    pub fn earnings(&self) -> Option<f64> {
        if self.earnings_ppp.is_nan() {
            None
        } else {
            Some(self.earnings_ppp)
        }
    }
}
