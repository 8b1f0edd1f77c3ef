//! Local records reshaped from the directory's JSON.
//!
//! Deserialization is the reshape: fields are matched by name, unknown
//! upstream fields are dropped, and missing optional fields take their
//! defaults. An explicit `null` upstream stays `null`.

use serde::{Deserialize, Serialize};

fn zero() -> Option<i64> {
    Some(0)
}

fn one() -> Option<i64> {
    Some(1)
}

fn no() -> Option<bool> {
    Some(false)
}

/// One radio station as returned to local clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub stationuuid: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub url_resolved: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub countrycode: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub languagecodes: Option<String>,
    #[serde(default = "zero")]
    pub votes: Option<i64>,
    #[serde(default)]
    pub lastchangetime: Option<String>,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default = "zero")]
    pub bitrate: Option<i64>,
    #[serde(default = "zero")]
    pub hls: Option<i64>,
    #[serde(default = "one")]
    pub lastcheckok: Option<i64>,
    #[serde(default)]
    pub lastchecktime: Option<String>,
    #[serde(default)]
    pub lastcheckoktime: Option<String>,
    #[serde(default)]
    pub lastlocalchecktime: Option<String>,
    #[serde(default)]
    pub clicktimestamp: Option<String>,
    #[serde(default = "zero")]
    pub clickcount: Option<i64>,
    #[serde(default = "zero")]
    pub clicktrend: Option<i64>,
    #[serde(default = "zero")]
    pub ssl_error: Option<i64>,
    #[serde(default)]
    pub geo_lat: Option<f64>,
    #[serde(default)]
    pub geo_long: Option<f64>,
    #[serde(default = "no")]
    pub has_extended_info: Option<bool>,
}

/// A country with at least one listed station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub iso_3166_1: String,
    #[serde(default)]
    pub stationcount: i64,
}

/// A genre (directory tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    #[serde(default)]
    pub stationcount: i64,
}

/// Result of a best-effort click registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Registered,
    Failed { error: String },
}

impl ClickOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, ClickOutcome::Registered)
    }
}
