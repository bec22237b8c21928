//! Station, line and membership records.
//!
//! # Invariants
//! - Missing JSON fields take their zero value instead of failing.
//! - Membership pairs keep input order and are never deduplicated.
//! - Station ids referenced by lines are not checked against the station set;
//!   referential integrity belongs to the store.

use serde::{Deserialize, Serialize};

/// A station as described by the input dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Station {
    /// Unique station identifier, used as the `stations.id` key.
    pub id: String,
    /// Display name; lookups match it exactly and case-sensitively.
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            longitude,
            latitude,
        }
    }
}

/// A named line and the ordered station ids it visits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    pub name: String,
    /// Serialized as `stations` to match the input file layout.
    #[serde(rename = "stations")]
    pub station_ids: Vec<String>,
}

impl Line {
    pub fn new<I, S>(name: impl Into<String>, station_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            station_ids: station_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// One `(line, station)` association: the line visits the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MembershipPair<'a> {
    pub line_name: &'a str,
    pub station_id: &'a str,
}

/// Whole dataset parsed from one input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkData {
    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
}

impl NetworkData {
    /// Yields every membership pair in line order, then station order.
    pub fn membership_pairs(&self) -> impl Iterator<Item = MembershipPair<'_>> + '_ {
        self.lines.iter().flat_map(|line| {
            line.station_ids.iter().map(move |station_id| MembershipPair {
                line_name: line.name.as_str(),
                station_id: station_id.as_str(),
            })
        })
    }

    /// Number of membership rows a full write produces.
    pub fn membership_count(&self) -> usize {
        self.lines.iter().map(|line| line.station_ids.len()).sum()
    }
}
