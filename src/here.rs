//! Route-provider response model.
//!
//! Only the fields the toll pipeline reads are modelled; everything else in
//! the provider's JSON is ignored.

use serde::{Deserialize, Serialize};

use crate::timing::{self, TimestampError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Flexible polyline of this section, absent unless requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
    #[serde(default)]
    pub actions: Vec<RouteAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<Stop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<Stop>,
}

impl Section {
    /// Departure time in epoch seconds, if the section carries one.
    pub fn departure_epoch(&self) -> Result<Option<i64>, TimestampError> {
        self.departure.as_ref().map(Stop::epoch).transpose()
    }

    pub fn arrival_epoch(&self) -> Result<Option<i64>, TimestampError> {
        self.arrival.as_ref().map(Stop::epoch).transpose()
    }
}

/// Departure or arrival of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// ISO-8601 timestamp with offset.
    pub time: String,
}

impl Stop {
    pub fn epoch(&self) -> Result<i64, TimestampError> {
        timing::iso_to_epoch(&self.time)
    }
}

/// A maneuver along a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAction {
    #[serde(default)]
    pub action: String,
    /// Position of the maneuver along the section, counted from its start.
    pub offset: u64,
    /// Seconds needed to reach this action from the previous one.
    pub duration: u64,
}

impl RouteAction {
    pub fn new(offset: u64, duration: u64) -> Self {
        Self {
            action: String::new(),
            offset,
            duration,
        }
    }
}
