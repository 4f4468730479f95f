//! Pipeline configuration.

use std::env;
use std::str::FromStr;

use crate::vehicle::{self, TransportMode};

/// Which routes of a multi-route response contribute geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteSelection {
    /// Every section of every route, route order then section order.
    #[default]
    AllRoutes,
    FirstRoute,
}

impl FromStr for RouteSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RouteSelection::AllRoutes),
            "first" => Ok(RouteSelection::FirstRoute),
            other => Err(format!("unknown route selection {:?}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Value of the toll request's `source` field.
    pub source: String,
    pub vehicle_type: String,
    pub route_selection: RouteSelection,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: "here".to_string(),
            vehicle_type: "2AxlesAuto".to_string(),
            route_selection: RouteSelection::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads `TOLL_SOURCE`, `TOLL_VEHICLE_TYPE` and `TOLL_ROUTE_SELECTION`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; missing or unparseable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            source: lookup("TOLL_SOURCE")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.source),
            vehicle_type: lookup("TOLL_VEHICLE_TYPE")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.vehicle_type),
            route_selection: lookup("TOLL_ROUTE_SELECTION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.route_selection),
        }
    }

    pub fn transport_mode(&self) -> TransportMode {
        vehicle::transport_mode_for(Some(&self.vehicle_type))
    }
}
