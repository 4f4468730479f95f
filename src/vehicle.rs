//! Toll vehicle types and the routing transport mode each one maps to.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Transport mode understood by the routing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Car,
    Truck,
    Bus,
}

impl TransportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Truck => "truck",
            TransportMode::Bus => "bus",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up a toll vehicle type. `None` for types the table doesn't know.
pub fn lookup(vehicle_type: &str) -> Option<TransportMode> {
    let mode = match vehicle_type {
        "2AxlesAuto" | "3AxlesAuto" | "4AxlesAuto" => TransportMode::Car,
        "2AxlesDualTire" | "3AxlesDualTire" | "4AxlesDualTire" => TransportMode::Car,
        "2AxlesEV" | "3AxlesEV" | "4AxlesEV" => TransportMode::Car,
        "2AxlesTNC" | "2AxlesTNCPool" | "2AxlesTaxi" | "2AxlesTaxiPool" => TransportMode::Car,
        "Carpool2" | "Carpool3" => TransportMode::Car,
        // RVs route as cars.
        "2AxlesRv" | "3AxlesRv" | "4AxlesRv" => TransportMode::Car,
        "2AxlesTruck" | "3AxlesTruck" | "4AxlesTruck" | "5AxlesTruck" | "6AxlesTruck"
        | "7AxlesTruck" | "8AxlesTruck" | "9AxlesTruck" => TransportMode::Truck,
        "2AxlesBus" | "3AxlesBus" => TransportMode::Bus,
        _ => return None,
    };
    Some(mode)
}

/// Transport mode for `vehicle_type`, falling back to car.
pub fn transport_mode_for(vehicle_type: Option<&str>) -> TransportMode {
    match vehicle_type {
        None | Some("") => {
            warn!("no vehicle type provided, defaulting to car");
            TransportMode::Car
        }
        Some(vehicle_type) => lookup(vehicle_type).unwrap_or_else(|| {
            warn!(vehicle_type, "unknown vehicle type, defaulting to car");
            TransportMode::Car
        }),
    }
}
