//! Collaborator seams for the toll pipeline.
//!
//! Transport, authentication and retries live with the implementors; this
//! crate only shapes the data that flows between them.

use crate::here::RouteResponse;
use crate::pipeline::TollRequest;
use crate::vehicle::TransportMode;

/// A route request between two (lat, lng) points.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub origin: (f64, f64),
    pub destination: (f64, f64),
    pub transport_mode: TransportMode,
}

/// Fetches a route response, typically from a routing HTTP API.
///
/// The response must include section polylines, actions and departure
/// times.
pub trait RouteProvider {
    type Error;

    fn route(&self, query: &RouteQuery) -> Result<RouteResponse, Self::Error>;
}

/// Prices a route, typically by posting the request to a toll API.
pub trait TollCalculator {
    type Quote;
    type Error;

    fn calculate(&self, request: &TollRequest) -> Result<Self::Quote, Self::Error>;
}
