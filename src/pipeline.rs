//! Toll request assembly.
//!
//! Combines the assembled route geometry with the timing derived from the
//! first section into the payload a toll calculation API expects.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::geometry::{self, AssemblyError};
use crate::here::RouteResponse;
use crate::timing::{self, TimestampError, TimingPair};
use crate::traits::{RouteProvider, RouteQuery, TollCalculator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollRequest {
    pub source: String,
    /// Legacy encoded polyline of the whole trip.
    pub polyline: String,
    pub vehicle: VehicleSpec,
    #[serde(rename = "locTimes")]
    pub loc_times: Vec<TimingPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

#[derive(Debug)]
pub enum PipelineError {
    Assembly(AssemblyError),
    /// The first section has no departure time to anchor the timings.
    MissingDeparture,
    Timestamp(TimestampError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Assembly(err) => write!(f, "route geometry: {}", err),
            PipelineError::MissingDeparture => write!(f, "first section has no departure time"),
            PipelineError::Timestamp(err) => write!(f, "departure time: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Assembly(err) => Some(err),
            PipelineError::MissingDeparture => None,
            PipelineError::Timestamp(err) => Some(err),
        }
    }
}

impl From<AssemblyError> for PipelineError {
    fn from(err: AssemblyError) -> Self {
        PipelineError::Assembly(err)
    }
}

impl From<TimestampError> for PipelineError {
    fn from(err: TimestampError) -> Self {
        PipelineError::Timestamp(err)
    }
}

/// Builds the toll request for `response`.
///
/// Geometry follows `config.route_selection`; timings come from the first
/// section of the first route, whose offsets they refer to.
pub fn build_toll_request(
    response: &RouteResponse,
    config: &PipelineConfig,
) -> Result<TollRequest, PipelineError> {
    let polyline = geometry::assemble_encoded(response, config.route_selection)?;

    let first_section = response
        .routes
        .first()
        .and_then(|route| route.sections.first())
        .ok_or(AssemblyError::NoRouteFound)?;
    let departure = first_section
        .departure_epoch()?
        .ok_or(PipelineError::MissingDeparture)?;
    let loc_times = timing::derive_timings(&first_section.actions, departure);

    debug!(
        departure,
        arrival = ?first_section.arrival_epoch().ok().flatten(),
        actions = first_section.actions.len(),
        "derived loc times"
    );

    Ok(TollRequest {
        source: config.source.clone(),
        polyline,
        vehicle: VehicleSpec {
            vehicle_type: config.vehicle_type.clone(),
        },
        loc_times,
    })
}

#[derive(Debug)]
pub enum QuoteError<R, T> {
    Route(R),
    Pipeline(PipelineError),
    Toll(T),
}

impl<R: fmt::Display, T: fmt::Display> fmt::Display for QuoteError<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::Route(err) => write!(f, "route provider: {}", err),
            QuoteError::Pipeline(err) => write!(f, "{}", err),
            QuoteError::Toll(err) => write!(f, "toll calculator: {}", err),
        }
    }
}

impl<R, T> std::error::Error for QuoteError<R, T>
where
    R: std::error::Error + 'static,
    T: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuoteError::Route(err) => Some(err),
            QuoteError::Pipeline(err) => Some(err),
            QuoteError::Toll(err) => Some(err),
        }
    }
}

/// Fetches a route between `origin` and `destination` and prices it.
pub fn quote<P, C>(
    provider: &P,
    calculator: &C,
    origin: (f64, f64),
    destination: (f64, f64),
    config: &PipelineConfig,
) -> Result<C::Quote, QuoteError<P::Error, C::Error>>
where
    P: RouteProvider,
    C: TollCalculator,
{
    let query = RouteQuery {
        origin,
        destination,
        transport_mode: config.transport_mode(),
    };
    debug!(transport_mode = %query.transport_mode, "requesting route");

    let response = provider.route(&query).map_err(QuoteError::Route)?;
    let request = build_toll_request(&response, config).map_err(QuoteError::Pipeline)?;
    debug!(
        polyline_len = request.polyline.len(),
        loc_times = request.loc_times.len(),
        "requesting toll calculation"
    );
    calculator.calculate(&request).map_err(QuoteError::Toll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::here::{Route, RouteAction, Section, Stop};

    fn response_with(departure: Option<&str>) -> RouteResponse {
        RouteResponse {
            routes: vec![Route {
                id: None,
                sections: vec![Section {
                    polyline: Some("BFgx_qH_x09Wg2tNvvyE".to_string()),
                    actions: vec![RouteAction::new(0, 60), RouteAction::new(1, 0)],
                    departure: departure.map(|time| Stop { time: time.to_string() }),
                    ..Section::default()
                }],
            }],
        }
    }

    #[test]
    fn test_build_request() {
        let response = response_with(Some("2021-01-05T09:46:08Z"));
        let request = build_toll_request(&response, &PipelineConfig::default()).unwrap();
        assert_eq!(request.source, "here");
        assert_eq!(request.polyline, "_p~iF~ps|U_ulLnnqC");
        assert_eq!(request.vehicle.vehicle_type, "2AxlesAuto");
        assert_eq!(
            request.loc_times,
            vec![
                TimingPair { offset: 0, timestamp: 1609839968 },
                TimingPair { offset: 1, timestamp: 1609840028 },
            ]
        );
    }

    #[test]
    fn test_payload_shape() {
        let response = response_with(Some("2021-01-05T09:46:08Z"));
        let request = build_toll_request(&response, &PipelineConfig::default()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "source": "here",
                "polyline": "_p~iF~ps|U_ulLnnqC",
                "vehicle": {"type": "2AxlesAuto"},
                "locTimes": [[0, 1609839968], [1, 1609840028]]
            })
        );
    }

    #[test]
    fn test_missing_departure() {
        let response = response_with(None);
        let err = build_toll_request(&response, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingDeparture));
    }

    #[test]
    fn test_bad_departure() {
        let response = response_with(Some("not a time"));
        let err = build_toll_request(&response, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Timestamp(_)));
    }

    #[test]
    fn test_no_route() {
        let err = build_toll_request(&RouteResponse::default(), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Assembly(AssemblyError::NoRouteFound)));
    }
}
