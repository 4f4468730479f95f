//! Route geometry assembly: every section's flexible polyline, decoded and
//! concatenated into one legacy polyline.

use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use crate::config::RouteSelection;
use crate::flexpolyline::{self, DecodeError};
use crate::here::RouteResponse;
use crate::polyline::Polyline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// The response holds no routes at all.
    NoRouteFound,
    MissingPolyline { route: usize, section: usize },
    Section {
        route: usize,
        section: usize,
        source: DecodeError,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::NoRouteFound => write!(f, "no route found"),
            AssemblyError::MissingPolyline { route, section } => {
                write!(f, "route {} section {} has no polyline", route, section)
            }
            AssemblyError::Section {
                route,
                section,
                source,
            } => write!(f, "route {} section {}: {}", route, section, source),
        }
    }
}

impl std::error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssemblyError::Section { source, .. } => Some(source),
            _ => None,
        }
    }
}

struct SectionPolyline<'a> {
    route: usize,
    section: usize,
    encoded: &'a str,
}

fn section_polylines(
    response: &RouteResponse,
    selection: RouteSelection,
) -> Result<Vec<SectionPolyline<'_>>, AssemblyError> {
    let routes = match selection {
        RouteSelection::AllRoutes => &response.routes[..],
        RouteSelection::FirstRoute => &response.routes[..1],
    };

    let mut polylines = Vec::new();
    for (route, r) in routes.iter().enumerate() {
        for (section, s) in r.sections.iter().enumerate() {
            let encoded = s
                .polyline
                .as_deref()
                .ok_or(AssemblyError::MissingPolyline { route, section })?;
            polylines.push(SectionPolyline {
                route,
                section,
                encoded,
            });
        }
    }
    Ok(polylines)
}

/// Decodes and concatenates the selected routes' section geometries.
///
/// Sections decode independently; if any fails, the error of the first
/// failing section in route/section order is returned and nothing else.
pub fn assemble(response: &RouteResponse, selection: RouteSelection) -> Result<Polyline, AssemblyError> {
    if response.routes.is_empty() {
        return Err(AssemblyError::NoRouteFound);
    }

    let sections = section_polylines(response, selection)?;
    let decoded: Vec<Result<Polyline, AssemblyError>> = sections
        .par_iter()
        .map(|s| {
            flexpolyline::decode(s.encoded)
                .map(Polyline::from_coordinates)
                .map_err(|source| AssemblyError::Section {
                    route: s.route,
                    section: s.section,
                    source,
                })
        })
        .collect();

    let mut polyline = Polyline::default();
    for section in decoded {
        polyline.extend_from(section?);
    }

    debug!(
        sections = sections.len(),
        points = polyline.len(),
        "assembled route geometry"
    );
    Ok(polyline)
}

/// [`assemble`], then legacy-encode the result.
pub fn assemble_encoded(response: &RouteResponse, selection: RouteSelection) -> Result<String, AssemblyError> {
    Ok(assemble(response, selection)?.encode())
}
