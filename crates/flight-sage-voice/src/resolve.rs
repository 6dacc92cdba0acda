// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use flight_sage_core::destinations::DestinationTable;
use flight_sage_core::Coordinate;
use thiserror::Error;

use crate::command::{LocationRef, VoiceCommand};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Unknown place '{0}'. Use 'lat,lon', a city, or an airport code.")]
    UnknownPlace(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoints {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteRequest {
    /// Not a routing command, or no destination was named.
    NotRequested,
    /// Destination resolved, but nothing says where the flight starts.
    MissingOrigin { destination: Coordinate },
    Ready(Endpoints),
}

/// Where "here" is: an explicit location argument wins over the configured default.
pub fn current_location(
    table: &DestinationTable,
    location_arg: Option<&str>,
    default_origin: Option<Coordinate>,
) -> Result<Option<Coordinate>, ResolveError> {
    match location_arg {
        Some(place) => resolve(table, place).map(Some),
        None => Ok(default_origin),
    }
}

/// Turns a parsed command into route endpoints. A spoken origin beats `here`;
/// "here" or no origin at all falls back to `here`.
pub fn route_request(
    cmd: &VoiceCommand,
    here: Option<Coordinate>,
    table: &DestinationTable,
) -> Result<RouteRequest, ResolveError> {
    if !cmd.wants_route() {
        return Ok(RouteRequest::NotRequested);
    }
    let destination = match &cmd.destination {
        Some(LocationRef::Named(text)) => resolve(table, text)?,
        Some(LocationRef::Here) | None => return Ok(RouteRequest::NotRequested),
    };
    let origin = match &cmd.origin {
        Some(LocationRef::Named(text)) => Some(resolve(table, text)?),
        Some(LocationRef::Here) | None => here,
    };

    Ok(match origin {
        Some(origin) => RouteRequest::Ready(Endpoints {
            origin,
            destination,
        }),
        None => RouteRequest::MissingOrigin { destination },
    })
}

fn resolve(table: &DestinationTable, place: &str) -> Result<Coordinate, ResolveError> {
    table
        .resolve(place)
        .ok_or_else(|| ResolveError::UnknownPlace(place.to_string()))
}
