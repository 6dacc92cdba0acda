// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Session state around the route calculator: keeps the current endpoints,
//! recomputes whenever one of them changes and tells observers about it.

use crate::destinations::DestinationTable;
use crate::geo::Coordinate;
use crate::route::{Route, RouteCalculator};
use crate::RouteError;

type RouteObserver = Box<dyn FnMut(&Route)>;

pub struct RoutePlanner {
    calculator: RouteCalculator,
    destinations: DestinationTable,
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
    route: Option<Route>,
    observers: Vec<RouteObserver>,
}

impl RoutePlanner {
    pub fn new(calculator: RouteCalculator, destinations: DestinationTable) -> Self {
        Self {
            calculator,
            destinations,
            origin: None,
            destination: None,
            route: None,
            observers: Vec::new(),
        }
    }

    /// Registers a callback fired with every newly calculated route.
    pub fn on_route_calculated<F>(&mut self, observer: F)
    where
        F: FnMut(&Route) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Updates the origin. Invalid coordinates are rejected and leave the session untouched.
    pub fn set_origin(&mut self, origin: Coordinate) -> Result<Option<&Route>, RouteError> {
        origin.validate()?;
        if self.origin != Some(origin) {
            self.origin = Some(origin);
            self.recompute()?;
        }
        Ok(self.route.as_ref())
    }

    pub fn set_destination(&mut self, destination: Coordinate) -> Result<Option<&Route>, RouteError> {
        destination.validate()?;
        if self.destination != Some(destination) {
            self.destination = Some(destination);
            self.recompute()?;
        }
        Ok(self.route.as_ref())
    }

    /// Resolves free text into a destination. Returns `false` and leaves the
    /// current destination alone when nothing matches.
    pub fn search_destination(&mut self, query: &str) -> Result<bool, RouteError> {
        match self.destinations.resolve(query) {
            Some(c) => {
                self.set_destination(c)?;
                Ok(true)
            }
            None => {
                log::info!("Destination search had no match — query='{}'", query);
                Ok(false)
            }
        }
    }

    pub fn clear_destination(&mut self) {
        self.destination = None;
        self.route = None;
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.destination = None;
        self.route = None;
    }

    fn recompute(&mut self) -> Result<(), RouteError> {
        let (Some(origin), Some(destination)) = (self.origin, self.destination) else {
            self.route = None;
            return Ok(());
        };

        let route = match self.calculator.compute(origin, destination) {
            Ok(r) => r,
            Err(e) => {
                log::warn!(
                    "Route calculation failed — origin={} destination={} error={}",
                    origin,
                    destination,
                    e
                );
                self.route = None;
                return Err(e);
            }
        };

        log::debug!(
            "Route calculated — id={} distance_km={:.1} est={}",
            route.id,
            route.distance_km,
            route.estimated_time
        );
        for observer in &mut self.observers {
            observer(&route);
        }
        self.route = Some(route);
        Ok(())
    }
}
