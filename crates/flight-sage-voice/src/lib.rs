// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Turns spoken or typed requests ("find flights from Chicago to LA") into
//! an intent plus the place names mentioned, and resolves those names through
//! the `flight-sage-core` destination table.

pub mod command;
pub mod resolve;

pub use command::{Intent, LocationRef, Panel, VoiceCommand};
pub use resolve::{current_location, route_request, Endpoints, ResolveError, RouteRequest};
