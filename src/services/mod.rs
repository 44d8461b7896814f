// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session logic and collaborator surfaces.

pub mod geolocation;
pub mod map;
pub mod render;
pub mod session;
pub mod sidebar;

pub use geolocation::{FixedGeolocator, GeolocationError, Geolocator, HttpGeolocator};
pub use map::{CommandQueueMap, MapCommand, MapSurface};
pub use session::{SessionController, SessionOptions, SessionState};
pub use sidebar::{Sidebar, SidebarPanel};
