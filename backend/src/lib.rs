//! # Sky Map Backend
//!
//! Sky snapshot engine for a planetarium-style renderer.
//!
//! Given an observer's geographic position and a UTC instant, the engine
//! computes where the visible stars, solar-system bodies and constellation
//! figures appear in the observer's local horizontal frame (altitude and
//! azimuth). Results are returned as a single [`models::SkySnapshot`] that the
//! rendering client draws directly.
//!
//! ## Features
//!
//! - **Time Handling**: UTC instants, Julian Dates and sidereal time
//! - **Coordinate Transform**: equatorial (RA/Dec) to horizontal (Alt/Az)
//! - **Star Catalog**: magnitude-limited queries with a built-in bright-star fallback
//! - **Constellations**: figure download, on-disk cache and horizon culling
//! - **Solar System**: Sun, Moon and planets from a pluggable ephemeris
//! - **HTTP API**: `POST /generate` endpoint for the frontend
//!
//! ## Architecture
//!
//! - [`models`]: value types shared by every layer
//! - [`algorithms`]: sidereal time and the horizontal transform
//! - [`sources`]: capability traits and their remote, on-disk and in-memory implementations
//! - [`services`]: the sky components and the [`services::SkyEngine`] that composes them
//! - [`config`]: `sky.toml` loading and engine wiring
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod sources;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{SkyError, SkyResult};
pub use services::{SkyEngine, SkyRequest};
