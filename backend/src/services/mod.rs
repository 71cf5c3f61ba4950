//! Service layer: the sky components and their composition.
//!
//! Each component is a free function over borrowed capabilities and a
//! [`SiderealFrame`](crate::algorithms::SiderealFrame); [`sky::SkyEngine`] wires
//! them together for a request.

pub mod constellations;
pub mod figure_cache;
pub mod sky;
pub mod solar_system;
pub mod stars;

pub use constellations::get_constellations;
pub use figure_cache::{FigureCache, FigureCatalog};
pub use sky::{SkyEngine, SkyRequest, DEFAULT_MAGNITUDE_LIMIT};
pub use solar_system::get_solar_system_objects;
pub use stars::{fallback_stars, get_visible_stars, FALLBACK_STARS};
