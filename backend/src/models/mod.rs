pub mod constellation_names;
pub mod coordinates;
pub mod observer;
pub mod sky;
pub mod time;

pub use constellation_names::constellation_name;
pub use coordinates::*;
pub use observer::*;
pub use sky::*;
pub use time::*;
