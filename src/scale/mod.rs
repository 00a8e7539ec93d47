//! Coordinate mapping from data domains to pixel ranges.
//!
//! [`LinearScale`] handles continuous numeric axes; [`BandScale`] lays out
//! ordered categories as equal-width bands.

mod band;
mod linear;

pub use band::{Band, BandScale};
pub use linear::{LinearScale, extent, nice_domain};
