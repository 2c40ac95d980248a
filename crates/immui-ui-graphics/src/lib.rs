//! Pure math/data for drawing & units in immui
//!
//! This crate contains geometry primitives, color definitions, resource
//! handles, and the unit/alignment descriptors that layouts resolve against.
//! All coordinates are normalized: the viewport spans `[0, 1]` on both axes
//! with y growing downwards.

mod color;
mod geometry;
mod resource;
mod unit;

pub use color::*;
pub use geometry::*;
pub use resource::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::resource::{FontId, ImageId};
    pub use crate::unit::{Alignment, Coordinate, Dimension, Unit};
}
