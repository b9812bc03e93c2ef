//! Plain value types shared across the crate.
//!
//! # Example
//!
//! ```
//! use nest_rs::types::{BoundingBox, Point2D};
//!
//! let p = Point2D::new(151.2, -33.9);
//! let bbox = BoundingBox::new(150.0, -35.0, 152.0, -33.0);
//! assert!(bbox.contains_point(&p));
//! ```

mod bounds;
mod point;

pub use bounds::BoundingBox;
pub use point::Point2D;
