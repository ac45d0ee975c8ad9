//! Constellation module - radial skill map geometry.

mod geometry;
mod layout;
mod stars;

pub use geometry::Point;
pub use layout::{
    layout, layout_with, ConstellationLayout, Edge, EdgeKind, LabelPlacement, LayoutConfig,
    NodeKind, PlacedNode, TextAnchor, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
};
pub use stars::{decorative_stars, Star, DEFAULT_STAR_COUNT};
