//! Point-location and shortest-obstacle-free-path queries over planar
//! polygonal regions.
//!
//! A caller registers one or more non-overlapping polygonal regions
//! (`coordinator::MultiRegionLocator::add_regions`), each of which is
//! preprocessed into a Kirkpatrick point-location hierarchy (`algorithms::kirkpatrick`)
//! and a triangle-adjacency dual graph (`algorithms::adjacency`). Queries locate
//! a point's containing triangle in `O(log n)`, and shortest paths between two
//! points in the same region are found by funneling a straight corridor of
//! triangles (`algorithms::funnel`) found via breadth-first search over the dual.

pub mod algorithms;
pub mod coordinator;
pub mod data;
mod orientation;
mod point;

pub use coordinator::MultiRegionLocator;
pub use orientation::{ccw, Orientation};
pub use point::{segments_intersect, Point};

/// Errors produced while preprocessing regions or answering queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// A polygon failed basic structural validation (too few vertices,
  /// duplicate consecutive vertices, or a triangulation failure).
  InvalidPolygon(String),
  /// The minimum-bounding-triangle search (C3) could not produce a valid
  /// enclosing triangle for a region's outline.
  BoundingTriangleFailure,
  /// The funnel algorithm (C7) was handed a corridor whose consecutive
  /// portals don't share a vertex, or whose chains emptied unexpectedly.
  DegenerateCorridor(String),
  /// An edge in a triangulation was shared by more than two triangles,
  /// which should be impossible for a planar triangulation.
  EdgeOverfull(String),
  /// A query point falls outside every registered region.
  PointOutside,
  /// A path was requested between two points in different regions.
  CrossRegionPath,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::InvalidPolygon(msg) => write!(f, "invalid polygon: {msg}"),
      Error::BoundingTriangleFailure => write!(f, "failed to compute a bounding triangle"),
      Error::DegenerateCorridor(msg) => write!(f, "degenerate corridor: {msg}"),
      Error::EdgeOverfull(msg) => write!(f, "edge shared by more than two triangles: {msg}"),
      Error::PointOutside => write!(f, "point is outside every registered region"),
      Error::CrossRegionPath => write!(f, "start and end points belong to different regions"),
    }
  }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Tunable knobs for preprocessing, all independent of any individual
/// region's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
  /// How far the bounding triangle is pushed outward past a region's
  /// convex hull, in the same units as the input coordinates.
  pub outer_factor: f64,
  /// Maximum vertex degree `k` eligible for removal in one Kirkpatrick
  /// peel iteration. Bounded by a constant independent of region size so
  /// each iteration does `O(1)` work per removed vertex.
  pub indep_set_degree: usize,
  /// Tolerance used when validating a bounding-triangle candidate's edge
  /// midpoints against the original polygon's edges.
  pub epsilon_midpoint: f64,
  /// Tolerance used for `Point::close_to` boundary/endpoint comparisons
  /// elsewhere in the pipeline (funnel finalization, region stitching).
  pub epsilon_close: f64,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      outer_factor: 10.0,
      indep_set_degree: 8,
      epsilon_midpoint: 0.01,
      epsilon_close: 0.01,
    }
  }
}
