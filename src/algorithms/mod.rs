pub mod adjacency;
pub mod bounding_triangle;
pub mod convex_hull;
pub mod funnel;
pub mod kirkpatrick;
pub mod triangulate;
