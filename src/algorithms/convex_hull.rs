//! Convex hull via a Graham scan.
//!
//! The bounding-triangle builder (C3) needs a convex hull whenever its
//! input region isn't already convex; the original design wraps a
//! scientific library's hull routine (`scipy.spatial.ConvexHull`) for
//! this. There's no idiomatic Rust equivalent among the example crates
//! worth pulling in for one call site, so this is a self-contained O(n
//! log n) scan, grounded on `rgeometry`'s own in-tree Graham scan.

use std::cmp::Ordering;

use crate::orientation::Orientation;
use crate::{Error, Point};

pub fn convex_hull(mut pts: Vec<Point>) -> Result<Vec<Point>, Error> {
  if pts.len() < 3 {
    return Err(Error::InvalidPolygon("convex hull needs at least three points".into()));
  }

  let pivot_idx = pts
    .iter()
    .enumerate()
    .min_by(|(_, a), (_, b)| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal).then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)))
    .map(|(i, _)| i)
    .unwrap();
  pts.swap(0, pivot_idx);
  let pivot = pts[0];

  pts[1..].sort_by(|a, b| {
    polar_cmp(&pivot, a, b).then_with(|| {
      pivot
        .squared_dist(a)
        .partial_cmp(&pivot.squared_dist(b))
        .unwrap_or(Ordering::Equal)
    })
  });

  let mut hull: Vec<Point> = Vec::with_capacity(pts.len());
  for p in pts {
    while hull.len() >= 2 && Orientation::of(&hull[hull.len() - 2], &hull[hull.len() - 1], &p) != Orientation::CounterClockWise {
      hull.pop();
    }
    hull.push(p);
  }

  if hull.len() < 3 {
    return Err(Error::InvalidPolygon("points are collinear".into()));
  }
  Ok(hull)
}

fn polar_cmp(pivot: &Point, a: &Point, b: &Point) -> Ordering {
  match Orientation::of(pivot, a, b) {
    Orientation::CounterClockWise => Ordering::Less,
    Orientation::ClockWise => Ordering::Greater,
    Orientation::CoLinear => Ordering::Equal,
  }
}
