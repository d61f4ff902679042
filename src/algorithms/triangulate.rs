//! Triangulation adapter (C2): wraps the `earcutr` ear-clipping primitive.
//!
//! The adapter's only job is format conversion — flatten point lists into
//! `earcutr`'s `(coords, hole_indices, dim)` shape and re-inflate the
//! returned index triples into `Triangle`s that reference points by
//! value. The ear-clipping algorithm itself is treated as a black box.

use crate::data::Triangle;
use crate::{Error, Point};

pub fn triangulate(points: &[Point], hole: Option<&[Point]>) -> Result<Vec<Triangle>, Error> {
  let mut flat: Vec<f64> = Vec::with_capacity((points.len() + hole.map_or(0, <[Point]>::len)) * 2);
  let mut all_points: Vec<Point> = Vec::with_capacity(points.len() + hole.map_or(0, <[Point]>::len));

  for p in points {
    flat.push(p.x);
    flat.push(p.y);
    all_points.push(*p);
  }

  let hole_indices: Vec<usize> = match hole {
    Some(hole_points) if !hole_points.is_empty() => {
      let start = all_points.len();
      for p in hole_points {
        flat.push(p.x);
        flat.push(p.y);
        all_points.push(*p);
      }
      vec![start]
    }
    _ => Vec::new(),
  };

  let indices = earcutr::earcut(&flat, &hole_indices, 2).map_err(|e| Error::InvalidPolygon(format!("{:?}", e)))?;

  Ok(
    indices
      .chunks_exact(3)
      .map(|c| Triangle::new(all_points[c[0]], all_points[c[1]], all_points[c[2]]))
      .collect(),
  )
}
