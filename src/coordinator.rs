//! Multi-region coordinator (C8): owns one `SingleRegionLocator` per
//! registered region, a triangle-fingerprint-to-owning-region map, and a
//! small session (the last located point) so a caller can locate a start
//! point, then ask for the shortest path to an end point without
//! re-supplying the start.

use std::collections::{BTreeSet, HashMap};

use crate::algorithms::funnel::funnel;
use crate::algorithms::kirkpatrick::{Located, SingleRegionLocator};
use crate::data::{Polygon, Triangle};
use crate::{Config, Error, Point};

struct Region {
  locator: SingleRegionLocator,
}

/// A point successfully located against one of the coordinator's regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
  pub region: usize,
  pub triangle: Triangle,
  pub point: Point,
}

/// Preprocesses and queries a set of non-overlapping polygonal regions.
pub struct MultiRegionLocator {
  config: Config,
  regions: Vec<Region>,
  /// Every triangle's fingerprint (its own order-independent identity),
  /// mapped to the region that owns it. Doubles as the collision check for
  /// `add_regions` and as the lookup target for a `locate` hint.
  triangle_owner: HashMap<Triangle, usize>,
  session: Option<Hit>,
}

impl MultiRegionLocator {
  pub fn new(config: Config) -> MultiRegionLocator {
    MultiRegionLocator {
      config,
      regions: Vec::new(),
      triangle_owner: HashMap::new(),
      session: None,
    }
  }

  /// Preprocesses each region's Kirkpatrick hierarchy and adjacency graph,
  /// appending them to the coordinator's region list. Regions are assumed
  /// non-overlapping; that invariant isn't checked here.
  ///
  /// A region whose polygon is invalid or whose bounding-triangle search
  /// fails is skipped, not fatal: its index within `outlines` is recorded
  /// in the returned set and preprocessing continues with the next region.
  /// A triangle-fingerprint collision against an already-registered region
  /// is fatal and aborts the whole call, since it indicates two supposedly
  /// non-overlapping regions actually overlap.
  pub fn add_regions(&mut self, outlines: &[Polygon]) -> Result<BTreeSet<usize>, Error> {
    let mut skipped = BTreeSet::new();

    for (idx, outline) in outlines.iter().enumerate() {
      let triangles = match outline.triangulation() {
        Ok(t) => t.to_vec(),
        Err(Error::InvalidPolygon(_)) => {
          skipped.insert(idx);
          continue;
        }
        Err(e) => return Err(e),
      };

      let locator = match SingleRegionLocator::build(&triangles, outline, &self.config) {
        Ok(l) => l,
        Err(Error::InvalidPolygon(_)) | Err(Error::BoundingTriangleFailure) => {
          skipped.insert(idx);
          continue;
        }
        Err(e) => return Err(e),
      };

      for &t in &triangles {
        if let Some(&owner) = self.triangle_owner.get(&t) {
          return Err(Error::InvalidPolygon(format!(
            "triangle fingerprint collision between region {owner} and incoming region at index {idx}"
          )));
        }
      }

      let region_id = self.regions.len();
      for &t in &triangles {
        self.triangle_owner.insert(t, region_id);
      }
      self.regions.push(Region { locator });
    }

    Ok(skipped)
  }

  pub fn region_count(&self) -> usize {
    self.regions.len()
  }

  /// Locates `p`. If `hint` is a triangle already known to belong to a
  /// registered region, the search is restricted to that region; otherwise
  /// every locator is scanned in order and the first hit is returned.
  pub fn locate(&self, p: Point, hint: Option<Triangle>) -> Result<Hit, Error> {
    if let Some(hint_triangle) = hint {
      if let Some(&region_idx) = self.triangle_owner.get(&hint_triangle) {
        return match self.regions[region_idx].locator.locate(&p) {
          Located::Inside(triangle) => Ok(Hit {
            region: region_idx,
            triangle,
            point: p,
          }),
          Located::Outside => Err(Error::PointOutside),
        };
      }
    }

    for (idx, region) in self.regions.iter().enumerate() {
      if let Located::Inside(triangle) = region.locator.locate(&p) {
        return Ok(Hit {
          region: idx,
          triangle,
          point: p,
        });
      }
    }
    Err(Error::PointOutside)
  }

  /// Locates `p` and remembers it as the session's start point for a
  /// subsequent `get_shortest_path` call. Any prior session is discarded
  /// up front, so a failed relocation always leaves the session cleared
  /// rather than stale.
  pub fn set_first_point(&mut self, p: Point) -> Result<Hit, Error> {
    self.session = None;
    let hit = self.locate(p, None)?;
    self.session = Some(hit);
    Ok(hit)
  }

  pub fn has_first_point(&self) -> bool {
    self.session.is_some()
  }

  pub fn clear_session(&mut self) {
    self.session = None;
  }

  /// Finds the shortest obstacle-free path from the session's start point
  /// to `end`, both of which must fall in the same region. Clears the
  /// session on every path out, whether it succeeds or the two points
  /// turn out to lie in different regions.
  pub fn get_shortest_path(&mut self, end: Point) -> Result<Vec<Point>, Error> {
    let start = self.session.ok_or(Error::PointOutside)?;
    let end_hit = self.locate(end, None)?;
    if start.region != end_hit.region {
      self.session = None;
      return Err(Error::CrossRegionPath);
    }

    let region = &self.regions[start.region];
    let adjacency = region.locator.adjacency();
    let corridor = adjacency
      .bfs(start.triangle, end_hit.triangle)
      .ok_or_else(|| Error::DegenerateCorridor("no triangle path between start and end".into()))?;

    let path = funnel(&corridor, start.point, end, adjacency);
    self.session = None;
    path
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn square(offset: f64) -> Polygon {
    Polygon::new(vec![
      Point::new(offset, offset),
      Point::new(offset + 10.0, offset),
      Point::new(offset + 10.0, offset + 10.0),
      Point::new(offset, offset + 10.0),
    ])
    .unwrap()
  }

  #[test]
  fn locates_a_point_in_the_right_region() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0), square(100.0)]).unwrap();

    let hit = coordinator.locate(Point::new(105.0, 105.0), None).unwrap();
    assert_eq!(hit.region, 1);
  }

  #[test]
  fn hint_restricts_the_search_to_its_owning_region() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0), square(100.0)]).unwrap();

    let first_hit = coordinator.locate(Point::new(5.0, 5.0), None).unwrap();
    // A point that's actually in region 1 but hinted at region 0's
    // triangle should come back as outside, since the hint restricts the
    // search to region 0 only.
    let result = coordinator.locate(Point::new(105.0, 105.0), Some(first_hit.triangle));
    assert_eq!(result, Err(Error::PointOutside));
  }

  #[test]
  fn outside_every_region_is_an_error() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0)]).unwrap();
    assert_eq!(coordinator.locate(Point::new(500.0, 500.0), None), Err(Error::PointOutside));
  }

  #[test]
  fn shortest_path_within_one_region() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0)]).unwrap();
    coordinator.set_first_point(Point::new(1.0, 1.0)).unwrap();
    let path = coordinator.get_shortest_path(Point::new(9.0, 9.0)).unwrap();
    assert_eq!(*path.first().unwrap(), Point::new(1.0, 1.0));
    assert_eq!(*path.last().unwrap(), Point::new(9.0, 9.0));
  }

  #[test]
  fn shortest_path_clears_the_session() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0)]).unwrap();
    coordinator.set_first_point(Point::new(1.0, 1.0)).unwrap();
    coordinator.get_shortest_path(Point::new(9.0, 9.0)).unwrap();
    assert!(!coordinator.has_first_point());
  }

  #[test]
  fn cross_region_path_is_rejected_and_clears_the_session() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0), square(100.0)]).unwrap();
    coordinator.set_first_point(Point::new(1.0, 1.0)).unwrap();
    let err = coordinator.get_shortest_path(Point::new(105.0, 105.0)).unwrap_err();
    assert_eq!(err, Error::CrossRegionPath);
    assert!(!coordinator.has_first_point());
  }

  #[test]
  fn failed_relocate_clears_a_stale_session() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0)]).unwrap();
    coordinator.set_first_point(Point::new(1.0, 1.0)).unwrap();
    assert!(coordinator.has_first_point());

    assert!(coordinator.set_first_point(Point::new(500.0, 500.0)).is_err());
    assert!(!coordinator.has_first_point());
  }

  #[test]
  fn overlapping_regions_are_rejected_as_a_batch() {
    let mut coordinator = MultiRegionLocator::new(Config::default());
    coordinator.add_regions(&[square(0.0)]).unwrap();
    let err = coordinator.add_regions(&[square(0.0)]).unwrap_err();
    assert!(matches!(err, Error::InvalidPolygon(_)));
  }
}
