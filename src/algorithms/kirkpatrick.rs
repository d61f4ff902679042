//! Kirkpatrick point-location DAG (C5): `O(n)` preprocessing, `O(log n)`
//! query, built by repeatedly peeling a bounded-degree independent set of
//! vertices from the current triangulation and re-triangulating the stars
//! left behind, linking each new triangle to the old ones it replaces.
//!
//! A query descends the DAG from its single root, at each step picking the
//! child (an older, finer triangle) that contains the query point, until it
//! reaches a triangle with no further children. That triangle is either one
//! of the region's own triangles (a hit) or one of the throwaway boundary
//! annulus triangles (a miss).

use std::collections::{HashMap, HashSet};

use crate::algorithms::adjacency::AdjacencyGraph;
use crate::algorithms::bounding_triangle::larger_bounding_triangle;
use crate::algorithms::triangulate::triangulate;
use crate::data::{DirectedGraph, Polygon, Triangle, UndirectedGraph};
use crate::{Config, Error, Point};

/// Result of locating a point against a single region's hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located {
  Inside(Triangle),
  Outside,
}

/// Preprocessed point-location hierarchy and triangle-adjacency dual graph
/// for a single region.
pub struct SingleRegionLocator {
  dag: DirectedGraph<Triangle>,
  original_triangles: HashSet<Triangle>,
  adjacency: AdjacencyGraph,
}

impl SingleRegionLocator {
  /// Builds the hierarchy for one region, given its own triangulation and
  /// its outline (used to compute the bounding triangle and boundary
  /// annulus around it).
  pub fn build(region_triangles: &[Triangle], outline: &Polygon, config: &Config) -> Result<SingleRegionLocator, Error> {
    let mut dag: DirectedGraph<Triangle> = DirectedGraph::new();
    let mut original: HashSet<Triangle> = HashSet::new();
    for &t in region_triangles {
      dag.add_node(t);
      original.insert(t);
    }

    let bounding_poly = larger_bounding_triangle(&outline.points, config.outer_factor, config.epsilon_midpoint)?;
    let boundary_triangles = triangulate(&bounding_poly.points, Some(&outline.points))?;
    for &t in &boundary_triangles {
      dag.add_node(t);
    }

    let avoid: HashSet<Point> = bounding_poly.points.iter().copied().collect();

    let mut frontier: Vec<Triangle> = region_triangles.iter().copied().chain(boundary_triangles.iter().copied()).collect();
    while frontier.len() > 1 {
      frontier = peel(frontier, &avoid, &mut dag, config.indep_set_degree)?;
    }

    let adjacency = AdjacencyGraph::build(region_triangles)?;

    Ok(SingleRegionLocator {
      dag,
      original_triangles: original,
      adjacency,
    })
  }

  pub fn adjacency(&self) -> &AdjacencyGraph {
    &self.adjacency
  }

  /// Descends the DAG from its root, following the unique child that
  /// contains `p` at each level, until a leaf is reached.
  pub fn locate(&self, p: &Point) -> Located {
    let Some(&root) = self.dag.roots().next() else {
      return Located::Outside;
    };
    if !root.contains_point(p) {
      return Located::Outside;
    }

    let mut curr = root;
    loop {
      let mut next = None;
      for &child in self.dag.children(&curr) {
        if child.contains_point(p) {
          next = Some(child);
          break;
        }
      }
      match next {
        Some(n) => curr = n,
        None => break,
      }
    }

    if self.original_triangles.contains(&curr) {
      Located::Inside(curr)
    } else {
      Located::Outside
    }
  }

  /// `true` iff the hierarchy has exactly one root and contains no cycles,
  /// the two structural invariants a correctly built DAG must satisfy.
  pub fn is_well_formed(&self) -> bool {
    self.dag.roots().count() == 1 && self.dag.is_acyclic()
  }
}

/// Removes one bounded-degree independent set of vertices from `regions`,
/// re-triangulating each star left behind and linking the new triangles to
/// the old ones they replace. Returns the next, coarser frontier.
fn peel(regions: Vec<Triangle>, avoid: &HashSet<Point>, dag: &mut DirectedGraph<Triangle>, k: usize) -> Result<Vec<Triangle>, Error> {
  let mut point_regions: HashMap<Point, HashSet<usize>> = HashMap::new();
  for (i, r) in regions.iter().enumerate() {
    for p in r.points() {
      point_regions.entry(p).or_default().insert(i);
    }
  }

  let mut adjacency: UndirectedGraph<Point> = UndirectedGraph::new();
  for r in &regions {
    let pts = r.points();
    for i in 0..3 {
      let (u, v) = (pts[i], pts[(i + 1) % 3]);
      if !adjacency.contains(&u) {
        adjacency.add_node(u);
      }
      if !adjacency.contains(&v) {
        adjacency.add_node(v);
      }
      adjacency.connect(&u, &v);
    }
  }

  let removal = adjacency.independent_set(k, avoid);

  let mut unaffected: HashSet<usize> = (0..regions.len()).collect();
  let mut next_frontier = Vec::new();

  for p in removal {
    let affected: HashSet<usize> = match point_regions.get(&p) {
      Some(s) if s.len() >= 2 => s.clone(),
      _ => continue,
    };
    for i in &affected {
      unaffected.remove(i);
    }

    let boundary = star_polygon(p, &affected, &regions);
    let poly = Polygon::new(boundary)?;
    let triangles = poly.triangulation()?;
    for &t in triangles {
      dag.add_node(t);
      for &j in &affected {
        dag.connect(&t, &regions[j]);
      }
      next_frontier.push(t);
    }
  }

  for i in unaffected {
    next_frontier.push(regions[i]);
  }

  Ok(next_frontier)
}

/// Walks the boundary of the polygonal hole left by removing `p` from the
/// fan of triangles indexed by `affected`, by chaining each triangle's
/// non-`p` edge to the next one sharing an endpoint.
fn star_polygon(p: Point, affected: &HashSet<usize>, regions: &[Triangle]) -> Vec<Point> {
  let indices: Vec<usize> = affected.iter().copied().collect();
  let m = indices.len();

  let mut edges: Vec<HashSet<Point>> = indices
    .iter()
    .map(|&i| {
      let mut set: HashSet<Point> = regions[i].points().iter().copied().collect();
      set.remove(&p);
      set
    })
    .collect();

  let mut point_locations: HashMap<Point, HashSet<usize>> = HashMap::new();
  for (j, edge) in edges.iter().enumerate() {
    for v in edge {
      point_locations.entry(*v).or_default().insert(j);
    }
  }

  let last = m - 1;
  let mut boundary = Vec::with_capacity(m);
  for v in edges[last].clone() {
    if let Some(set) = point_locations.get_mut(&v) {
      set.remove(&last);
    }
    boundary.push(v);
  }

  for _ in 0..m.saturating_sub(2) {
    let v = *boundary.last().unwrap();
    let i = {
      let set = point_locations.get_mut(&v).unwrap();
      let i = *set.iter().next().unwrap();
      set.remove(&i);
      i
    };
    edges[i].remove(&v);
    let u = *edges[i].iter().next().unwrap();
    edges[i].remove(&u);
    if let Some(set) = point_locations.get_mut(&u) {
      set.remove(&i);
    }
    boundary.push(u);
  }

  boundary
}
