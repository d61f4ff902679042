//! Triangle-adjacency dual graph (C6): two triangles are adjacent iff they
//! share an edge. Built once per region's triangulation and reused for every
//! shortest-path query against that region.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::data::{Segment, Triangle};
use crate::{Error, Point};

struct TriangleInfo {
  edges: [(Point, Point); 3],
  neighbors: HashSet<Triangle>,
}

struct EdgeRecord {
  triangles: Vec<Triangle>,
}

/// Dual graph over a single region's triangulation, supporting adjacency
/// queries and breadth-first corridor search.
pub struct AdjacencyGraph {
  triangles: HashMap<Triangle, TriangleInfo>,
  edges: HashMap<(Point, Point), EdgeRecord>,
}

impl AdjacencyGraph {
  /// Builds the dual graph. Fails if any edge is shared by more than two
  /// triangles, which would mean the input isn't a planar triangulation.
  pub fn build(triangles: &[Triangle]) -> Result<AdjacencyGraph, Error> {
    let mut edges: HashMap<(Point, Point), EdgeRecord> = HashMap::new();
    let mut infos: HashMap<Triangle, TriangleInfo> = HashMap::new();

    for &t in triangles {
      let pts = t.points();
      let mut own_edges = [(pts[0], pts[1]); 3];
      let mut neighbors: HashSet<Triangle> = HashSet::new();

      for i in 0..3 {
        let seg = Segment::new(pts[i], pts[(i + 1) % 3]);
        let fp = seg.fingerprint();
        own_edges[i] = fp;

        let rec = edges.entry(fp).or_insert_with(|| EdgeRecord { triangles: Vec::new() });
        if rec.triangles.len() >= 2 {
          return Err(Error::EdgeOverfull(format!("edge ({:?}, {:?}) touches more than two triangles", fp.0, fp.1)));
        }
        if let Some(&other) = rec.triangles.first() {
          neighbors.insert(other);
          if let Some(other_info) = infos.get_mut(&other) {
            other_info.neighbors.insert(t);
          }
        }
        rec.triangles.push(t);
      }

      infos.insert(
        t,
        TriangleInfo {
          edges: own_edges,
          neighbors,
        },
      );
    }

    Ok(AdjacencyGraph { triangles: infos, edges })
  }

  pub fn contains(&self, t: &Triangle) -> bool {
    self.triangles.contains_key(t)
  }

  pub fn neighbors(&self, t: &Triangle) -> impl Iterator<Item = &Triangle> {
    self.triangles.get(t).into_iter().flat_map(|info| info.neighbors.iter())
  }

  /// The shared edge between two adjacent triangles, if any.
  pub fn shared_edge(&self, a: &Triangle, b: &Triangle) -> Option<(Point, Point)> {
    let ia = self.triangles.get(a)?;
    let ib = self.triangles.get(b)?;
    ia.edges.iter().find(|e| ib.edges.contains(e)).copied()
  }

  /// Every edge in the region's triangulation, with the triangle(s) that
  /// own it. Interior edges own exactly two; boundary edges own exactly
  /// one.
  pub fn edge_owners(&self) -> impl Iterator<Item = (&(Point, Point), &[Triangle])> {
    self.edges.iter().map(|(fp, rec)| (fp, rec.triangles.as_slice()))
  }

  /// Breadth-first search for a shortest (fewest-triangles) corridor from
  /// `source` to `target`. Returns `None` if they're not connected.
  pub fn bfs(&self, source: Triangle, target: Triangle) -> Option<Vec<Triangle>> {
    if !self.triangles.contains_key(&source) || !self.triangles.contains_key(&target) {
      return None;
    }
    if source == target {
      return Some(vec![source]);
    }

    let mut visited: HashSet<Triangle> = HashSet::new();
    visited.insert(source);
    let mut queue: VecDeque<Triangle> = VecDeque::new();
    queue.push_back(source);
    let mut parent: HashMap<Triangle, Triangle> = HashMap::new();

    while let Some(cur) = queue.pop_front() {
      let info = self.triangles.get(&cur)?;
      for &next in &info.neighbors {
        if !visited.insert(next) {
          continue;
        }
        parent.insert(next, cur);
        if next == target {
          let mut path = vec![next];
          let mut node = next;
          while let Some(&p) = parent.get(&node) {
            path.push(p);
            node = p;
          }
          path.reverse();
          return Some(path);
        }
        queue.push_back(next);
      }
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn square_triangles() -> Vec<Triangle> {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    let c = Point::new(10.0, 10.0);
    let d = Point::new(0.0, 10.0);
    vec![Triangle::new(a, b, c), Triangle::new(a, c, d)]
  }

  #[test]
  fn shared_edge_has_two_owners_boundary_edges_have_one() {
    let graph = AdjacencyGraph::build(&square_triangles()).unwrap();
    let mut shared = 0;
    let mut boundary = 0;
    for (_, owners) in graph.edge_owners() {
      match owners.len() {
        2 => shared += 1,
        1 => boundary += 1,
        n => panic!("edge with {n} owners"),
      }
    }
    assert_eq!(shared, 1);
    assert_eq!(boundary, 4);
  }

  #[test]
  fn bfs_finds_the_adjacent_triangle() {
    let tris = square_triangles();
    let graph = AdjacencyGraph::build(&tris).unwrap();
    let path = graph.bfs(tris[0], tris[1]).unwrap();
    assert_eq!(path.len(), 2);
  }

  #[test]
  fn overfull_edge_is_rejected() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(0.0, 1.0);
    let d = Point::new(0.5, -1.0);
    let e = Point::new(0.5, 2.0);
    let tris = vec![Triangle::new(a, b, c), Triangle::new(a, b, d), Triangle::new(a, b, e)];
    assert!(AdjacencyGraph::build(&tris).is_err());
  }
}
