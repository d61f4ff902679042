//! Funnel algorithm (C7): shortest path through a corridor of triangles
//! between a start and end point, given the corridor as an ordered sequence
//! of triangles sharing consecutive portal edges.
//!
//! The funnel keeps a committed prefix (`tail`) plus two candidate chains
//! (`left`, `right`) of vertices not yet known to be on the shortest path.
//! Each new portal either widens a chain, narrows it, or collapses it onto
//! the apex (`tail`'s last vertex), committing everything popped in the
//! process to `tail`.

use std::collections::VecDeque;

use crate::algorithms::adjacency::AdjacencyGraph;
use crate::data::Triangle;
use crate::orientation::ccw;
use crate::{Error, Point};

/// Extracts the ordered portal edges between consecutive triangles of a
/// corridor. The corridor must be a path in `graph`'s dual, as produced by
/// `AdjacencyGraph::bfs`.
fn portals(corridor: &[Triangle], graph: &AdjacencyGraph) -> Result<Vec<(Point, Point)>, Error> {
  let mut out = Vec::with_capacity(corridor.len().saturating_sub(1));
  for w in corridor.windows(2) {
    match graph.shared_edge(&w[0], &w[1]) {
      Some(edge) => out.push(edge),
      None => return Err(Error::DegenerateCorridor("consecutive corridor triangles do not share an edge".into())),
    }
  }
  Ok(out)
}

/// Orients the first portal so `left` is on the counter-clockwise side of
/// `start -> edge`.
fn orient_first_portal(edge: (Point, Point), start: &Point) -> (Point, Point) {
  let (p, q) = edge;
  if ccw(&p, start, &q) {
    (p, q)
  } else {
    (q, p)
  }
}

/// Finds the bound point (shared with the previous portal) and free point
/// of the current portal.
fn split_portal(edge: (Point, Point), prev: (Point, Point)) -> Result<(Point, Point), Error> {
  if edge.0 == prev.0 || edge.0 == prev.1 {
    Ok((edge.0, edge.1))
  } else if edge.1 == prev.0 || edge.1 == prev.1 {
    Ok((edge.1, edge.0))
  } else {
    Err(Error::DegenerateCorridor("consecutive portals share no vertex".into()))
  }
}

fn drain_left(left: &mut VecDeque<Point>, tail: &mut VecDeque<Point>, end: &Point) {
  while let Some(v) = left.pop_front() {
    if ccw(tail.back().unwrap(), &v, end) {
      tail.push_back(v);
    }
  }
}

fn drain_right(right: &mut VecDeque<Point>, tail: &mut VecDeque<Point>, end: &Point) {
  while let Some(v) = right.pop_front() {
    if ccw(end, &v, tail.back().unwrap()) {
      tail.push_back(v);
    }
  }
}

/// Shortest path from `start` to `end` through the triangle `corridor`
/// (as produced by `AdjacencyGraph::bfs`), taut against the corridor's
/// shared edges (portals).
pub fn funnel(corridor: &[Triangle], start: Point, end: Point, graph: &AdjacencyGraph) -> Result<Vec<Point>, Error> {
  if corridor.len() <= 1 {
    return Ok(vec![start, end]);
  }

  let edges = portals(corridor, graph)?;
  let (pl, pr) = orient_first_portal(edges[0], &start);

  let mut tail: VecDeque<Point> = VecDeque::from([start]);
  let mut left: VecDeque<Point> = VecDeque::from([pl]);
  let mut right: VecDeque<Point> = VecDeque::from([pr]);
  let mut prev_edge = edges[0];

  for &edge in &edges[1..] {
    let (bound_point, free_point) = split_portal(edge, prev_edge)?;
    let apex = *tail.back().unwrap();

    if !left.is_empty() && bound_point == *left.back().unwrap() {
      // Case A: the new portal extends the left chain; `free_point` is a
      // candidate for the right chain.
      if bound_point == apex {
        right.clear();
      } else if right.front() == Some(&apex) {
        right.pop_front();
      } else if !ccw(left.front().unwrap(), &apex, &free_point) {
        // Crossing: the free point has passed beyond the left chain's
        // first vertex, so that vertex (and everything before it that
        // also crosses) becomes part of the committed path.
        let mut last_popped = None;
        while !left.is_empty() && !ccw(left.front().unwrap(), tail.back().unwrap(), &free_point) {
          last_popped = left.pop_front();
          tail.push_back(*last_popped.as_ref().unwrap());
        }
        if left.is_empty() {
          if let Some(v) = last_popped {
            left.push_back(v);
          }
        }
        right.clear();
      } else if right.is_empty() || !ccw(&apex, right.back().unwrap(), &free_point) {
        // Widening: the funnel only gets bigger, nothing to trim.
      } else {
        // Narrowing: pop anything the free point has made redundant.
        while !right.is_empty() && ccw(&apex, right.back().unwrap(), &free_point) {
          right.pop_back();
        }
      }
      right.push_back(free_point);
    } else if !right.is_empty() && bound_point == *right.back().unwrap() {
      // Case B: mirror of Case A with left/right swapped.
      if bound_point == apex {
        left.clear();
      } else if left.front() == Some(&apex) {
        left.pop_front();
      } else if !ccw(&free_point, tail.back().unwrap(), right.front().unwrap()) {
        let mut last_popped = None;
        while !right.is_empty() && !ccw(&free_point, tail.back().unwrap(), right.front().unwrap()) {
          last_popped = right.pop_front();
          tail.push_back(*last_popped.as_ref().unwrap());
        }
        if right.is_empty() {
          if let Some(v) = last_popped {
            right.push_back(v);
          }
        }
        left.clear();
      } else if left.is_empty() || ccw(&apex, left.back().unwrap(), &free_point) {
        // Widening.
      } else {
        while !left.is_empty() && !ccw(&apex, left.back().unwrap(), &free_point) {
          left.pop_back();
        }
      }
      left.push_back(free_point);
    } else {
      return Err(Error::DegenerateCorridor("bound point matches neither chain's tail".into()));
    }

    prev_edge = edge;
  }

  let right_drains_first = right.front().map_or(false, |rf| tail.contains(rf));
  if right_drains_first {
    drain_right(&mut right, &mut tail, &end);
    drain_left(&mut left, &mut tail, &end);
  } else {
    drain_left(&mut left, &mut tail, &end);
    drain_right(&mut right, &mut tail, &end);
  }
  tail.push_back(end);

  Ok(tail.into_iter().collect())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Polygon;

  #[test]
  fn single_triangle_corridor_is_a_straight_line() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    let c = Point::new(5.0, 10.0);
    let t = Triangle::new(a, b, c);
    let graph = AdjacencyGraph::build(&[t]).unwrap();
    let path = funnel(&[t], Point::new(2.0, 1.0), Point::new(8.0, 1.0), &graph).unwrap();
    assert_eq!(path, vec![Point::new(2.0, 1.0), Point::new(8.0, 1.0)]);
  }

  #[test]
  fn bends_around_a_reflex_corner() {
    // An L-shaped corridor: the straight line from start to end would cut
    // through the missing notch at (4,4), so the funnel must route
    // through that reflex vertex instead.
    let l = Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(10.0, 0.0),
      Point::new(10.0, 10.0),
      Point::new(4.0, 10.0),
      Point::new(4.0, 4.0),
      Point::new(0.0, 4.0),
    ])
    .unwrap();
    let triangles = l.triangulation().unwrap().to_vec();
    let graph = AdjacencyGraph::build(&triangles).unwrap();

    let start = Point::new(1.0, 1.0);
    let end = Point::new(9.0, 9.0);
    let source = triangles.iter().find(|t| t.contains_point(&start)).copied().unwrap();
    let target = triangles.iter().find(|t| t.contains_point(&end)).copied().unwrap();
    let corridor = graph.bfs(source, target).unwrap();
    let path = funnel(&corridor, start, end, &graph).unwrap();

    assert_eq!(*path.first().unwrap(), start);
    assert_eq!(*path.last().unwrap(), end);
    // The straight segment would pass through the notch; the taut path
    // must bend, so it can't be just the two endpoints.
    assert!(path.len() > 2);
    assert!(path.contains(&Point::new(4.0, 4.0)));
  }
}
