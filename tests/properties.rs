//! Property-based tests for the invariants in the testable-properties
//! section: location correctness (1, 2), triangulation edge-sharing (3),
//! funnel output shape and taut-ness (4, 5, 6), and Kirkpatrick DAG
//! structure (7).

use proptest::prelude::*;

use polyloc::algorithms::adjacency::AdjacencyGraph;
use polyloc::algorithms::funnel::funnel;
use polyloc::algorithms::kirkpatrick::{Located, SingleRegionLocator};
use polyloc::data::Polygon;
use polyloc::{ccw, Config, Point};

fn square() -> Polygon {
  Polygon::new(vec![
    Point::new(0.0, 0.0),
    Point::new(10.0, 0.0),
    Point::new(10.0, 10.0),
    Point::new(0.0, 10.0),
  ])
  .unwrap()
}

fn l_shape() -> Polygon {
  Polygon::new(vec![
    Point::new(0.0, 0.0),
    Point::new(10.0, 0.0),
    Point::new(10.0, 4.0),
    Point::new(4.0, 4.0),
    Point::new(4.0, 10.0),
    Point::new(0.0, 10.0),
  ])
  .unwrap()
}

proptest! {
  /// Invariant 1: a point generated strictly inside a convex region locates
  /// to one of that region's own triangles, which actually contains it.
  #[test]
  fn inside_points_locate_to_a_real_triangle(x in 0.5f64..9.5, y in 0.5f64..9.5) {
    let region = square();
    let triangles = region.triangulation().unwrap().to_vec();
    let locator = SingleRegionLocator::build(&triangles, &region, &Config::default()).unwrap();
    let p = Point::new(x, y);

    match locator.locate(&p) {
      Located::Inside(t) => {
        prop_assert!(t.contains_point(&p));
        prop_assert!(triangles.contains(&t));
      }
      Located::Outside => prop_assert!(false, "point inside the square located as outside"),
    }
  }

  /// Invariant 2: a point generated strictly outside a region's bounds
  /// never locates inside it.
  #[test]
  fn outside_points_never_locate_inside(x in 20.0f64..30.0, y in 20.0f64..30.0) {
    let region = square();
    let triangles = region.triangulation().unwrap().to_vec();
    let locator = SingleRegionLocator::build(&triangles, &region, &Config::default()).unwrap();
    prop_assert_eq!(locator.locate(&Point::new(x, y)), Located::Outside);
  }
}

#[test]
fn invariant_3_every_edge_has_one_or_two_owners() {
  let region = l_shape();
  let triangles = region.triangulation().unwrap().to_vec();
  let graph = AdjacencyGraph::build(&triangles).unwrap();
  for (_, owners) in graph.edge_owners() {
    assert!(owners.len() == 1 || owners.len() == 2);
  }
}

#[test]
fn invariant_4_funnel_path_endpoints_and_segments_stay_in_the_corridor() {
  let region = l_shape();
  let triangles = region.triangulation().unwrap().to_vec();
  let graph = AdjacencyGraph::build(&triangles).unwrap();

  let start = Point::new(1.0, 1.0);
  let end = Point::new(1.0, 9.0);
  let source = triangles.iter().find(|t| t.contains_point(&start)).copied().unwrap();
  let target = triangles.iter().find(|t| t.contains_point(&end)).copied().unwrap();
  let corridor = graph.bfs(source, target).unwrap();
  let path = funnel(&corridor, start, end, &graph).unwrap();

  assert_eq!(*path.first().unwrap(), start);
  assert_eq!(*path.last().unwrap(), end);

  for w in path.windows(2) {
    let midpoint = Point::new((w[0].x + w[1].x) / 2.0, (w[0].y + w[1].y) / 2.0);
    assert!(corridor.iter().any(|t| t.contains_point(&midpoint)));
  }
}

#[test]
fn invariant_5_funnel_is_no_longer_than_the_portal_midpoint_polyline() {
  let region = l_shape();
  let triangles = region.triangulation().unwrap().to_vec();
  let graph = AdjacencyGraph::build(&triangles).unwrap();

  let start = Point::new(1.0, 1.0);
  let end = Point::new(1.0, 9.0);
  let source = triangles.iter().find(|t| t.contains_point(&start)).copied().unwrap();
  let target = triangles.iter().find(|t| t.contains_point(&end)).copied().unwrap();
  let corridor = graph.bfs(source, target).unwrap();
  let path = funnel(&corridor, start, end, &graph).unwrap();

  let mut reference = vec![start];
  for w in corridor.windows(2) {
    let (a, b) = graph.shared_edge(&w[0], &w[1]).unwrap();
    reference.push(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0));
  }
  reference.push(end);

  let path_len: f64 = path.windows(2).map(|w| w[0].dist(&w[1])).sum();
  let reference_len: f64 = reference.windows(2).map(|w| w[0].dist(&w[1])).sum();
  assert!(path_len <= reference_len + 1e-9);
}

#[test]
fn invariant_6_funnel_is_deterministic() {
  let region = l_shape();
  let triangles = region.triangulation().unwrap().to_vec();
  let graph = AdjacencyGraph::build(&triangles).unwrap();

  let start = Point::new(1.0, 1.0);
  let end = Point::new(1.0, 9.0);
  let source = triangles.iter().find(|t| t.contains_point(&start)).copied().unwrap();
  let target = triangles.iter().find(|t| t.contains_point(&end)).copied().unwrap();
  let corridor = graph.bfs(source, target).unwrap();

  let first = funnel(&corridor, start, end, &graph).unwrap();
  let second = funnel(&corridor, start, end, &graph).unwrap();
  assert_eq!(first, second);
}

#[test]
fn invariant_7_dag_is_acyclic_with_a_single_root() {
  for region in [square(), l_shape()] {
    let triangles = region.triangulation().unwrap().to_vec();
    let locator = SingleRegionLocator::build(&triangles, &region, &Config::default()).unwrap();
    assert!(locator.is_well_formed());
  }
}

#[test]
fn ccw_free_function_is_reexported_and_consistent_with_turns() {
  let a = Point::new(0.0, 0.0);
  let b = Point::new(1.0, 0.0);
  let c = Point::new(0.0, 1.0);
  assert!(ccw(&a, &b, &c));
}
