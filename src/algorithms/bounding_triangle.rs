//! Bounding-triangle builder (C3): minimum-area enclosing triangle for a
//! convex polygon (O'Rourke/Klee rotating-calipers algorithm), plus the
//! outward expansion that turns it into a strict outer bound for the
//! Kirkpatrick annulus.

use crate::algorithms::convex_hull::convex_hull;
use crate::data::{Line, Polygon, Triangle};
use crate::{Error, Point};

fn idx(i: isize, n: usize) -> usize {
  i.rem_euclid(n as isize) as usize
}

fn side(points: &[Point], i: isize) -> Line {
  let n = points.len();
  Line::new(points[idx(i - 1, n)], points[idx(i, n)])
}

fn dist_idx(points: &[Point], i: usize, line: &Line) -> f64 {
  line.distance(&points[i])
}

/// Point on `on` that sits twice as far from `base` as `point` does.
fn gamma(point: Point, on: &Line, base: &Line) -> Option<Point> {
  let intersection = on.intersection(base)?;
  let dist = 2.0 * base.distance(&point);
  if on.vertical {
    let d_dist = base.distance(&Point::new(intersection.x, intersection.y + 1.0));
    let mut guess = Point::new(intersection.x, intersection.y + dist / d_dist);
    if base.p1.orientation(&base.p2, &guess) != base.p1.orientation(&base.p2, &point) {
      guess = Point::new(intersection.x, intersection.y - dist / d_dist);
    }
    Some(guess)
  } else {
    let step = on.at_x(intersection.x + 1.0)?;
    let d_dist = base.distance(&step);
    let mut guess = on.at_x(intersection.x + dist / d_dist)?;
    if base.p1.orientation(&base.p2, &guess) != base.p1.orientation(&base.p2, &point) {
      guess = on.at_x(intersection.x - dist / d_dist)?;
    }
    Some(guess)
  }
}

fn high(b: usize, gamma_b: Point, points: &[Point], side_c: &Line) -> bool {
  let n = points.len();
  let prev = idx(b as isize - 1, n);
  let next = idx(b as isize + 1, n);
  if gamma_b.orientation(&points[b], &points[prev]) == gamma_b.orientation(&points[b], &points[next]) {
    return false;
  }
  if points[prev].orientation(&points[next], &gamma_b) == points[prev].orientation(&points[next], &points[b]) {
    return dist_idx(points, b, side_c) < side_c.distance(&gamma_b);
  }
  false
}

fn low(b: usize, gamma_b: Point, points: &[Point], side_c: &Line) -> bool {
  let n = points.len();
  let prev = idx(b as isize - 1, n);
  let next = idx(b as isize + 1, n);
  if gamma_b.orientation(&points[b], &points[prev]) == gamma_b.orientation(&points[b], &points[next]) {
    return false;
  }
  if points[prev].orientation(&points[next], &gamma_b) == points[prev].orientation(&points[next], &points[b]) {
    false
  } else {
    side_c.distance(&gamma_b) > dist_idx(points, b, side_c)
  }
}

fn on_left_chain(b: usize, points: &[Point], side_c: &Line) -> bool {
  let n = points.len();
  dist_idx(points, idx(b as isize + 1, n), side_c) >= dist_idx(points, b, side_c)
}

fn increment_low_high(a: usize, b: usize, c: isize, points: &[Point], side_c: &Line) -> Option<(usize, usize)> {
  let n = points.len();
  let gamma_a = gamma(points[a], &side(points, a as isize), side_c)?;
  let _ = c;
  if high(b, gamma_a, points, side_c) {
    Some((a, idx(b as isize + 1, n)))
  } else {
    Some((idx(a as isize + 1, n), b))
  }
}

fn tangency(a: usize, b: usize, points: &[Point], side_c: &Line) -> bool {
  let n = points.len();
  match gamma(points[b], &side(points, a as isize), side_c) {
    Some(gamma_b) => dist_idx(points, b, side_c) >= dist_idx(points, idx(a as isize - 1, n), side_c) && high(b, gamma_b, points, side_c),
    None => false,
  }
}

fn validate_midpoint(midpoint: Point, points: &[Point], index: isize, epsilon: f64) -> bool {
  let s = side(points, index);
  if s.vertical {
    if (midpoint.x - s.p1.x).abs() > f64::EPSILON {
      return false;
    }
    let max_y = s.p1.y.max(s.p2.y) + epsilon;
    let min_y = s.p1.y.min(s.p2.y) - epsilon;
    max_y >= midpoint.y && midpoint.y >= min_y
  } else {
    let max_x = s.p1.x.max(s.p2.x) + epsilon;
    let min_x = s.p1.x.min(s.p2.x) - epsilon;
    if !(max_x >= midpoint.x && midpoint.x >= min_x) {
      return false;
    }
    match s.at_x(midpoint.x) {
      Some(p) => p.close_to(&midpoint, epsilon),
      None => false,
    }
  }
}

fn is_valid_triangle(a: Point, b: Point, c: Point, idx_a: isize, idx_b: isize, idx_c: isize, points: &[Point], epsilon: f64) -> bool {
  let midpoint_a = Line::new(c, b).midpoint();
  let midpoint_b = Line::new(a, c).midpoint();
  let midpoint_c = Line::new(a, b).midpoint();
  validate_midpoint(midpoint_a, points, idx_a, epsilon)
    && validate_midpoint(midpoint_b, points, idx_b, epsilon)
    && validate_midpoint(midpoint_c, points, idx_c, epsilon)
}

/// Returns the minimal triangle with its side `c` flush to polygon edge
/// `c`, advancing `a`/`b` in place for the next call (the calipers only
/// move forward as `c` increases, for O(n) total work across all `n`
/// calls).
fn triangle_for_index(c: usize, a: usize, b: usize, points: &[Point], epsilon: f64) -> (Option<Triangle>, usize, usize) {
  let n = points.len();
  let mut a = a.max(c + 1) % n;
  let mut b = b.max(c + 2) % n;
  let side_c = side(points, c as isize);

  while on_left_chain(b, points, &side_c) {
    b = idx(b as isize + 1, n);
  }
  while dist_idx(points, b, &side_c) > dist_idx(points, a, &side_c) {
    match increment_low_high(a, b, c as isize, points, &side_c) {
      Some((na, nb)) => {
        a = na;
        b = nb;
      }
      None => return (None, a, b),
    }
  }
  while tangency(a, b, points, &side_c) {
    b = idx(b as isize + 1, n);
  }

  let gamma_b = match gamma(points[b], &side(points, a as isize), &side_c) {
    Some(g) => g,
    None => return (None, a, b),
  };

  let (side_a, side_b) = if low(b, gamma_b, points, &side_c) || dist_idx(points, b, &side_c) < dist_idx(points, idx(a as isize - 1, n), &side_c) {
    let side_b_line = side(points, b as isize);
    let side_a_line = side(points, a as isize);
    let (Some(p1), Some(p2)) = (side_c.intersection(&side_b_line), side_a_line.intersection(&side_b_line)) else {
      return (None, a, b);
    };
    let side_b_refined = Line::new(p1, p2);
    if dist_idx(points, idx(a as isize - 1, n), &side_c) > side_c.distance(&side_b_refined.midpoint()) {
      match gamma(points[idx(a as isize - 1, n)], &side_b_refined, &side_c) {
        Some(gamma_a) => (Line::new(gamma_a, points[idx(a as isize - 1, n)]), side_b_refined),
        None => return (None, a, b),
      }
    } else {
      (side_a_line, side_b_refined)
    }
  } else {
    let side_b_line = Line::new(gamma_b, points[b]);
    let side_a_line = Line::new(gamma_b, points[idx(a as isize - 1, n)]);
    (side_a_line, side_b_line)
  };

  let (Some(vertex_a), Some(vertex_b), Some(vertex_c)) = (
    side_c.intersection(&side_b),
    side_c.intersection(&side_a),
    side_a.intersection(&side_b),
  ) else {
    return (None, a, b);
  };

  if is_valid_triangle(vertex_a, vertex_b, vertex_c, a as isize, b as isize, c as isize, points, epsilon) {
    (Some(Triangle::new(vertex_a, vertex_b, vertex_c)), a, b)
  } else {
    (None, a, b)
  }
}

/// Minimum-area enclosing triangle for a convex polygon. If the input
/// isn't convex, its convex hull is used instead. Degenerate inputs (< 3
/// vertices) fail; exactly 3 vertices returns that triangle unchanged.
pub fn min_bounding_triangle(points_in: &[Point], epsilon_midpoint: f64) -> Result<Triangle, Error> {
  if points_in.len() < 3 {
    return Err(Error::BoundingTriangleFailure);
  }
  let points = if Polygon::new_unchecked(points_in.to_vec()).is_convex() {
    points_in.to_vec()
  } else {
    convex_hull(points_in.to_vec())?
  };
  let n = points.len();
  if n == 3 {
    return Ok(Triangle::new(points[0], points[1], points[2]));
  }

  let mut candidates = Vec::new();
  let mut a = 1usize;
  let mut b = 2usize;
  for c in 0..n {
    let (triangle, na, nb) = triangle_for_index(c, a, b, &points, epsilon_midpoint);
    a = na;
    b = nb;
    if let Some(t) = triangle {
      candidates.push(t);
    }
  }

  candidates
    .into_iter()
    .min_by(|x, y| x.area().partial_cmp(&y.area()).unwrap_or(std::cmp::Ordering::Equal))
    .ok_or(Error::BoundingTriangleFailure)
}

/// Expands a triangle outward by `factor`, pushing each vertex along the
/// reversed bisector of its two incident sides. Coordinates are rounded
/// away from zero so the expanded triangle strictly contains the
/// original even after floating-point rounding.
pub fn larger_bounding_triangle(points: &[Point], factor: f64, epsilon_midpoint: f64) -> Result<Polygon, Error> {
  let tri = min_bounding_triangle(points, epsilon_midpoint)?;
  let verts = tri.points();
  let n = verts.len();
  let expanded: Vec<Point> = (0..n)
    .map(|i| {
      let a = verts[i];
      let b = verts[(i + n - 1) % n];
      let c = verts[(i + 1) % n];
      bisect_outward(a, b, c, factor)
    })
    .collect();
  Polygon::new(expanded)
}

fn bisect_outward(a: Point, b: Point, c: Point, factor: f64) -> Point {
  let v_b = normalize(b.x - a.x, b.y - a.y);
  let v_c = normalize(c.x - a.x, c.y - a.y);
  let bisector = (-(v_b.0 + v_c.0) / 2.0, -(v_b.1 + v_c.1) / 2.0);
  let x = a.x + factor * bisector.0;
  let y = a.y + factor * bisector.1;
  Point::new(round_away_from_zero(x), round_away_from_zero(y))
}

fn normalize(x: f64, y: f64) -> (f64, f64) {
  let mag = (x * x + y * y).sqrt();
  (x / mag, y / mag)
}

fn round_away_from_zero(v: f64) -> f64 {
  if v < 0.0 {
    v.floor()
  } else {
    v.ceil()
  }
}
