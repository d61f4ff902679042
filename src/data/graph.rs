use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Directed graph with root tracking: a node with no incoming edges is a
/// root. `connect(u, v)` removes `v` from the root set, since it now has
/// at least one predecessor.
#[derive(Debug, Clone)]
pub struct DirectedGraph<T: Eq + Hash + Clone> {
  edges: HashMap<T, HashSet<T>>,
  roots: HashSet<T>,
}

impl<T: Eq + Hash + Clone> Default for DirectedGraph<T> {
  fn default() -> Self {
    DirectedGraph {
      edges: HashMap::new(),
      roots: HashSet::new(),
    }
  }
}

impl<T: Eq + Hash + Clone> DirectedGraph<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, v: &T) -> bool {
    self.edges.contains_key(v)
  }

  pub fn add_node(&mut self, v: T) {
    if !self.edges.contains_key(&v) {
      self.edges.insert(v.clone(), HashSet::new());
      self.roots.insert(v);
    }
  }

  /// Connects the two existing nodes `u -> v`.
  pub fn connect(&mut self, u: &T, v: &T) {
    self.edges.get_mut(u).unwrap().insert(v.clone());
    self.roots.remove(v);
  }

  pub fn children(&self, v: &T) -> impl Iterator<Item = &T> {
    self.edges.get(v).into_iter().flatten()
  }

  pub fn roots(&self) -> impl Iterator<Item = &T> {
    self.roots.iter()
  }

  pub fn node_count(&self) -> usize {
    self.edges.len()
  }

  /// Kahn-style topological peel from the current roots. Returns `true`
  /// iff every edge was eventually removed, i.e. the graph has no cycles.
  pub fn is_acyclic(&self) -> bool {
    let mut remaining: HashMap<&T, HashSet<&T>> = self
      .edges
      .iter()
      .map(|(k, vs)| (k, vs.iter().collect()))
      .collect();
    let mut queue: VecDeque<&T> = self.roots.iter().collect();
    while let Some(n) = queue.pop_front() {
      let targets: Vec<&T> = remaining.get(n).map(|s| s.iter().copied().collect()).unwrap_or_default();
      for m in targets {
        if let Some(set) = remaining.get_mut(n) {
          set.remove(m);
        }
        let still_has_parent = remaining.values().any(|s| s.contains(m));
        if !still_has_parent {
          queue.push_back(m);
        }
      }
    }
    remaining.values().all(|s| s.is_empty())
  }
}

/// Undirected graph built on top of the directed adjacency map: `connect`
/// adds the edge symmetrically.
#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph<T: Eq + Hash + Clone> {
  inner: DirectedGraph<T>,
}

impl<T: Eq + Hash + Clone> UndirectedGraph<T> {
  pub fn new() -> Self {
    UndirectedGraph {
      inner: DirectedGraph::new(),
    }
  }

  pub fn contains(&self, v: &T) -> bool {
    self.inner.contains(v)
  }

  pub fn add_node(&mut self, v: T) {
    self.inner.add_node(v)
  }

  pub fn connect(&mut self, u: &T, v: &T) {
    self.inner.connect(u, v);
    self.inner.connect(v, u);
  }

  pub fn neighbors(&self, v: &T) -> impl Iterator<Item = &T> {
    self.inner.children(v)
  }

  pub fn degree(&self, v: &T) -> usize {
    self.inner.edges.get(v).map(|s| s.len()).unwrap_or(0)
  }

  /// Returns an independent set of nodes whose degree is `<= k`,
  /// excluding anything in `avoid`. There's no uniqueness guarantee: the
  /// result depends on iteration order over the candidate `HashSet`, by
  /// design (see Design Notes on independent-set extraction).
  pub fn independent_set(&self, k: usize, avoid: &HashSet<T>) -> HashSet<T> {
    let mut candidates: HashSet<T> = self
      .inner
      .edges
      .iter()
      .filter(|(_, neighbors)| neighbors.len() <= k)
      .map(|(v, _)| v.clone())
      .collect();
    for a in avoid {
      candidates.remove(a);
    }

    let mut result = HashSet::new();
    while let Some(v) = candidates.iter().next().cloned() {
      candidates.remove(&v);
      if let Some(neighbors) = self.inner.edges.get(&v) {
        for n in neighbors {
          candidates.remove(n);
        }
      }
      result.insert(v);
    }
    result
  }
}
