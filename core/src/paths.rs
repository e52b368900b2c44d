use std::collections::HashSet;
use std::ops::Add;

use crate::graph::{Edge, Graph, VertexId};

/// Hop count between two vertices, or `Unreached` when no path exists.
///
/// `Hops` orders before `Unreached`, so relaxation can compare with `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distance {
    Hops(u32),
    Unreached,
}

impl Distance {
    pub fn hops(self) -> Option<u32> {
        match self {
            Distance::Hops(h) => Some(h),
            Distance::Unreached => None,
        }
    }

    pub fn is_reached(self) -> bool {
        matches!(self, Distance::Hops(_))
    }
}

impl Add for Distance {
    type Output = Distance;

    /// Unreached absorbs. Overflow is impossible for any graph that fits in
    /// memory, but saturates to `Unreached` rather than wrapping.
    fn add(self, rhs: Distance) -> Distance {
        match (self, rhs) {
            (Distance::Hops(a), Distance::Hops(b)) => {
                a.checked_add(b).map(Distance::Hops).unwrap_or(Distance::Unreached)
            }
            _ => Distance::Unreached,
        }
    }
}

/// All-pairs shortest paths with predecessor tracking (Floyd–Warshall).
///
/// Both matrices are dense `n × n`, row-major by source.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    n: usize,
    distances: Vec<Distance>,
    predecessors: Vec<Option<VertexId>>,
}

impl ShortestPaths {
    /// Run Floyd–Warshall over the whole graph.
    pub fn compute(graph: &Graph) -> Self {
        Self::compute_without(graph, &HashSet::new())
    }

    /// Run Floyd–Warshall as if every edge in `removed` were absent.
    ///
    /// Ties keep the first path found: only strict improvements are taken.
    pub fn compute_without(graph: &Graph, removed: &HashSet<Edge>) -> Self {
        let n = graph.vertex_count();
        let mut sp = Self {
            n,
            distances: vec![Distance::Unreached; n * n],
            predecessors: vec![None; n * n],
        };

        for v in graph.vertices() {
            sp.distances[v * n + v] = Distance::Hops(0);
            sp.predecessors[v * n + v] = Some(v);
        }

        for edge in graph.edges().filter(|e| !removed.contains(e)) {
            let (a, b) = edge.endpoints();
            sp.distances[a * n + b] = Distance::Hops(1);
            sp.distances[b * n + a] = Distance::Hops(1);
            sp.predecessors[a * n + b] = Some(a);
            sp.predecessors[b * n + a] = Some(b);
        }

        for k in 0..n {
            for i in 0..n {
                let to_k = sp.distances[i * n + k];
                if !to_k.is_reached() {
                    continue;
                }
                for j in 0..n {
                    let through = to_k + sp.distances[k * n + j];
                    if through < sp.distances[i * n + j] {
                        sp.distances[i * n + j] = through;
                        sp.distances[j * n + i] = through;
                        // Row k is never rewritten during round k, so both
                        // pointers are still the ones for the k-rooted sub-paths.
                        sp.predecessors[i * n + j] = sp.predecessors[k * n + j];
                        sp.predecessors[j * n + i] = sp.predecessors[k * n + i];
                    }
                }
            }
        }

        tracing::debug!(vertices = n, removed = removed.len(), "shortest paths computed");
        sp
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn distance(&self, source: VertexId, destination: VertexId) -> Distance {
        self.distances[source * self.n + destination]
    }

    /// The vertex immediately before `destination` on the chosen shortest
    /// path from `source`. `None` when `destination` is unreached; the
    /// vertex itself when `source == destination`.
    pub fn predecessor_toward_destination(
        &self,
        source: VertexId,
        destination: VertexId,
    ) -> Option<VertexId> {
        self.predecessors[source * self.n + destination]
    }

    /// Reconstruct the chosen shortest path, source and destination inclusive.
    ///
    /// Returns `None` for unreached pairs instead of walking a missing chain.
    pub fn path(&self, source: VertexId, destination: VertexId) -> Option<Vec<VertexId>> {
        let hops = self.distance(source, destination).hops()? as usize;

        let mut path = Vec::with_capacity(hops + 1);
        let mut current = destination;
        path.push(current);
        while current != source {
            current = self.predecessor_toward_destination(source, current)?;
            path.push(current);
        }

        path.reverse();
        debug_assert_eq!(path.len(), hops + 1);
        Some(path)
    }
}
