use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{Error, Result};

/// Dense vertex index. Assigned in sorted label order, so it is stable across
/// runs on the same input.
pub type VertexId = usize;

/// An undirected edge in canonical form: `lo < hi`.
///
/// Since ids follow sorted label order, comparing ids is the same as comparing
/// labels, so `(lo, hi)` always names the smaller label first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub lo: VertexId,
    pub hi: VertexId,
}

impl Edge {
    /// Canonicalize an endpoint pair. `(a, b)` and `(b, a)` map to the same edge.
    pub fn canonical(a: VertexId, b: VertexId) -> Self {
        if a < b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.lo, self.hi)
    }

    /// Resolve both endpoints to their labels.
    pub fn labels<'g>(&self, graph: &'g Graph) -> (&'g str, &'g str) {
        (graph.label(self.lo), graph.label(self.hi))
    }
}

/// Mutable adjacency map used while reading input.
///
/// Keyed by label so that vertices can be mentioned in any order; the dense
/// index is only assigned by [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex with no edges. A no-op if it already exists.
    pub fn add_vertex(&mut self, label: &str) {
        if !self.adjacency.contains_key(label) {
            self.adjacency.insert(label.to_string(), BTreeSet::new());
        }
    }

    /// Add an undirected edge. Both endpoints are created on first mention and
    /// repeated edges collapse. Self-loops only register the vertex.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        if a == b {
            tracing::debug!(vertex = a, "ignoring self-loop");
            self.add_vertex(a);
            return;
        }
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Parse one `SOURCE: N1 N2 ...` line. `line_no` is 1-based and only used
    /// for error reporting.
    pub fn add_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim();
        // Labels may contain ':' themselves; only ": " (or a trailing ':'
        // with no neighbors) separates the source from its neighbors.
        let (source, neighbors) = line
            .split_once(": ")
            .or_else(|| line.strip_suffix(':').map(|source| (source, "")))
            .ok_or_else(|| Error::MissingSeparator {
                line: line_no,
                content: line.to_string(),
            })?;

        let source = source.trim();
        if source.is_empty() {
            return Err(Error::EmptyLabel { line: line_no });
        }

        self.add_vertex(source);
        for neighbor in neighbors.split_whitespace() {
            self.add_edge(source, neighbor);
        }
        Ok(())
    }

    /// Freeze into an immutable [`Graph`], assigning ids in sorted label order.
    pub fn build(self) -> Graph {
        let labels: Vec<String> = self.adjacency.keys().cloned().collect();
        let index: HashMap<String, VertexId> = labels
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();

        // BTreeSet iteration is sorted by label, which is sorted by id.
        let neighbors: Vec<Vec<VertexId>> = self
            .adjacency
            .values()
            .map(|set| set.iter().map(|label| index[label.as_str()]).collect())
            .collect();

        Graph {
            labels,
            index,
            neighbors,
        }
    }
}

/// Immutable undirected graph with a deterministic dense vertex index.
///
/// Neighbor lists are symmetric: `b` is in `neighbors(a)` iff `a` is in
/// `neighbors(b)`. Each list is sorted ascending.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, VertexId>,
    neighbors: Vec<Vec<VertexId>>,
}

impl Graph {
    /// Parse a whole adjacency-list document. Blank lines are skipped.
    pub fn parse(input: &str) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        for (i, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            builder.add_line(i + 1, line)?;
        }

        let graph = builder.build();
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "graph loaded"
        );
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Label of a vertex. Panics if `id` is out of range.
    pub fn label(&self, id: VertexId) -> &str {
        &self.labels[id]
    }

    pub fn vertex(&self, label: &str) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.neighbors.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        0..self.labels.len()
    }

    /// Every undirected edge exactly once, in ascending canonical order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(a, list)| {
            list.iter()
                .filter(move |&&b| a < b)
                .map(move |&b| Edge::canonical(a, b))
        })
    }
}
