//! Graph store: a simple undirected graph over a growable adjacency bitset matrix.
//!
//! Vertices are the contiguous indices `0..order()`. Edge contraction appends the merged
//! vertex at the end of the index space and *retires* both endpoints: they stay addressable
//! but isolated, and every scan in this crate skips them. [`Graph::compacted`] renumbers the
//! live vertices when a dense index space is needed again.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::bitset::VertexSet;

// ============================================================================
// Errors
// ============================================================================

/// Rejected edge endpoints. A failed call never mutates the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EdgeError {
    /// The vertex index is not below the graph order.
    #[error("vertex {vertex} is out of range for a graph of order {order}")]
    IndexOutOfRange {
        /// Offending index.
        vertex: usize,
        /// Graph order at the time of the call.
        order: usize,
    },
    /// Both endpoints are the same vertex.
    #[error("self-loop at vertex {vertex}")]
    SelfLoop {
        /// The repeated endpoint.
        vertex: usize,
    },
    /// The vertex was merged into another one by an earlier contraction.
    #[error("vertex {vertex} was merged away by an earlier contraction")]
    Retired {
        /// The retired endpoint.
        vertex: usize,
    },
}

impl EdgeError {
    /// The same error with vertex indices shifted by `offset`, e.g. back to one-based input.
    /// The graph order is left as is.
    #[must_use]
    pub const fn offset_vertices(self, offset: usize) -> Self {
        match self {
            Self::IndexOutOfRange { vertex, order } => Self::IndexOutOfRange {
                vertex: vertex + offset,
                order,
            },
            Self::SelfLoop { vertex } => Self::SelfLoop {
                vertex: vertex + offset,
            },
            Self::Retired { vertex } => Self::Retired {
                vertex: vertex + offset,
            },
        }
    }
}

/// Errors from [`Graph::contract_edge`]. A failed call never mutates the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ContractError {
    /// One of the endpoints is not a valid live vertex, or both are the same.
    #[error(transparent)]
    Endpoint(#[from] EdgeError),
    /// The two vertices are not adjacent.
    #[error("({u}, {v}) is not an edge")]
    NotAnEdge {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
    },
}

// ============================================================================
// Graph
// ============================================================================

/// A simple undirected graph: symmetric adjacency, no self-loops, no parallel edges.
///
/// `edge_count` is exact at all times; adding an existing edge is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adj: Vec<VertexSet>,
    retired: VertexSet,
    edge_count: usize,
}

impl Graph {
    /// Creates an edgeless graph on `order` vertices.
    pub fn new(order: usize) -> Self {
        Self {
            adj: vec![VertexSet::new(); order],
            retired: VertexSet::new(),
            edge_count: 0,
        }
    }

    /// Creates a graph on `order` vertices from an edge list.
    ///
    /// # Errors
    /// Returns the first rejected edge.
    pub fn from_edges(order: usize, edges: &[(usize, usize)]) -> Result<Self, EdgeError> {
        let mut g = Self::new(order);
        for &(u, v) in edges {
            g.add_edge(u, v)?;
        }
        Ok(g)
    }

    /// Size of the index space, retired vertices included.
    #[inline]
    pub fn order(&self) -> usize {
        self.adj.len()
    }

    /// Number of vertices not retired by contraction.
    #[inline]
    pub fn live_vertex_count(&self) -> usize {
        self.order() - self.retired.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns whether `v` was merged away by a contraction.
    #[inline]
    pub fn is_retired(&self, v: usize) -> bool {
        self.retired.contains(v)
    }

    /// Iterates the live vertices in increasing order.
    pub fn live_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.order()).filter(move |&v| !self.retired.contains(v))
    }

    /// Returns whether the edge `(u, v)` exists. Out-of-range indices are never adjacent.
    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj.get(u).is_some_and(|row| row.contains(v))
    }

    /// Neighbour set of `v`.
    ///
    /// # Panics
    /// Panics if `v >= order()`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &VertexSet {
        &self.adj[v]
    }

    /// Degree of `v`.
    ///
    /// # Panics
    /// Panics if `v >= order()`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Vertices adjacent to both `u` and `v`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn common_neighbors(&self, u: usize, v: usize) -> VertexSet {
        self.adj[u].intersection(&self.adj[v])
    }

    /// All edges `(u, v)` with `u < v`, in lexicographic order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (u, row) in self.adj.iter().enumerate() {
            out.extend(row.iter().filter(|&v| v > u).map(|v| (u, v)));
        }
        out
    }

    /// Adds the edge `(u, v)`. Adding an edge that already exists changes nothing.
    ///
    /// # Errors
    /// Rejects out-of-range or retired endpoints and self-loops, leaving the graph untouched.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), EdgeError> {
        self.check_pair(u, v)?;
        self.link(u, v);
        Ok(())
    }

    /// Removes the edge `(u, v)`. Returns `true` if it existed.
    ///
    /// # Errors
    /// Rejects out-of-range or retired endpoints and self-loops.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, EdgeError> {
        self.check_pair(u, v)?;
        let existed = self.adj[u].remove(v);
        if existed {
            self.adj[v].remove(u);
            self.edge_count -= 1;
        }
        Ok(existed)
    }

    /// Appends an isolated vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        let v = self.adj.len();
        self.adj.push(VertexSet::new());
        v
    }

    /// Contracts the edge `(u, v)`.
    ///
    /// A new vertex `w = order()` is appended, adjacent to every neighbour of `u` or `v`
    /// other than `u` and `v` themselves. Both endpoints lose all their edges and are retired.
    /// Returns `w`.
    ///
    /// # Errors
    /// Fails without mutating the graph if an endpoint is invalid or `(u, v)` is not an edge.
    pub fn contract_edge(&mut self, u: usize, v: usize) -> Result<usize, ContractError> {
        self.check_pair(u, v)?;
        if !self.has_edge(u, v) {
            return Err(ContractError::NotAnEdge { u, v });
        }

        let mut merged = self.adj[u].clone();
        merged.union_with(&self.adj[v]);
        merged.remove(u);
        merged.remove(v);

        // The edge (u, v) appears in both degrees.
        let removed = self.degree(u) + self.degree(v) - 1;
        self.isolate(u);
        self.isolate(v);
        self.retired.insert(u);
        self.retired.insert(v);

        let w = self.add_vertex();
        for n in &merged {
            self.adj[n].insert(w);
        }
        self.edge_count = self.edge_count - removed + merged.len();
        self.adj[w] = merged;
        Ok(w)
    }

    /// Renumbers the live vertices contiguously, dropping retired indices.
    ///
    /// Returns the compacted graph and, for each new vertex, its index in `self`.
    pub fn compacted(&self) -> (Self, Vec<usize>) {
        let old: Vec<usize> = self.live_vertices().collect();
        let mut new_index = vec![usize::MAX; self.order()];
        for (i, &v) in old.iter().enumerate() {
            new_index[v] = i;
        }
        let mut out = Self::new(old.len());
        for (u, v) in self.edges() {
            out.link(new_index[u], new_index[v]);
        }
        (out, old)
    }

    /// Applies a vertex relabelling: vertex `v` becomes `perm[v]`.
    ///
    /// # Panics
    /// Panics if `perm` is not a permutation of `0..order()`.
    pub fn relabeled(&self, perm: &[usize]) -> Self {
        assert_eq!(perm.len(), self.order(), "permutation length must equal the order");
        let mut seen = VertexSet::with_capacity(perm.len());
        for &p in perm {
            assert!(p < perm.len() && seen.insert(p), "not a permutation");
        }

        let mut out = Self::new(self.order());
        for (u, v) in self.edges() {
            out.link(perm[u], perm[v]);
        }
        for v in &self.retired {
            out.retired.insert(perm[v]);
        }
        out
    }

    /// Writes the adjacency matrix as `order()` rows of `0`/`1` characters.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_matrix<W: Write>(&self, mut w: W) -> io::Result<()> {
        for row in &self.adj {
            for j in 0..self.order() {
                write!(w, "{}", u8::from(row.contains(j)))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Writes the graph in the edge-list text format (zero-based).
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_edge_list<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{} {}", self.order(), self.edge_count)?;
        for (u, v) in self.edges() {
            writeln!(w, "{u} {v}")?;
        }
        Ok(())
    }

    fn check_endpoint(&self, v: usize) -> Result<(), EdgeError> {
        if v >= self.order() {
            return Err(EdgeError::IndexOutOfRange {
                vertex: v,
                order: self.order(),
            });
        }
        if self.retired.contains(v) {
            return Err(EdgeError::Retired { vertex: v });
        }
        Ok(())
    }

    fn check_pair(&self, u: usize, v: usize) -> Result<(), EdgeError> {
        self.check_endpoint(u)?;
        self.check_endpoint(v)?;
        if u == v {
            return Err(EdgeError::SelfLoop { vertex: u });
        }
        Ok(())
    }

    /// Inserts `(u, v)` without validation; callers guarantee `u != v`, both in range and live.
    pub(crate) fn link(&mut self, u: usize, v: usize) {
        debug_assert!(u != v && u < self.order() && v < self.order());
        if self.adj[u].insert(v) {
            self.adj[v].insert(u);
            self.edge_count += 1;
        }
    }

    fn isolate(&mut self, v: usize) {
        let row = std::mem::take(&mut self.adj[v]);
        for n in &row {
            self.adj[n].remove(v);
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.adj {
            for j in 0..self.order() {
                f.write_str(if row.contains(j) { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Numbering of vertices in edge-list input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexBase {
    /// Vertices are `0..V`.
    #[default]
    Zero,
    /// Vertices are `1..=V`.
    One,
}

/// Supported text formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// `V E` followed by `E` vertex pairs.
    EdgeList(IndexBase),
    /// Square `0`/`1` adjacency matrix, one row per line.
    Matrix,
}

impl Default for InputFormat {
    fn default() -> Self {
        Self::EdgeList(IndexBase::Zero)
    }
}

/// Errors encountered while reading a graph from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphParseError {
    /// No tokens or rows were found.
    #[error("input is empty")]
    Empty,
    /// A token is not a non-negative integer.
    #[error("line {line}: expected a non-negative integer, found {token:?}")]
    InvalidToken {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// The header promised more edges than were given.
    #[error("expected {expected} edges, found {got}")]
    MissingEdges {
        /// Edge count from the header.
        expected: usize,
        /// Complete pairs actually read.
        got: usize,
    },
    /// Tokens remain after the declared edges.
    #[error("line {line}: unexpected input after the last edge")]
    TrailingInput {
        /// 1-based line number of the first extra token.
        line: usize,
    },
    /// A `0` appeared in one-based input.
    #[error("line {line}: vertex 0 is not valid in one-based input")]
    ZeroIndex {
        /// 1-based line number.
        line: usize,
    },
    /// An edge was rejected by the graph store.
    #[error("line {line}: {source}")]
    Edge {
        /// 1-based line number.
        line: usize,
        /// Rejection reason.
        #[source]
        source: EdgeError,
    },
    /// Matrix row length differs from the number of rows.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// Row index.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Matrix cell other than `0`/`1`.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// Diagonal contains a `1`.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `A[i][j] != A[j][i]`.
    #[error("matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// I/O error (file not found, etc.).
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<io::Error> for GraphParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Parses the edge-list format: vertex count `V`, edge count `E`, then `E` pairs `u v`.
///
/// Tokens are whitespace separated and may span lines freely; `#` starts a comment that
/// runs to the end of the line. Repeated pairs are accepted and stored once.
///
/// # Errors
/// Returns an error on malformed numbers, missing or extra pairs, and rejected edges.
pub fn parse_edge_list(text: &str, base: IndexBase) -> Result<Graph, GraphParseError> {
    let mut tokens = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        for token in content.split_whitespace() {
            let value = token
                .parse::<usize>()
                .map_err(|_| GraphParseError::InvalidToken {
                    line: i + 1,
                    token: token.to_string(),
                })?;
            tokens.push((i + 1, value));
        }
    }

    let mut it = tokens.into_iter();
    let Some((_, order)) = it.next() else {
        return Err(GraphParseError::Empty);
    };
    let Some((_, expected)) = it.next() else {
        return Err(GraphParseError::MissingEdges { expected: 0, got: 0 });
    };

    let offset = match base {
        IndexBase::Zero => 0,
        IndexBase::One => 1,
    };
    let to_index = |line: usize, raw: usize| {
        raw.checked_sub(offset)
            .ok_or(GraphParseError::ZeroIndex { line })
    };

    let mut graph = Graph::new(order);
    for got in 0..expected {
        let (Some((line, a)), Some((_, b))) = (it.next(), it.next()) else {
            return Err(GraphParseError::MissingEdges { expected, got });
        };
        let (u, v) = (to_index(line, a)?, to_index(line, b)?);
        graph
            .add_edge(u, v)
            .map_err(|e| GraphParseError::Edge {
                line,
                // Report vertices as they appear in the input.
                source: e.offset_vertices(offset),
            })?;
    }

    if let Some((line, _)) = it.next() {
        return Err(GraphParseError::TrailingInput { line });
    }
    Ok(graph)
}

/// Parses a `0/1` adjacency matrix.
///
/// Rules:
/// - Blank lines are ignored; whitespace between cells is ignored (`0 1 1` and `011` agree).
/// - The matrix must be square, symmetric, and have a zero diagonal.
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid characters,
/// has self-loops, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphParseError> {
    let rows: Vec<Vec<u8>> = text
        .lines()
        .map(|l| l.bytes().filter(|b| !b.is_ascii_whitespace()).collect::<Vec<u8>>())
        .filter(|r| !r.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(GraphParseError::Empty);
    }
    let n = rows.len();

    let mut cells = vec![vec![false; n]; n];
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(GraphParseError::NonSquare {
                row: i,
                expected: n,
                got: row.len(),
            });
        }
        for (j, &b) in row.iter().enumerate() {
            cells[i][j] = match b {
                b'0' => false,
                b'1' => true,
                _ => {
                    return Err(GraphParseError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    })
                }
            };
        }
    }

    for i in 0..n {
        if cells[i][i] {
            return Err(GraphParseError::SelfLoop { vertex: i });
        }
    }
    let mut graph = Graph::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if cells[i][j] != cells[j][i] {
                return Err(GraphParseError::NotSymmetric { i, j });
            }
            if cells[i][j] {
                graph.link(i, j);
            }
        }
    }
    Ok(graph)
}

/// Parses `text` in the given format.
///
/// # Errors
/// See [`parse_edge_list`] and [`parse_adjacency_matrix`].
pub fn parse_graph(text: &str, format: InputFormat) -> Result<Graph, GraphParseError> {
    match format {
        InputFormat::EdgeList(base) => parse_edge_list(text, base),
        InputFormat::Matrix => parse_adjacency_matrix(text),
    }
}

/// Reads a whole graph from `reader`.
///
/// # Errors
/// Returns an error if reading fails or the text is malformed.
pub fn read_graph<R: Read>(mut reader: R, format: InputFormat) -> Result<Graph, GraphParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_graph(&text, format)
}

/// Loads a graph from a file.
///
/// # Errors
/// Returns an error if the file cannot be read or its contents are malformed.
pub fn load_from_file(
    filename: impl AsRef<Path>,
    format: InputFormat,
) -> Result<Graph, GraphParseError> {
    let file = File::open(filename)?;
    read_graph(BufReader::new(file), format)
}

// ============================================================================
// Tests
// ============================================================================
