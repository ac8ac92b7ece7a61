use serde::{Deserialize, Serialize};

/// One directed incidence of an edge at one of its endpoints, encoded as
/// `edge_id << 1 | side` with side 0 = source end, 1 = target end.
///
/// The two ends of the same edge are twins: `twin(a) == a ^ 1`. Rotation
/// lists store these entries in clockwise order around each vertex.
pub type Adj = u32;

#[inline]
pub fn adj(edge: u32, side: u8) -> Adj {
    (edge << 1) | side as u32
}

#[inline]
pub fn adj_edge(a: Adj) -> u32 {
    a >> 1
}

#[inline]
pub fn adj_is_source(a: Adj) -> bool {
    a & 1 == 0
}

#[inline]
pub fn twin(a: Adj) -> Adj {
    a ^ 1
}

/// What a working vertex stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Copy of an original vertex.
    Original,
    /// Crossing dummy created by embedded path insertion.
    Crossing,
    /// Boundary dummy created by splitting a cluster-crossing edge.
    Boundary,
    /// Artifact of a degree-constraint vertex expansion.
    Expansion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    Normal,
    /// Synthetic edge on a cluster boundary cycle.
    ClusterBoundary,
}

/// A vertex of the working (planarized) graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkNode {
    pub kind: NodeKind,
    /// Original vertex this one copies, if any.
    pub orig: Option<u32>,
    /// Working vertex this one was expanded from, if any.
    pub expanded_from: Option<u32>,
}

/// An edge of the working (planarized) graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkEdge {
    pub source: u32,
    pub target: u32,
    pub kind: EdgeKind,
    /// Original edge this one is a copy (or split fragment) of, if any.
    pub orig: Option<u32>,
}

/// The original input graph together with its combinatorial embedding:
/// a clockwise cyclic rotation of edge-ends at every vertex.
///
/// Immutable while the planarization core runs; ids are indices.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    pub(crate) edges: Vec<(u32, u32)>, // (source, target)
    pub(crate) rot: Vec<Vec<Adj>>,     // per vertex, clockwise
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_nodes(&self) -> usize {
        self.rot.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn add_node(&mut self) -> u32 {
        let id = self.rot.len() as u32;
        self.rot.push(Vec::new());
        id
    }

    /// Add an edge from `a` to `b`; the new ends go to the back of both
    /// rotation lists. Returns `None` if either vertex does not exist.
    pub fn add_edge(&mut self, a: u32, b: u32) -> Option<u32> {
        if a as usize >= self.rot.len() || b as usize >= self.rot.len() || a == b {
            return None;
        }
        let id = self.edges.len() as u32;
        self.edges.push((a, b));
        self.rot[a as usize].push(adj(id, 0));
        self.rot[b as usize].push(adj(id, 1));
        Some(id)
    }

    /// Replace the rotation at `v`. `order` must be a permutation of the
    /// ends currently incident to `v`; returns false (and changes nothing)
    /// otherwise. Lets tests pin down a specific embedding.
    pub fn set_rotation(&mut self, v: u32, order: Vec<Adj>) -> bool {
        let Some(cur) = self.rot.get(v as usize) else {
            return false;
        };
        if order.len() != cur.len() {
            return false;
        }
        let mut sorted_new = order.clone();
        sorted_new.sort_unstable();
        let mut sorted_cur = cur.clone();
        sorted_cur.sort_unstable();
        if sorted_new != sorted_cur {
            return false;
        }
        self.rot[v as usize] = order;
        true
    }

    pub fn edge_ends(&self, e: u32) -> (u32, u32) {
        self.edges[e as usize]
    }

    /// Vertex the entry sits at.
    pub fn adj_vertex(&self, a: Adj) -> u32 {
        let (s, t) = self.edges[adj_edge(a) as usize];
        if adj_is_source(a) {
            s
        } else {
            t
        }
    }

    /// Vertex at the other end of the entry's edge.
    pub fn adj_far_vertex(&self, a: Adj) -> u32 {
        self.adj_vertex(twin(a))
    }

    pub fn rotation(&self, v: u32) -> &[Adj] {
        &self.rot[v as usize]
    }

    /// Clockwise successor of `a` in the rotation of its vertex.
    pub fn cyclic_succ(&self, a: Adj) -> Adj {
        let rot = &self.rot[self.adj_vertex(a) as usize];
        let i = rot.iter().position(|&x| x == a).unwrap_or(0);
        rot[(i + 1) % rot.len()]
    }

    /// Connected components as vertex lists, smallest vertex id first.
    pub(crate) fn components(&self) -> Vec<Vec<u32>> {
        let n = self.rot.len();
        let mut comp = vec![usize::MAX; n];
        let mut out: Vec<Vec<u32>> = Vec::new();
        for start in 0..n {
            if comp[start] != usize::MAX {
                continue;
            }
            let id = out.len();
            let mut members = vec![start as u32];
            comp[start] = id;
            let mut stack = vec![start as u32];
            while let Some(v) = stack.pop() {
                for &a in &self.rot[v as usize] {
                    let w = self.adj_far_vertex(a);
                    if comp[w as usize] == usize::MAX {
                        comp[w as usize] = id;
                        members.push(w);
                        stack.push(w);
                    }
                }
            }
            members.sort_unstable();
            out.push(members);
        }
        out
    }
}
