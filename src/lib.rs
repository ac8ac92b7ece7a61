//! Cluster boundary modeling over a planarized graph.
//!
//! The input is a graph with a fixed combinatorial embedding plus a rooted
//! hierarchy of nested vertex regions ("clusters"). This crate maintains a
//! mutable working copy of one connected component at a time and turns every
//! cluster's border into an explicit cycle of boundary edges and dummy
//! vertices, keeping the embedding valid through every mutation. Region ids
//! are propagated onto everything the planarization steps create: boundary
//! dummies, crossing dummies of later path insertions, and expansion
//! artifacts.

pub mod cluster;
pub mod error;
pub mod model;

mod embed;
mod json;

pub mod algorithms {
    pub mod boundary;
    pub mod crossing;
    pub mod expand;
    pub mod init;
}

use cluster::ClusterTree;
use model::{adj, adj_edge, adj_is_source, twin, Adj, EdgeKind, Graph, NodeKind, WorkEdge, WorkNode};

pub use error::PlanError;

/// The planarized representation: a mutable working copy of one connected
/// component of the original graph, its rotation system, the copy/original
/// correspondence, and the two region-id tag maps.
pub struct PlanarRep {
    pub(crate) graph: Graph,
    pub(crate) nodes: Vec<WorkNode>,
    pub(crate) edges: Vec<Option<WorkEdge>>,
    pub(crate) rot: Vec<Vec<Adj>>, // per working vertex, clockwise
    pub(crate) node_copy: Vec<Option<u32>>, // original vertex -> working copy
    pub(crate) chains: Vec<Vec<u32>>, // original edge -> fragments, source side first
    pub(crate) node_region: Vec<Option<u32>>,
    pub(crate) edge_region: Vec<Option<u32>>,
    pub(crate) root_adj: Option<Adj>,
    cc: Vec<Vec<u32>>,
    cur_cc: Option<usize>,
}

impl PlanarRep {
    pub fn new(graph: Graph) -> Self {
        let cc = graph.components();
        Self {
            graph,
            nodes: Vec::new(),
            edges: Vec::new(),
            rot: Vec::new(),
            node_copy: Vec::new(),
            chains: Vec::new(),
            node_region: Vec::new(),
            edge_region: Vec::new(),
            root_adj: None,
            cc,
            cur_cc: None,
        }
    }

    pub fn num_components(&self) -> usize {
        self.cc.len()
    }

    pub fn current_component(&self) -> Option<usize> {
        self.cur_cc
    }

    pub fn original_graph(&self) -> &Graph {
        &self.graph
    }

    /// Rebuild the working copy for connected component `i`: vertices,
    /// edges, and rotations are copied from the original graph, the tag
    /// maps are cleared, and region ids are seeded from the cluster tree.
    /// Safe to call repeatedly; dummies from a previous component are
    /// discarded wholesale.
    pub fn init_cc(&mut self, i: usize, tree: &ClusterTree) {
        let comp = self.cc.get(i).cloned().unwrap_or_default();
        self.nodes.clear();
        self.edges.clear();
        self.rot.clear();
        self.node_region.clear();
        self.edge_region.clear();
        self.node_copy = vec![None; self.graph.num_nodes()];
        self.chains = vec![Vec::new(); self.graph.num_edges()];
        self.root_adj = None;

        for &v in &comp {
            let id = self.nodes.len() as u32;
            self.nodes.push(WorkNode {
                kind: NodeKind::Original,
                orig: Some(v),
                expanded_from: None,
            });
            self.node_region.push(None);
            self.rot.push(Vec::new());
            self.node_copy[v as usize] = Some(id);
        }

        // Edges in id order, so fragment chains start out deterministic.
        let mut edge_map: Vec<Option<u32>> = vec![None; self.graph.num_edges()];
        for e in 0..self.graph.num_edges() as u32 {
            let (s, t) = self.graph.edge_ends(e);
            let (Some(cs), Some(ct)) = (self.node_copy[s as usize], self.node_copy[t as usize])
            else {
                continue;
            };
            let id = self.edges.len() as u32;
            self.edges.push(Some(WorkEdge {
                source: cs,
                target: ct,
                kind: EdgeKind::Normal,
                orig: Some(e),
            }));
            self.edge_region.push(None);
            self.chains[e as usize].push(id);
            edge_map[e as usize] = Some(id);
        }

        for &v in &comp {
            let Some(cv) = self.node_copy[v as usize] else {
                continue;
            };
            let mut list = Vec::with_capacity(self.graph.rot[v as usize].len());
            for &a in &self.graph.rot[v as usize] {
                if let Some(we) = edge_map[adj_edge(a) as usize] {
                    list.push(adj(we, (a & 1) as u8));
                }
            }
            self.rot[cv as usize] = list;
        }

        self.cur_cc = Some(i);
        algorithms::init::assign_region_ids(self, tree);
    }

    // ------------------------------------------------------------------
    // element access
    // ------------------------------------------------------------------

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Live edge count (dead slots from removed copies excluded).
    pub fn num_edges(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    pub fn node(&self, v: u32) -> &WorkNode {
        &self.nodes[v as usize]
    }

    pub fn edge(&self, e: u32) -> Option<&WorkEdge> {
        self.edges.get(e as usize).and_then(|e| e.as_ref())
    }

    pub fn edge_ends(&self, e: u32) -> Option<(u32, u32)> {
        self.edge(e).map(|e| (e.source, e.target))
    }

    pub fn copy_node(&self, orig_v: u32) -> Option<u32> {
        self.node_copy.get(orig_v as usize).copied().flatten()
    }

    pub fn original_node(&self, v: u32) -> Option<u32> {
        self.nodes.get(v as usize).and_then(|n| n.orig)
    }

    /// Fragment chain of an original edge, source-copy side first.
    pub fn chain(&self, orig_e: u32) -> &[u32] {
        match self.chains.get(orig_e as usize) {
            Some(c) => c,
            None => &[],
        }
    }

    /// Working edge currently incident to the copy of the original source:
    /// the front of the fragment chain.
    pub fn copy_edge(&self, orig_e: u32) -> Option<u32> {
        self.chain(orig_e).first().copied()
    }

    pub fn node_region(&self, v: u32) -> Option<u32> {
        self.node_region.get(v as usize).copied().flatten()
    }

    pub fn edge_region(&self, e: u32) -> Option<u32> {
        self.edge_region.get(e as usize).copied().flatten()
    }

    pub fn is_cluster_boundary(&self, e: u32) -> bool {
        self.edge(e).map_or(false, |e| e.kind == EdgeKind::ClusterBoundary)
    }

    /// Edge-end designated to lie on the outer face, once boundary modeling
    /// has run.
    pub fn root_adj(&self) -> Option<Adj> {
        self.root_adj
    }

    pub fn rotation(&self, v: u32) -> &[Adj] {
        &self.rot[v as usize]
    }

    pub fn adj_vertex(&self, a: Adj) -> u32 {
        let e = self.live(adj_edge(a));
        if adj_is_source(a) {
            e.source
        } else {
            e.target
        }
    }

    pub fn adj_far_vertex(&self, a: Adj) -> u32 {
        self.adj_vertex(twin(a))
    }

    pub fn cyclic_succ(&self, a: Adj) -> Adj {
        let list = &self.rot[self.adj_vertex(a) as usize];
        let i = list.iter().position(|&x| x == a).unwrap_or(0);
        list[(i + 1) % list.len()]
    }

    pub fn cyclic_pred(&self, a: Adj) -> Adj {
        let list = &self.rot[self.adj_vertex(a) as usize];
        let i = list.iter().position(|&x| x == a).unwrap_or(0);
        list[(i + list.len() - 1) % list.len()]
    }

    fn live(&self, e: u32) -> &WorkEdge {
        self.edges[e as usize].as_ref().expect("stale edge id")
    }

    fn live_mut(&mut self, e: u32) -> &mut WorkEdge {
        self.edges[e as usize].as_mut().expect("stale edge id")
    }

    // ------------------------------------------------------------------
    // structural mutators
    // ------------------------------------------------------------------

    /// Subdivide edge `e = (u, v)` at a fresh dummy `w` of the given kind.
    /// `e` becomes `(u, w)`; the returned edge is the new fragment `(w, v)`
    /// toward the old target. Rotation at `v` is updated in place, the
    /// rotation at `w` is `[end of (u,w), end of (w,v)]`, and the fragment
    /// chain of the underlying original edge (if any) grows by one.
    pub fn split(&mut self, e: u32, kind: NodeKind) -> (u32, u32) {
        let (v, ekind, orig) = {
            let r = self.live(e);
            (r.target, r.kind, r.orig)
        };
        let w = self.nodes.len() as u32;
        self.nodes.push(WorkNode {
            kind,
            orig: None,
            expanded_from: None,
        });
        self.node_region.push(None);
        self.rot.push(Vec::new());

        let f = self.edges.len() as u32;
        self.edges.push(Some(WorkEdge {
            source: w,
            target: v,
            kind: ekind,
            orig,
        }));
        // fragments keep the split edge's region tag
        self.edge_region.push(self.edge_region[e as usize]);
        self.live_mut(e).target = w;

        let list = &mut self.rot[v as usize];
        if let Some(p) = list.iter().position(|&x| x == adj(e, 1)) {
            list[p] = adj(f, 1);
        }
        self.rot[w as usize] = vec![adj(e, 1), adj(f, 0)];

        if let Some(oe) = orig {
            let chain = &mut self.chains[oe as usize];
            if let Some(p) = chain.iter().position(|&x| x == e) {
                chain.insert(p + 1, f);
            }
        }
        (w, f)
    }

    /// Insert a new edge between the vertices of two existing edge-ends.
    /// Each new end is placed immediately after the given anchor in its
    /// rotation, so the caller controls the face the edge runs through.
    pub fn new_edge(&mut self, src_anchor: Adj, tgt_anchor: Adj) -> u32 {
        let u = self.adj_vertex(src_anchor);
        let v = self.adj_vertex(tgt_anchor);
        let g = self.edges.len() as u32;
        self.edges.push(Some(WorkEdge {
            source: u,
            target: v,
            kind: EdgeKind::Normal,
            orig: None,
        }));
        self.edge_region.push(None);
        let list = &mut self.rot[u as usize];
        let p = list.iter().position(|&x| x == src_anchor).map_or(list.len(), |p| p + 1);
        list.insert(p, adj(g, 0));
        // fresh search: the first insertion may have shifted positions when
        // both anchors sit at the same vertex
        let list = &mut self.rot[v as usize];
        let p = list.iter().position(|&x| x == tgt_anchor).map_or(list.len(), |p| p + 1);
        list.insert(p, adj(g, 1));
        g
    }

    /// Split vertex `v` into two adjacent vertices: the rotation entries
    /// from position `at` onward move to a fresh vertex joined to `v` by a
    /// new edge. This is the planarity-preserving step a degree-constraint
    /// expansion routine is built from; the new vertex records `v` as its
    /// expansion source.
    pub fn expand_vertex(&mut self, v: u32, at: usize) -> u32 {
        let n2 = self.nodes.len() as u32;
        self.nodes.push(WorkNode {
            kind: NodeKind::Expansion,
            orig: None,
            expanded_from: Some(v),
        });
        self.node_region.push(None);

        let at = at.min(self.rot[v as usize].len());
        let moved: Vec<Adj> = self.rot[v as usize].split_off(at);
        for &a in &moved {
            let e = self.live_mut(adj_edge(a));
            if adj_is_source(a) {
                e.source = n2;
            } else {
                e.target = n2;
            }
        }
        let g = self.edges.len() as u32;
        self.edges.push(Some(WorkEdge {
            source: v,
            target: n2,
            kind: EdgeKind::Normal,
            orig: None,
        }));
        self.edge_region.push(None);
        self.rot[v as usize].push(adj(g, 0));
        let mut r2 = moved;
        r2.push(adj(g, 1));
        self.rot.push(r2);
        n2
    }

    /// Remove the (still unsplit) working copy of an original edge, making
    /// room for re-insertion along a crossing path. Returns false when the
    /// edge has no copy or has already been split.
    pub fn remove_copy(&mut self, orig_e: u32) -> bool {
        let chain = match self.chains.get(orig_e as usize) {
            Some(c) if c.len() == 1 => c,
            _ => return false,
        };
        let e = chain[0];
        let (u, v) = {
            let r = self.live(e);
            (r.source, r.target)
        };
        self.rot[u as usize].retain(|&a| adj_edge(a) != e);
        self.rot[v as usize].retain(|&a| adj_edge(a) != e);
        self.edges[e as usize] = None;
        self.edge_region[e as usize] = None;
        self.chains[orig_e as usize].clear();
        true
    }

    // ------------------------------------------------------------------
    // validity
    // ------------------------------------------------------------------

    /// Does the working graph, together with its rotation system, represent
    /// a single consistent planar embedding?
    pub fn is_valid_embedding(&self) -> bool {
        self.check_embedding().is_ok()
    }

    pub(crate) fn check_embedding(&self) -> Result<(), PlanError> {
        embed::verify(&self.rot, &self.edges)
    }

    /// JSON snapshot of the working graph, rotations, and tag maps.
    pub fn snapshot(&self) -> serde_json::Value {
        json::snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(n: usize) -> Graph {
        let mut g = Graph::new();
        for _ in 0..n {
            g.add_node();
        }
        for v in 1..n as u32 {
            g.add_edge(v - 1, v).unwrap();
        }
        g
    }

    #[test]
    fn init_cc_copies_component_with_rotations() {
        let g = path_graph(3);
        let tree = ClusterTree::new(3);
        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);
        assert_eq!(rep.num_nodes(), 3);
        assert_eq!(rep.num_edges(), 2);
        assert_eq!(rep.copy_node(1), Some(1));
        assert_eq!(rep.rotation(1), &[adj(0, 1), adj(1, 0)]);
        assert!(rep.is_valid_embedding());
        // every copy is seeded with the root region
        for v in 0..3 {
            assert_eq!(rep.node_region(v), Some(tree.root()));
        }
    }

    #[test]
    fn split_rewires_rotations_and_chain() {
        let g = path_graph(2);
        let tree = ClusterTree::new(2);
        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);
        let (w, f) = rep.split(0, NodeKind::Crossing);
        assert_eq!(rep.edge_ends(0), Some((0, w)));
        assert_eq!(rep.edge_ends(f), Some((w, 1)));
        assert_eq!(rep.rotation(w), &[adj(0, 1), adj(f, 0)]);
        assert_eq!(rep.rotation(1), &[adj(f, 1)]);
        assert_eq!(rep.chain(0), &[0, f]);
        assert_eq!(rep.copy_edge(0), Some(0));
        assert!(rep.is_valid_embedding());
    }

    #[test]
    fn new_edge_inserts_after_both_anchors() {
        let g = path_graph(3);
        let tree = ClusterTree::new(3);
        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);
        let e = rep.new_edge(adj(0, 0), adj(1, 1));
        assert_eq!(rep.edge_ends(e), Some((0, 2)));
        assert_eq!(rep.rotation(0), &[adj(0, 0), adj(e, 0)]);
        assert_eq!(rep.rotation(2), &[adj(1, 1), adj(e, 1)]);
        assert!(rep.is_valid_embedding());
    }

    #[test]
    fn self_loop_anchors_at_one_vertex() {
        let g = path_graph(3);
        let tree = ClusterTree::new(3);
        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);
        // both anchors at the middle vertex
        let l = rep.new_edge(adj(1, 0), adj(0, 1));
        assert_eq!(rep.edge_ends(l), Some((1, 1)));
        assert_eq!(rep.rotation(1), &[adj(0, 1), adj(l, 1), adj(1, 0), adj(l, 0)]);
        assert!(rep.is_valid_embedding());
    }

    #[test]
    fn expand_vertex_moves_suffix_arc() {
        let mut g = Graph::new();
        for _ in 0..5 {
            g.add_node();
        }
        for v in 1..5 {
            g.add_edge(0, v).unwrap(); // star around 0
        }
        let tree = ClusterTree::new(5);
        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);
        let n2 = rep.expand_vertex(0, 2);
        assert_eq!(rep.node(n2).expanded_from, Some(0));
        assert_eq!(rep.rotation(0).len(), 3); // two kept spokes + bridge
        assert_eq!(rep.rotation(n2).len(), 3);
        assert_eq!(rep.edge_ends(adj_edge(rep.rotation(n2)[0])), Some((n2, 3)));
        assert!(rep.is_valid_embedding());
    }

    #[test]
    fn remove_copy_clears_slot_and_chain() {
        let g = path_graph(3);
        let tree = ClusterTree::new(3);
        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);
        assert!(rep.remove_copy(1));
        assert!(rep.edge(1).is_none());
        assert!(rep.chain(1).is_empty());
        assert_eq!(rep.num_edges(), 1);
        assert_eq!(rep.rotation(1), &[adj(0, 1)]);
        assert!(rep.is_valid_embedding());
        // a second removal has nothing left to do
        assert!(!rep.remove_copy(1));
    }
}
