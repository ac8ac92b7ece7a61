//! Rooted hierarchy of nested regions ("clusters") over the original
//! vertices, plus the clockwise enumeration of a cluster's boundary-crossing
//! edge-ends in the original embedding.

use serde::{Deserialize, Serialize};

use crate::model::{twin, Adj, Graph};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cluster {
    pub parent: Option<u32>,
    pub children: Vec<u32>,
    /// Original vertices assigned directly to this cluster (not through
    /// descendants).
    pub vertices: Vec<u32>,
}

/// The cluster tree. Slot indices double as the stable cluster ids; slots
/// may be retired, so ids need not be contiguous. The root stands for "no
/// cluster" and its id is never written to boundary elements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClusterTree {
    clusters: Vec<Option<Cluster>>,
    root: u32,
    of_vertex: Vec<u32>, // original vertex -> direct cluster
}

impl ClusterTree {
    /// A tree with only the root cluster, owning all `num_vertices`
    /// original vertices.
    pub fn new(num_vertices: usize) -> Self {
        let root_cluster = Cluster {
            parent: None,
            children: Vec::new(),
            vertices: (0..num_vertices as u32).collect(),
        };
        Self {
            clusters: vec![Some(root_cluster)],
            root: 0,
            of_vertex: vec![0; num_vertices],
        }
    }

    pub fn root(&self) -> u32 {
        self.root
    }

    pub fn add_cluster(&mut self, parent: u32) -> u32 {
        let id = self.clusters.len() as u32;
        self.clusters.push(Some(Cluster {
            parent: Some(parent),
            children: Vec::new(),
            vertices: Vec::new(),
        }));
        if let Some(Some(p)) = self.clusters.get_mut(parent as usize) {
            p.children.push(id);
        }
        id
    }

    /// Move original vertex `v` from its current cluster to `c`.
    pub fn assign(&mut self, v: u32, c: u32) {
        let old = self.of_vertex[v as usize];
        if let Some(Some(oc)) = self.clusters.get_mut(old as usize) {
            oc.vertices.retain(|&x| x != v);
        }
        if let Some(Some(nc)) = self.clusters.get_mut(c as usize) {
            nc.vertices.push(v);
        }
        self.of_vertex[v as usize] = c;
    }

    pub fn parent(&self, c: u32) -> Option<u32> {
        self.clusters
            .get(c as usize)
            .and_then(|c| c.as_ref())
            .and_then(|c| c.parent)
    }

    pub fn children(&self, c: u32) -> &[u32] {
        match self.clusters.get(c as usize).and_then(|c| c.as_ref()) {
            Some(c) => &c.children,
            None => &[],
        }
    }

    /// Direct cluster of an original vertex.
    pub fn cluster_of(&self, v: u32) -> u32 {
        self.of_vertex[v as usize]
    }

    /// Strict ancestry: `anc` is a proper ancestor of `c`.
    pub fn is_ancestor_of(&self, anc: u32, c: u32) -> bool {
        let mut cur = self.parent(c);
        while let Some(p) = cur {
            if p == anc {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    pub fn is_same_or_ancestor(&self, anc: u32, c: u32) -> bool {
        anc == c || self.is_ancestor_of(anc, c)
    }

    /// Membership mask of the subtree rooted at `c`, over original vertices.
    pub fn subtree_membership(&self, c: u32, num_vertices: usize) -> Vec<bool> {
        let mut inside = vec![false; num_vertices];
        let mut stack = vec![c];
        while let Some(k) = stack.pop() {
            if let Some(Some(cl)) = self.clusters.get(k as usize) {
                for &v in &cl.vertices {
                    if (v as usize) < num_vertices {
                        inside[v as usize] = true;
                    }
                }
                stack.extend_from_slice(&cl.children);
            }
        }
        inside
    }

    /// The edge-ends crossing from inside cluster `c` to outside, in
    /// clockwise order around the cluster's border in the embedding of `g`.
    ///
    /// Obtained by a contour walk of the sub-embedding induced on the
    /// cluster's subtree: from one crossing end, take the clockwise
    /// successor and hop along interior edges until the next crossing end
    /// appears. A cluster with no crossing edges yields an empty sequence;
    /// if the cluster's drawing is disconnected, only the entries on the
    /// contour of the first part found are reported.
    pub fn boundary_adj_entries(&self, g: &Graph, c: u32) -> Vec<Adj> {
        let inside = self.subtree_membership(c, g.num_nodes());
        let mut start = None;
        'scan: for v in 0..g.num_nodes() as u32 {
            if !inside[v as usize] {
                continue;
            }
            for &a in g.rotation(v) {
                if !inside[g.adj_far_vertex(a) as usize] {
                    start = Some(a);
                    break 'scan;
                }
            }
        }
        let Some(start) = start else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let limit = 4 * g.num_edges() + 4;
        let mut steps = 0usize;
        let mut a = start;
        loop {
            out.push(a);
            let mut b = g.cyclic_succ(a);
            while inside[g.adj_far_vertex(b) as usize] {
                b = g.cyclic_succ(twin(b));
                steps += 1;
                if steps > limit {
                    return out;
                }
            }
            a = b;
            steps += 1;
            if a == start || steps > limit {
                return out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::adj;

    fn two_cluster_hexagon() -> (Graph, ClusterTree, u32, u32) {
        // Cycle x1 x2 x3 y3 y2 y1; the two x..y edges cross the cluster
        // borders.
        let mut g = Graph::new();
        for _ in 0..6 {
            g.add_node();
        }
        g.add_edge(0, 1).unwrap(); // x1-x2
        g.add_edge(1, 2).unwrap(); // x2-x3
        g.add_edge(2, 3).unwrap(); // x3-y3
        g.add_edge(3, 4).unwrap(); // y3-y2
        g.add_edge(4, 5).unwrap(); // y2-y1
        g.add_edge(5, 0).unwrap(); // y1-x1
        let mut t = ClusterTree::new(6);
        let r1 = t.add_cluster(t.root());
        let r2 = t.add_cluster(t.root());
        for v in 0..3 {
            t.assign(v, r1);
        }
        for v in 3..6 {
            t.assign(v, r2);
        }
        (g, t, r1, r2)
    }

    #[test]
    fn ancestry_queries() {
        let mut t = ClusterTree::new(4);
        let a = t.add_cluster(t.root());
        let b = t.add_cluster(a);
        assert_eq!(t.parent(b), Some(a));
        assert!(t.is_ancestor_of(t.root(), b));
        assert!(t.is_ancestor_of(a, b));
        assert!(!t.is_ancestor_of(b, a));
        assert!(t.is_same_or_ancestor(b, b));
        assert_eq!(t.children(t.root()), &[a]);
    }

    #[test]
    fn assign_moves_vertex_between_clusters() {
        let mut t = ClusterTree::new(3);
        let a = t.add_cluster(t.root());
        t.assign(1, a);
        assert_eq!(t.cluster_of(1), a);
        let inside = t.subtree_membership(a, 3);
        assert_eq!(inside, vec![false, true, false]);
        // subtree of root still sees everything
        assert!(t.subtree_membership(t.root(), 3).iter().all(|&x| x));
    }

    #[test]
    fn contour_walk_finds_crossing_ends_in_order() {
        let (g, t, r1, r2) = two_cluster_hexagon();
        let b1 = t.boundary_adj_entries(&g, r1);
        // x1's end of y1-x1 (edge 5, target side) comes first in vertex
        // scan order, then x3's end of x3-y3 (edge 2, source side).
        assert_eq!(b1, vec![adj(5, 1), adj(2, 0)]);
        let b2 = t.boundary_adj_entries(&g, r2);
        assert_eq!(b2, vec![adj(2, 1), adj(5, 0)]);
    }

    #[test]
    fn boundaryless_cluster_yields_empty_sequence() {
        let mut g = Graph::new();
        for _ in 0..2 {
            g.add_node();
        }
        g.add_edge(0, 1).unwrap();
        let mut t = ClusterTree::new(2);
        let c = t.add_cluster(t.root());
        t.assign(0, c);
        t.assign(1, c);
        assert!(t.boundary_adj_entries(&g, c).is_empty());
    }
}
