//! Seeding of region tags on a freshly copied component.

use crate::cluster::ClusterTree;
use crate::PlanarRep;

/// Tag every working vertex that copies an original vertex with that
/// vertex's direct cluster, and every working edge whose two original
/// endpoints share a direct cluster with that cluster. Edges between
/// different clusters stay untagged; later steps never rely on a tag for
/// them. Idempotent.
pub fn assign_region_ids(rep: &mut PlanarRep, tree: &ClusterTree) {
    for v in 0..rep.nodes.len() {
        if let Some(orig) = rep.nodes[v].orig {
            rep.node_region[v] = Some(tree.cluster_of(orig));
        }
    }
    for e in 0..rep.edges.len() {
        let Some(edge) = &rep.edges[e] else {
            continue;
        };
        let (Some(os), Some(ot)) = (
            rep.nodes[edge.source as usize].orig,
            rep.nodes[edge.target as usize].orig,
        ) else {
            continue;
        };
        let cs = tree.cluster_of(os);
        if cs == tree.cluster_of(ot) {
            rep.edge_region[e] = Some(cs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Graph;

    #[test]
    fn tags_follow_direct_clusters() {
        let mut g = Graph::new();
        for _ in 0..4 {
            g.add_node();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        let mut tree = ClusterTree::new(4);
        let c = tree.add_cluster(tree.root());
        tree.assign(1, c);
        tree.assign(2, c);

        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);

        assert_eq!(rep.node_region(0), Some(tree.root()));
        assert_eq!(rep.node_region(1), Some(c));
        assert_eq!(rep.node_region(2), Some(c));
        // only the edge fully inside c carries its tag
        assert_eq!(rep.edge_region(1), Some(c));
        assert_eq!(rep.edge_region(0), None);

        // running the initializer again changes nothing
        assign_region_ids(&mut rep, &tree);
        assert_eq!(rep.node_region(1), Some(c));
        assert_eq!(rep.edge_region(0), None);
    }
}
