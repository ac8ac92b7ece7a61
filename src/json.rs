//! JSON snapshots of the working representation, for debugging and for
//! feeding downstream drawing stages.

use serde_json::{json, Value};

use crate::model::adj_edge;
use crate::PlanarRep;

pub(crate) fn snapshot(rep: &PlanarRep) -> Value {
    let nodes: Vec<Value> = rep
        .nodes
        .iter()
        .enumerate()
        .map(|(v, n)| {
            json!({
                "id": v,
                "kind": n.kind,
                "orig": n.orig,
                "expanded_from": n.expanded_from,
                "region": rep.node_region[v],
            })
        })
        .collect();

    let edges: Vec<Value> = rep
        .edges
        .iter()
        .enumerate()
        .filter_map(|(e, slot)| {
            let edge = slot.as_ref()?;
            Some(json!({
                "id": e,
                "source": edge.source,
                "target": edge.target,
                "kind": edge.kind,
                "orig": edge.orig,
                "region": rep.edge_region[e],
            }))
        })
        .collect();

    // rotations as (edge, at_source) pairs, clockwise
    let rotations: Vec<Value> = rep
        .rot
        .iter()
        .map(|list| {
            Value::Array(
                list.iter()
                    .map(|&a| json!([adj_edge(a), a & 1 == 0]))
                    .collect(),
            )
        })
        .collect();

    json!({
        "nodes": nodes,
        "edges": edges,
        "rotations": rotations,
        "root_adj": rep.root_adj,
    })
}

#[cfg(test)]
mod tests {
    use crate::cluster::ClusterTree;
    use crate::model::Graph;
    use crate::PlanarRep;

    #[test]
    fn snapshot_lists_live_elements_only() {
        let mut g = Graph::new();
        for _ in 0..3 {
            g.add_node();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let tree = ClusterTree::new(3);
        let mut rep = PlanarRep::new(g);
        rep.init_cc(0, &tree);
        rep.remove_copy(1);

        let snap = rep.snapshot();
        assert_eq!(snap["nodes"].as_array().map(Vec::len), Some(3));
        assert_eq!(snap["edges"].as_array().map(Vec::len), Some(1));
        assert_eq!(snap["edges"][0]["id"], 0);
        assert_eq!(snap["rotations"][1].as_array().map(Vec::len), Some(1));
        assert!(snap["root_adj"].is_null());
    }
}
