//! Boundary insertion: turning every cluster border into an explicit
//! cycle of boundary edges.
//!
//! Clusters are processed bottom-up. For each cluster the outgoing
//! edge-ends are enumerated in clockwise contour order; every such edge is
//! split at a fresh boundary dummy, and the dummies are then chained into a
//! cycle of `ClusterBoundary` edges. Because one original edge can cross
//! several nested borders, a shared map tracks, per original edge-end, the
//! working fragment that is currently outermost on that side.

use std::collections::HashMap;

use crate::cluster::ClusterTree;
use crate::error::PlanError;
use crate::model::{adj, adj_edge, adj_is_source, twin, Adj, EdgeKind, NodeKind};
use crate::PlanarRep;

/// Insert a boundary cycle for every non-root cluster of the current
/// component, children before parents. Leaves the embedding valid and
/// designates an outer-face edge-end via `root_adj`.
pub fn model_boundaries(rep: &mut PlanarRep, tree: &ClusterTree) -> Result<(), PlanError> {
    rep.check_embedding()?;
    let mut current: HashMap<Adj, u32> = HashMap::new();
    convert_cluster(rep, tree, tree.root(), &mut current)?;
    if rep.root_adj.is_none() {
        // no cluster touched the root face; any edge-end will do
        rep.root_adj = rep
            .edges
            .iter()
            .position(|e| e.is_some())
            .map(|e| adj(e as u32, 0));
    }
    Ok(())
}

fn convert_cluster(
    rep: &mut PlanarRep,
    tree: &ClusterTree,
    c: u32,
    current: &mut HashMap<Adj, u32>,
) -> Result<(), PlanError> {
    let kids = tree.children(c).to_vec();
    for k in kids {
        convert_cluster(rep, tree, k, current)?;
    }
    if c != tree.root() {
        insert_boundary(rep, tree, c, current)?;
    }
    Ok(())
}

fn insert_boundary(
    rep: &mut PlanarRep,
    tree: &ClusterTree,
    c: u32,
    current: &mut HashMap<Adj, u32>,
) -> Result<(), PlanError> {
    // outgoing edge-ends of the cluster, clockwise, in the original graph
    let out: Vec<Adj> = tree
        .boundary_adj_entries(&rep.graph, c)
        .into_iter()
        .filter(|&a| rep.copy_edge(adj_edge(a)).is_some())
        .collect();
    if out.is_empty() {
        // cluster lies outside this component, or swallows it whole
        return Ok(());
    }

    let parent_is_root = tree.parent(c) == Some(tree.root());
    let mut src_anchors = Vec::with_capacity(out.len());
    let mut tgt_anchors = Vec::with_capacity(out.len());

    for (i, &a) in out.iter().enumerate() {
        let oe = adj_edge(a);
        let cur = *current.entry(a).or_insert_with(|| {
            // outermost fragment on this side of the edge
            let chain = rep.chain(oe);
            if adj_is_source(a) {
                chain[0]
            } else {
                chain[chain.len() - 1]
            }
        });
        let (w, new_e) = rep.split(cur, NodeKind::Boundary);
        rep.check_embedding()?;
        rep.node_region[w as usize] = Some(c);
        if adj_is_source(a) {
            // the inside end is the fragment's source; the new fragment
            // (dummy, far side) becomes outermost for both edge-ends
            current.insert(a, new_e);
            current.insert(twin(a), new_e);
            src_anchors.push(adj(new_e, 0));
            tgt_anchors.push(adj(cur, 1));
            if parent_is_root && i + 1 == out.len() {
                rep.root_adj = Some(adj(new_e, 0));
            }
        } else {
            // the inside end is the fragment's target; `cur` keeps its id
            // and now denotes the outer piece, so the map stays as is
            src_anchors.push(adj(cur, 1));
            tgt_anchors.push(adj(new_e, 0));
            if parent_is_root && i + 1 == out.len() {
                rep.root_adj = Some(adj(cur, 0));
            }
        }
    }

    if src_anchors.len() != tgt_anchors.len() {
        return Err(PlanError::BoundaryPairing {
            sources: src_anchors.len(),
            targets: tgt_anchors.len(),
        });
    }

    // each boundary edge runs from the dummy of one outgoing end to the
    // dummy of the clockwise-next one
    tgt_anchors.rotate_left(1);
    for (&s, &t) in src_anchors.iter().zip(&tgt_anchors) {
        let be = rep.new_edge(s, t);
        if let Some(e) = rep.edges[be as usize].as_mut() {
            e.kind = EdgeKind::ClusterBoundary;
        }
        rep.edge_region[be as usize] = Some(c);
        rep.check_embedding()?;
    }
    Ok(())
}
