//! Embedded re-insertion of an original edge along a crossing path, and
//! region classification of the crossing dummies it creates.

use crate::cluster::ClusterTree;
use crate::error::PlanError;
use crate::model::{adj, adj_edge, adj_is_source, Adj, NodeKind};
use crate::PlanarRep;

/// Re-insert original edge `e_orig` as a fragment chain along `crossed`.
///
/// `crossed` holds the edge-ends of one face-to-face path through the
/// embedding: first an anchor end at the copy of the edge's source, then
/// one end per working edge the path crosses, finally an anchor end at the
/// copy of the target. New path ends are placed directly after their
/// anchors in the rotations, so the corner clockwise after each anchor must
/// open into the face the path runs through. Each crossed edge is split at
/// a fresh crossing dummy, and every dummy is then assigned the region the
/// crossing lies in.
pub fn insert_edge_path(
    rep: &mut PlanarRep,
    tree: &ClusterTree,
    e_orig: u32,
    crossed: &[Adj],
) -> Result<(), PlanError> {
    let (os, ot) = rep.graph.edge_ends(e_orig);
    let s_copy = rep.copy_node(os).ok_or(PlanError::PathAnchor {
        expected: os,
        got: os,
    })?;
    let t_copy = rep.copy_node(ot).ok_or(PlanError::PathAnchor {
        expected: ot,
        got: ot,
    })?;
    let (&first, &last) = match (crossed.first(), crossed.last()) {
        (Some(f), Some(l)) if crossed.len() >= 2 => (f, l),
        _ => {
            return Err(PlanError::PathAnchor {
                expected: s_copy,
                got: t_copy,
            })
        }
    };
    if rep.adj_vertex(first) != s_copy {
        return Err(PlanError::PathAnchor {
            expected: s_copy,
            got: rep.adj_vertex(first),
        });
    }
    if rep.adj_vertex(last) != t_copy {
        return Err(PlanError::PathAnchor {
            expected: t_copy,
            got: rep.adj_vertex(last),
        });
    }
    // an old unsplit copy is superseded by the path; an edge that boundary
    // modeling already cut must not acquire a second representation
    if rep.chain(e_orig).len() > 1 {
        return Err(PlanError::AlreadySplit { edge: e_orig });
    }
    rep.remove_copy(e_orig);

    let mut prev_anchor = first;
    let mut chain = Vec::with_capacity(crossed.len() - 1);
    for &m in &crossed[1..crossed.len() - 1] {
        let ce = adj_edge(m);
        let (_, far_frag) = rep.split(ce, NodeKind::Crossing);
        // rotation at the dummy is [end toward old source, end toward old
        // target]; which side the path enters from depends on the end the
        // caller named
        let (near_end, far_end) = if adj_is_source(m) {
            (adj(ce, 1), adj(far_frag, 0))
        } else {
            (adj(far_frag, 0), adj(ce, 1))
        };
        let pe = rep.new_edge(prev_anchor, near_end);
        if let Some(e) = rep.edges[pe as usize].as_mut() {
            e.orig = Some(e_orig);
        }
        chain.push(pe);
        prev_anchor = far_end;
    }
    let pe = rep.new_edge(prev_anchor, last);
    if let Some(e) = rep.edges[pe as usize].as_mut() {
        e.orig = Some(e_orig);
    }
    chain.push(pe);
    rep.chains[e_orig as usize] = chain;

    rep.check_embedding()?;
    classify_chain(rep, tree, e_orig)
}

/// Assign a region to every crossing dummy along the chain of `e_orig`.
///
/// The dummy's region is determined from the two far vertices of the
/// crossed edge's fragments: the direct cluster for copies of original
/// vertices, the recorded region for dummies. Equal regions are taken as
/// is; a direct parent/child pair resolves to the child; two unrelated
/// dummy regions fall back to a shared parent when one exists. Any looser
/// relation, grandparents included, is a fatal inconsistency.
fn classify_chain(rep: &mut PlanarRep, tree: &ClusterTree, e_orig: u32) -> Result<(), PlanError> {
    let chain = rep.chain(e_orig).to_vec();
    if chain.len() < 2 {
        return Ok(());
    }
    for &frag in &chain[..chain.len() - 1] {
        let adj_in = adj(frag, 1);
        let d = rep.adj_vertex(adj_in);
        let v1 = rep.adj_far_vertex(rep.cyclic_pred(adj_in));
        let v2 = rep.adj_far_vertex(rep.cyclic_succ(adj_in));
        let region = crossing_region(rep, tree, d, v1, v2)?;
        rep.node_region[d as usize] = Some(region);
    }
    Ok(())
}

fn crossing_region(
    rep: &PlanarRep,
    tree: &ClusterTree,
    d: u32,
    v1: u32,
    v2: u32,
) -> Result<u32, PlanError> {
    // (region, is copy of an original vertex)
    let cls = |v: u32| -> Option<(u32, bool)> {
        if let Some(o) = rep.nodes[v as usize].orig {
            Some((tree.cluster_of(o), true))
        } else {
            rep.node_region[v as usize].map(|c| (c, false))
        }
    };
    match (cls(v1), cls(v2)) {
        (None, _) => Err(PlanError::MissingRegion { node: v1 }),
        (_, None) => Err(PlanError::MissingRegion { node: v2 }),
        (Some((c1, true)), Some((c2, true))) => {
            // a crossing between two uncut edges can only lie inside the
            // cluster both endpoints share
            if c1 == c2 {
                Ok(c1)
            } else {
                Err(PlanError::ClusterRelation { a: c1, b: c2 })
            }
        }
        (Some((c1, false)), Some((c2, false))) => {
            if c1 == c2 {
                Ok(c1)
            } else if tree.parent(c2) == Some(c1) {
                Ok(c2)
            } else if tree.parent(c1) == Some(c2) {
                Ok(c1)
            } else {
                match (tree.parent(c1), tree.parent(c2)) {
                    (Some(p1), Some(p2)) if p1 == p2 => Ok(p1),
                    _ => Err(PlanError::UnclassifiableCrossing { node: d }),
                }
            }
        }
        (Some((c1, _)), Some((c2, _))) => {
            if c1 == c2 {
                Ok(c1)
            } else if tree.parent(c2) == Some(c1) {
                Ok(c2)
            } else if tree.parent(c1) == Some(c2) {
                Ok(c1)
            } else {
                Err(PlanError::ClusterRelation { a: c1, b: c2 })
            }
        }
    }
}
