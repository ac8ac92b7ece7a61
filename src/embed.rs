//! Validity check for the working graph's rotation system.
//!
//! A state is accepted when (a) every end of every live edge appears exactly
//! once, in the rotation list of exactly its own endpoint, and (b) the
//! rotation system has genus zero: with `F` faces traced as orbits of
//! `a -> cyclic_succ(twin(a))`, Euler's formula `E - V - F + 2*C == 0` holds
//! over the non-isolated vertices and the components that carry edges.

use crate::error::PlanError;
use crate::model::{adj, adj_edge, adj_is_source, twin, Adj, WorkEdge};

pub(crate) fn verify(rot: &[Vec<Adj>], edges: &[Option<WorkEdge>]) -> Result<(), PlanError> {
    let slots = edges.len();
    let mut live = 0usize;
    for e in edges.iter().flatten() {
        if e.source as usize >= rot.len() || e.target as usize >= rot.len() {
            return Err(PlanError::InvalidEmbedding);
        }
        live += 1;
    }

    // Every live end appears once, at its own vertex; dead ends not at all.
    let mut pos = vec![usize::MAX; 2 * slots];
    for (v, list) in rot.iter().enumerate() {
        for (i, &a) in list.iter().enumerate() {
            let Some(Some(e)) = edges.get(adj_edge(a) as usize) else {
                return Err(PlanError::InvalidEmbedding);
            };
            let home = if adj_is_source(a) { e.source } else { e.target };
            if home as usize != v || pos[a as usize] != usize::MAX {
                return Err(PlanError::InvalidEmbedding);
            }
            pos[a as usize] = i;
        }
    }
    let seen = pos.iter().filter(|&&p| p != usize::MAX).count();
    if seen != 2 * live {
        return Err(PlanError::InvalidEmbedding);
    }

    let vertex_of = |a: Adj| -> u32 {
        let e = edges[adj_edge(a) as usize].as_ref().expect("live end");
        if adj_is_source(a) {
            e.source
        } else {
            e.target
        }
    };

    // Count face orbits of a -> cyclic_succ(twin(a)).
    let mut visited = vec![false; 2 * slots];
    let mut faces = 0usize;
    for (eid, e) in edges.iter().enumerate() {
        if e.is_none() {
            continue;
        }
        for side in 0..2u8 {
            let start = adj(eid as u32, side);
            if visited[start as usize] {
                continue;
            }
            faces += 1;
            let mut a = start;
            loop {
                visited[a as usize] = true;
                let t = twin(a);
                let list = &rot[vertex_of(t) as usize];
                a = list[(pos[t as usize] + 1) % list.len()];
                if a == start {
                    break;
                }
            }
        }
    }

    // Components over live edges; isolated vertices stay out of the count.
    let mut comp: Vec<usize> = (0..rot.len()).collect();
    fn find(comp: &mut Vec<usize>, mut x: usize) -> usize {
        while comp[x] != x {
            comp[x] = comp[comp[x]];
            x = comp[x];
        }
        x
    }
    for e in edges.iter().flatten() {
        let a = find(&mut comp, e.source as usize);
        let b = find(&mut comp, e.target as usize);
        comp[a] = b;
    }
    let mut non_isolated = 0usize;
    let mut roots = std::collections::HashSet::new();
    for (v, list) in rot.iter().enumerate() {
        if !list.is_empty() {
            non_isolated += 1;
            roots.insert(find(&mut comp, v));
        }
    }

    let euler = live as i64 - non_isolated as i64 - faces as i64 + 2 * roots.len() as i64;
    if euler != 0 {
        return Err(PlanError::InvalidEmbedding);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeKind;

    fn edge(s: u32, t: u32) -> Option<WorkEdge> {
        Some(WorkEdge {
            source: s,
            target: t,
            kind: EdgeKind::Normal,
            orig: None,
        })
    }

    #[test]
    fn triangle_is_valid() {
        let edges = vec![edge(0, 1), edge(1, 2), edge(2, 0)];
        let rot = vec![
            vec![adj(0, 0), adj(2, 1)],
            vec![adj(0, 1), adj(1, 0)],
            vec![adj(1, 1), adj(2, 0)],
        ];
        assert!(verify(&rot, &edges).is_ok());
    }

    #[test]
    fn k5_like_rotation_is_rejected() {
        // Two triangles sharing all three vertices with interleaved
        // rotations produce a genus-1 system.
        let edges = vec![
            edge(0, 1),
            edge(1, 2),
            edge(2, 0),
            edge(0, 1),
            edge(1, 2),
            edge(2, 0),
        ];
        let rot = vec![
            vec![adj(0, 0), adj(3, 0), adj(2, 1), adj(5, 1)],
            vec![adj(0, 1), adj(4, 0), adj(1, 0), adj(3, 1)],
            vec![adj(1, 1), adj(5, 0), adj(2, 0), adj(4, 1)],
        ];
        assert_eq!(verify(&rot, &edges), Err(PlanError::InvalidEmbedding));
    }

    #[test]
    fn misplaced_end_is_rejected() {
        let edges = vec![edge(0, 1)];
        // target end listed at the source vertex
        let rot = vec![vec![adj(0, 0), adj(0, 1)], vec![]];
        assert_eq!(verify(&rot, &edges), Err(PlanError::InvalidEmbedding));
    }

    #[test]
    fn dead_slot_ends_are_rejected() {
        let edges = vec![edge(0, 1), None];
        let rot = vec![vec![adj(0, 0), adj(1, 0)], vec![adj(0, 1)]];
        assert_eq!(verify(&rot, &edges), Err(PlanError::InvalidEmbedding));
    }

    #[test]
    fn disconnected_components_are_counted_separately() {
        let edges = vec![edge(0, 1), edge(2, 3)];
        let rot = vec![
            vec![adj(0, 0)],
            vec![adj(0, 1)],
            vec![adj(1, 0)],
            vec![adj(1, 1)],
        ];
        assert!(verify(&rot, &edges).is_ok());
    }
}
