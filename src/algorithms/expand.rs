//! Region propagation onto vertices produced by vertex expansion.

use crate::error::PlanError;
use crate::PlanarRep;

/// Give every expansion vertex the region of the vertex it was split off
/// from. Expansion vertices always carry a larger id than their source, so
/// one pass in id order also covers chains of repeated expansions.
pub fn propagate_expansion_regions(rep: &mut PlanarRep) -> Result<(), PlanError> {
    for v in 0..rep.nodes.len() {
        let Some(src) = rep.nodes[v].expanded_from else {
            continue;
        };
        let Some(region) = rep.node_region[src as usize] else {
            return Err(PlanError::MissingRegion { node: src });
        };
        rep.node_region[v] = Some(region);
    }
    Ok(())
}
