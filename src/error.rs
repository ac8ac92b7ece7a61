use thiserror::Error;

/// Fatal structural failures. None of these are retryable: every operation
/// in this crate is a deterministic function of the current graph and
/// embedding state, so the caller must treat any of them as "algorithm
/// precondition failed" and abort the surrounding pass.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("working graph does not represent a combinatorial embedding")]
    InvalidEmbedding,

    #[error("boundary entry lists out of sync: {sources} source ends vs {targets} target ends")]
    BoundaryPairing { sources: usize, targets: usize },

    #[error("clusters {a} and {b} are not related as required")]
    ClusterRelation { a: u32, b: u32 },

    #[error("cannot classify crossing dummy {node}")]
    UnclassifiableCrossing { node: u32 },

    #[error("vertex {node} has no region assigned")]
    MissingRegion { node: u32 },

    #[error("path anchor sits at vertex {got}, expected the copy of the path endpoint ({expected})")]
    PathAnchor { expected: u32, got: u32 },

    #[error("original edge {edge} is already split into fragments and cannot be re-inserted")]
    AlreadySplit { edge: u32 },
}
