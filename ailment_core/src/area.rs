//! Area resolution - the spatial query seam

use crate::types::{ActorId, Position};

/// One-shot spatial lookup used when an application has splash behavior.
///
/// The engine treats the result as an unordered snapshot taken once at
/// application time; it is never queried per tick. Implementations decide
/// how the lookup is answered (the built-in [`ActorArena`](crate::ActorArena)
/// does a linear distance scan).
pub trait AreaQuery {
    /// Return every living actor within `radius` of `origin`, in no
    /// particular order. The caller filters out the primary target and the
    /// source itself.
    fn within_radius(&self, origin: Position, radius: f64) -> Vec<ActorId>;
}
