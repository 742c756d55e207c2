//! Error types for hierarchy checks.

use crate::actor::UserId;
use thiserror::Error;

/// Errors raised by the hierarchy-checking operations.
///
/// Both variants signal caller-side contract violations and are never
/// retried or swallowed here; handlers are expected to guard with an
/// explicit guild-context check before comparing ranks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A hierarchy comparison was attempted outside any guild.
    #[error("hierarchy check requires a guild context, but the message does not belong to a guild")]
    NoGuild,

    /// An actor without role-rank data was used where a guild member is
    /// required, either as the privileged actor or among the candidates.
    #[error("expected a guild member, encountered {kind} {id}")]
    NotMember {
        /// Variant name of the offending actor.
        kind: &'static str,
        /// Id of the offending actor.
        id: UserId,
    },
}
