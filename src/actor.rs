//! Actor and guild identity types.
//!
//! The moderation helpers operate on two kinds of actors: a bare [`User`]
//! (identity only) and a guild-scoped [`Member`] carrying a role rank. The
//! [`Actor`] enum keeps the distinction explicit so hierarchy checks can
//! reject rank-less actors at a type boundary instead of probing for
//! attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user (platform snowflake).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Unique identifier for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

/// Unique identifier for a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Position of a member's highest role within a guild.
///
/// Ranks are totally ordered; a higher rank means more privilege. The guild
/// owner is deliberately *not* representable as a rank (see
/// [`Guild::is_owner`]) so rank comparison stays total for ordinary members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleRank(pub u32);

/// A bare user identity, with no guild affiliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform identity.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl User {
    /// Build a user from its id and display name.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// A user scoped to a guild, carrying its top role rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The underlying user account.
    pub user: User,
    /// Rank of the member's highest role.
    pub top_role: RoleRank,
}

impl Member {
    /// Build a member from a user and its highest role rank.
    pub fn new(user: User, top_role: RoleRank) -> Self {
        Self { user, top_role }
    }

    /// The member's user id.
    pub fn id(&self) -> UserId {
        self.user.id
    }
}

/// Any identity capable of sending or receiving messages.
///
/// Equality is identity-based: two actors compare equal when their ids
/// match, regardless of variant. This mirrors how chat platforms treat a
/// member and the underlying user account as the same person.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// A bare identity with no role data.
    User(User),
    /// A guild member with a role rank.
    Member(Member),
}

impl Actor {
    /// The actor's user id.
    pub fn id(&self) -> UserId {
        match self {
            Self::User(user) => user.id,
            Self::Member(member) => member.id(),
        }
    }

    /// The actor's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::User(user) => &user.name,
            Self::Member(member) => &member.user.name,
        }
    }

    /// Static name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Member(_) => "member",
        }
    }

    /// The guild-member view of this actor, if it has one.
    pub fn as_member(&self) -> Option<&Member> {
        match self {
            Self::Member(member) => Some(member),
            Self::User(_) => None,
        }
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<Member> for Actor {
    fn from(member: Member) -> Self {
        Self::Member(member)
    }
}

/// The guild a message belongs to.
///
/// Only the fields the moderation helpers consult are modeled; the embedding
/// bot owns the full guild state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    /// The guild's identity.
    pub id: GuildId,
    /// The guild owner's user id. Ownership is implicit maximal privilege
    /// and is never expressed as a [`RoleRank`].
    pub owner_id: UserId,
}

impl Guild {
    /// Build a guild from its id and owner.
    pub fn new(id: GuildId, owner_id: UserId) -> Self {
        Self { id, owner_id }
    }

    /// Whether the given user is the guild owner.
    pub fn is_owner(&self, id: UserId) -> bool {
        self.owner_id == id
    }
}
