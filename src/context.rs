//! Per-invocation command context.
//!
//! A [`Context`] is created by the embedding framework for each dispatched
//! command and discarded when the handler returns. It tracks which actors
//! the command is targeting, answers role-hierarchy questions about them,
//! and offers thin send conveniences over the [`Gateway`].
//!
//! Hierarchy checks only make sense inside a guild and only between guild
//! members; violations surface as [`HierarchyError`] rather than being
//! silently skipped.

use crate::actor::{Actor, Member, User};
use crate::error::HierarchyError;
use crate::gateway::Gateway;
use crate::message::{Embed, Message, Outgoing};
use std::sync::Arc;
use tracing::debug;

/// Anything that can be normalized into an ordered target sequence.
///
/// This is the single normalization point shared by target assignment,
/// hierarchy checking, and whispering: a lone actor becomes a one-element
/// sequence, a sequence is taken verbatim (no dedup, no reordering, no
/// element validation).
pub trait IntoTargets {
    /// Normalize into an ordered sequence of actors.
    fn into_targets(self) -> Vec<Actor>;
}

impl IntoTargets for Actor {
    fn into_targets(self) -> Vec<Actor> {
        vec![self]
    }
}

impl IntoTargets for &Actor {
    fn into_targets(self) -> Vec<Actor> {
        vec![self.clone()]
    }
}

impl IntoTargets for User {
    fn into_targets(self) -> Vec<Actor> {
        vec![self.into()]
    }
}

impl IntoTargets for Member {
    fn into_targets(self) -> Vec<Actor> {
        vec![self.into()]
    }
}

impl IntoTargets for Vec<Actor> {
    fn into_targets(self) -> Vec<Actor> {
        self
    }
}

impl IntoTargets for &[Actor] {
    fn into_targets(self) -> Vec<Actor> {
        self.to_vec()
    }
}

impl IntoTargets for Vec<Member> {
    fn into_targets(self) -> Vec<Actor> {
        self.into_iter().map(Actor::from).collect()
    }
}

/// Outcome of a hierarchy check.
///
/// `Above` means the privileged actor outranks (or ties) every candidate.
/// `Blocked` carries the *first* candidate, in sequence order, that the
/// privileged actor does not outrank, so callers can name the offender
/// in their error reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Standing {
    /// No blocking candidate was found.
    Above,
    /// The first candidate the privileged actor does not outrank.
    Blocked(Actor),
}

impl Standing {
    /// Whether the privileged actor outranks every candidate.
    pub fn is_above(&self) -> bool {
        matches!(self, Self::Above)
    }

    /// The blocking actor, if any.
    pub fn blocker(&self) -> Option<&Actor> {
        match self {
            Self::Above => None,
            Self::Blocked(actor) => Some(actor),
        }
    }
}

/// The per-command invocation context.
///
/// Owned exclusively by one handler invocation; the target set is never
/// shared across concurrent invocations, which is why mutation goes through
/// `&mut self` and no locking is involved.
pub struct Context {
    gateway: Arc<dyn Gateway>,
    /// The message that triggered the command.
    pub message: Message,
    /// The bot's own identity, an [`Actor::Member`] when the invocation
    /// happens inside a guild the bot belongs to.
    pub me: Actor,
    targets: Vec<Actor>,
}

impl Context {
    /// Build a context for one command invocation.
    ///
    /// The target set defaults to the actors mentioned in the triggering
    /// message, captured here once.
    pub fn new(gateway: Arc<dyn Gateway>, message: Message, me: Actor) -> Self {
        let targets = message.mentions.clone();
        Self { gateway, message, me, targets }
    }

    /// The actor that invoked the command.
    pub fn author(&self) -> &Actor {
        &self.message.author
    }

    /// The guild this invocation belongs to, if any.
    pub fn guild(&self) -> Option<&crate::actor::Guild> {
        self.message.guild.as_ref()
    }

    // ------------------------------------------------------------------
    // Target resolution
    // ------------------------------------------------------------------

    /// The actors this command run is targeting, in insertion order.
    pub fn targets(&self) -> &[Actor] {
        &self.targets
    }

    /// Replace the target set. A lone actor is normalized into a
    /// one-element sequence; a sequence is stored verbatim.
    pub fn set_targets(&mut self, targets: impl IntoTargets) {
        self.targets = targets.into_targets();
    }

    /// Whether the invoking actor is among the targets.
    ///
    /// Equivalent to `is_user_target(author)` for every target
    /// configuration.
    pub fn is_author_target(&self) -> bool {
        self.is_user_target(&self.message.author)
    }

    /// Whether the given actor is among the targets (id equality).
    pub fn is_user_target(&self, user: &Actor) -> bool {
        self.targets.contains(user)
    }

    // ------------------------------------------------------------------
    // Hierarchy checking
    // ------------------------------------------------------------------

    /// Core comparison: does `privileged` outrank every candidate?
    ///
    /// The guild owner outranks everyone unconditionally, and can be
    /// outranked by nobody but itself; ownership is checked by identity
    /// before any rank comparison, so the owner never needs a sentinel
    /// rank. Candidates are examined strictly in sequence order and the
    /// first verdict wins: an owner or higher-ranked candidate blocks, a
    /// rank-less candidate is an error even if a later candidate would
    /// have blocked anyway.
    fn above_check(
        &self,
        privileged: &Member,
        candidates: &[Actor],
    ) -> Result<Standing, HierarchyError> {
        let guild = self.guild().ok_or(HierarchyError::NoGuild)?;

        if guild.is_owner(privileged.id()) {
            return Ok(Standing::Above);
        }

        for candidate in candidates {
            // Identity check first: a candidate equal to the owner blocks
            // regardless of its variant or rank data.
            if guild.is_owner(candidate.id()) {
                return Ok(Standing::Blocked(candidate.clone()));
            }
            let member = candidate.as_member().ok_or(HierarchyError::NotMember {
                kind: candidate.kind(),
                id: candidate.id(),
            })?;
            if member.top_role > privileged.top_role {
                return Ok(Standing::Blocked(candidate.clone()));
            }
        }

        Ok(Standing::Above)
    }

    fn require_member<'a>(&self, actor: &'a Actor) -> Result<&'a Member, HierarchyError> {
        actor.as_member().ok_or(HierarchyError::NotMember {
            kind: actor.kind(),
            id: actor.id(),
        })
    }

    /// Check whether the invoking actor is above all current targets.
    pub fn is_author_above(&self) -> Result<Standing, HierarchyError> {
        let author = self.require_member(&self.message.author)?;
        self.above_check(author, &self.targets)
    }

    /// Check whether the invoking actor is above all given candidates.
    pub fn is_author_above_all(
        &self,
        candidates: impl IntoTargets,
    ) -> Result<Standing, HierarchyError> {
        let author = self.require_member(&self.message.author)?;
        self.above_check(author, &candidates.into_targets())
    }

    /// Check whether the bot itself is above all current targets.
    pub fn is_bot_above(&self) -> Result<Standing, HierarchyError> {
        let me = self.require_member(&self.me)?;
        self.above_check(me, &self.targets)
    }

    /// Check whether the bot itself is above all given candidates.
    pub fn is_bot_above_all(
        &self,
        candidates: impl IntoTargets,
    ) -> Result<Standing, HierarchyError> {
        let me = self.require_member(&self.me)?;
        self.above_check(me, &candidates.into_targets())
    }

    // ------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------

    /// Direct-message all current targets, fire-and-forget.
    ///
    /// Must be called from within a Tokio runtime; every send is scheduled
    /// on its own task before this returns, and no send is awaited.
    /// Delivery failures belong to the gateway implementation.
    pub fn whisper(&self, payload: Outgoing) {
        self.dispatch_whispers(self.targets.clone(), payload);
    }

    /// Direct-message the given actors, fire-and-forget. A lone actor is
    /// normalized exactly as in [`Context::set_targets`].
    pub fn whisper_to(&self, users: impl IntoTargets, payload: Outgoing) {
        self.dispatch_whispers(users.into_targets(), payload);
    }

    fn dispatch_whispers(&self, users: Vec<Actor>, payload: Outgoing) {
        for actor in users {
            let gateway = Arc::clone(&self.gateway);
            let payload = payload.clone();
            let recipient = actor.id();
            debug!(%recipient, "dispatching whisper");
            tokio::spawn(async move {
                // Failures are governed by the gateway's own error
                // handling; nothing to surface at this layer.
                let _ = gateway.send_direct(recipient, payload).await;
            });
        }
    }

    /// Send a payload to the channel the command was invoked in.
    pub async fn send(&self, payload: Outgoing) -> anyhow::Result<Message> {
        self.gateway.send_channel(self.message.channel, payload).await
    }

    /// Build-and-send shorthand for an embed-only payload.
    pub async fn send_embed(&self, embed: Embed) -> anyhow::Result<Message> {
        self.send(Outgoing::embed(embed)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ChannelId, Guild, GuildId, RoleRank, UserId};
    use async_trait::async_trait;

    struct NullGateway;

    #[async_trait]
    impl Gateway for NullGateway {
        async fn send_direct(&self, _: UserId, _: Outgoing) -> anyhow::Result<()> {
            Ok(())
        }

        async fn send_channel(&self, channel: ChannelId, payload: Outgoing) -> anyhow::Result<Message> {
            Ok(Message {
                author: Actor::User(User::new(UserId(0), "bot")),
                channel,
                guild: None,
                mentions: Vec::new(),
                content: payload.content.unwrap_or_default(),
            })
        }
    }

    fn member(id: u64, rank: u32) -> Member {
        Member::new(User::new(UserId(id), format!("user{id}")), RoleRank(rank))
    }

    fn plain(id: u64) -> Actor {
        Actor::User(User::new(UserId(id), format!("user{id}")))
    }

    /// Guild owned by user 6; author and mentions taken from the fixtures
    /// used throughout: 7 = admin, 6 = owner, 5 = mod, 4 = trainee, with
    /// the rank equal to the id.
    fn ctx(author_id: u64, mention_ids: &[u64]) -> Context {
        let guild = Guild::new(GuildId(1), UserId(6));
        let message = Message {
            author: Actor::Member(member(author_id, author_id as u32)),
            channel: ChannelId(100),
            guild: Some(guild),
            mentions: mention_ids
                .iter()
                .map(|&id| Actor::Member(member(id, id as u32)))
                .collect(),
            content: String::new(),
        };
        Context::new(
            Arc::new(NullGateway),
            message,
            Actor::Member(member(99, 5)),
        )
    }

    #[test]
    fn test_author_above_matrix() {
        // Owner acting on a mod.
        assert!(ctx(6, &[5]).is_author_above().unwrap().is_above());
        // Mod trying to act on the owner.
        assert!(!ctx(5, &[6]).is_author_above().unwrap().is_above());
        // Trainee targeting an admin (and mentioning itself).
        assert!(!ctx(4, &[7, 4]).is_author_above().unwrap().is_above());
        // Admin with a higher rank than the owner still cannot act on them.
        assert!(!ctx(7, &[6]).is_author_above().unwrap().is_above());
        // Owner acting on that admin.
        assert!(ctx(6, &[7]).is_author_above().unwrap().is_above());
    }

    #[test]
    fn test_blocker_is_first_blocking_candidate() {
        let ctx = ctx(5, &[]);
        let candidates = vec![
            Actor::Member(member(10, 3)),
            Actor::Member(member(11, 7)),
            Actor::Member(member(12, 8)),
        ];
        let standing = ctx.is_author_above_all(candidates).unwrap();
        assert_eq!(standing.blocker().map(Actor::id), Some(UserId(11)));
    }

    #[test]
    fn test_owner_privileged_short_circuits_over_malformed_candidates() {
        // The owner outranks everyone before candidates are even looked at,
        // so a rank-less candidate does not get the chance to error.
        let standing = ctx(6, &[]).is_author_above_all(plain(7)).unwrap();
        assert_eq!(standing, Standing::Above);
    }

    #[test]
    fn test_owner_candidate_blocks() {
        let standing = ctx(5, &[6]).is_author_above().unwrap();
        assert_eq!(standing.blocker().map(Actor::id), Some(UserId(6)));
    }

    #[test]
    fn test_plain_owner_candidate_blocks_without_error() {
        // Ownership is an identity check, so even a rank-less actor equal
        // to the owner blocks instead of erroring.
        let standing = ctx(5, &[]).is_author_above_all(plain(6)).unwrap();
        assert_eq!(standing, Standing::Blocked(plain(6)));
    }

    #[test]
    fn test_rankless_candidate_errors() {
        let err = ctx(5, &[]).is_author_above_all(plain(10)).unwrap_err();
        assert_eq!(err, HierarchyError::NotMember { kind: "user", id: UserId(10) });
    }

    #[test]
    fn test_rankless_candidate_errors_before_later_owner_candidate() {
        // Sequence order decides: the malformed candidate is reached first,
        // even though the owner further down would have blocked anyway.
        let err = ctx(5, &[])
            .is_author_above_all(vec![plain(10), plain(6)])
            .unwrap_err();
        assert_eq!(err, HierarchyError::NotMember { kind: "user", id: UserId(10) });
    }

    #[test]
    fn test_rankless_author_errors() {
        let mut ctx = ctx(5, &[4]);
        ctx.message.author = plain(5);
        let err = ctx.is_author_above().unwrap_err();
        assert_eq!(err, HierarchyError::NotMember { kind: "user", id: UserId(5) });
    }

    #[test]
    fn test_rankless_bot_errors() {
        let mut ctx = ctx(6, &[5]);
        ctx.me = plain(99);
        let err = ctx.is_bot_above().unwrap_err();
        assert_eq!(err, HierarchyError::NotMember { kind: "user", id: UserId(99) });
    }

    #[test]
    fn test_bot_above_uses_bot_rank() {
        // Bot fixture has rank 5: above the trainee, below the admin.
        assert!(ctx(6, &[4]).is_bot_above().unwrap().is_above());
        assert!(!ctx(6, &[7]).is_bot_above().unwrap().is_above());
    }

    #[test]
    fn test_no_guild_errors() {
        let mut ctx = ctx(6, &[5]);
        ctx.message.guild = None;
        assert_eq!(ctx.is_author_above().unwrap_err(), HierarchyError::NoGuild);
        assert_eq!(ctx.is_bot_above().unwrap_err(), HierarchyError::NoGuild);
    }

    #[test]
    fn test_empty_candidates_are_above() {
        let standing = ctx(4, &[]).is_author_above_all(Vec::<Actor>::new()).unwrap();
        assert_eq!(standing, Standing::Above);
    }

    #[test]
    fn test_targets_default_to_mentions() {
        let ctx = ctx(6, &[5, 7]);
        let ids: Vec<UserId> = ctx.targets().iter().map(Actor::id).collect();
        assert_eq!(ids, vec![UserId(5), UserId(7)]);
    }

    #[test]
    fn test_set_targets_normalizes_lone_actor() {
        let mut ctx = ctx(6, &[5]);
        ctx.set_targets(plain(4));
        assert_eq!(ctx.targets(), &[plain(4)]);
        assert!(!ctx.is_user_target(&plain(5)));
    }

    #[test]
    fn test_set_targets_preserves_order_and_duplicates() {
        let mut ctx = ctx(6, &[]);
        ctx.set_targets(vec![plain(5), plain(7), plain(5)]);
        let ids: Vec<UserId> = ctx.targets().iter().map(Actor::id).collect();
        assert_eq!(ids, vec![UserId(5), UserId(7), UserId(5)]);
    }

    #[test]
    fn test_author_target_matches_is_user_target() {
        let no = ctx(6, &[5]);
        assert!(!no.is_author_target());
        assert_eq!(no.is_author_target(), no.is_user_target(no.author()));

        let yes = ctx(4, &[7, 4]);
        assert!(yes.is_author_target());
        assert_eq!(yes.is_author_target(), yes.is_user_target(yes.author()));
    }

    #[tokio::test]
    async fn test_send_embed_forwards_to_channel() {
        let ctx = ctx(6, &[]);
        let sent = ctx
            .send_embed(Embed::new().with_title("notice"))
            .await
            .unwrap();
        assert_eq!(sent.channel, ChannelId(100));
    }
}
