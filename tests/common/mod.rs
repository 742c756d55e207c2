//! Shared fixtures for integration tests.
//!
//! Provides a recording gateway plus builders for guild members and
//! triggering messages.

use async_trait::async_trait;
use modctx::{
    Actor, ChannelId, Context, Gateway, Guild, GuildId, Member, Message, Outgoing, RoleRank, User,
    UserId,
};
use std::sync::{Arc, Mutex};

/// Channel every fixture message is "sent" to.
pub const TEST_CHANNEL: ChannelId = ChannelId(100);

/// Gateway that records every send instead of delivering it.
#[derive(Default)]
pub struct RecordingGateway {
    pub directs: Mutex<Vec<(UserId, Outgoing)>>,
    pub channel_sends: Mutex<Vec<(ChannelId, Outgoing)>>,
    /// When set, direct sends fail instead of recording.
    pub refuse_directs: bool,
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn send_direct(&self, recipient: UserId, payload: Outgoing) -> anyhow::Result<()> {
        if self.refuse_directs {
            anyhow::bail!("delivery refused");
        }
        self.directs.lock().unwrap().push((recipient, payload));
        Ok(())
    }

    async fn send_channel(
        &self,
        channel: ChannelId,
        payload: Outgoing,
    ) -> anyhow::Result<Message> {
        self.channel_sends.lock().unwrap().push((channel, payload.clone()));
        Ok(Message {
            author: Actor::User(User::new(UserId(0), "bot")),
            channel,
            guild: None,
            mentions: Vec::new(),
            content: payload.content.unwrap_or_default(),
        })
    }
}

/// A guild member whose name is derived from its id.
pub fn member(id: u64, rank: u32) -> Member {
    Member::new(User::new(UserId(id), format!("user{id}")), RoleRank(rank))
}

/// A context for a command invoked in a guild owned by user 1, with the
/// given author and mentioned members. The bot identity is user 9 at
/// rank 8.
pub fn guild_context(
    gateway: Arc<RecordingGateway>,
    author: Member,
    mentions: Vec<Member>,
) -> Context {
    let message = Message {
        author: Actor::Member(author),
        channel: TEST_CHANNEL,
        guild: Some(Guild::new(GuildId(1), UserId(1))),
        mentions: mentions.into_iter().map(Actor::Member).collect(),
        content: "!warn".into(),
    };
    Context::new(gateway, message, Actor::Member(member(9, 8)))
}
