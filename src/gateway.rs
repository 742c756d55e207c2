//! The platform seam: outbound delivery.
//!
//! The embedding bot library supplies the transport; this crate only needs
//! two async primitives. Delivery failures are carried as [`anyhow::Error`]
//! and pass through the helpers unmodified; this layer neither retries nor
//! interprets them.

use crate::actor::{ChannelId, UserId};
use crate::message::{Message, Outgoing};
use async_trait::async_trait;

/// Outbound message delivery, implemented by the embedding bot.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Deliver a direct message to a single user.
    async fn send_direct(&self, recipient: UserId, payload: Outgoing) -> anyhow::Result<()>;

    /// Deliver a payload to a channel, returning the sent message.
    async fn send_channel(&self, channel: ChannelId, payload: Outgoing)
    -> anyhow::Result<Message>;
}
