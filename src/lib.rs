//! # modctx
//!
//! Moderation-focused command context utilities for chat bot frameworks.
//!
//! The embedding framework parses messages and dispatches commands; this
//! crate supplies the per-invocation [`Context`] that moderation handlers
//! lean on:
//!
//! - **Target tracking**: which actors a command run is operating on,
//!   defaulting to the actors mentioned in the triggering message.
//! - **Hierarchy checks**: whether the invoking actor (or the bot itself)
//!   outranks every target, with the guild owner treated as implicitly
//!   supreme rather than given a sentinel rank.
//! - **Send conveniences**: fire-and-forget direct messages to the targets
//!   and an embed send shorthand, delegating to the [`Gateway`] seam the
//!   embedding bot implements.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use modctx::{
//!     Actor, ChannelId, Context, Gateway, Guild, GuildId, Member, Message,
//!     Outgoing, RoleRank, User, UserId,
//! };
//!
//! struct Offline;
//!
//! #[async_trait::async_trait]
//! impl Gateway for Offline {
//!     async fn send_direct(&self, _: UserId, _: Outgoing) -> anyhow::Result<()> {
//!         anyhow::bail!("offline")
//!     }
//!     async fn send_channel(&self, _: ChannelId, _: Outgoing) -> anyhow::Result<Message> {
//!         anyhow::bail!("offline")
//!     }
//! }
//!
//! let owner = Member::new(User::new(UserId(1), "alice"), RoleRank(10));
//! let target = Member::new(User::new(UserId(2), "bob"), RoleRank(4));
//!
//! let message = Message {
//!     author: Actor::Member(owner),
//!     channel: ChannelId(1),
//!     guild: Some(Guild::new(GuildId(1), UserId(1))),
//!     mentions: vec![Actor::Member(target.clone())],
//!     content: "!kick @bob".into(),
//! };
//! let bot = Actor::Member(Member::new(User::new(UserId(9), "bot"), RoleRank(8)));
//!
//! let ctx = Context::new(Arc::new(Offline), message, bot);
//! assert!(ctx.is_user_target(&Actor::Member(target)));
//! assert!(ctx.is_author_above().unwrap().is_above());
//! assert!(ctx.is_bot_above().unwrap().is_above());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod actor;
pub mod context;
pub mod error;
pub mod gateway;
pub mod message;

pub use self::actor::{Actor, ChannelId, Guild, GuildId, Member, RoleRank, User, UserId};
pub use self::context::{Context, IntoTargets, Standing};
pub use self::error::HierarchyError;
pub use self::gateway::Gateway;
pub use self::message::{Embed, EmbedField, Message, Outgoing};
