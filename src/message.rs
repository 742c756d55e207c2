//! Message and outbound payload types.
//!
//! [`Message`] is the crate's view of a triggering chat message: just the
//! fields the moderation helpers consult. [`Outgoing`] and [`Embed`] are the
//! payloads handed to the [`Gateway`](crate::gateway::Gateway) for delivery;
//! both are wire-shaped and serde-serializable so gateway implementations
//! can forward them to their platform API as-is.

use crate::actor::{Actor, ChannelId, Guild};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A received chat message, as seen by command handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The actor who sent the message. A [`Actor::Member`] when the message
    /// was sent inside a guild.
    pub author: Actor,
    /// Channel the message was sent to.
    pub channel: ChannelId,
    /// Guild the channel belongs to, or `None` for direct messages.
    pub guild: Option<Guild>,
    /// Actors mentioned in the message, in order of appearance.
    pub mentions: Vec<Actor>,
    /// Raw text content.
    pub content: String,
}

/// An outbound payload: plain text, a rich embed, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outgoing {
    /// Plain text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Rich-content embed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
}

impl Outgoing {
    /// Plain text payload.
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), embed: None }
    }

    /// Embed-only payload.
    pub fn embed(embed: Embed) -> Self {
        Self { content: None, embed: Some(embed) }
    }

    /// Attach an embed to this payload.
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }
}

impl From<Embed> for Outgoing {
    fn from(embed: Embed) -> Self {
        Self::embed(embed)
    }
}

/// A rich-content embed, built up field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    /// Embed title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link the title points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// RGB color, `0xRRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Timestamp rendered in the embed footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Name/value field list.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// An empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the title link.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the accent color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the footer timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Append a non-inline field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }
}

/// A single name/value pair inside an [`Embed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field renders inline with its neighbors.
    #[serde(default)]
    pub inline: bool,
}
