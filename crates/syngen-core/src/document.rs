//! JSON document records of the export tree.
//!
//! These are the on-disk shapes of `users.json`, `channels.json` and the
//! per-day message files. They are kept separate from the model so the model
//! can stay free of presentation-only fields (`team_id`, derived avatar URLs,
//! always-false flags).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Channel, Message, MessageType, Reply, User};
use crate::timestamp::Timestamp;

/// Team identifier stamped on every exported user.
pub const TEAM_ID: &str = "T012345678";

/// Gravatar identicon URL for an avatar hash at a given pixel size.
pub fn avatar_url(hash: &str, size: u32) -> String {
    format!("https://secure.gravatar.com/avatar/{hash}.jpg?s={size}&d=identicon")
}

/// Entry of `users.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserRecord {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub real_name: String,
    pub profile: ProfileRecord,
    pub is_admin: bool,
    /// Mirrors `is_admin`.
    pub is_owner: bool,
    pub is_bot: bool,
    pub deleted: bool,
}

/// Nested profile of a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileRecord {
    pub email: String,
    pub real_name: String,
    pub display_name: String,
    pub avatar_hash: String,
    pub image_original: String,
    pub image_24: String,
    pub image_32: String,
    pub image_48: String,
    pub image_72: String,
    pub image_192: String,
    pub image_512: String,
    pub image_1024: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        let hash = user.avatar_hash.as_str();
        Self {
            id: user.id.clone(),
            team_id: TEAM_ID.to_string(),
            name: user.name.clone(),
            real_name: user.real_name.clone(),
            profile: ProfileRecord {
                email: user.email.clone(),
                real_name: user.real_name.clone(),
                display_name: user.name.clone(),
                avatar_hash: hash.to_string(),
                image_original: avatar_url(hash, 1024),
                image_24: avatar_url(hash, 24),
                image_32: avatar_url(hash, 32),
                image_48: avatar_url(hash, 48),
                image_72: avatar_url(hash, 72),
                image_192: avatar_url(hash, 192),
                image_512: avatar_url(hash, 512),
                image_1024: avatar_url(hash, 1024),
            },
            is_admin: user.is_admin,
            is_owner: user.is_admin,
            is_bot: user.is_bot,
            deleted: false,
        }
    }
}

impl UserRecord {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            real_name: self.real_name,
            email: self.profile.email,
            avatar_hash: self.profile.avatar_hash,
            is_admin: self.is_admin,
            is_bot: self.is_bot,
        }
    }
}

/// Entry of `channels.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChannelRecord {
    pub id: String,
    pub name: String,
    /// Epoch seconds.
    pub created: i64,
    pub creator: String,
    pub is_archived: bool,
    pub is_general: bool,
    pub members: Vec<String>,
}

impl From<&Channel> for ChannelRecord {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.clone(),
            name: channel.name.clone(),
            created: channel.created,
            creator: channel.creator.clone(),
            is_archived: false,
            is_general: false,
            members: channel.members.clone(),
        }
    }
}

impl ChannelRecord {
    pub fn into_channel(self) -> Channel {
        Channel {
            id: self.id,
            name: self.name,
            created: self.created,
            creator: self.creator,
            members: self.members,
        }
    }
}

/// `{user, ts}` entry of a parent's `replies` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReplyRecord {
    pub user: String,
    pub ts: Timestamp,
}

/// Entry of a `<channel>/<YYYY-MM-DD>.json` document.
///
/// Thread fields are omitted when absent: replies carry `thread_ts` and
/// `parent_user_id`; parents with at least one reply carry `thread_ts` and
/// the reply summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MessageRecord {
    pub user: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub ts: Timestamp,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_reply: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_users_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<ReplyRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        let mut record = Self {
            user: message.user.clone(),
            kind: message.kind,
            ts: message.ts,
            text: message.text.clone(),
            thread_ts: message.thread_ts,
            parent_user_id: message.parent_user_id.clone(),
            reply_count: None,
            latest_reply: None,
            reply_users_count: None,
            reply_users: None,
            replies: None,
            is_locked: None,
            subscribed: None,
        };

        if message.thread_ts.is_some() && !message.replies.is_empty() {
            let reply_users: Vec<String> = message
                .reply_users()
                .into_iter()
                .map(str::to_string)
                .collect();
            record.reply_count = Some(message.reply_count());
            record.latest_reply = message.latest_reply();
            record.reply_users_count = Some(reply_users.len());
            record.reply_users = Some(reply_users);
            record.replies = Some(
                message
                    .replies
                    .iter()
                    .map(|reply| ReplyRecord {
                        user: reply.user.clone(),
                        ts: reply.ts,
                    })
                    .collect(),
            );
            record.is_locked = Some(false);
            record.subscribed = Some(false);
        }

        record
    }
}

impl MessageRecord {
    /// Rebuild the model message; the channel is implied by the file location.
    pub fn into_message(self, channel: &str) -> Message {
        Message {
            user: self.user,
            channel: channel.to_string(),
            kind: self.kind,
            ts: self.ts,
            text: self.text,
            thread_ts: self.thread_ts,
            parent_user_id: self.parent_user_id,
            replies: self
                .replies
                .unwrap_or_default()
                .into_iter()
                .map(|reply| Reply {
                    user: reply.user,
                    ts: reply.ts,
                })
                .collect(),
        }
    }
}
