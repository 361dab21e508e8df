use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier (`U` + 10 alphanumerics).
    pub id: String,
    /// Username, `first.last` in lowercase.
    pub name: String,
    pub real_name: String,
    pub email: String,
    /// Hash used to derive gravatar URLs at every profile image size.
    pub avatar_hash: String,
    pub is_admin: bool,
    pub is_bot: bool,
}

/// A channel and its membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Stable identifier (`C` + 10 alphanumerics).
    pub id: String,
    /// Channel name; also the name of its directory in the export tree.
    pub name: String,
    /// Creation time in epoch seconds.
    pub created: i64,
    /// Identifier of the creating user. Always present in `members`.
    pub creator: String,
    /// Member user identifiers, creator first.
    pub members: Vec<String>,
}

impl Channel {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|member| member == user_id)
    }
}

/// Type tag carried by every exported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Message,
}

/// Author and timestamp of a thread reply, denormalized onto the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub user: String,
    pub ts: Timestamp,
}

/// A channel message, optionally part of a thread.
///
/// A thread parent has `thread_ts == Some(ts)`; a reply has `thread_ts` set to
/// its parent's timestamp and `parent_user_id` set to the parent's author.
/// Reply records live only on the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub user: String,
    pub channel: String,
    pub kind: MessageType,
    pub ts: Timestamp,
    pub text: String,
    pub thread_ts: Option<Timestamp>,
    pub parent_user_id: Option<String>,
    pub replies: Vec<Reply>,
}

impl Message {
    pub fn new(
        user: impl Into<String>,
        channel: impl Into<String>,
        ts: Timestamp,
        text: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            channel: channel.into(),
            kind: MessageType::Message,
            ts,
            text: text.into(),
            thread_ts: None,
            parent_user_id: None,
            replies: Vec::new(),
        }
    }

    pub fn is_reply(&self) -> bool {
        self.thread_ts.is_some() && self.parent_user_id.is_some()
    }

    pub fn is_thread_parent(&self) -> bool {
        self.parent_user_id.is_none() && self.thread_ts == Some(self.ts)
    }

    /// Mark this message as the root of a new thread.
    pub fn start_thread(&mut self) {
        self.thread_ts = Some(self.ts);
    }

    /// Link this message under `parent` as a reply.
    pub fn reply_to(&mut self, parent_ts: Timestamp, parent_user: &str) {
        self.thread_ts = Some(parent_ts);
        self.parent_user_id = Some(parent_user.to_string());
    }

    pub fn push_reply(&mut self, user: impl Into<String>, ts: Timestamp) {
        self.replies.push(Reply {
            user: user.into(),
            ts,
        });
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    pub fn latest_reply(&self) -> Option<Timestamp> {
        self.replies.iter().map(|reply| reply.ts).max()
    }

    /// Distinct reply authors in first-seen order.
    pub fn reply_users(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.replies
            .iter()
            .map(|reply| reply.user.as_str())
            .filter(|user| seen.insert(*user))
            .collect()
    }
}

/// A complete generated workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub users: Vec<User>,
    pub channels: Vec<Channel>,
    /// Messages in ascending timestamp order.
    pub messages: Vec<Message>,
}

impl Workspace {
    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.id == id)
    }

    pub fn thread_parents(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|message| message.is_thread_parent() && !message.replies.is_empty())
    }

    pub fn thread_replies(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|message| message.is_reply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_users_keep_first_seen_order() {
        let mut parent = Message::new("U1", "C1", Timestamp::from_secs(10), "hello");
        parent.start_thread();
        parent.push_reply("U2", Timestamp::from_secs(11));
        parent.push_reply("U3", Timestamp::from_secs(12));
        parent.push_reply("U2", Timestamp::from_secs(13));
        parent.push_reply("U1", Timestamp::from_secs(14));

        assert_eq!(parent.reply_users(), vec!["U2", "U3", "U1"]);
        assert_eq!(parent.reply_count(), 4);
        assert_eq!(parent.latest_reply(), Some(Timestamp::from_secs(14)));
        assert!(parent.is_thread_parent());
        assert!(!parent.is_reply());
    }

    #[test]
    fn reply_links_to_parent() {
        let mut reply = Message::new("U2", "C1", Timestamp::from_secs(11), "sure");
        reply.reply_to(Timestamp::from_secs(10), "U1");

        assert!(reply.is_reply());
        assert!(!reply.is_thread_parent());
        assert_eq!(reply.thread_ts, Some(Timestamp::from_secs(10)));
        assert_eq!(reply.parent_user_id.as_deref(), Some("U1"));
    }
}
