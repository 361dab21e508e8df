use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{Error, Result};
use crate::model::{Message, Workspace};
use crate::timestamp::Timestamp;

/// Longest accepted user or channel identifier.
pub const MAX_ID_LEN: usize = 11;
/// Longest accepted username, real name or channel name.
pub const MAX_NAME_LEN: usize = 63;
/// Longest accepted email address.
pub const MAX_EMAIL_LEN: usize = 127;
/// Exact length of an avatar hash.
pub const AVATAR_HASH_LEN: usize = 12;

/// Validate referential and temporal consistency of a workspace.
///
/// This checks:
/// - unique user/channel identifiers and channel names, within length bounds
/// - channel creators and members resolve to users, creator is a member
/// - messages are sorted, reference existing channels, and are authored by members
/// - no two messages of a channel share a timestamp
/// - every reply resolves to exactly one earlier parent that lists it
pub fn validate_workspace(workspace: &Workspace) -> Result<()> {
    let user_ids = validate_users(workspace)?;
    let members_by_channel = validate_channels(workspace, &user_ids)?;
    validate_messages(workspace, &members_by_channel)
}

fn validate_users(workspace: &Workspace) -> Result<BTreeSet<&str>> {
    let mut ids = BTreeSet::new();
    for user in &workspace.users {
        check_len("user id", &user.id, MAX_ID_LEN)?;
        check_len("user name", &user.name, MAX_NAME_LEN)?;
        check_len("user real name", &user.real_name, MAX_NAME_LEN)?;
        check_len("user email", &user.email, MAX_EMAIL_LEN)?;
        if user.avatar_hash.chars().count() != AVATAR_HASH_LEN {
            return Err(Error::InvalidWorkspace(format!(
                "avatar hash of {} must be {AVATAR_HASH_LEN} characters",
                user.id
            )));
        }
        if !ids.insert(user.id.as_str()) {
            return Err(Error::InvalidWorkspace(format!(
                "duplicate user id: {}",
                user.id
            )));
        }
    }
    Ok(ids)
}

fn validate_channels<'a>(
    workspace: &'a Workspace,
    user_ids: &BTreeSet<&str>,
) -> Result<BTreeMap<&'a str, HashSet<&'a str>>> {
    let mut members_by_channel = BTreeMap::new();
    let mut names = BTreeSet::new();

    for channel in &workspace.channels {
        check_len("channel id", &channel.id, MAX_ID_LEN)?;
        check_len("channel name", &channel.name, MAX_NAME_LEN)?;
        if !names.insert(channel.name.as_str()) {
            return Err(Error::InvalidWorkspace(format!(
                "duplicate channel name: {}",
                channel.name
            )));
        }

        if !user_ids.contains(channel.creator.as_str()) {
            return Err(Error::InvalidWorkspace(format!(
                "creator of {} not found: {}",
                channel.id, channel.creator
            )));
        }

        if channel.members.is_empty() || channel.members.len() > user_ids.len() {
            return Err(Error::InvalidWorkspace(format!(
                "channel {} has {} members for {} users",
                channel.id,
                channel.members.len(),
                user_ids.len()
            )));
        }

        let mut members = HashSet::new();
        for member in &channel.members {
            if !user_ids.contains(member.as_str()) {
                return Err(Error::InvalidWorkspace(format!(
                    "member of {} not found: {member}",
                    channel.id
                )));
            }
            if !members.insert(member.as_str()) {
                return Err(Error::InvalidWorkspace(format!(
                    "duplicate member in {}: {member}",
                    channel.id
                )));
            }
        }

        if !members.contains(channel.creator.as_str()) {
            return Err(Error::InvalidWorkspace(format!(
                "creator of {} is not a member",
                channel.id
            )));
        }

        if members_by_channel
            .insert(channel.id.as_str(), members)
            .is_some()
        {
            return Err(Error::InvalidWorkspace(format!(
                "duplicate channel id: {}",
                channel.id
            )));
        }
    }

    Ok(members_by_channel)
}

fn validate_messages(
    workspace: &Workspace,
    members_by_channel: &BTreeMap<&str, HashSet<&str>>,
) -> Result<()> {
    let mut by_position: HashMap<(&str, Timestamp), &Message> = HashMap::new();
    let mut previous: Option<Timestamp> = None;

    for message in &workspace.messages {
        if previous.is_some_and(|prev| message.ts < prev) {
            return Err(Error::InvalidWorkspace(format!(
                "messages out of order at {}",
                message.ts
            )));
        }
        previous = Some(message.ts);

        let members = members_by_channel
            .get(message.channel.as_str())
            .ok_or_else(|| {
                Error::InvalidWorkspace(format!(
                    "message {} references unknown channel {}",
                    message.ts, message.channel
                ))
            })?;
        if !members.contains(message.user.as_str()) {
            return Err(Error::InvalidWorkspace(format!(
                "author {} of message {} is not a member of {}",
                message.user, message.ts, message.channel
            )));
        }

        if by_position
            .insert((message.channel.as_str(), message.ts), message)
            .is_some()
        {
            return Err(Error::InvalidWorkspace(format!(
                "duplicate timestamp {} in channel {}",
                message.ts, message.channel
            )));
        }
    }

    for message in &workspace.messages {
        validate_thread_fields(message, &by_position)?;
    }

    Ok(())
}

fn validate_thread_fields(
    message: &Message,
    by_position: &HashMap<(&str, Timestamp), &Message>,
) -> Result<()> {
    if message.is_reply() {
        let thread_ts = message.thread_ts.unwrap_or_default();
        let parent = by_position
            .get(&(message.channel.as_str(), thread_ts))
            .ok_or_else(|| {
                Error::InvalidWorkspace(format!(
                    "reply {} references missing parent {thread_ts} in {}",
                    message.ts, message.channel
                ))
            })?;
        if !parent.is_thread_parent() || parent.ts >= message.ts {
            return Err(Error::InvalidWorkspace(format!(
                "reply {} does not follow a thread parent",
                message.ts
            )));
        }
        if message.parent_user_id.as_deref() != Some(parent.user.as_str()) {
            return Err(Error::InvalidWorkspace(format!(
                "reply {} names the wrong parent author",
                message.ts
            )));
        }
        if !parent
            .replies
            .iter()
            .any(|reply| reply.ts == message.ts && reply.user == message.user)
        {
            return Err(Error::InvalidWorkspace(format!(
                "reply {} is not listed on parent {}",
                message.ts, parent.ts
            )));
        }
        if !message.replies.is_empty() {
            return Err(Error::InvalidWorkspace(format!(
                "reply {} carries replies of its own",
                message.ts
            )));
        }
        return Ok(());
    }

    if message.thread_ts.is_some() && !message.is_thread_parent() {
        return Err(Error::InvalidWorkspace(format!(
            "message {} has thread_ts without a parent author",
            message.ts
        )));
    }
    if message.parent_user_id.is_some() {
        return Err(Error::InvalidWorkspace(format!(
            "message {} has parent_user_id without thread_ts",
            message.ts
        )));
    }
    if !message.replies.is_empty() && !message.is_thread_parent() {
        return Err(Error::InvalidWorkspace(format!(
            "message {} lists replies but does not start a thread",
            message.ts
        )));
    }

    for reply in &message.replies {
        let child = by_position
            .get(&(message.channel.as_str(), reply.ts))
            .ok_or_else(|| {
                Error::InvalidWorkspace(format!(
                    "parent {} lists missing reply {}",
                    message.ts, reply.ts
                ))
            })?;
        if child.thread_ts != Some(message.ts) || child.user != reply.user {
            return Err(Error::InvalidWorkspace(format!(
                "parent {} lists reply {} that belongs elsewhere",
                message.ts, reply.ts
            )));
        }
    }

    Ok(())
}

fn check_len(what: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(Error::InvalidWorkspace(format!(
            "{what} '{value}' must be 1..={max} characters"
        )));
    }
    Ok(())
}
