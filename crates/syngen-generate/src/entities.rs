use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use syngen_core::{Channel, Message, Timestamp, User};

use crate::errors::GenerationError;
use crate::lexical;
use crate::sampling::gaussian_index;

const SECS_PER_DAY: i64 = 86_400;
const MESSAGE_WORDS: (usize, usize) = (3, 20);
const NAME_ATTEMPTS: usize = 32;

/// Time frame of a generated workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    /// Reference instant in epoch seconds.
    pub now: i64,
    /// Messages fall within this many days before `now`.
    pub window_days: u32,
    /// Channels are created at most this many days before `now`.
    pub channel_age_days: u32,
}

impl Timeline {
    /// Inclusive bounds of message timestamps.
    pub fn message_window(&self) -> (Timestamp, Timestamp) {
        let start = self
            .now
            .saturating_sub(i64::from(self.window_days) * SECS_PER_DAY);
        (Timestamp::from_secs(start), Timestamp::from_secs(self.now))
    }

    /// Inclusive bounds of channel creation times, ending where messages begin.
    pub fn creation_window(&self) -> (i64, i64) {
        let age = self.channel_age_days.max(self.window_days);
        let start = self.now.saturating_sub(i64::from(age) * SECS_PER_DAY);
        let end = self
            .now
            .saturating_sub(i64::from(self.window_days) * SECS_PER_DAY);
        (start, end)
    }
}

/// Generate `count` regular users with distinct identifiers.
pub fn generate_users<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<User> {
    let mut ids = HashSet::with_capacity(count);
    let mut users = Vec::with_capacity(count);
    for _ in 0..count {
        let id = unique_identifier(rng, "U", &mut ids);
        let person = lexical::person(rng);
        users.push(User {
            id,
            name: person.username,
            real_name: person.real_name,
            email: person.email,
            avatar_hash: lexical::avatar_hash(rng),
            is_admin: false,
            is_bot: false,
        });
    }
    users
}

/// Inclusive range of channel sizes for a workspace of `user_count` users.
///
/// Sizes are drawn from `[n/5, n/5 + n/2]` and then clamped to `[1, n]`.
pub fn membership_bounds(user_count: usize) -> (usize, usize) {
    let low = user_count / 5;
    let high = low + user_count / 2;
    let ceiling = user_count.max(1);
    (low.clamp(1, ceiling), high.clamp(1, ceiling))
}

/// Generate `count` channels with a random creator and sampled membership.
pub fn generate_channels<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    users: &[User],
    timeline: &Timeline,
) -> Result<Vec<Channel>, GenerationError> {
    if users.is_empty() {
        return Err(GenerationError::InvalidOptions(
            "channels need at least one user".to_string(),
        ));
    }

    let (created_start, created_end) = timeline.creation_window();
    let mut ids = HashSet::with_capacity(count);
    let mut names = HashSet::with_capacity(count);
    let mut channels = Vec::with_capacity(count);

    for _ in 0..count {
        let id = unique_identifier(rng, "C", &mut ids);
        let name = unique_channel_name(rng, &mut names);
        let created = rng.random_range(created_start..=created_end);
        let members = sample_members(rng, users);
        let creator = members[0].clone();
        debug!(channel = %name, members = members.len(), "channel generated");
        channels.push(Channel {
            id,
            name,
            created,
            creator,
            members,
        });
    }
    Ok(channels)
}

/// Generate `count` messages sorted by timestamp.
///
/// Channels are picked from a normal distribution centred on the middle of
/// `channels`, authors uniformly among the channel's members. Messages of one
/// channel never share a timestamp.
pub fn generate_messages<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    channels: &[Channel],
    timeline: &Timeline,
) -> Result<Vec<Message>, GenerationError> {
    let mut messages = Vec::new();
    messages.try_reserve_exact(count)?;
    if count == 0 {
        return Ok(messages);
    }
    if channels.is_empty() {
        return Err(GenerationError::InvalidOptions(
            "messages need at least one channel".to_string(),
        ));
    }

    let (start, end) = timeline.message_window();
    let (min_words, max_words) = MESSAGE_WORDS;
    for _ in 0..count {
        let channel = &channels[gaussian_index(rng, channels.len())];
        let author = channel.members.choose(rng).ok_or_else(|| {
            GenerationError::InvalidOptions(format!("channel '{}' has no members", channel.name))
        })?;
        let ts = lexical::timestamp(rng, start, end);
        let text = lexical::sentence(rng, min_words, max_words);
        messages.push(Message::new(author.as_str(), channel.id.as_str(), ts, text));
    }

    messages.sort_by_key(|message| message.ts);
    if separate_channel_collisions(&mut messages, (start, end)) > 0 {
        messages.sort_by_key(|message| message.ts);
    }
    Ok(messages)
}

/// Push same-channel duplicates forward to the next free microsecond.
///
/// Past the end of `window` the search continues from its start, so nudged
/// timestamps stay inside the window. Expects `messages` sorted by timestamp;
/// returns the number of nudged messages.
fn separate_channel_collisions(
    messages: &mut [Message],
    window: (Timestamp, Timestamp),
) -> usize {
    let (start, end) = window;
    let mut taken: HashMap<String, HashSet<Timestamp>> = HashMap::new();
    let mut nudged = 0;
    for message in messages.iter_mut() {
        let seen = taken.entry(message.channel.clone()).or_default();
        let mut ts = message.ts;
        while seen.contains(&ts) {
            ts = if ts >= end {
                start
            } else {
                ts.saturating_add_micros(1)
            };
        }
        if ts != message.ts {
            message.ts = ts;
            nudged += 1;
        }
        seen.insert(ts);
    }
    if nudged > 0 {
        debug!(nudged, "resolved same-channel timestamp collisions");
    }
    nudged
}

fn sample_members<R: Rng + ?Sized>(rng: &mut R, users: &[User]) -> Vec<String> {
    let raw_low = users.len() / 5;
    let raw_high = raw_low + users.len() / 2;
    let size = rng
        .random_range(raw_low..=raw_high)
        .clamp(1, users.len());

    let creator = rng.random_range(0..users.len());
    let mut chosen = HashSet::with_capacity(size);
    chosen.insert(creator);
    let mut members = Vec::with_capacity(size);
    members.push(users[creator].id.clone());

    while members.len() < size {
        let candidate = rng.random_range(0..users.len());
        if chosen.insert(candidate) {
            members.push(users[candidate].id.clone());
        }
    }
    members
}

fn unique_identifier<R: Rng + ?Sized>(
    rng: &mut R,
    prefix: &str,
    taken: &mut HashSet<String>,
) -> String {
    loop {
        let id = lexical::identifier(rng, prefix);
        if taken.insert(id.clone()) {
            return id;
        }
    }
}

fn unique_channel_name<R: Rng + ?Sized>(rng: &mut R, taken: &mut HashSet<String>) -> String {
    let mut name = lexical::channel_name(rng);
    for _ in 0..NAME_ATTEMPTS {
        if !taken.contains(&name) {
            break;
        }
        name = lexical::channel_name(rng);
    }

    let base = name.clone();
    let mut suffix = 2;
    while taken.contains(&name) {
        name = format!("{base}-{suffix}");
        suffix += 1;
    }
    taken.insert(name.clone());
    name
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn timeline() -> Timeline {
        Timeline {
            now: 1_760_000_000,
            window_days: 30,
            channel_age_days: 365,
        }
    }

    #[test]
    fn membership_bounds_follow_population() {
        assert_eq!(membership_bounds(1), (1, 1));
        assert_eq!(membership_bounds(3), (1, 1));
        assert_eq!(membership_bounds(10), (2, 7));
        assert_eq!(membership_bounds(100), (20, 70));
    }

    #[test]
    fn channels_include_creator_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let users = generate_users(&mut rng, 40);
        let channels = generate_channels(&mut rng, 60, &users, &timeline()).expect("channels");
        let (low, high) = membership_bounds(users.len());

        for channel in &channels {
            assert_eq!(channel.members[0], channel.creator);
            assert!((low..=high).contains(&channel.members.len()));
            let distinct: HashSet<&String> = channel.members.iter().collect();
            assert_eq!(distinct.len(), channel.members.len());
        }
        let names: HashSet<&String> = channels.iter().map(|c| &c.name).collect();
        assert_eq!(names.len(), channels.len());
    }

    #[test]
    fn channels_are_created_before_the_message_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let users = generate_users(&mut rng, 5);
        let timeline = timeline();
        let channels = generate_channels(&mut rng, 20, &users, &timeline).expect("channels");
        let (window_start, _) = timeline.message_window();
        let (oldest, _) = timeline.creation_window();
        for channel in &channels {
            assert!(channel.created >= oldest);
            assert!(channel.created <= window_start.secs());
        }
    }

    #[test]
    fn channel_names_fall_back_to_suffix() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut taken = HashSet::new();
        for _ in 0..500 {
            unique_channel_name(&mut rng, &mut taken);
        }
        assert_eq!(taken.len(), 500);
    }

    #[test]
    fn messages_are_sorted_and_authored_by_members() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let users = generate_users(&mut rng, 12);
        let channels = generate_channels(&mut rng, 8, &users, &timeline()).expect("channels");
        let messages = generate_messages(&mut rng, 2_000, &channels, &timeline()).expect("messages");

        assert_eq!(messages.len(), 2_000);
        assert!(messages.windows(2).all(|pair| pair[0].ts <= pair[1].ts));
        let (start, end) = timeline().message_window();
        for message in &messages {
            let channel = channels
                .iter()
                .find(|channel| channel.id == message.channel)
                .expect("channel exists");
            assert!(channel.is_member(&message.user));
            assert!(message.ts >= start && message.ts <= end);
            assert!(message.text.ends_with('.'));
        }
    }

    #[test]
    fn colliding_timestamps_are_separated_per_channel() {
        let ts = Timestamp::from_secs(100);
        let mut messages = vec![
            Message::new("U1", "C1", ts, "a."),
            Message::new("U2", "C2", ts, "b."),
            Message::new("U1", "C1", ts, "c."),
            Message::new("U1", "C1", ts, "d."),
        ];
        let window = (Timestamp::from_secs(0), Timestamp::from_secs(1_000));
        assert_eq!(separate_channel_collisions(&mut messages, window), 2);
        assert_eq!(messages[0].ts, ts);
        assert_eq!(messages[1].ts, ts);
        assert_eq!(messages[2].ts, ts.saturating_add_micros(1));
        assert_eq!(messages[3].ts, ts.saturating_add_micros(2));
    }

    #[test]
    fn collisions_at_the_window_end_stay_inside_the_window() {
        let start = Timestamp::from_secs(0);
        let end = Timestamp::from_secs(100);
        let mut messages = vec![
            Message::new("U1", "C1", start, "a."),
            Message::new("U1", "C1", end, "b."),
            Message::new("U1", "C1", end, "c."),
            Message::new("U1", "C1", end, "d."),
        ];
        assert_eq!(separate_channel_collisions(&mut messages, (start, end)), 2);

        let stamps: HashSet<Timestamp> = messages.iter().map(|message| message.ts).collect();
        assert_eq!(stamps.len(), messages.len());
        assert!(messages.iter().all(|message| message.ts >= start && message.ts <= end));
        assert_eq!(messages[2].ts, start.saturating_add_micros(1));
        assert_eq!(messages[3].ts, start.saturating_add_micros(2));
    }

    #[test]
    fn zero_messages_need_no_channels() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let messages = generate_messages(&mut rng, 0, &[], &timeline()).expect("empty");
        assert!(messages.is_empty());
    }
}
