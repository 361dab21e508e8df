use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use syngen_core::Message;

const MICROS_PER_HOUR: i64 = 3_600_000_000;

/// Parameters of the thread simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadSettings {
    /// Chance that a message replies to its channel's active thread.
    pub reply_probability: f64,
    /// Chance that a non-reply becomes its channel's new active thread.
    pub start_probability: f64,
    /// Replies attach only to parents strictly younger than this many hours.
    pub window_hours: u32,
}

impl ThreadSettings {
    fn window_micros(&self) -> i64 {
        i64::from(self.window_hours) * MICROS_PER_HOUR
    }
}

/// Counters produced by [`simulate_threads`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadStats {
    pub threads_started: u64,
    pub replies: u64,
}

/// Turn a time-sorted message stream into threads.
///
/// Each channel has at most one active parent. A message in a channel whose
/// active parent is recent enough replies to it with `reply_probability`;
/// otherwise it becomes the new active parent with `start_probability`.
/// Reply records are appended to the parent in place.
pub fn simulate_threads<R: Rng + ?Sized>(
    rng: &mut R,
    messages: &mut [Message],
    settings: &ThreadSettings,
) -> ThreadStats {
    let window = settings.window_micros();
    let mut active: HashMap<String, usize> = HashMap::new();
    let mut stats = ThreadStats::default();

    for index in 0..messages.len() {
        let parent = active.get(&messages[index].channel).copied().filter(|&parent| {
            messages[index].ts.as_micros() - messages[parent].ts.as_micros() < window
        });

        if let Some(parent) = parent {
            if rng.random_bool(settings.reply_probability) {
                let parent_ts = messages[parent].ts;
                let parent_user = messages[parent].user.clone();
                let reply = &mut messages[index];
                reply.reply_to(parent_ts, &parent_user);
                let (user, ts) = (reply.user.clone(), reply.ts);
                messages[parent].push_reply(user, ts);
                stats.replies += 1;
                continue;
            }
        }

        if rng.random_bool(settings.start_probability) {
            messages[index].start_thread();
            active.insert(messages[index].channel.clone(), index);
            stats.threads_started += 1;
        }
    }

    stats
}
