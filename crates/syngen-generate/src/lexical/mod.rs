//! Lexical synthesis: identifiers, people, channel names and lorem text.
//!
//! Every function draws from the random source it is handed, so a seeded
//! generator reproduces the same vocabulary choices.

mod words;

use rand::Rng;
use rand::seq::IndexedRandom;

use syngen_core::Timestamp;

use words::{FIRST_NAMES_FEMALE, FIRST_NAMES_MALE, LAST_NAMES, LOREM_WORDS};

/// Characters used for identifier suffixes and avatar hashes.
pub const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Length of the random part of an identifier.
pub const ID_SUFFIX_LEN: usize = 10;

const AVATAR_HASH_LEN: usize = syngen_core::AVATAR_HASH_LEN;
const PARAGRAPH_SENTENCE_WORDS: (usize, usize) = (4, 12);

/// A synthesized person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// `First Last`.
    pub real_name: String,
    /// `first.last`, lowercase.
    pub username: String,
    pub email: String,
}

/// `prefix` followed by [`ID_SUFFIX_LEN`] random characters from [`ID_ALPHABET`].
///
/// Unique with overwhelming probability only; callers that need a hard
/// guarantee re-roll on collision.
pub fn identifier<R: Rng + ?Sized>(rng: &mut R, prefix: &str) -> String {
    let mut id = String::with_capacity(prefix.len() + ID_SUFFIX_LEN);
    id.push_str(prefix);
    push_alphanumeric(rng, &mut id, ID_SUFFIX_LEN);
    id
}

pub fn avatar_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut hash = String::with_capacity(AVATAR_HASH_LEN);
    push_alphanumeric(rng, &mut hash, AVATAR_HASH_LEN);
    hash
}

pub fn word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(LOREM_WORDS, rng)
}

/// Between `min_words` and `max_words` words (at least one), first word
/// capitalized, terminated by a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, min_words: usize, max_words: usize) -> String {
    let count = count_between(rng, min_words, max_words).max(1);
    let mut sentence = String::with_capacity(count * 8);
    for index in 0..count {
        let word = word(rng);
        if index == 0 {
            sentence.push_str(&capitalize(word));
        } else {
            sentence.push(' ');
            sentence.push_str(word);
        }
    }
    sentence.push('.');
    sentence
}

/// Between `min_sentences` and `max_sentences` sentences joined by single spaces.
pub fn paragraph<R: Rng + ?Sized>(rng: &mut R, min_sentences: usize, max_sentences: usize) -> String {
    let count = count_between(rng, min_sentences, max_sentences);
    let (min_words, max_words) = PARAGRAPH_SENTENCE_WORDS;
    (0..count)
        .map(|_| sentence(rng, min_words, max_words))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uniform instant in `[start, end]` (bounds may be given in either order).
pub fn timestamp<R: Rng + ?Sized>(rng: &mut R, start: Timestamp, end: Timestamp) -> Timestamp {
    let (low, high) = if start <= end { (start, end) } else { (end, start) };
    Timestamp::from_micros(rng.random_range(low.as_micros()..=high.as_micros()))
}

pub fn person<R: Rng + ?Sized>(rng: &mut R) -> Person {
    let first = if rng.random_bool(0.5) {
        pick(FIRST_NAMES_MALE, rng)
    } else {
        pick(FIRST_NAMES_FEMALE, rng)
    };
    let last = pick(LAST_NAMES, rng);

    let username = format!("{first}.{last}").to_lowercase();
    let email = format!("{username}@example.com");
    Person {
        real_name: format!("{first} {last}"),
        username,
        email,
    }
}

/// Two lorem words joined by a hyphen.
pub fn channel_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = word(rng);
    let second = word(rng);
    format!("{first}-{second}")
}

fn pick<R: Rng + ?Sized>(values: &'static [&'static str], rng: &mut R) -> &'static str {
    values.choose(rng).copied().unwrap_or("lorem")
}

fn count_between<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(low..=high)
}

fn push_alphanumeric<R: Rng + ?Sized>(rng: &mut R, buffer: &mut String, len: usize) {
    for _ in 0..len {
        let index = rng.random_range(0..ID_ALPHABET.len());
        buffer.push(char::from(ID_ALPHABET[index]));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn identifier_has_prefix_and_fixed_suffix() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let id = identifier(&mut rng, "U");
        assert_eq!(id.len(), 1 + ID_SUFFIX_LEN);
        assert!(id.starts_with('U'));
        assert!(id[1..].bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn sentence_is_capitalized_and_terminated() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let sentence = sentence(&mut rng, 3, 20);
            let words: Vec<&str> = sentence.trim_end_matches('.').split(' ').collect();
            assert!((3..=20).contains(&words.len()), "{sentence}");
            assert!(sentence.ends_with('.'));
            assert!(sentence.chars().next().is_some_and(char::is_uppercase));
        }
    }

    #[test]
    fn sentence_never_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let sentence = sentence(&mut rng, 0, 0);
        assert!(sentence.len() > 1);
        assert!(sentence.ends_with('.'));
    }

    #[test]
    fn paragraph_joins_sentences_with_single_spaces() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let paragraph = paragraph(&mut rng, 2, 4);
        assert!(!paragraph.contains("  "));
        assert!(!paragraph.ends_with(' '));
        let sentences = paragraph.matches(". ").count() + 1;
        assert!((2..=4).contains(&sentences), "{paragraph}");
    }

    #[test]
    fn timestamp_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let start = Timestamp::from_secs(1_000);
        let end = Timestamp::from_secs(2_000);
        for _ in 0..200 {
            let ts = timestamp(&mut rng, end, start);
            assert!(ts >= start && ts <= end);
        }
    }

    #[test]
    fn person_fields_are_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let person = person(&mut rng);
        let (first, last) = person.real_name.split_once(' ').expect("two names");
        assert_eq!(
            person.username,
            format!("{}.{}", first.to_lowercase(), last.to_lowercase())
        );
        assert_eq!(person.email, format!("{}@example.com", person.username));
    }

    #[test]
    fn channel_name_is_hyphenated_pair() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let name = channel_name(&mut rng);
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|part| LOREM_WORDS.contains(part)));
    }
}
