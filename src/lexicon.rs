//! Frozen lexicon and pattern tables backing the sentiment pipeline.
//!
//! These lists are the single source of truth for word-level polarity: the
//! scorer, the emoji analyzer, and the tests all read from here. Changing a
//! list changes scoring behaviour, so the table sizes are pinned by tests.
//! All tables and compiled regexes are process-wide, initialised once, and
//! never mutated afterwards.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Positive unigrams (47 entries).
pub const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "good",
    "great",
    "excellent",
    "wonderful",
    "amazing",
    "love",
    "joy",
    "excited",
    "thrilled",
    "delighted",
    "pleased",
    "satisfied",
    "optimistic",
    "hopeful",
    "grateful",
    "blessed",
    "fantastic",
    "awesome",
    "nice",
    "perfect",
    "best",
    "beautiful",
    "lovely",
    "fun",
    "enjoy",
    "glad",
    "proud",
    "yay",
    "cool",
    "sweet",
    "brilliant",
    "super",
    "fabulous",
    "splendid",
    "marvelous",
    "thanks",
    "thank",
    "appreciate",
    "congrats",
    "congratulations",
    "celebrate",
    "smile",
    "laugh",
    "funny",
    "hilarious",
    "adorable",
];

/// Negative unigrams (49 entries).
pub const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "bad",
    "terrible",
    "awful",
    "hate",
    "angry",
    "mad",
    "furious",
    "depressed",
    "worried",
    "anxious",
    "stressed",
    "upset",
    "frustrated",
    "disappointed",
    "hurt",
    "pain",
    "suffer",
    "horrible",
    "disgusting",
    "sick",
    "tired",
    "exhausted",
    "annoyed",
    "irritated",
    "worst",
    "sucks",
    "damn",
    "hell",
    "cry",
    "crying",
    "lonely",
    "alone",
    "difficult",
    "tough",
    "struggle",
    "problem",
    "issue",
    "wrong",
    "fail",
    "failed",
    "failure",
    "broke",
    "broken",
    "sorry",
    "apologize",
    "unfortunately",
    "sadly",
    "regret",
];

/// Low-content filler tokens that short-circuit scoring to neutral.
pub const FILLER_TOKENS: &[&str] = &[
    "ok", "okay", "k", "kk", "yeah", "yep", "nope", "hmm", "hm", "um", "uh", "lol",
];

/// Multi-word positive patterns; each match contributes +2 to the positive
/// counter.
pub const POSITIVE_PATTERNS: &[&str] = &[
    "can't wait",
    "cant wait",
    "feel good",
    "feeling good",
    "sounds good",
    "look forward",
    "so happy",
    "really good",
    "went well",
];

/// Multi-word negative patterns; each match contributes -2.
pub const NEGATIVE_PATTERNS: &[&str] = &[
    "feel bad",
    "feeling bad",
    "not good",
    "don't like",
    "dont like",
    "hate it",
    "so sad",
    "really bad",
    "went wrong",
    "fed up",
    "had enough",
];

/// Emoji polarity table: (leading scalar, polarity, weight). Weight is on a
/// 1-3 scale so a single strong emoji clears the 0.6 override threshold in
/// the aggregate confidence `min(1, |sum| / max(3, count))`.
pub const EMOJI_POLARITY: &[(char, i8, u8)] = &[
    // positive
    ('😊', 1, 2),
    ('😄', 1, 3),
    ('😃', 1, 2),
    ('😀', 1, 2),
    ('🙂', 1, 1),
    ('😉', 1, 2),
    ('😍', 1, 3),
    ('🥰', 1, 3),
    ('😘', 1, 2),
    ('😗', 1, 2),
    ('☺', 1, 2),
    ('🤗', 1, 2),
    ('🤩', 1, 3),
    ('😇', 1, 2),
    ('😋', 1, 2),
    ('😎', 1, 2),
    ('🥳', 1, 3),
    ('🎉', 1, 2),
    ('❤', 1, 3),
    ('💕', 1, 2),
    ('💖', 1, 3),
    ('💗', 1, 2),
    ('🌟', 1, 2),
    ('✨', 1, 2),
    ('👍', 1, 2),
    ('👏', 1, 2),
    ('🙌', 1, 2),
    ('💪', 1, 2),
    ('🔥', 1, 2),
    ('💯', 1, 2),
    // negative
    ('😢', -1, 2),
    ('😭', -1, 3),
    ('😔', -1, 2),
    ('😞', -1, 2),
    ('😟', -1, 1),
    ('😕', -1, 1),
    ('☹', -1, 2),
    ('🙁', -1, 1),
    ('😤', -1, 2),
    ('😠', -1, 2),
    ('😡', -1, 3),
    ('🤬', -1, 3),
    ('😰', -1, 2),
    ('😨', -1, 2),
    ('😱', -1, 3),
    ('😖', -1, 2),
    ('😣', -1, 2),
    ('😫', -1, 2),
    ('😩', -1, 2),
    ('🥺', -1, 2),
    ('😪', -1, 1),
    ('😴', -1, 1),
    ('🤒', -1, 2),
    ('🤕', -1, 2),
    ('💔', -1, 3),
    ('😿', -1, 2),
    ('👎', -1, 2),
    ('💀', -1, 2),
    ('😵', -1, 2),
];

static POSITIVE_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
static NEGATIVE_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
static FILLER_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
static EMOJI_MAP: OnceLock<HashMap<char, (i8, u8)>> = OnceLock::new();
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
static EMOJI_SEQUENCE_REGEX: OnceLock<Regex> = OnceLock::new();
static CAPS_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

pub fn positive_words() -> &'static HashSet<&'static str> {
    POSITIVE_SET.get_or_init(|| POSITIVE_WORDS.iter().copied().collect())
}

pub fn negative_words() -> &'static HashSet<&'static str> {
    NEGATIVE_SET.get_or_init(|| NEGATIVE_WORDS.iter().copied().collect())
}

pub fn filler_tokens() -> &'static HashSet<&'static str> {
    FILLER_SET.get_or_init(|| FILLER_TOKENS.iter().copied().collect())
}

/// Polarity and weight for the leading scalar of an emoji sequence.
/// Unknown emojis score 0.
pub fn emoji_polarity(leading: char) -> Option<(i8, u8)> {
    EMOJI_MAP
        .get_or_init(|| {
            EMOJI_POLARITY
                .iter()
                .map(|&(c, polarity, weight)| (c, (polarity, weight)))
                .collect()
        })
        .get(&leading)
        .copied()
}

/// Unicode word tokens, apostrophes kept inside contractions.
pub fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*").expect("word regex"))
}

/// One full emoji sequence: a pictographic scalar with optional variation
/// selector and skin-tone modifier, extended through ZWJ joins.
pub fn emoji_sequence_regex() -> &'static Regex {
    EMOJI_SEQUENCE_REGEX.get_or_init(|| {
        Regex::new(
            r"\p{Extended_Pictographic}\x{FE0F}?\p{Emoji_Modifier}?(?:\x{200D}\p{Extended_Pictographic}\x{FE0F}?\p{Emoji_Modifier}?)*",
        )
        .expect("emoji sequence regex")
    })
}

/// ALL-CAPS alphabetic runs of length >= 4.
pub fn caps_run_regex() -> &'static Regex {
    CAPS_RUN_REGEX.get_or_init(|| Regex::new(r"\b\p{Lu}{4,}\b").expect("caps run regex"))
}

pub fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(r"https?://\S+|www\.\S+").expect("url regex"))
}

pub fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}
