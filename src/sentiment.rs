//! Lexical sentiment scoring.
//!
//! The scorer is a deterministic nine-phase pipeline over the frozen lexicon
//! tables: filler short-circuit, word hits, multi-word patterns, punctuation
//! amplifiers, ratio threshold, emoji integration, classifier override,
//! last-resort detection, and a final confidence clamp. A classifier result,
//! when supplied, overrides the lexical label but never replaces the
//! pipeline; without one the pipeline is the whole story.

use async_trait::async_trait;
use unicode_normalization::UnicodeNormalization;

use crate::emoji::EmojiAnalyzer;
use crate::error::Result;
use crate::lexicon;
use crate::models::{ClassifierOutput, SentimentLabel, SentimentResult};

/// Confidence assigned to filler tokens ("ok", "hmm", ...).
const FILLER_CONFIDENCE: f64 = 0.55;
/// Minimum ratio of sentiment tokens to words before a label triggers.
const MIN_TRIGGER_RATIO: f64 = 0.08;
/// Base-confidence cap before the multi-hit boost.
const BASE_CONFIDENCE_CAP: f64 = 0.88;
/// Cap after the >= 2 hits boost.
const BOOSTED_CONFIDENCE_CAP: f64 = 0.92;
/// Emoji reinforcement factor when emoji and text polarity agree.
const EMOJI_REINFORCEMENT: f64 = 0.35;
/// Emoji confidence needed to override a neutral classifier label.
const EMOJI_OVERRIDE_THRESHOLD: f64 = 0.6;
/// Damping applied when emoji polarity wins over or conflicts with text.
const CONFLICT_DAMPING: f64 = 0.85;
/// Last-resort confidences for punctuation-only signals.
const EXCLAMATION_FALLBACK_CONFIDENCE: f64 = 0.52;
const QUESTION_FALLBACK_CONFIDENCE: f64 = 0.52;

/// Optional neural classifier adapter. Implementations may block on I/O;
/// the engine wraps calls in a timeout and falls back to lexical scoring.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifierOutput>;
}

/// Deterministic lexical scorer over the shared lexicon tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentScorer {
    emoji: EmojiAnalyzer,
}

impl SentimentScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            emoji: EmojiAnalyzer::new(),
        }
    }

    /// Score one text run, optionally folding in a classifier result.
    #[must_use]
    pub fn score(&self, text: &str, hint: Option<&ClassifierOutput>) -> SentimentResult {
        let clean = normalize(text);
        let lower = clean.to_lowercase();
        let scan = self.emoji.analyze(text);

        // Phase 1: filler short-circuit; emojis are invisible to the lookup
        let filler_key = lexicon::emoji_sequence_regex()
            .replace_all(&lower, "")
            .trim()
            .to_string();
        let is_filler = lexicon::filler_tokens().contains(filler_key.as_str());
        if is_filler && !scan.has_emojis {
            return SentimentResult {
                sentiment: SentimentLabel::Neutral,
                confidence: FILLER_CONFIDENCE,
                emotions: None,
                emoji_analysis: None,
            };
        }

        // Phase 2: word-list hits
        let tokens: Vec<&str> = lexicon::word_regex()
            .find_iter(&lower)
            .map(|m| m.as_str())
            .collect();
        let word_count = tokens.len();
        let mut pos = 0.0_f64;
        let mut neg = 0.0_f64;
        if !is_filler {
            pos = tokens
                .iter()
                .filter(|t| lexicon::positive_words().contains(*t))
                .count() as f64;
            neg = tokens
                .iter()
                .filter(|t| lexicon::negative_words().contains(*t))
                .count() as f64;

            // Phase 3: multi-word patterns, +-2 per matching pattern
            for pattern in lexicon::POSITIVE_PATTERNS {
                if lower.contains(pattern) {
                    pos += 2.0;
                }
            }
            for pattern in lexicon::NEGATIVE_PATTERNS {
                if lower.contains(pattern) {
                    neg += 2.0;
                }
            }

            // Phase 4: punctuation amplifiers, only on an existing signal
            if pos + neg > 0.0 {
                if ends_with_exclamation(&clean) {
                    pos += 1.0;
                }
                if clean.matches('?').count() >= 2 {
                    neg += 1.0;
                }
                if lexicon::caps_run_regex().is_match(&clean) {
                    if pos > neg {
                        pos *= 1.25;
                    } else if neg > pos {
                        neg *= 1.25;
                    }
                }
            }
        }

        // Phase 5: ratio threshold and base confidence
        let hits = pos + neg;
        let ratio = hits / (word_count.max(1) as f64);
        let mut sentiment = SentimentLabel::Neutral;
        let mut confidence = FILLER_CONFIDENCE;
        if !is_filler && hits > 0.0 && ratio >= MIN_TRIGGER_RATIO && pos != neg {
            let dominant = pos.max(neg);
            sentiment = if pos > neg {
                SentimentLabel::Positive
            } else {
                SentimentLabel::Negative
            };
            confidence = (dominant / (word_count as f64 * MIN_TRIGGER_RATIO).max(1.0))
                .min(BASE_CONFIDENCE_CAP);
            if dominant >= 2.0 {
                confidence = (confidence + 0.1).min(BOOSTED_CONFIDENCE_CAP);
            }
        }

        // Phase 6: emoji integration
        if scan.has_emojis && sentiment != SentimentLabel::Neutral {
            if scan.sentiment == sentiment {
                confidence += EMOJI_REINFORCEMENT * scan.confidence;
            } else if scan.sentiment != SentimentLabel::Neutral {
                if scan.confidence > 0.7 {
                    sentiment = scan.sentiment;
                    confidence = scan.confidence * CONFLICT_DAMPING;
                } else {
                    confidence *= CONFLICT_DAMPING;
                }
            }
        }

        // Phase 7: classifier override
        let mut emotions = None;
        if let Some(hint) = hint {
            emotions = Some(hint.emotions.clone());
            if hint.label == SentimentLabel::Neutral {
                if scan.confidence > EMOJI_OVERRIDE_THRESHOLD
                    && scan.sentiment != SentimentLabel::Neutral
                {
                    sentiment = scan.sentiment;
                    confidence = scan.confidence * CONFLICT_DAMPING;
                }
            } else {
                let lexical_confidence = confidence;
                sentiment = hint.label;
                confidence = hint.confidence.max(lexical_confidence * 0.9);
            }
        }

        // Phase 8: last-resort detection
        if sentiment == SentimentLabel::Neutral && hits == 0.0 && hint.is_none() {
            if ends_with_exclamation(&clean) {
                sentiment = SentimentLabel::Positive;
                confidence = EXCLAMATION_FALLBACK_CONFIDENCE;
            } else if clean.matches('?').count() >= 2 {
                sentiment = SentimentLabel::Negative;
                confidence = QUESTION_FALLBACK_CONFIDENCE;
            } else if scan.has_emojis && scan.sentiment != SentimentLabel::Neutral {
                sentiment = scan.sentiment;
                confidence = scan.confidence;
            }
        }

        // Phase 9: clamp, and the neutral-confidence formula
        if sentiment == SentimentLabel::Neutral && !is_filler {
            confidence = (1.0 - hits / (word_count as f64 + 1.0)).max(0.5);
        }
        confidence = confidence.clamp(0.0, 1.0);

        SentimentResult {
            sentiment,
            confidence,
            emotions,
            emoji_analysis: scan.has_emojis.then(|| scan.summary()),
        }
    }
}

/// NFC-normalise, straighten curly apostrophes, strip URLs, collapse runs of
/// whitespace. Case is preserved for the ALL-CAPS amplifier.
fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let straightened = composed.replace('\u{2019}', "'");
    let without_urls = lexicon::url_regex().replace_all(&straightened, " ");
    lexicon::whitespace_regex()
        .replace_all(&without_urls, " ")
        .trim()
        .to_string()
}

/// True when the text ends with an exclamation run, ignoring trailing emojis.
fn ends_with_exclamation(clean: &str) -> bool {
    let without_emojis = lexicon::emoji_sequence_regex().replace_all(clean, "");
    without_emojis.trim_end().ends_with('!')
}
