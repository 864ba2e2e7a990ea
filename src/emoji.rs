//! Emoji extraction and polarity aggregation.
//!
//! Sequences are extracted with a compiled Unicode regex; a ZWJ sequence is
//! keyed by its full text but scored by its leading scalar. Polarity weights
//! come from the frozen table in [`crate::lexicon`].

use crate::lexicon;
use crate::models::{EmojiCount, EmojiScan, SentimentLabel};

/// Stateless analyzer over the shared lexicon tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiAnalyzer;

impl EmojiAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract emoji sequences in appearance order, keyed by full sequence.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<EmojiCount> {
        let mut counts: Vec<EmojiCount> = Vec::new();
        for m in lexicon::emoji_sequence_regex().find_iter(text) {
            let sequence = m.as_str();
            match counts.iter_mut().find(|c| c.emoji == sequence) {
                Some(entry) => entry.count += 1,
                None => counts.push(EmojiCount {
                    emoji: sequence.to_string(),
                    count: 1,
                }),
            }
        }
        counts
    }

    /// Aggregate polarity over every emoji occurrence in the text.
    ///
    /// Confidence is `min(1, |sum| / max(3, count))` where `sum` adds
    /// `polarity * weight` per occurrence; texts without emojis report
    /// neutral with zero confidence.
    #[must_use]
    pub fn analyze(&self, text: &str) -> EmojiScan {
        let per_emoji_counts = self.extract(text);
        let count: usize = per_emoji_counts.iter().map(|c| c.count as usize).sum();

        if count == 0 {
            return EmojiScan {
                has_emojis: false,
                count: 0,
                per_emoji_counts,
                sentiment: SentimentLabel::Neutral,
                confidence: 0.0,
            };
        }

        let mut sum = 0i64;
        for entry in &per_emoji_counts {
            let leading = entry.emoji.chars().next();
            if let Some((polarity, weight)) = leading.and_then(lexicon::emoji_polarity) {
                sum += i64::from(polarity) * i64::from(weight) * entry.count as i64;
            }
        }

        let sentiment = match sum {
            s if s > 0 => SentimentLabel::Positive,
            s if s < 0 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        };
        let confidence = (sum.unsigned_abs() as f64 / (count.max(3) as f64)).min(1.0);

        EmojiScan {
            has_emojis: true,
            count,
            per_emoji_counts,
            sentiment,
            confidence,
        }
    }
}
