//! Sentiment scoring — polarity (-1..1) and subjectivity (0..1).
//!
//! Default: `LexiconScorer`, a pattern-format lexicon averager loaded from
//! `data/en-sentiment.xml`. Each lexicon word
//! contributes its (polarity, subjectivity); a directly preceding intensifier
//! scales both, and a negation within the two preceding words flips polarity
//! at half strength. The document score is the mean over all scored words.

use std::collections::HashMap;

use quick_xml::DeError;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    /// Rounds both fields to 2 decimal places.
    pub fn rounded(self) -> Self {
        Self {
            polarity: round2(self.polarity),
            subjectivity: round2(self.subjectivity),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Carried in `AppState` as `Arc<dyn SentimentScorer>`.
pub trait SentimentScorer: Send + Sync {
    /// Returns an unrounded score. Polarity in [-1, 1], subjectivity in [0, 1].
    fn score(&self, text: &str) -> Sentiment;
}

/// Pattern-format lexicon shipped with the binary.
const EMBEDDED_LEXICON: &str = include_str!("../../data/en-sentiment.xml");

const NEGATIONS: &[&str] = &["not", "never", "no", "hardly", "without"];

const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(rename = "word", default)]
    words: Vec<LexiconEntry>,
}

/// `<word form=".." pos=".." polarity=".." subjectivity=".." intensity=".." />`
#[derive(Debug, Deserialize)]
struct LexiconEntry {
    #[serde(rename = "@form")]
    form: String,
    #[serde(rename = "@pos", default)]
    pos: String,
    #[serde(rename = "@polarity", default)]
    polarity: f64,
    #[serde(rename = "@subjectivity", default)]
    subjectivity: f64,
    #[serde(rename = "@intensity", default = "unit_intensity")]
    intensity: f64,
}

fn unit_intensity() -> f64 {
    1.0
}

impl LexiconEntry {
    /// Adverbs with a non-unit intensity scale the next word instead of being scored.
    fn is_intensifier(&self) -> bool {
        self.pos == "RB" && (self.intensity - 1.0).abs() > f64::EPSILON
    }
}

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    /// form → (polarity, subjectivity), averaged over every sense of the form.
    words: HashMap<String, (f64, f64)>,
    /// form → multiplier
    intensifiers: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Loads the lexicon compiled into the binary.
    pub fn embedded() -> Result<Self, DeError> {
        Self::from_xml(EMBEDDED_LEXICON)
    }

    /// Parses a pattern-format `<sentiment>` document.
    pub fn from_xml(xml: &str) -> Result<Self, DeError> {
        let file: LexiconFile = quick_xml::de::from_str(xml)?;

        let mut senses: HashMap<String, (f64, f64, usize)> = HashMap::new();
        let mut intensifiers = HashMap::new();

        for entry in file.words {
            let form = entry.form.to_lowercase();
            if entry.is_intensifier() {
                intensifiers.insert(form, entry.intensity);
                continue;
            }
            let sums = senses.entry(form).or_insert((0.0, 0.0, 0));
            sums.0 += entry.polarity;
            sums.1 += entry.subjectivity;
            sums.2 += 1;
        }

        let words = senses
            .into_iter()
            .map(|(form, (p, s, n))| (form, (p / n as f64, s / n as f64)))
            .collect();

        Ok(Self {
            words,
            intensifiers,
        })
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Sentiment {
        let words: Vec<String> = text.unicode_words().map(|w| w.to_lowercase()).collect();

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut scored = 0usize;

        for (i, word) in words.iter().enumerate() {
            let Some(&(polarity, subjectivity)) = self.words.get(word) else {
                continue;
            };

            let multiplier = i
                .checked_sub(1)
                .and_then(|prev| self.intensity(&words[prev]))
                .unwrap_or(1.0);

            let negated = words[i.saturating_sub(2)..i].iter().any(|w| is_negation(w));

            let mut p = polarity * multiplier;
            let s = subjectivity * multiplier;
            if negated {
                p *= NEGATION_FACTOR;
            }

            polarity_sum += p.clamp(-1.0, 1.0);
            subjectivity_sum += s.clamp(0.0, 1.0);
            scored += 1;
        }

        if scored == 0 {
            return Sentiment::NEUTRAL;
        }

        let n = scored as f64;
        Sentiment {
            polarity: (polarity_sum / n).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / n).clamp(0.0, 1.0),
        }
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> Sentiment {
        LexiconScorer::embedded().unwrap().score(text)
    }

    #[test]
    fn test_no_opinion_words_is_neutral() {
        assert_eq!(score("The ball was thrown by John."), Sentiment::NEUTRAL);
    }

    #[test]
    fn test_positive_text() {
        let s = score("This is a good day.");
        assert!((s.polarity - 0.7).abs() < 1e-9);
        assert!((s.subjectivity - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_negative_text() {
        let s = score("What a terrible idea.");
        assert!(s.polarity < 0.0);
    }

    #[test]
    fn test_intensifier_strengthens_polarity() {
        let plain = score("The food was good.");
        let intense = score("The food was very good.");
        assert!(intense.polarity > plain.polarity, "{intense:?} vs {plain:?}");
    }

    #[test]
    fn test_negation_flips_at_half_strength() {
        let s = score("The food was not good.");
        assert!((s.polarity - (-0.35)).abs() < 1e-9, "{s:?}");
    }

    #[test]
    fn test_contracted_negation() {
        let s = score("It isn't bad.");
        assert!(s.polarity > 0.0, "{s:?}");
    }

    #[test]
    fn test_scores_stay_in_range() {
        let samples = [
            "extremely perfect extremely excellent extremely awesome",
            "extremely awful extremely horrible extremely terrible",
            "not never no hardly",
            "",
        ];
        for text in samples {
            let s = score(text);
            assert!((-1.0..=1.0).contains(&s.polarity), "{text}: {s:?}");
            assert!((0.0..=1.0).contains(&s.subjectivity), "{text}: {s:?}");
        }
    }

    #[test]
    fn test_embedded_lexicon_loads() {
        let scorer = LexiconScorer::embedded().unwrap();
        assert!(scorer.word_count() > 300, "only {} words", scorer.word_count());
        assert_eq!(scorer.intensity("very"), Some(1.3));
        assert!(!scorer.words.contains_key("very"));
    }

    #[test]
    fn test_common_verbs_carry_polarity() {
        assert!(score("I love this product.").polarity > 0.0);
        assert!(score("I hate Mondays.").polarity < 0.0);
        assert!(score("We enjoy long walks.").polarity > 0.0);
        assert!(score("I like the new layout.").polarity > 0.0);
    }

    #[test]
    fn test_everyday_adjectives_carry_polarity() {
        assert!(score("The staff were unfriendly.").polarity < 0.0);
        assert!(score("That noise is annoying.").polarity < 0.0);
        assert!(score("What a delicious meal.").polarity > 0.0);
    }

    #[test]
    fn test_duplicate_forms_are_averaged() {
        let xml = r#"<sentiment language="en">
            <word form="cool" pos="JJ" polarity="0.2" subjectivity="0.4" intensity="1.0" />
            <word form="Cool" pos="JJ" polarity="0.6" subjectivity="0.8" intensity="1.0" />
            <word form="so" pos="RB" polarity="0.0" subjectivity="0.0" intensity="1.2" />
        </sentiment>"#;
        let scorer = LexiconScorer::from_xml(xml).unwrap();

        let s = scorer.score("cool");
        assert!((s.polarity - 0.4).abs() < 1e-9, "{s:?}");
        assert!((s.subjectivity - 0.6).abs() < 1e-9, "{s:?}");

        let s = scorer.score("so cool");
        assert!((s.polarity - 0.48).abs() < 1e-9, "{s:?}");
    }

    #[test]
    fn test_missing_intensity_defaults_to_one() {
        let xml = r#"<sentiment><word form="fine" pos="RB" polarity="0.4" subjectivity="0.5" /></sentiment>"#;
        let scorer = LexiconScorer::from_xml(xml).unwrap();
        assert_eq!(scorer.word_count(), 1);
        assert!(scorer.intensifiers.is_empty());
    }

    #[test]
    fn test_malformed_lexicon_is_an_error() {
        let xml = r#"<sentiment><word form="good" polarity="high" /></sentiment>"#;
        assert!(LexiconScorer::from_xml(xml).is_err());
    }

    #[test]
    fn test_rounding_to_two_places() {
        let s = Sentiment {
            polarity: 0.123_456,
            subjectivity: 0.666_666,
        }
        .rounded();
        assert_eq!(s.polarity, 0.12);
        assert_eq!(s.subjectivity, 0.67);
    }
}
