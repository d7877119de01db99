use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::{
    lexicon::{EnglishLexicon, SentimentLexicon},
    table::{ExtraColumn, PostTable},
};

fn noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    // links first, so their punctuation is not stripped piecemeal
    NOISE.get_or_init(|| Regex::new(r"\w+://\S+|@[A-Za-z0-9]+|[^0-9A-Za-z\s]").unwrap())
}

/// Strip links, `@handle` mentions and punctuation, then collapse whitespace.
///
/// The result only holds ASCII letters, digits and single spaces, so
/// cleaning it again is a no-op.
pub fn clean(text: &str) -> String {
    noise()
        .replace_all(text, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn sign(self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Neutral => 0,
            SentimentLabel::Negative => -1,
        }
    }
}

impl ExtraColumn for SentimentLabel {
    const HEADER: Option<&'static str> = Some("SA");

    fn cell(&self) -> String {
        self.sign().to_string()
    }
}

/// How a continuous polarity becomes a label
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PolarityMapping {
    /// Zero polarity is labelled positive, any other polarity negative.
    /// Keeps reports comparable with those produced by the first
    /// version of this analysis.
    #[default]
    Legacy,
    /// Sign of the polarity
    Signed,
}

impl PolarityMapping {
    pub fn label(self, polarity: f64) -> SentimentLabel {
        match self {
            PolarityMapping::Legacy if polarity == 0.0 => SentimentLabel::Positive,
            PolarityMapping::Legacy => SentimentLabel::Negative,
            PolarityMapping::Signed if polarity > 0.0 => SentimentLabel::Positive,
            PolarityMapping::Signed if polarity < 0.0 => SentimentLabel::Negative,
            PolarityMapping::Signed => SentimentLabel::Neutral,
        }
    }
}

/// Words after a negation that it still applies to
const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone)]
pub struct Classifier<L = EnglishLexicon> {
    lexicon: L,
    mapping: PolarityMapping,
}

impl Classifier {
    pub fn new(mapping: PolarityMapping) -> Self {
        Self::with_lexicon(EnglishLexicon::new(), mapping)
    }
}

impl<L: SentimentLexicon> Classifier<L> {
    pub fn with_lexicon(lexicon: L, mapping: PolarityMapping) -> Self {
        Self { lexicon, mapping }
    }

    /// Polarity in [-1, 1] of already cleaned text; 0.0 when no word is known
    pub fn score_cleaned(&self, cleaned: &str) -> f64 {
        let mut scores = Vec::new();
        let mut multiplier = 1.0;
        let mut negation_distance: Option<usize> = None;

        for word in cleaned.split_whitespace().map(str::to_lowercase) {
            if self.lexicon.is_negation(&word) {
                negation_distance = Some(0);
                continue;
            }
            if let Some(intensity) = self.lexicon.intensity(&word) {
                multiplier *= intensity;
                continue;
            }

            match self.lexicon.score(&word) {
                Some(score) => {
                    let mut score = score * multiplier;
                    if negation_distance.is_some() {
                        score *= NEGATION_FACTOR;
                    }
                    scores.push(score.clamp(-1.0, 1.0));
                    multiplier = 1.0;
                    negation_distance = None;
                }
                None => {
                    negation_distance = negation_distance
                        .map(|distance| distance + 1)
                        .filter(|distance| *distance < NEGATION_WINDOW);
                }
            }
        }

        if scores.is_empty() {
            0.0
        } else {
            (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
        }
    }

    pub fn polarity(&self, text: &str) -> f64 {
        self.score_cleaned(&clean(text))
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        self.mapping.label(self.polarity(text))
    }
}

impl PostTable<()> {
    /// Append the sentiment column
    pub fn classify<L: SentimentLexicon>(
        self,
        classifier: &Classifier<L>,
    ) -> PostTable<SentimentLabel> {
        self.with_column(|post| classifier.classify(&post.text))
    }
}
