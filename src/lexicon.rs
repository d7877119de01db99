//! Pre-trained polarity lexicon.
//!
//! Word scores lie in [-1, 1]. Intensifiers scale the next scored word,
//! negations flip and damp it.

use std::collections::HashMap;

pub trait SentimentLexicon {
    /// Polarity of a lowercase word, if the lexicon knows it
    fn score(&self, word: &str) -> Option<f64>;

    /// Multiplier applied to the next scored word
    fn intensity(&self, word: &str) -> Option<f64>;

    fn is_negation(&self, word: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct EnglishLexicon {
    scores: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: &'static [&'static str],
}

const POSITIVE: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("brilliant", 0.9),
    ("perfect", 1.0),
    ("nice", 0.6),
    ("happy", 0.8),
    ("glad", 0.5),
    ("love", 0.5),
    ("beautiful", 0.85),
    ("positive", 0.23),
    ("strong", 0.43),
    ("stronger", 0.45),
    ("successful", 0.75),
    ("success", 0.3),
    ("win", 0.8),
    ("winning", 0.5),
    ("gain", 0.4),
    ("gains", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("surge", 0.4),
    ("soar", 0.5),
    ("soars", 0.5),
    ("record", 0.2),
    ("boom", 0.4),
    ("booming", 0.5),
    ("profit", 0.3),
    ("profitable", 0.5),
    ("growth", 0.3),
    ("growing", 0.2),
    ("rise", 0.2),
    ("rises", 0.2),
    ("recovery", 0.3),
    ("rebound", 0.3),
    ("optimistic", 0.5),
    ("confident", 0.5),
    ("easy", 0.43),
    ("important", 0.4),
    ("interesting", 0.5),
    ("new", 0.14),
    ("free", 0.4),
    ("top", 0.5),
    ("true", 0.35),
    ("right", 0.29),
    ("fine", 0.42),
    ("safe", 0.5),
    ("fair", 0.7),
    ("smart", 0.21),
    ("innovative", 0.5),
    ("impressive", 1.0),
    ("robust", 0.4),
    ("healthy", 0.5),
    ("upbeat", 0.6),
    ("bullish", 0.6),
    ("cheap", 0.4),
    ("rich", 0.38),
    ("huge", 0.4),
    ("big", 0.0),
    ("clear", 0.1),
    ("super", 0.33),
    ("fun", 0.3),
    ("exciting", 0.3),
    ("popular", 0.6),
    ("special", 0.36),
    ("secure", 0.4),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("angry", -0.5),
    ("hate", -0.8),
    ("wrong", -0.5),
    ("weak", -0.38),
    ("weaker", -0.4),
    ("fail", -0.5),
    ("fails", -0.5),
    ("failed", -0.5),
    ("failure", -0.4),
    ("loss", -0.3),
    ("losses", -0.3),
    ("lose", -0.4),
    ("losing", -0.4),
    ("fall", -0.2),
    ("falls", -0.2),
    ("drop", -0.2),
    ("drops", -0.2),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("slump", -0.4),
    ("slumps", -0.4),
    ("crash", -0.6),
    ("crisis", -0.5),
    ("recession", -0.5),
    ("debt", -0.2),
    ("default", -0.3),
    ("bankrupt", -0.6),
    ("bankruptcy", -0.6),
    ("fraud", -0.7),
    ("scandal", -0.5),
    ("risk", -0.2),
    ("risky", -0.4),
    ("fear", -0.4),
    ("fears", -0.4),
    ("worried", -0.4),
    ("concern", -0.2),
    ("concerns", -0.2),
    ("uncertain", -0.3),
    ("volatile", -0.3),
    ("bearish", -0.6),
    ("decline", -0.3),
    ("declines", -0.3),
    ("cut", -0.1),
    ("cuts", -0.1),
    ("layoffs", -0.4),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("dangerous", -0.6),
    ("dead", -0.2),
    ("war", -0.4),
    ("attack", -0.4),
    ("expensive", -0.5),
    ("low", -0.2),
    ("lower", -0.1),
    ("negative", -0.3),
    ("serious", -0.33),
    ("slow", -0.3),
    ("tough", -0.39),
    ("ugly", -0.7),
    ("violent", -0.8),
    ("disappointing", -0.6),
    ("stupid", -0.8),
    ("crazy", -0.6),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("highly", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("most", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "dont", "doesnt", "didnt", "isnt", "wasnt",
    "arent", "cant", "cannot", "wont", "nothing",
];

impl EnglishLexicon {
    pub fn new() -> Self {
        Self {
            scores: POSITIVE.iter().chain(NEGATIVE).copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS,
        }
    }
}

impl Default for EnglishLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon for EnglishLexicon {
    fn score(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|negation| *negation == word)
    }
}
