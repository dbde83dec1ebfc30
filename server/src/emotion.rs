//! # Emotion classification
//!
//! Label set and the placeholder classifier.
//!
//! The label set is the seven grouped emotions the product works with.
//! Every label carries:
//! - a valence score (+1 positive, 0 neutral, -1 negative) for trend
//!   detection
//! - an intensity score (1-5) for the daily trend chart
//! - a human-facing display name
//!
//! ## Classifier
//!
//! [`EmotionClassifier`] is a deliberate stand-in for the fine-tuned
//! transformer the product will eventually ship. It keeps the real model's
//! surface (cleaned input, confidence in 0..1 rounded to 4 d.p., top-3
//! candidates, neutral fallback below the confidence threshold) but scores
//! entries with a keyword lexicon so the rest of the stack can be built and
//! tested without model weights.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum confidence before the top label is trusted. Below this the
/// prediction falls back to neutral rather than overcommitting on an
/// ambiguous entry.
pub const CONFIDENCE_THRESHOLD: f64 = 0.45;

pub const MODEL_VERSION: &str = "lexicon-v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    JoyExcitement,
    Affection,
    AngerDisgust,
    SadnessGrief,
    FearNervousness,
    Cognitive,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::JoyExcitement,
        Emotion::Affection,
        Emotion::AngerDisgust,
        Emotion::SadnessGrief,
        Emotion::FearNervousness,
        Emotion::Cognitive,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::JoyExcitement => "joy_excitement",
            Emotion::Affection => "affection",
            Emotion::AngerDisgust => "anger_disgust",
            Emotion::SadnessGrief => "sadness_grief",
            Emotion::FearNervousness => "fear_nervousness",
            Emotion::Cognitive => "cognitive",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn parse(label: &str) -> Option<Emotion> {
        Emotion::ALL.iter().copied().find(|e| e.as_str() == label)
    }

    pub fn display(&self) -> &'static str {
        match self {
            Emotion::JoyExcitement => "Joy & Excitement",
            Emotion::Affection => "Affection",
            Emotion::AngerDisgust => "Anger & Disgust",
            Emotion::SadnessGrief => "Sadness & Grief",
            Emotion::FearNervousness => "Fear & Nervousness",
            Emotion::Cognitive => "Curiosity & Surprise",
            Emotion::Neutral => "Neutral",
        }
    }

    /// Valence for trend detection: positive +1, negative -1, else 0.
    pub fn valence(&self) -> i32 {
        match self {
            Emotion::JoyExcitement | Emotion::Affection => 1,
            Emotion::SadnessGrief | Emotion::FearNervousness | Emotion::AngerDisgust => -1,
            Emotion::Cognitive | Emotion::Neutral => 0,
        }
    }

    /// Intensity on a 1-5 scale for the daily trend chart.
    pub fn intensity(&self) -> i32 {
        match self {
            Emotion::JoyExcitement => 5,
            Emotion::Affection => 4,
            Emotion::Cognitive | Emotion::Neutral => 3,
            Emotion::SadnessGrief => 2,
            Emotion::FearNervousness | Emotion::AngerDisgust => 1,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.valence() > 0
    }

    pub fn is_negative(&self) -> bool {
        self.valence() < 0
    }

    /// Supportive one-liner shown with a fresh prediction.
    pub fn supportive_message(&self) -> &'static str {
        match self {
            Emotion::JoyExcitement => {
                "You seem energised and positive today. Keep nurturing what is working."
            }
            Emotion::Affection => {
                "Warmth and connection come through in your words. That is worth holding onto."
            }
            Emotion::SadnessGrief => {
                "Your tone feels a bit low. Gentle routines and connection can help."
            }
            Emotion::FearNervousness => {
                "Some fear signals appear. Grounding exercises may help you feel safer."
            }
            Emotion::AngerDisgust => {
                "There are signs of frustration. A brief reset can ease intensity."
            }
            Emotion::Cognitive => {
                "Your mind seems active and curious today. Channel that energy constructively."
            }
            Emotion::Neutral => {
                "Your emotional tone looks balanced. Keep journaling to maintain clarity."
            }
        }
    }

    /// Longer guidance shown on the results page.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Emotion::JoyExcitement => {
                "Your reflection radiates positive energy and excitement. \
                 Maintain this momentum with consistent routines and gratitude-based journaling."
            }
            Emotion::Affection => {
                "Your writing reflects warmth and connection. \
                 Nurturing relationships and expressing appreciation amplifies this positive state."
            }
            Emotion::SadnessGrief => {
                "Your writing suggests low emotional energy. \
                 Gentle routines, social connection, and structured sleep may help regulate mood."
            }
            Emotion::FearNervousness => {
                "The current profile reflects elevated fear and nervousness. \
                 Focus on grounding techniques and short certainty-based planning to reduce mental load."
            }
            Emotion::AngerDisgust => {
                "Your reflection shows heightened frustration markers. \
                 Pause before major decisions and use brief breathing breaks to de-intensify reactions."
            }
            Emotion::Cognitive => {
                "Your entries show active curiosity and mental engagement. \
                 Channel this reflective energy into structured problem-solving or creative outlets."
            }
            Emotion::Neutral => {
                "Your emotional tone is currently balanced. \
                 Continue consistent journaling to monitor subtle shifts and maintain mental stability."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub emotion: Emotion,
    pub confidence: f64,
    pub top3: Vec<(Emotion, f64)>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub version: &'static str,
    pub labels: Vec<&'static str>,
    pub threshold: f64,
}

static CONTRACTIONS: &[(&str, &str)] = &[
    ("won't", "will not"),
    ("can't", "cannot"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("hadn't", "had not"),
    ("wouldn't", "would not"),
    ("shouldn't", "should not"),
    ("couldn't", "could not"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("you're", "you are"),
    ("you've", "you have"),
    ("you'll", "you will"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("it's", "it is"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("let's", "let us"),
];

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());
static HANDLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"r/\w+|u/\w+").unwrap());
static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s!?]").unwrap());
static BANG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").unwrap());
static QUESTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?{2,}").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize raw journal text the same way the training pipeline did:
/// lowercase, strip links/emails/bracketed spans/forum handles, expand
/// contractions, collapse shouting and stretched words, drop bare numbers.
pub fn clean_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut s = text.to_lowercase();
    s = URL_RE.replace_all(&s, "").into_owned();
    s = EMAIL_RE.replace_all(&s, "").into_owned();
    s = BRACKET_RE.replace_all(&s, "").into_owned();
    s = HANDLE_RE.replace_all(&s, "").into_owned();

    for (contraction, expansion) in CONTRACTIONS {
        s = s.replace(contraction, expansion);
    }

    s = NON_WORD_RE.replace_all(&s, " ").into_owned();
    s = BANG_RE.replace_all(&s, "!!").into_owned();
    s = QUESTION_RE.replace_all(&s, "??").into_owned();
    s = collapse_stretched(&s);
    s = NUMBER_RE.replace_all(&s, "").into_owned();
    SPACE_RE.replace_all(&s, " ").trim().to_string()
}

/// Cap runs of the same word character at two ("soooo" -> "soo").
fn collapse_stretched(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last: Option<char> = None;
    let mut run = 0usize;

    for c in s.chars() {
        if Some(c) == last && (c.is_alphanumeric() || c == '_') {
            run += 1;
        } else {
            last = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}

fn lexicon() -> &'static HashMap<&'static str, Emotion> {
    static LEXICON: Lazy<HashMap<&'static str, Emotion>> = Lazy::new(|| {
        let groups: [(Emotion, &[&str]); 6] = [
            (
                Emotion::JoyExcitement,
                &[
                    "happy", "happiness", "excited", "exciting", "thrilled", "amazing",
                    "great", "wonderful", "fantastic", "joy", "delighted", "promoted",
                    "celebrate", "celebrated", "awesome", "glad", "excellent", "win",
                    "won", "proud", "fun", "energised", "energized",
                ],
            ),
            (
                Emotion::Affection,
                &[
                    "love", "loved", "loving", "caring", "kind", "kindness", "warm",
                    "warmth", "close", "family", "friend", "friends", "grateful",
                    "gratitude", "hug", "hugged", "together", "appreciated", "sweet",
                    "supportive", "connection",
                ],
            ),
            (
                Emotion::AngerDisgust,
                &[
                    "angry", "anger", "furious", "annoyed", "annoying", "frustrated",
                    "frustrating", "frustration", "hate", "hated", "disgusted",
                    "disgusting", "irritated", "unfair", "rage", "mad", "resent",
                    "gross", "awful",
                ],
            ),
            (
                Emotion::SadnessGrief,
                &[
                    "sad", "sadness", "lonely", "alone", "depressed", "crying", "cried",
                    "cry", "grief", "grieving", "loss", "lost", "miserable", "hopeless",
                    "pointless", "empty", "miss", "missing", "hurt", "heartbroken",
                    "down", "low",
                ],
            ),
            (
                Emotion::FearNervousness,
                &[
                    "scared", "afraid", "anxious", "anxiety", "nervous", "nervousness",
                    "worried", "worry", "worrying", "fear", "panic", "panicking",
                    "terrified", "dread", "overwhelmed", "stress", "stressed",
                    "uneasy", "tense",
                ],
            ),
            (
                Emotion::Cognitive,
                &[
                    "curious", "curiosity", "wonder", "wondering", "why", "how",
                    "interesting", "interested", "surprised", "surprising", "surprise",
                    "strange", "weird", "think", "thinking", "thought", "question",
                    "questions", "realized", "realised", "learn", "learned", "learning",
                ],
            ),
        ];

        let mut map = HashMap::new();
        for (emotion, words) in groups {
            for word in words {
                map.insert(*word, emotion);
            }
        }
        map
    });
    &LEXICON
}

#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    threshold: f64,
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new(CONFIDENCE_THRESHOLD)
    }
}

impl EmotionClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            version: MODEL_VERSION,
            labels: Emotion::ALL.iter().map(|e| e.as_str()).collect(),
            threshold: self.threshold,
        }
    }

    /// Predict the emotion group for a journal entry.
    ///
    /// Empty (or cleaned-to-empty) input is neutral at full confidence.
    /// Each lexicon hit contributes two points to its label; neutral keeps a
    /// one-point base so single weak signals stay above it but ties do not.
    pub fn predict(&self, text: &str) -> Prediction {
        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            return Prediction {
                emotion: Emotion::Neutral,
                confidence: 1.0,
                top3: vec![(Emotion::Neutral, 1.0)],
            };
        }

        let mut scores: HashMap<Emotion, f64> = HashMap::new();
        scores.insert(Emotion::Neutral, 1.0);

        for token in cleaned.split_whitespace() {
            let word = token.trim_matches(|c| c == '!' || c == '?');
            if let Some(&emotion) = lexicon().get(word) {
                *scores.entry(emotion).or_insert(0.0) += 2.0;
            }
        }

        let total: f64 = scores.values().sum();
        let mut ranked: Vec<(Emotion, f64)> = Emotion::ALL
            .iter()
            .filter_map(|e| scores.get(e).map(|s| (*e, round4(s / total))))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let (mut emotion, confidence) = ranked[0];
        if confidence < self.threshold {
            emotion = Emotion::Neutral;
        }

        Prediction {
            emotion,
            confidence,
            top3: ranked.into_iter().take(3).collect(),
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
