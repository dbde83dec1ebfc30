//! Rule-based insight generation over a user's emotion history.
//!
//! Everything here is pure: handlers load `(timestamp, emotion)` pairs from
//! the store and pass slices in, which keeps the scoring rules testable
//! without a database.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::emotion::Emotion;

/// Window for trend detection: only the most recent entries count.
const TREND_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Upward,
    Downward,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Upward => "upward",
            Trend::Downward => "downward",
            Trend::Stable => "stable",
        }
    }
}

/// Trend direction from the mean valence of the last [`TREND_WINDOW`]
/// entries, most recent first.
pub fn detect_trend(recent_first: &[Emotion]) -> Trend {
    if recent_first.is_empty() {
        return Trend::Stable;
    }

    let window = &recent_first[..recent_first.len().min(TREND_WINDOW)];
    let avg = window.iter().map(|e| e.valence() as f64).sum::<f64>() / window.len() as f64;

    if avg >= 0.4 {
        Trend::Upward
    } else if avg <= -0.4 {
        Trend::Downward
    } else {
        Trend::Stable
    }
}

/// Emotional variability: the share of adjacent entries (chronological
/// order) whose label changed, rounded to 2 d.p.
pub fn volatility(chronological: &[Emotion]) -> f64 {
    if chronological.len() <= 1 {
        return 0.0;
    }

    let switches = chronological
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .count();
    round2(switches as f64 / (chronological.len() - 1) as f64)
}

#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub summary: &'static str,
    pub recommendation: &'static str,
}

/// Pick the guidance text for the insights page. Rules are ordered; the
/// first match wins.
pub fn generate_insight(
    dominant: Emotion,
    positive_ratio: f64,
    volatility: f64,
    trend: Trend,
) -> Insight {
    if dominant == Emotion::FearNervousness && volatility > 0.4 {
        return Insight {
            summary: "Recurring anxiety and nervousness signals detected in your emotional patterns. \
                      Your entries show heightened emotional variability paired with fear as a dominant theme.",
            recommendation: "Introduce structured breathing reset exercises during identified peak anxiety periods. \
                             Consider implementing a daily grounding routine to interrupt anxiety cycles before they intensify.",
        };
    }

    if trend == Trend::Downward {
        return Insight {
            summary: "A decline in positive emotional affect has been detected over your recent entries. \
                      Your baseline mood stability is shifting downward.",
            recommendation: "Establish consistent daily routines and maintain regular sleep cycles. \
                             Structured daily activities help stabilize emotional baseline. \
                             Consider increasing journaling frequency to track the root triggers of this decline.",
        };
    }

    if positive_ratio > 65.0 {
        return Insight {
            summary: "Your emotional baseline shows predominantly positive affect. \
                      Joy, excitement, and warmth are well-represented in your recent reflections.",
            recommendation: "Maintain your current journaling frequency to reinforce emotional stability. \
                             Document what conditions support this positive baseline - this pattern recognition \
                             helps predict and sustain wellbeing.",
        };
    }

    if volatility > 0.5 {
        return Insight {
            summary: "High emotional variability detected. Your emotional states are shifting frequently \
                      across entries, indicating unstable baseline patterns.",
            recommendation: "Prioritize sleep cycle regulation and establish consistent daily structure. \
                             Emotional volatility often correlates with disrupted sleep and unstructured routines.",
        };
    }

    if dominant == Emotion::SadnessGrief {
        return Insight {
            summary: "Your emotional profile shows sadness and grief as dominant states. This pattern \
                      suggests sustained low mood or loss-related cycles in your recent reflections.",
            recommendation: "Engage in structured social connection and light physical activity. \
                             Isolation amplifies negative emotional patterns. Establish small daily activities \
                             that create emotional counterweights to sadness.",
        };
    }

    if dominant == Emotion::AngerDisgust {
        return Insight {
            summary: "Frustration and anger appear as recurring themes in your recent entries. \
                      This may reflect unresolved tension or ongoing stressors.",
            recommendation: "Try expressive writing to externalize and process frustration before it accumulates. \
                             Physical activity and structured breaks during high-stress periods can help \
                             discharge tension constructively.",
        };
    }

    if trend == Trend::Upward {
        return Insight {
            summary: "Your emotional trajectory is trending positively. \
                      Recent entries reflect an improving mood baseline.",
            recommendation: "Continue the habits and routines that are contributing to this upward shift. \
                             Logging what's going well reinforces positive patterns and builds resilience.",
        };
    }

    Insight {
        summary: "Moderate emotional variability observed. Your emotional states show normal fluctuation \
                  within a balanced range, with no dominant negative patterns.",
        recommendation: "Continue your structured self-reflection practice. Regular journaling maintains \
                         baseline emotional awareness and helps identify patterns before they accumulate.",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
    pub has_data: bool,
}

/// Daily mean intensity, chronological, one point per day with entries.
/// The chart only renders with two or more days of data.
pub fn trend_series(dated: &[(NaiveDate, Emotion)]) -> TrendSeries {
    let mut by_date: Vec<(NaiveDate, Vec<i32>)> = Vec::new();

    for (date, emotion) in dated {
        match by_date.iter_mut().find(|(d, _)| d == date) {
            Some((_, scores)) => scores.push(emotion.intensity()),
            None => by_date.push((*date, vec![emotion.intensity()])),
        }
    }
    by_date.sort_by_key(|(date, _)| *date);

    let mut labels = Vec::with_capacity(by_date.len());
    let mut scores = Vec::with_capacity(by_date.len());
    for (date, day_scores) in &by_date {
        labels.push(date.format("%b %d").to_string());
        let avg = day_scores.iter().sum::<i32>() as f64 / day_scores.len() as f64;
        scores.push(round1(avg));
    }

    let has_data = labels.len() >= 2;
    TrendSeries {
        labels,
        scores,
        has_data,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionCount {
    pub emotion: &'static str,
    pub display: &'static str,
    pub count: usize,
    pub percent: f64,
}

/// Per-label counts with percents, most frequent first. Labels with no
/// entries are omitted.
pub fn emotion_counts(emotions: &[Emotion]) -> Vec<EmotionCount> {
    let total = emotions.len();
    let mut counts: Vec<EmotionCount> = Emotion::ALL
        .iter()
        .filter_map(|&emotion| {
            let count = emotions.iter().filter(|&&e| e == emotion).count();
            (count > 0).then(|| EmotionCount {
                emotion: emotion.as_str(),
                display: emotion.display(),
                count,
                percent: round1(count as f64 * 100.0 / total as f64),
            })
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub count: usize,
    pub top: Option<EmotionCount>,
}

/// Entry count and most frequent emotion over the trailing `days`.
pub fn period_summary(results: &[(DateTime<Utc>, Emotion)], now: DateTime<Utc>, days: i64) -> PeriodSummary {
    let start = now - Duration::days(days);
    let recent: Vec<Emotion> = results
        .iter()
        .filter(|(at, _)| *at >= start)
        .map(|(_, e)| *e)
        .collect();

    PeriodSummary {
        count: recent.len(),
        top: emotion_counts(&recent).into_iter().next(),
    }
}

/// Week-over-week observations: repeated negative emotions this week plus
/// direction of change against the previous week.
pub fn pattern_insights(results: &[(DateTime<Utc>, Emotion)], now: DateTime<Utc>) -> Vec<String> {
    let week_start = now - Duration::days(7);
    let prev_start = now - Duration::days(14);

    let this_week: Vec<Emotion> = results
        .iter()
        .filter(|(at, _)| *at >= week_start)
        .map(|(_, e)| *e)
        .collect();
    let last_week: Vec<Emotion> = results
        .iter()
        .filter(|(at, _)| *at >= prev_start && *at < week_start)
        .map(|(_, e)| *e)
        .collect();

    let mut insights = Vec::new();

    for emotion in [
        Emotion::AngerDisgust,
        Emotion::SadnessGrief,
        Emotion::FearNervousness,
    ] {
        let count = this_week.iter().filter(|&&e| e == emotion).count();
        if count >= 2 {
            insights.push(format!(
                "You experienced {} {} times this week.",
                emotion.display().to_lowercase(),
                count
            ));
        }
    }

    let this_neg = this_week.iter().filter(|e| e.is_negative()).count();
    let last_neg = last_week.iter().filter(|e| e.is_negative()).count();
    let this_pos = this_week.iter().filter(|e| e.is_positive()).count();
    let last_pos = last_week.iter().filter(|e| e.is_positive()).count();

    if this_neg < last_neg {
        insights.push("Negative emotions have reduced compared to last week.".to_string());
    } else if this_neg > last_neg {
        insights.push("Negative emotions were higher than last week.".to_string());
    }

    if this_pos > last_pos {
        insights.push("Your positive emotions increased compared to last week.".to_string());
    }

    insights
}

/// Percent of entries with a positive emotion, 1 d.p. Zero when empty.
pub fn positive_ratio(emotions: &[Emotion]) -> f64 {
    if emotions.is_empty() {
        return 0.0;
    }
    let positive = emotions.iter().filter(|e| e.is_positive()).count();
    round1(positive as f64 * 100.0 / emotions.len() as f64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
