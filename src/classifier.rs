use crate::models::{Classification, Emotion};
use rand::Rng;
use std::ops::Range;

struct Rule {
    stem: &'static str,
    emotion: Emotion,
    band: Range<f64>,
}

/// Checked in order; the first stem found in the text decides the label.
const RULES: &[Rule] = &[
    Rule { stem: "happy", emotion: Emotion::Happy, band: 75.0..95.0 },
    Rule { stem: "sad", emotion: Emotion::Sad, band: 20.0..50.0 },
    Rule { stem: "anxious", emotion: Emotion::Anxious, band: 30.0..55.0 },
    Rule { stem: "excited", emotion: Emotion::Excited, band: 80.0..95.0 },
    Rule { stem: "angry", emotion: Emotion::Angry, band: 25.0..50.0 },
    Rule { stem: "content", emotion: Emotion::Content, band: 65.0..85.0 },
];

pub const NEUTRAL_BAND: Range<f64> = 50.0..80.0;

pub fn classify(text: &str) -> Classification {
    classify_with(text, &mut rand::thread_rng())
}

pub fn classify_with<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Classification {
    match match_rule(text) {
        Some(rule) => Classification::new(rule.emotion, rng.gen_range(rule.band.clone())),
        None => Classification::new(Emotion::Neutral, rng.gen_range(NEUTRAL_BAND)),
    }
}

fn match_rule(text: &str) -> Option<&'static Rule> {
    let lower = text.to_lowercase();
    RULES.iter().find(|rule| {
        lower.contains(rule.stem)
            || lower.contains(&format!("{}ness", rule.stem))
            || lower.contains(&format!("{}ing", rule.stem))
    })
}
