//! Turns a dream into a prompt for the image service.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::constants::{
    MAX_DREAM_TEXT_CHARS, MAX_PROMPT_CHARS, MAX_SYMBOLS, PROMPT_ELLIPSIS, STYLE_KEYWORDS,
};
use crate::input::{DreamInput, Emotions};

/// Style phrase for each emotion we know how to draw.
pub static EMOTION_STYLES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "joy",
            "bright, golden light, uplifting, celebration, warm colors",
        ),
        (
            "fear",
            "dark, shadows, dramatic lighting, ominous, mysterious",
        ),
        ("anxiety", "chaotic, swirling, restless energy, tension"),
        (
            "sadness",
            "melancholic, blue tones, gentle rain, soft light",
        ),
        ("peace", "serene, calm, soft pastels, zen, harmonious"),
        (
            "excitement",
            "dynamic, energetic, vibrant, explosive colors",
        ),
        ("confusion", "surreal, fragmented, abstract, maze-like"),
    ])
});

/// The emotion with the highest weight; on a tie the one given first wins.
pub fn dominant_emotion(emotions: &Emotions) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for (name, weight) in emotions.iter() {
        if weight.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, best_weight)| weight > best_weight) {
            best = Some((name, weight));
        }
    }
    best.map(|(name, _)| name)
}

/// Style phrase for the dominant emotion, if it's one we recognise.
pub fn emotion_style(emotions: &Emotions) -> Option<&'static str> {
    dominant_emotion(emotions).and_then(|name| EMOTION_STYLES.get(name).copied())
}

/// Builds the prompt, never longer than [MAX_PROMPT_CHARS] characters.
pub fn build_prompt(input: &DreamInput) -> String {
    let dream_text = input
        .text
        .chars()
        .take(MAX_DREAM_TEXT_CHARS)
        .collect::<String>();

    let mut elements = vec![format!("surreal dreamscape artwork: {dream_text}")];
    elements.extend(STYLE_KEYWORDS.iter().map(|keyword| keyword.to_string()));
    if let Some(style) = emotion_style(&input.emotions) {
        elements.push(style.to_string());
    }
    elements.extend(input.symbols.iter().take(MAX_SYMBOLS).cloned());

    truncate_prompt(elements.join(", "))
}

fn truncate_prompt(prompt: String) -> String {
    if prompt.chars().count() <= MAX_PROMPT_CHARS {
        return prompt;
    }
    let keep = MAX_PROMPT_CHARS - PROMPT_ELLIPSIS.chars().count();
    let mut truncated = prompt.chars().take(keep).collect::<String>();
    truncated.push_str(PROMPT_ELLIPSIS);
    truncated
}
