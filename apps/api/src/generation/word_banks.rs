//! Fixed word lists for the rule-based generator. Order matters: selection is
//! by index modulo length, so reordering changes generated text.

pub const ACTION_VERBS: [&str; 64] = [
    "Spearheaded", "Orchestrated", "Engineered", "Architected", "Accelerated", "Amplified",
    "Catalyzed", "Championed", "Commanded", "Crafted", "Cultivated", "Delivered", "Demonstrated",
    "Deployed", "Devised", "Directed", "Drove", "Elevated", "Enabled", "Enhanced", "Established",
    "Executed", "Expanded", "Expedited", "Facilitated", "Flourished", "Forged", "Fostered",
    "Founded", "Generated", "Governed", "Grew", "Guided", "Implemented", "Improved", "Innovated",
    "Inspired", "Instituted", "Integrated", "Introduced", "Invested", "Investigated", "Launched",
    "Led", "Leveraged", "Maximized", "Modernized", "Navigated", "Optimized", "Orchestrated",
    "Pioneered", "Produced", "Propelled", "Restructured", "Revolutionized", "Scaled", "Secured",
    "Shaped", "Spearheaded", "Steered", "Streamlined", "Strengthened", "Succeeded", "Transformed",
];

pub const ADJECTIVES: [&str; 20] = [
    "innovative", "strategic", "creative", "analytical", "detail-oriented", "results-driven",
    "collaborative", "dynamic", "proactive", "motivated", "dedicated", "ambitious",
    "forward-thinking", "visionary", "resourceful", "solution-focused", "high-performing",
    "customer-centric", "data-driven", "agile",
];

/// `items[index % len]`.
pub fn pick<'a>(items: &[&'a str], index: usize) -> &'a str {
    if items.is_empty() {
        return "";
    }
    items[index % items.len()]
}

/// Uppercases the first character only.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_wraps_around() {
        assert_eq!(pick(&ACTION_VERBS, 0), "Spearheaded");
        assert_eq!(pick(&ACTION_VERBS, 64), "Spearheaded");
        assert_eq!(pick(&ADJECTIVES, 21), "strategic");
        assert_eq!(pick(&[], 3), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("detail-oriented"), "Detail-oriented");
        assert_eq!(capitalize(""), "");
    }
}
