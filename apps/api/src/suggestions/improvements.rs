use serde::{Deserialize, Serialize};

const SUMMARY_TIPS: &[&str] = &[
    "Start with your role/title",
    "Highlight 2-3 key achievements",
    "Mention years of experience",
    "Include your value proposition",
];

const EXPERIENCE_TIPS: &[&str] = &[
    "Use STAR method (Situation, Task, Action, Result)",
    "Start each bullet with action verbs",
    "Include quantifiable metrics",
    "Focus on achievements, not just duties",
];

const SKILLS_TIPS: &[&str] = &[
    "Group by category (Technical, Soft, Languages)",
    "List proficiency levels",
    "Include relevant certifications",
    "Align with job requirements",
];

/// Checklist for a section; sections without one get an empty list.
pub fn improvement_tips(section: &str) -> &'static [&'static str] {
    match section.trim().to_ascii_lowercase().as_str() {
        "summary" => SUMMARY_TIPS,
        "experience" => EXPERIENCE_TIPS,
        "skills" => SKILLS_TIPS,
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhanceKind {
    ExperienceDescription,
    Summary,
    #[serde(other)]
    Other,
}

const EXPERIENCE_EXAMPLES: &[&str] = &[
    "Led cross-functional team of 5 members to deliver project 2 weeks ahead of schedule",
    "Implemented automated testing framework, reducing bugs by 40%",
    "Managed budget of $500K while maintaining 95% cost efficiency",
    "Developed new feature that increased user engagement by 35%",
];

const SUMMARY_EXAMPLES: &[&str] = &[
    "Results-driven professional with 5+ years of experience in software development. Proven track record of delivering high-quality solutions and leading successful projects. Passionate about innovation and continuous improvement.",
    "Experienced team leader with expertise in project management and agile methodologies. Successfully delivered 20+ projects on time and under budget. Strong communicator with ability to bridge technical and business needs.",
];

/// A canned rewrite of `text`, picked by its character count so the same
/// input always gets the same example. Unknown kinds echo `text`.
pub fn enhanced_example(text: &str, kind: EnhanceKind) -> String {
    let examples = match kind {
        EnhanceKind::ExperienceDescription => EXPERIENCE_EXAMPLES,
        EnhanceKind::Summary => SUMMARY_EXAMPLES,
        EnhanceKind::Other => return text.to_string(),
    };
    examples[text.chars().count() % examples.len()].to_string()
}
