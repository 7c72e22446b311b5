//! Rule-based lint over a document.
//!
//! Every applicable rule fires. Findings come out in section order (personal,
//! experience, education, skills, projects, general) and in entry order
//! within a section.

use serde::Serialize;

use crate::models::document::CvDocument;

const MIN_SUMMARY_CHARS: usize = 50;
const MIN_DESCRIPTION_CHARS: usize = 100;
const MIN_SKILLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Tip,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingSection {
    #[serde(rename = "Personal Info")]
    PersonalInfo,
    Experience,
    Education,
    Skills,
    Projects,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub section: FindingSection,
    pub severity: Severity,
    pub message: String,
}

impl Suggestion {
    fn new(section: FindingSection, severity: Severity, message: impl Into<String>) -> Self {
        Suggestion {
            section,
            severity,
            message: message.into(),
        }
    }
}

fn personal(doc: &CvDocument, out: &mut Vec<Suggestion>) {
    let info = &doc.personal_info;
    if info.summary.chars().count() < MIN_SUMMARY_CHARS {
        out.push(Suggestion::new(
            FindingSection::PersonalInfo,
            Severity::Warning,
            "Your professional summary is too short. Aim for 100-150 words highlighting your key strengths and career goals.",
        ));
    }
    if info.phone.is_empty() || info.email.is_empty() {
        out.push(Suggestion::new(
            FindingSection::PersonalInfo,
            Severity::Error,
            "Missing contact information. Add both phone and email for better visibility.",
        ));
    }
}

fn experience(doc: &CvDocument, out: &mut Vec<Suggestion>) {
    if doc.experience.is_empty() {
        out.push(Suggestion::new(
            FindingSection::Experience,
            Severity::Error,
            "No work experience added. This is crucial for most positions.",
        ));
        return;
    }
    for (index, exp) in doc.experience.iter().enumerate() {
        let position = index + 1;
        if exp.description.chars().count() < MIN_DESCRIPTION_CHARS {
            out.push(Suggestion::new(
                FindingSection::Experience,
                Severity::Warning,
                format!(
                    "Position {position} ({}): Add more details about achievements and responsibilities. Use bullet points with quantifiable results.",
                    exp.job_title
                ),
            ));
        }
        if !exp.description.is_empty() && !exp.description.chars().any(|c| c.is_ascii_digit()) {
            out.push(Suggestion::new(
                FindingSection::Experience,
                Severity::Tip,
                format!(
                    "Position {position}: Add numbers/metrics (e.g., \"increased sales by 30%\", \"managed team of 5\") to make impact more tangible."
                ),
            ));
        }
    }
}

fn education(doc: &CvDocument, out: &mut Vec<Suggestion>) {
    if doc.education.is_empty() {
        out.push(Suggestion::new(
            FindingSection::Education,
            Severity::Warning,
            "Add your educational background to strengthen your CV.",
        ));
    }
}

fn skills(doc: &CvDocument, out: &mut Vec<Suggestion>) {
    if doc.skills.len() < MIN_SKILLS {
        out.push(Suggestion::new(
            FindingSection::Skills,
            Severity::Warning,
            "Add at least 5-10 relevant skills. Include both technical and soft skills.",
        ));
    }
}

fn projects(doc: &CvDocument, out: &mut Vec<Suggestion>) {
    if doc.projects.is_empty() {
        out.push(Suggestion::new(
            FindingSection::Projects,
            Severity::Tip,
            "Consider adding personal or professional projects to showcase your skills in action.",
        ));
    } else {
        out.push(Suggestion::new(
            FindingSection::Projects,
            Severity::Success,
            "Great! Including projects shows initiative and practical experience.",
        ));
    }
}

fn general(out: &mut Vec<Suggestion>) {
    out.push(Suggestion::new(
        FindingSection::General,
        Severity::Tip,
        "💡 Use action verbs: \"developed\", \"managed\", \"implemented\", \"increased\", \"led\"",
    ));
    out.push(Suggestion::new(
        FindingSection::General,
        Severity::Tip,
        "💡 Keep it concise: Aim for 1-2 pages. Recruiters spend 6-7 seconds on first review.",
    ));
}

/// Pure function of the document.
pub fn analyze(doc: &CvDocument) -> Vec<Suggestion> {
    let mut out = Vec::new();
    personal(doc, &mut out);
    experience(doc, &mut out);
    education(doc, &mut out);
    skills(doc, &mut out);
    projects(doc, &mut out);
    general(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;
    use crate::models::document::ExperienceEntry;

    fn experience_findings(doc: &CvDocument) -> Vec<Suggestion> {
        analyze(doc)
            .into_iter()
            .filter(|s| s.section == FindingSection::Experience)
            .collect()
    }

    #[test]
    fn test_empty_document_findings_in_order() {
        let findings = analyze(&CvDocument::default());
        let kinds: Vec<(FindingSection, Severity)> =
            findings.iter().map(|s| (s.section, s.severity)).collect();
        assert_eq!(
            kinds,
            vec![
                (FindingSection::PersonalInfo, Severity::Warning),
                (FindingSection::PersonalInfo, Severity::Error),
                (FindingSection::Experience, Severity::Error),
                (FindingSection::Education, Severity::Warning),
                (FindingSection::Skills, Severity::Warning),
                (FindingSection::Projects, Severity::Tip),
                (FindingSection::General, Severity::Tip),
                (FindingSection::General, Severity::Tip),
            ]
        );
    }

    #[test]
    fn test_personal_checks_use_raw_lengths() {
        let mut doc = sample_document();
        doc.personal_info.summary = format!("{:<50}", "Engineer");
        doc.personal_info.phone = " ".to_string();
        let personal: Vec<Suggestion> = analyze(&doc)
            .into_iter()
            .filter(|s| s.section == FindingSection::PersonalInfo)
            .collect();
        assert!(personal.is_empty());

        doc.personal_info.summary.pop();
        doc.personal_info.phone.clear();
        let severities: Vec<Severity> = analyze(&doc)
            .into_iter()
            .filter(|s| s.section == FindingSection::PersonalInfo)
            .map(|s| s.severity)
            .collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
    }

    #[test]
    fn test_empty_experience_yields_exactly_one_error() {
        let findings = experience_findings(&CvDocument::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_detailed_quantified_description_is_clean() {
        let mut doc = CvDocument::default();
        doc.experience.push(ExperienceEntry {
            job_title: "Engineer".to_string(),
            description: format!("Cut p99 latency by 40% {}", "x".repeat(100)),
            ..Default::default()
        });
        assert!(experience_findings(&doc).is_empty());
    }

    #[test]
    fn test_short_description_without_digits() {
        let mut doc = CvDocument::default();
        doc.experience.push(ExperienceEntry {
            job_title: "Engineer".to_string(),
            description: "Built things".to_string(),
            ..Default::default()
        });
        let findings = experience_findings(&doc);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.starts_with("Position 1 (Engineer): "));
        assert_eq!(findings[1].severity, Severity::Tip);
        assert!(findings[1].message.starts_with("Position 1: Add numbers/metrics"));
    }

    #[test]
    fn test_empty_description_only_warns() {
        let mut doc = CvDocument::default();
        doc.experience.push(ExperienceEntry::default());
        let findings = experience_findings(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_sample_with_projects_gets_success() {
        let findings = analyze(&sample_document());
        assert!(findings
            .iter()
            .any(|s| s.section == FindingSection::Projects && s.severity == Severity::Success));
        assert!(!findings
            .iter()
            .any(|s| s.section == FindingSection::PersonalInfo && s.severity == Severity::Error));
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(&analyze(&CvDocument::default())[0]).unwrap();
        assert_eq!(value["section"], "Personal Info");
        assert_eq!(value["severity"], "warning");
    }
}
