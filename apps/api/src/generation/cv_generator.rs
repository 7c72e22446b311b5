//! Rule-based CV generator.
//!
//! Works offline and is fully deterministic: word choice rotates through
//! fixed lists by index, and the only date-dependent output is the footer
//! stamp of the HTML document.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use thiserror::Error;

use crate::generation::word_banks::{capitalize, pick, ACTION_VERBS, ADJECTIVES};
use crate::models::document::{CvDocument, EducationEntry, ExperienceEntry, SkillEntry};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("a name is required to generate or export a CV")]
    MissingName,

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// The part of the document the generator reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub personal_summary: String,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub experience: Vec<ExperienceEntry>,
}

impl From<&CvDocument> for GenerateInput {
    fn from(doc: &CvDocument) -> Self {
        let info = &doc.personal_info;
        GenerateInput {
            name: info.name.clone(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            location: info.location.clone(),
            personal_summary: info.summary.clone(),
            education: doc.education.clone(),
            skills: doc.skills.clone(),
            experience: doc.experience.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSections {
    pub profile: String,
    pub strengths: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCv {
    pub text: String,
    pub html: String,
    pub sections: GeneratedSections,
}

const RULE_WIDTH: usize = 49;
const NO_SKILLS_LINE: &str = "Comprehensive technical competencies";
const NO_EDUCATION_LINE: &str = "Educational credentials on file";

// ────────────────────────────────────────────────────────────────────────────
// Content rules
// ────────────────────────────────────────────────────────────────────────────

fn named_skills(skills: &[SkillEntry]) -> Vec<&SkillEntry> {
    skills.iter().filter(|s| !s.name.trim().is_empty()).collect()
}

/// Integer prefix of a free-form string (`"3 years"` → 3). Anything else is 0.
fn leading_integer(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

fn years_of_experience(input: &GenerateInput) -> String {
    let total = input
        .experience
        .iter()
        .map(|exp| leading_integer(&exp.years))
        .fold(0_i64, i64::saturating_add);
    if total > 0 {
        total.to_string()
    } else if !input.education.is_empty() {
        "3+".to_string()
    } else {
        "2+".to_string()
    }
}

pub fn profile_summary(input: &GenerateInput) -> String {
    if !input.personal_summary.trim().is_empty() {
        return input.personal_summary.clone();
    }
    let skills = named_skills(&input.skills);
    let n = skills.len();
    let skill_at = |i: usize, fallback: &'static str| {
        skills.get(i).map(|s| s.name.as_str()).unwrap_or(fallback)
    };
    let adj1 = capitalize(pick(&ADJECTIVES, n));
    let adj2 = pick(&ADJECTIVES, n + 2);
    let verb = pick(&ACTION_VERBS, n + 1);
    format!(
        "{adj1} and {adj2} professional with {years} years of proven expertise in {first}, \
         {second}, and {third}. {verb} cross-functional teams to deliver high-impact solutions \
         and drive organizational growth. Proven track record of exceeding objectives through \
         strategic innovation and meticulous execution.",
        years = years_of_experience(input),
        first = skill_at(0, "technology"),
        second = skill_at(1, "innovation"),
        third = skill_at(2, "excellence"),
    )
}

pub fn impact_statements(skills: &[SkillEntry]) -> Vec<String> {
    named_skills(skills)
        .into_iter()
        .take(5)
        .enumerate()
        .map(|(i, skill)| {
            let name = &skill.name;
            let verb = pick(&ACTION_VERBS, i % 5);
            match i % 5 {
                0 => format!("{verb} transformative initiatives using {name}, delivering 30%+ measurable improvements"),
                1 => format!("{verb} enterprise-scale solutions with {name}, achieving exceptional business outcomes"),
                2 => format!("{verb} strategic {name} implementations, optimizing workflows and increasing team productivity"),
                3 => format!("{verb} innovative {name} frameworks, positioning organization as industry leader"),
                _ => format!("{verb} {name} best practices across teams, ensuring quality excellence and compliance"),
            }
        })
        .collect()
}

pub fn formatted_skills(skills: &[SkillEntry]) -> Vec<String> {
    named_skills(skills)
        .into_iter()
        .enumerate()
        .map(|(i, skill)| {
            let name = &skill.name;
            let level = skill.level.as_str();
            match i % 10 {
                0 => format!("Extensive experience with {name}"),
                1 => format!("{name} proficiency at {level} level"),
                2 => format!("Skilled in {name}"),
                3 => format!("Deep knowledge of {name}"),
                4 => format!("Hands-on expertise in {name}"),
                5 => format!("Strong background in {name}"),
                6 => format!("Proficient with {name}"),
                7 => format!("{name} mastery"),
                8 => format!("{name} - {level} proficiency"),
                _ => format!("Comprehensive experience with {name}"),
            }
        })
        .collect()
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// `Degree in Field in School | start – end`, dates as entered.
pub fn formatted_education(education: &[EducationEntry]) -> Vec<String> {
    education
        .iter()
        .filter(|e| non_blank(&e.school).is_some() || non_blank(&e.degree).is_some())
        .map(|e| {
            let parts: Vec<&str> = [&e.degree, &e.field, &e.school]
                .into_iter()
                .filter_map(|p| non_blank(p))
                .collect();
            let dates: Vec<&str> = [&e.start_date, &e.end_date]
                .into_iter()
                .filter_map(|d| non_blank(d))
                .collect();
            let mut line = parts.join(" in ");
            if !dates.is_empty() {
                line.push_str(" | ");
                line.push_str(&dates.join(" – "));
            }
            line
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

fn contact_line(input: &GenerateInput) -> String {
    let mut line = input.email.clone();
    for extra in [&input.phone, &input.location] {
        if !extra.is_empty() {
            line.push_str(" | ");
            line.push_str(extra);
        }
    }
    line
}

fn bulleted(lines: &[String], bullet: &str) -> String {
    lines
        .iter()
        .map(|line| format!("{bullet} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn plain_text(input: &GenerateInput, sections: &GeneratedSections) -> String {
    let rule = "━".repeat(RULE_WIDTH);
    let skill_names = named_skills(&input.skills)
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(" • ");
    let expertise = if skill_names.is_empty() {
        NO_SKILLS_LINE.to_string()
    } else {
        skill_names
    };
    let education = if sections.education.is_empty() {
        format!("▪ {NO_EDUCATION_LINE}")
    } else {
        bulleted(&sections.education, "▪")
    };

    format!(
        "{name}\n{contact}\n\n{rule}\n\n\
         PROFESSIONAL PROFILE\n{profile}\n\n\
         KEY ACHIEVEMENTS\n{achievements}\n\n\
         CORE COMPETENCIES\n{competencies}\n\n\
         TECHNICAL EXPERTISE\n{expertise}\n\n\
         EDUCATION\n{education}\n\n{rule}\n",
        name = input.name,
        contact = contact_line(input),
        profile = sections.profile,
        achievements = bulleted(&sections.strengths, "▸"),
        competencies = bulleted(&sections.skills, "▸"),
    )
}

const CV_DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ name }} - Professional CV</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Segoe UI', -apple-system, BlinkMacSystemFont, sans-serif; line-height: 1.7; color: #2c3e50; background: linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%); padding: 20px; }
        .container { max-width: 950px; margin: 0 auto; background: white; padding: 50px 45px; box-shadow: 0 10px 40px rgba(0, 0, 0, 0.15); border-radius: 8px; }
        .header { border-bottom: 4px solid #0066cc; padding-bottom: 25px; margin-bottom: 35px; }
        .name { font-size: 42px; font-weight: 700; color: #0a3a66; margin-bottom: 12px; letter-spacing: -0.5px; }
        .contact { display: flex; flex-wrap: wrap; gap: 20px; margin-bottom: 8px; }
        .contact-item { color: #666; font-size: 14px; }
        .section { margin-bottom: 35px; }
        .section-title { font-size: 14px; font-weight: 700; color: #fff; background: linear-gradient(90deg, #0066cc 0%, #3399ff 100%); padding: 10px 15px; margin-bottom: 18px; text-transform: uppercase; letter-spacing: 2px; border-radius: 4px; }
        .profile-text { line-height: 1.9; font-size: 15px; text-align: justify; }
        .achievement, .competency, .edu-item { margin-bottom: 14px; padding-left: 24px; position: relative; font-size: 14px; }
        .achievement::before, .competency::before, .edu-item::before { content: ''; position: absolute; left: 0; top: 6px; width: 8px; height: 8px; background: #0066cc; border-radius: 50%; }
        .skills-container { display: flex; flex-wrap: wrap; gap: 10px; }
        .skill-tag { display: inline-block; padding: 8px 14px; background: #f0f5ff; border-left: 3px solid #0066cc; border-radius: 3px; font-size: 14px; }
        .footer { text-align: center; margin-top: 45px; padding-top: 20px; border-top: 2px solid #e8eef5; color: #999; font-size: 12px; letter-spacing: 1px; }
        @media print { body { background: white; padding: 0; } .container { box-shadow: none; border-radius: 0; padding: 0; } }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="name">{% if name %}{{ name }}{% else %}Professional Name{% endif %}</div>
            <div class="contact">
                {% if email %}<div class="contact-item">{{ email }}</div>{% endif %}
                {% if phone %}<div class="contact-item">{{ phone }}</div>{% endif %}
                {% if location %}<div class="contact-item">{{ location }}</div>{% endif %}
            </div>
        </div>

        <div class="section">
            <div class="section-title">Professional Overview</div>
            <div class="profile-text">{{ sections.profile }}</div>
        </div>

        <div class="section">
            <div class="section-title">Key Achievements</div>
            {% for statement in sections.strengths %}<div class="achievement">{{ statement }}</div>{% endfor %}
        </div>

        <div class="section">
            <div class="section-title">Core Competencies</div>
            {% for skill in sections.skills %}<div class="competency">{{ skill }}</div>{% endfor %}
        </div>

        <div class="section">
            <div class="section-title">Technical Expertise</div>
            <div class="skills-container">
                {% for skill in skill_names %}<div class="skill-tag">{{ skill }}</div>{% endfor %}
            </div>
        </div>
{% if sections.education %}
        <div class="section">
            <div class="section-title">Education</div>
            {% for entry in sections.education %}<div class="edu-item">{{ entry }}</div>{% endfor %}
        </div>
{% endif %}
        <div class="footer">
            Created with Professional CV Builder | {{ generated_on }}
        </div>
    </div>
</body>
</html>"#;

#[derive(Serialize)]
struct HtmlContext<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    location: &'a str,
    sections: &'a GeneratedSections,
    skill_names: Vec<&'a str>,
    generated_on: String,
}

fn html_document(
    input: &GenerateInput,
    sections: &GeneratedSections,
    date: NaiveDate,
) -> Result<String, GenerationError> {
    let context = HtmlContext {
        name: &input.name,
        email: &input.email,
        phone: &input.phone,
        location: &input.location,
        sections,
        skill_names: named_skills(&input.skills)
            .iter()
            .map(|s| s.name.as_str())
            .collect(),
        generated_on: date.format("%B %-d, %Y").to_string(),
    };
    let context = Context::from_serialize(&context)?;
    Ok(Tera::one_off(CV_DOCUMENT_TEMPLATE, &context, true)?)
}

/// Generates with the footer stamped `date`.
pub fn generate_on(input: &GenerateInput, date: NaiveDate) -> Result<GeneratedCv, GenerationError> {
    let sections = GeneratedSections {
        profile: profile_summary(input),
        strengths: impact_statements(&input.skills),
        skills: formatted_skills(&input.skills),
        education: formatted_education(&input.education),
    };
    let text = plain_text(input, &sections);
    let html = html_document(input, &sections, date)?;
    Ok(GeneratedCv {
        text,
        html,
        sections,
    })
}

pub fn generate(input: &GenerateInput) -> Result<GeneratedCv, GenerationError> {
    generate_on(input, Utc::now().date_naive())
}

/// Generation and both exports are gated on a non-blank name; the generator
/// itself does not check.
pub fn require_name(name: &str) -> Result<(), GenerationError> {
    if name.trim().is_empty() {
        Err(GenerationError::MissingName)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;
    use crate::models::document::{EntryId, SkillLevel};

    fn skill(name: &str, level: SkillLevel) -> SkillEntry {
        SkillEntry {
            id: EntryId(1),
            name: name.to_string(),
            level,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn ana_lee() -> GenerateInput {
        GenerateInput {
            name: "Ana Lee".to_string(),
            skills: vec![skill("Go", SkillLevel::Expert)],
            experience: vec![ExperienceEntry {
                years: "3".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_reports_summed_years_and_skill() {
        let summary = profile_summary(&ana_lee());
        assert!(summary.contains("3 years"), "{summary}");
        assert!(summary.contains("Go"));
        assert!(summary.starts_with(
            "Strategic and analytical professional with 3 years of proven expertise in Go, innovation, and excellence. Engineered"
        ));
    }

    #[test]
    fn test_years_sum_leading_integers() {
        let mut input = ana_lee();
        input.experience.push(ExperienceEntry {
            years: "2 years".to_string(),
            ..Default::default()
        });
        input.experience.push(ExperienceEntry {
            years: "lots".to_string(),
            ..Default::default()
        });
        assert!(profile_summary(&input).contains("with 5 years"));
    }

    #[test]
    fn test_years_fallbacks() {
        let mut input = GenerateInput::default();
        assert!(profile_summary(&input).contains("with 2+ years"));
        input.education.push(EducationEntry::default());
        assert!(profile_summary(&input).contains("with 3+ years"));
    }

    #[test]
    fn test_supplied_summary_is_used_verbatim() {
        let mut input = ana_lee();
        input.personal_summary = "Backend engineer.".to_string();
        assert_eq!(generate_on(&input, date()).unwrap().sections.profile, "Backend engineer.");
    }

    #[test]
    fn test_impact_statements_cap_at_five() {
        let skills: Vec<SkillEntry> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|n| skill(n, SkillLevel::Advanced))
            .collect();
        let impacts = impact_statements(&skills);
        assert_eq!(impacts.len(), 5);
        assert_eq!(
            impacts[0],
            "Spearheaded transformative initiatives using A, delivering 30%+ measurable improvements"
        );
        assert_eq!(
            impacts[4],
            "Accelerated E best practices across teams, ensuring quality excellence and compliance"
        );
    }

    #[test]
    fn test_formatted_skills_rotate_templates() {
        let mut skills: Vec<SkillEntry> = (0..11)
            .map(|i| skill(&format!("S{i}"), SkillLevel::Beginner))
            .collect();
        skills.insert(1, skill("  ", SkillLevel::Expert));
        let formatted = formatted_skills(&skills);
        assert_eq!(formatted.len(), 11);
        assert_eq!(formatted[1], "S1 proficiency at beginner level");
        assert_eq!(formatted[8], "S8 - beginner proficiency");
        assert_eq!(formatted[10], "Extensive experience with S10");
    }

    #[test]
    fn test_formatted_education() {
        let lines = formatted_education(&sample_document().education);
        assert_eq!(
            lines,
            vec!["Bachelor of Science in Computer Science in University of California, Berkeley | 2017-09 – 2021-05"]
        );
        let partial = EducationEntry {
            school: "MIT".to_string(),
            end_date: "2020".to_string(),
            ..Default::default()
        };
        assert_eq!(formatted_education(&[partial]), vec!["MIT | 2020"]);
        assert!(formatted_education(&[EducationEntry::default()]).is_empty());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let input = GenerateInput::from(&sample_document());
        let first = generate_on(&input, date()).unwrap();
        let second = generate_on(&input, date()).unwrap();
        assert_eq!(first, second);
        assert_eq!(generate(&input).unwrap().text, first.text);
    }

    #[test]
    fn test_plain_text_layout() {
        let text = generate_on(&ana_lee(), date()).unwrap().text;
        let rule = "━".repeat(49);
        assert!(text.starts_with(&format!("Ana Lee\n\n\n{rule}\n\nPROFESSIONAL PROFILE\n")));
        assert!(text.contains("KEY ACHIEVEMENTS\n▸ Spearheaded transformative initiatives using Go"));
        assert!(text.contains("CORE COMPETENCIES\n▸ Extensive experience with Go"));
        assert!(text.contains("TECHNICAL EXPERTISE\nGo\n"));
        assert!(text.ends_with(&format!("EDUCATION\n▪ Educational credentials on file\n\n{rule}\n")));
    }

    #[test]
    fn test_empty_input_still_generates() {
        let generated = generate_on(&GenerateInput::default(), date()).unwrap();
        assert!(generated.text.contains(NO_SKILLS_LINE));
        assert!(generated.sections.strengths.is_empty());
        assert!(generated.html.contains("Professional Name"));
    }

    #[test]
    fn test_html_document_stamps_date_and_escapes() {
        let mut input = ana_lee();
        input.name = "Ana <Lee>".to_string();
        let html = generate_on(&input, date()).unwrap().html;
        assert!(html.contains("March 5, 2024"));
        assert!(html.contains("Ana &lt;Lee&gt;"));
        assert!(!html.contains("<div class=\"section-title\">Education</div>"));
    }

    #[test]
    fn test_require_name() {
        assert!(matches!(
            require_name(&GenerateInput::default().name),
            Err(GenerationError::MissingName)
        ));
        assert!(matches!(require_name("  \t"), Err(GenerationError::MissingName)));
        assert!(require_name(&ana_lee().name).is_ok());
    }
}
