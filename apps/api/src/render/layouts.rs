//! The four arrangements of the same document fields.

use crate::models::document::{CvDocument, EducationEntry, ExperienceEntry, ProjectEntry};
use crate::render::dates::{education_range, experience_range};
use crate::render::tree::{Block, Column, ColumnRole, EntryItem, Item, SectionBlock, SectionKey, Tag};

const NAME_PLACEHOLDER: &str = "Your Name";

struct Headings {
    summary: Option<&'static str>,
    experience: &'static str,
    education: &'static str,
    skills: &'static str,
    projects: &'static str,
    languages: &'static str,
    interests: &'static str,
}

const MODERN_HEADINGS: Headings = Headings {
    summary: Some("Professional Summary"),
    experience: "Work Experience",
    education: "Education",
    skills: "Skills",
    projects: "Projects",
    languages: "Languages",
    interests: "Interests",
};

const CLASSIC_HEADINGS: Headings = Headings {
    summary: Some("PROFESSIONAL SUMMARY"),
    experience: "WORK EXPERIENCE",
    education: "EDUCATION",
    skills: "SKILLS",
    projects: "PROJECTS",
    languages: "LANGUAGES",
    interests: "INTERESTS",
};

const MINIMAL_HEADINGS: Headings = Headings {
    summary: None,
    experience: "Experience",
    education: "Education",
    skills: "Skills",
    projects: "Projects",
    languages: "Languages",
    interests: "Interests",
};

pub fn modern(doc: &CvDocument) -> Vec<Column> {
    let h = &MODERN_HEADINGS;
    let blocks = [
        Some(title(doc)),
        contact(doc, None, Some("•")),
        summary(doc, h.summary),
        section(SectionKey::Experience, h.experience, entries(&doc.experience, stacked_experience)),
        section(SectionKey::Education, h.education, entries(&doc.education, stacked_education)),
        section(SectionKey::Skills, h.skills, skill_tags(doc)),
        section(SectionKey::Projects, h.projects, entries(&doc.projects, project)),
        section(SectionKey::Languages, h.languages, language_tags(doc)),
        section(SectionKey::Interests, h.interests, interest_tags(doc)),
    ];
    vec![main_column(blocks)]
}

pub fn classic(doc: &CvDocument) -> Vec<Column> {
    let h = &CLASSIC_HEADINGS;
    let blocks = [
        Some(title(doc)),
        contact(doc, None, Some("|")),
        summary(doc, h.summary),
        section(SectionKey::Experience, h.experience, entries(&doc.experience, inline_experience)),
        section(SectionKey::Education, h.education, entries(&doc.education, inline_education)),
        section(SectionKey::Skills, h.skills, skill_tags(doc)),
        section(SectionKey::Projects, h.projects, entries(&doc.projects, project)),
        section(SectionKey::Languages, h.languages, language_tags(doc)),
        section(SectionKey::Interests, h.interests, interest_tags(doc)),
    ];
    vec![main_column(blocks)]
}

pub fn minimal(doc: &CvDocument) -> Vec<Column> {
    let h = &MINIMAL_HEADINGS;
    let blocks = [
        Some(title(doc)),
        contact(doc, None, None),
        summary(doc, h.summary),
        section(SectionKey::Experience, h.experience, entries(&doc.experience, compact_experience)),
        section(SectionKey::Education, h.education, entries(&doc.education, compact_education)),
        section(SectionKey::Skills, h.skills, skill_tags(doc)),
        section(SectionKey::Projects, h.projects, entries(&doc.projects, project)),
        section(SectionKey::Languages, h.languages, language_tags(doc)),
        section(SectionKey::Interests, h.interests, interest_tags(doc)),
    ];
    vec![main_column(blocks)]
}

pub fn two_column(doc: &CvDocument) -> Vec<Column> {
    let h = &MODERN_HEADINGS;
    let sidebar = [
        Some(title(doc)),
        contact(doc, Some("Contact"), None),
        section(SectionKey::Skills, h.skills, skill_tags(doc)),
        section(SectionKey::Languages, h.languages, language_tags(doc)),
        section(SectionKey::Interests, h.interests, interest_tags(doc)),
    ];
    let main = [
        summary(doc, Some("About")),
        section(SectionKey::Experience, h.experience, entries(&doc.experience, stacked_experience)),
        section(SectionKey::Education, h.education, entries(&doc.education, sidebar_education)),
        section(SectionKey::Projects, h.projects, entries(&doc.projects, project)),
    ];
    vec![
        Column {
            role: ColumnRole::Sidebar,
            blocks: sidebar.into_iter().flatten().collect(),
        },
        main_column(main),
    ]
}

// ── Shared pieces ───────────────────────────────────────────────────────────

fn main_column<const N: usize>(blocks: [Option<Block>; N]) -> Column {
    Column {
        role: ColumnRole::Main,
        blocks: blocks.into_iter().flatten().collect(),
    }
}

fn text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn title(doc: &CvDocument) -> Block {
    Block::Title {
        text: text(&doc.personal_info.name).unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
    }
}

fn contact(doc: &CvDocument, heading: Option<&str>, separator: Option<&str>) -> Option<Block> {
    let info = &doc.personal_info;
    let items: Vec<String> = [&info.email, &info.phone, &info.location]
        .into_iter()
        .filter_map(|v| text(v))
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(Block::Contact {
        heading: heading.map(str::to_string),
        items,
        separator: separator.map(str::to_string),
    })
}

fn summary(doc: &CvDocument, heading: Option<&str>) -> Option<Block> {
    let summary = text(&doc.personal_info.summary)?;
    section(
        SectionKey::Summary,
        heading.unwrap_or_default(),
        vec![Item::Paragraph { text: summary }],
    )
}

/// A section block, or `None` when there is nothing to show. An empty heading
/// renders without a header line.
fn section(key: SectionKey, heading: &str, items: Vec<Item>) -> Option<Block> {
    if items.is_empty() {
        return None;
    }
    Some(Block::Section(SectionBlock {
        key,
        heading: text(heading),
        items,
    }))
}

fn entries<T>(list: &[T], map: fn(&T) -> EntryItem) -> Vec<Item> {
    list.iter().map(|entry| Item::Entry(map(entry))).collect()
}

fn tags(tags: Vec<Tag>) -> Vec<Item> {
    if tags.is_empty() {
        Vec::new()
    } else {
        vec![Item::Tags { tags }]
    }
}

fn skill_tags(doc: &CvDocument) -> Vec<Item> {
    tags(
        doc.skills
            .iter()
            .filter_map(|s| {
                text(&s.name).map(|label| Tag {
                    label,
                    level: Some(s.level.as_str().to_string()),
                })
            })
            .collect(),
    )
}

fn language_tags(doc: &CvDocument) -> Vec<Item> {
    tags(
        doc.languages
            .iter()
            .filter_map(|l| {
                text(&l.name).map(|label| Tag {
                    label,
                    level: Some(l.level.as_str().to_string()),
                })
            })
            .collect(),
    )
}

fn interest_tags(doc: &CvDocument) -> Vec<Item> {
    tags(
        doc.interests
            .iter()
            .filter_map(|i| text(&i.name).map(|label| Tag { label, level: None }))
            .collect(),
    )
}

// ── Entry arrangements ──────────────────────────────────────────────────────

fn stacked_experience(exp: &ExperienceEntry) -> EntryItem {
    EntryItem {
        title: exp.job_title.trim().to_string(),
        subtitle: text(&exp.company),
        details: text(&exp.location).into_iter().collect(),
        dates: experience_range(exp),
        body: text(&exp.description),
    }
}

fn inline_experience(exp: &ExperienceEntry) -> EntryItem {
    EntryItem {
        title: join_present(&[exp.job_title.as_str(), exp.company.as_str()], " — "),
        subtitle: None,
        details: text(&exp.location).into_iter().collect(),
        dates: experience_range(exp),
        body: text(&exp.description),
    }
}

fn compact_experience(exp: &ExperienceEntry) -> EntryItem {
    EntryItem {
        title: exp.job_title.trim().to_string(),
        subtitle: text(&join_present(&[exp.company.as_str(), exp.location.as_str()], " · ")),
        details: Vec::new(),
        dates: experience_range(exp),
        body: text(&exp.description),
    }
}

fn stacked_education(edu: &EducationEntry) -> EntryItem {
    EntryItem {
        title: edu.degree.trim().to_string(),
        subtitle: text(&edu.school),
        details: text(&edu.field).into_iter().collect(),
        dates: education_range(edu),
        body: text(&edu.description),
    }
}

fn inline_education(edu: &EducationEntry) -> EntryItem {
    EntryItem {
        title: join_present(&[edu.degree.as_str(), edu.field.as_str()], " in "),
        subtitle: text(&edu.school),
        details: Vec::new(),
        dates: education_range(edu),
        body: text(&edu.description),
    }
}

fn compact_education(edu: &EducationEntry) -> EntryItem {
    EntryItem {
        title: edu.school.trim().to_string(),
        subtitle: text(&join_present(&[edu.degree.as_str(), edu.field.as_str()], " in ")),
        details: Vec::new(),
        dates: education_range(edu),
        body: None,
    }
}

fn sidebar_education(edu: &EducationEntry) -> EntryItem {
    EntryItem {
        body: None,
        ..stacked_education(edu)
    }
}

fn project(project: &ProjectEntry) -> EntryItem {
    EntryItem {
        title: project.name.trim().to_string(),
        subtitle: None,
        details: text(&project.technologies)
            .map(|tech| format!("Technologies: {tech}"))
            .into_iter()
            .collect(),
        dates: None,
        body: text(&project.description),
    }
}
