//! Document store: section-scoped actions reduced into a new document.
//!
//! Every mutation goes through `reduce`, which never touches the input
//! document: the affected section is rebuilt and the whole document returned.
//! Add / update-by-id / remove-by-id are the only entry-level primitives.

use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::ids::next_entry_id;
use crate::models::document::{
    CvDocument, EducationEntry, EntryId, ExperienceEntry, InterestEntry, LanguageEntry,
    PersonalInfo, ProjectEntry, SkillEntry,
};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("no {section} entry with id {id}")]
    EntryNotFound { section: Section, id: EntryId },

    #[error("{section} entries have no field '{field}'")]
    UnknownField { section: Section, field: String },

    #[error("field '{0}' cannot be changed")]
    ImmutableField(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("invalid {section} list: {reason}")]
    InvalidEntries { section: Section, reason: String },
}

/// The list-valued sections of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Education,
    Experience,
    Skills,
    Languages,
    Interests,
    Projects,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::Languages,
        Section::Interests,
        Section::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Languages => "languages",
            Section::Interests => "interests",
            Section::Projects => "projects",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DocumentError::UnknownSection(s.to_string()))
    }
}

/// An entry of a list-valued section.
pub trait SectionEntry: Clone + Serialize + DeserializeOwned {
    const SECTION: Section;

    fn id(&self) -> EntryId;

    /// A new entry carrying `id` and the section's empty defaults.
    fn blank(id: EntryId) -> Self;
}

macro_rules! section_entry {
    ($ty:ty, $section:expr) => {
        impl SectionEntry for $ty {
            const SECTION: Section = $section;

            fn id(&self) -> EntryId {
                self.id
            }

            fn blank(id: EntryId) -> Self {
                Self {
                    id,
                    ..Default::default()
                }
            }
        }
    };
}

section_entry!(EducationEntry, Section::Education);
section_entry!(ExperienceEntry, Section::Experience);
section_entry!(SkillEntry, Section::Skills);
section_entry!(LanguageEntry, Section::Languages);
section_entry!(InterestEntry, Section::Interests);
section_entry!(ProjectEntry, Section::Projects);

/// Appends a blank entry with the given id.
pub fn add_entry<T: SectionEntry>(list: &[T], id: EntryId) -> Vec<T> {
    let mut next = list.to_vec();
    next.push(T::blank(id));
    next
}

/// Replaces the entry matching `id` with a shallow merge of one field.
/// Every other entry is cloned untouched.
pub fn update_entry<T: SectionEntry>(
    list: &[T],
    id: EntryId,
    field: &str,
    value: Value,
) -> Result<Vec<T>, DocumentError> {
    if field == "id" {
        return Err(DocumentError::ImmutableField(field.to_string()));
    }
    let position = list
        .iter()
        .position(|entry| entry.id() == id)
        .ok_or(DocumentError::EntryNotFound {
            section: T::SECTION,
            id,
        })?;

    let mut next = list.to_vec();
    next[position] = merge_field(&list[position], field, value)?;
    Ok(next)
}

/// Drops the entry matching `id`. Unknown ids leave the list unchanged.
pub fn remove_entry<T: SectionEntry>(list: &[T], id: EntryId) -> Vec<T> {
    list.iter().filter(|entry| entry.id() != id).cloned().collect()
}

fn merge_field<T: SectionEntry>(entry: &T, field: &str, value: Value) -> Result<T, DocumentError> {
    let invalid = |reason: String| DocumentError::InvalidValue {
        field: field.to_string(),
        reason,
    };
    let mut object = match serde_json::to_value(entry).map_err(|e| invalid(e.to_string()))? {
        Value::Object(map) => map,
        _ => return Err(invalid("entry is not an object".to_string())),
    };
    if !object.contains_key(field) {
        return Err(DocumentError::UnknownField {
            section: T::SECTION,
            field: field.to_string(),
        });
    }
    object.insert(field.to_string(), value);
    serde_json::from_value(Value::Object(object)).map_err(|e| invalid(e.to_string()))
}

fn parse_entries<T: SectionEntry>(entries: Value) -> Result<Vec<T>, DocumentError> {
    serde_json::from_value(entries).map_err(|e| DocumentError::InvalidEntries {
        section: T::SECTION,
        reason: e.to_string(),
    })
}

/// A single mutation of the document.
#[derive(Debug, Clone)]
pub enum DocumentAction {
    SetPersonalInfo(PersonalInfo),
    AddEntry {
        section: Section,
        id: EntryId,
    },
    UpdateEntry {
        section: Section,
        id: EntryId,
        field: String,
        value: Value,
    },
    RemoveEntry {
        section: Section,
        id: EntryId,
    },
    /// Whole-slice replacement handed back by a section editor.
    ReplaceSection {
        section: Section,
        entries: Value,
    },
    Replace(CvDocument),
}

impl DocumentAction {
    /// An add action carrying a freshly minted id.
    pub fn add(section: Section) -> Self {
        DocumentAction::AddEntry {
            section,
            id: next_entry_id(),
        }
    }
}

/// Outcome of a reduction.
#[derive(Debug, Clone)]
pub struct Reduced {
    pub document: CvDocument,
    /// Id of the entry created by an `AddEntry` action.
    pub created: Option<EntryId>,
}

/// Applies `action` to `document`, returning the new document.
pub fn reduce(document: &CvDocument, action: DocumentAction) -> Result<Reduced, DocumentError> {
    let mut next = document.clone();
    let mut created = None;

    match action {
        DocumentAction::SetPersonalInfo(info) => next.personal_info = info,
        DocumentAction::Replace(replacement) => next = replacement,
        DocumentAction::AddEntry { section, id } => {
            created = Some(id);
            match section {
                Section::Education => next.education = add_entry(&document.education, id),
                Section::Experience => next.experience = add_entry(&document.experience, id),
                Section::Skills => next.skills = add_entry(&document.skills, id),
                Section::Languages => next.languages = add_entry(&document.languages, id),
                Section::Interests => next.interests = add_entry(&document.interests, id),
                Section::Projects => next.projects = add_entry(&document.projects, id),
            }
        }
        DocumentAction::UpdateEntry {
            section,
            id,
            field,
            value,
        } => match section {
            Section::Education => {
                next.education = update_entry(&document.education, id, &field, value)?
            }
            Section::Experience => {
                next.experience = update_entry(&document.experience, id, &field, value)?
            }
            Section::Skills => next.skills = update_entry(&document.skills, id, &field, value)?,
            Section::Languages => {
                next.languages = update_entry(&document.languages, id, &field, value)?
            }
            Section::Interests => {
                next.interests = update_entry(&document.interests, id, &field, value)?
            }
            Section::Projects => {
                next.projects = update_entry(&document.projects, id, &field, value)?
            }
        },
        DocumentAction::RemoveEntry { section, id } => match section {
            Section::Education => next.education = remove_entry(&document.education, id),
            Section::Experience => next.experience = remove_entry(&document.experience, id),
            Section::Skills => next.skills = remove_entry(&document.skills, id),
            Section::Languages => next.languages = remove_entry(&document.languages, id),
            Section::Interests => next.interests = remove_entry(&document.interests, id),
            Section::Projects => next.projects = remove_entry(&document.projects, id),
        },
        DocumentAction::ReplaceSection { section, entries } => match section {
            Section::Education => next.education = parse_entries(entries)?,
            Section::Experience => next.experience = parse_entries(entries)?,
            Section::Skills => next.skills = parse_entries(entries)?,
            Section::Languages => next.languages = parse_entries(entries)?,
            Section::Interests => next.interests = parse_entries(entries)?,
            Section::Projects => next.projects = parse_entries(entries)?,
        },
    }

    Ok(Reduced {
        document: next,
        created,
    })
}
