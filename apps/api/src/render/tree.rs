//! Presentational tree produced by the rendering engine.
//!
//! Both back-ends (HTML and PDF) consume this tree, so layout decisions live
//! in one place and the tree itself is what tests assert against.

use serde::Serialize;

use crate::models::document::CvDocument;
use crate::render::dates::DateRange;
use crate::render::layout::LayoutName;
use crate::render::layouts;
use crate::render::style::{resolve_style, ResolvedStyle, StyleOverrides};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCv {
    pub layout: LayoutName,
    pub style: ResolvedStyle,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Main,
    Sidebar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub role: ColumnRole,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title {
        text: String,
    },
    Contact {
        heading: Option<String>,
        items: Vec<String>,
        separator: Option<String>,
    },
    Section(SectionBlock),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Interests,
    Projects,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub key: SectionKey,
    pub heading: Option<String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Paragraph { text: String },
    Entry(EntryItem),
    Tags { tags: Vec<Tag> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryItem {
    pub title: String,
    pub subtitle: Option<String>,
    pub details: Vec<String>,
    pub dates: Option<DateRange>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub label: String,
    pub level: Option<String>,
}

#[cfg(test)]
impl RenderedCv {
    pub fn sections(&self) -> impl Iterator<Item = &SectionBlock> {
        self.columns
            .iter()
            .flat_map(|column| column.blocks.iter())
            .filter_map(|block| match block {
                Block::Section(section) => Some(section),
                _ => None,
            })
    }

    pub fn section(&self, key: SectionKey) -> Option<&SectionBlock> {
        self.sections().find(|section| section.key == key)
    }

    pub fn entries(&self, key: SectionKey) -> Vec<&EntryItem> {
        self.section(key)
            .map(|section| {
                section
                    .items
                    .iter()
                    .filter_map(|item| match item {
                        Item::Entry(entry) => Some(entry),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Renders `document` with `layout` and optional style overrides.
pub fn render(document: &CvDocument, layout: LayoutName, overrides: &StyleOverrides) -> RenderedCv {
    let columns = match layout {
        LayoutName::Modern => layouts::modern(document),
        LayoutName::Classic => layouts::classic(document),
        LayoutName::Minimal => layouts::minimal(document),
        LayoutName::TwoColumn => layouts::two_column(document),
    };
    RenderedCv {
        layout,
        style: resolve_style(overrides),
        columns,
    }
}

/// Like `render`, resolving the layout by name with fallback to the default.
pub fn render_named(document: &CvDocument, layout: &str, overrides: &StyleOverrides) -> RenderedCv {
    render(document, LayoutName::lookup(layout), overrides)
}
