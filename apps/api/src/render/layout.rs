use serde::{Deserialize, Serialize};

/// The closed set of layouts. Unknown names resolve to `Modern`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutName {
    #[default]
    Modern,
    Classic,
    Minimal,
    TwoColumn,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutInfo {
    pub key: LayoutName,
    pub name: &'static str,
    pub description: &'static str,
}

impl LayoutName {
    pub const ALL: [LayoutName; 4] = [
        LayoutName::Modern,
        LayoutName::Classic,
        LayoutName::Minimal,
        LayoutName::TwoColumn,
    ];

    /// Pure lookup by name; never fails.
    pub fn lookup(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => LayoutName::Classic,
            "minimal" => LayoutName::Minimal,
            "two-column" | "two_column" | "twocolumn" => LayoutName::TwoColumn,
            _ => LayoutName::Modern,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutName::Modern => "modern",
            LayoutName::Classic => "classic",
            LayoutName::Minimal => "minimal",
            LayoutName::TwoColumn => "two-column",
        }
    }

    pub fn info(&self) -> LayoutInfo {
        let (name, description) = match self {
            LayoutName::Modern => ("Modern", "Clean, contemporary design with accent color"),
            LayoutName::Classic => ("Classic", "Traditional CV with formal structure"),
            LayoutName::Minimal => ("Minimal", "Minimalist design with focus on content"),
            LayoutName::TwoColumn => ("Two-Column", "Sidebar layout with contact info on left"),
        };
        LayoutInfo {
            key: *self,
            name,
            description,
        }
    }
}
