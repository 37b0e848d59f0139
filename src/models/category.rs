use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of post categories. Serialized as the lowercase slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tech,
    Lifestyle,
    Travel,
    Food,
    Education,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tech,
        Category::Lifestyle,
        Category::Travel,
        Category::Food,
        Category::Education,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Lifestyle => "lifestyle",
            Category::Travel => "travel",
            Category::Food => "food",
            Category::Education => "education",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Tech => "Tech",
            Category::Lifestyle => "Lifestyle",
            Category::Travel => "Travel",
            Category::Food => "Food",
            Category::Education => "Education",
        }
    }

    /// CSS class used for the badge colour.
    pub fn style_token(self) -> &'static str {
        match self {
            Category::Tech => "category-tech",
            Category::Lifestyle => "category-lifestyle",
            Category::Travel => "category-travel",
            Category::Food => "category-food",
            Category::Education => "category-education",
        }
    }

    /// Parse a form value. Empty or unknown input means "no category".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
