use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown question category: {0}")]
pub struct UnknownCategory(pub String);

//
// ─── CATEGORY ─────────────────────────────────────────────────────────────────
//

/// The fact a question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Capital,
    Flag,
    Population,
    Currency,
    Language,
    Region,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Capital,
        Category::Flag,
        Category::Population,
        Category::Currency,
        Category::Language,
        Category::Region,
    ];

    /// Stable position of this category in [`Category::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Category::Capital => 0,
            Category::Flag => 1,
            Category::Population => 2,
            Category::Currency => 3,
            Category::Language => 4,
            Category::Region => 5,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Capital => "capital",
            Category::Flag => "flag",
            Category::Population => "population",
            Category::Currency => "currency",
            Category::Language => "language",
            Category::Region => "region",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

//
// ─── REGION ───────────────────────────────────────────────────────────────────
//

/// Fixed region enumeration used as the distractor source for region questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    Antarctic,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
        Region::Antarctic,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Antarctic => "Antarctic",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
