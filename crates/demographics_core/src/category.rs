//! The three demographic categories and a total per-category table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three independent distributions returned by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    #[default]
    Race,
    AgeRange,
    Sex,
}

impl CategoryKind {
    /// Display order of the summary tiles.
    pub const ALL: [CategoryKind; 3] = [
        CategoryKind::Race,
        CategoryKind::AgeRange,
        CategoryKind::Sex,
    ];

    /// Caption shown under the summary tile.
    pub fn title(self) -> &'static str {
        match self {
            CategoryKind::Race => "Race",
            CategoryKind::AgeRange => "Age",
            CategoryKind::Sex => "Sex",
        }
    }

    /// Field name in the classifier payload.
    pub fn payload_key(self) -> &'static str {
        match self {
            CategoryKind::Race => "race",
            CategoryKind::AgeRange => "age",
            CategoryKind::Sex => "gender",
        }
    }

    /// Indicator rendered in place of an empty ranked list.
    pub fn empty_notice(self) -> &'static str {
        match self {
            CategoryKind::Race => "No race data available",
            CategoryKind::AgeRange => "No age data available",
            CategoryKind::Sex => "No gender data available",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Returned when a user-event token names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0:?} (expected race, age or sex)")]
pub struct ParseCategoryError(pub String);

impl FromStr for CategoryKind {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "race" => Ok(CategoryKind::Race),
            "age" | "agerange" | "age_range" => Ok(CategoryKind::AgeRange),
            "sex" | "gender" => Ok(CategoryKind::Sex),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Exactly one value per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMap<T> {
    pub race: T,
    pub age: T,
    pub sex: T,
}

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(CategoryKind) -> T) -> Self {
        Self {
            race: f(CategoryKind::Race),
            age: f(CategoryKind::AgeRange),
            sex: f(CategoryKind::Sex),
        }
    }

    pub fn get(&self, kind: CategoryKind) -> &T {
        match kind {
            CategoryKind::Race => &self.race,
            CategoryKind::AgeRange => &self.age,
            CategoryKind::Sex => &self.sex,
        }
    }

    pub fn get_mut(&mut self, kind: CategoryKind) -> &mut T {
        match kind {
            CategoryKind::Race => &mut self.race,
            CategoryKind::AgeRange => &mut self.age,
            CategoryKind::Sex => &mut self.sex,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(CategoryKind, &T) -> U) -> CategoryMap<U> {
        CategoryMap::from_fn(|kind| f(kind, self.get(kind)))
    }

    /// Iterates in tile order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryKind, &T)> {
        CategoryKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}
