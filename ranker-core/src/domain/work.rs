use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

pub type WorkId = i64;

const PUBLICATION_YEAR_RANGE: std::ops::RangeInclusive<i32> = -9999..=9999;

/// Closed classification of a work.
///
/// The wire and storage form is the lower-case singular name. Anything else,
/// including plurals, different casing or surrounding whitespace, is rejected
/// by [`Category::from_str`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Album,
    Book,
    Movie,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Album, Category::Book, Category::Movie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Album => "album",
            Category::Book => "book",
            Category::Movie => "movie",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == raw)
            .ok_or_else(|| ValidationError::InvalidCategory(raw.to_string()))
    }
}

/// A catalogued creative item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    pub creator: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated work payload as submitted by a client.
///
/// Every field is optional so that missing fields and bad categories surface
/// as [`ValidationError`]s instead of deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDraft {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Option<String>,
}

/// A validated work ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWork {
    pub title: String,
    pub creator: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Category,
}

/// A validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkChanges {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Option<Category>,
}

impl WorkDraft {
    /// Validate a payload for creation: title and category are required.
    pub fn into_new_work(self) -> Result<NewWork, ValidationError> {
        let title = match self.title {
            Some(title) => validate_title(title)?,
            None => return Err(ValidationError::MissingTitle),
        };
        let category = match self.category {
            Some(raw) => raw.parse()?,
            None => return Err(ValidationError::MissingCategory),
        };
        let publication_year = validate_year(self.publication_year)?;

        Ok(NewWork {
            title,
            creator: self.creator,
            description: self.description,
            publication_year,
            category,
        })
    }

    /// Validate a payload for a partial update. Only supplied fields are
    /// checked; a supplied title must still be present.
    pub fn into_changes(self) -> Result<WorkChanges, ValidationError> {
        let title = self.title.map(validate_title).transpose()?;
        let category = self
            .category
            .map(|raw| raw.parse::<Category>())
            .transpose()?;
        let publication_year = validate_year(self.publication_year)?;

        Ok(WorkChanges {
            title,
            creator: self.creator,
            description: self.description,
            publication_year,
            category,
        })
    }
}

impl WorkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.creator.is_none()
            && self.description.is_none()
            && self.publication_year.is_none()
            && self.category.is_none()
    }

    /// Apply the supplied fields to `work`, leaving the rest untouched.
    pub fn apply_to(&self, work: &mut Work) {
        if let Some(title) = &self.title {
            work.title = title.clone();
        }
        if let Some(creator) = &self.creator {
            work.creator = Some(creator.clone());
        }
        if let Some(description) = &self.description {
            work.description = Some(description.clone());
        }
        if let Some(year) = self.publication_year {
            work.publication_year = Some(year);
        }
        if let Some(category) = self.category {
            work.category = category;
        }
    }
}

/// Titles are stored trimmed so uniqueness compares what readers see.
fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(trimmed.to_string())
}

fn validate_year(year: Option<i32>) -> Result<Option<i32>, ValidationError> {
    match year {
        Some(year) if !PUBLICATION_YEAR_RANGE.contains(&year) => {
            Err(ValidationError::InvalidPublicationYear(year))
        }
        other => Ok(other),
    }
}
