//! Category-bucketed listings.
//!
//! Both the root page and the works index present every category of the closed
//! set, including empty ones, with works ranked by vote count. The root page
//! additionally features a spotlight work and truncates each shelf.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::work::{Category, Work};

/// Number of works listed per category on the root page.
pub const TOP_PER_CATEGORY: usize = 10;

/// A work paired with its current vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWork {
    #[serde(flatten)]
    pub work: Work,
    pub vote_count: i64,
}

/// All works of one category, best ranked first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShelf {
    pub category: Category,
    pub works: Vec<RankedWork>,
}

/// Works grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub shelves: Vec<CategoryShelf>,
}

/// Root page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootListing {
    pub spotlight: Option<RankedWork>,
    pub shelves: Vec<CategoryShelf>,
}

/// Higher vote count first, then title, then id.
fn rank_order(a: &RankedWork, b: &RankedWork) -> Ordering {
    b.vote_count
        .cmp(&a.vote_count)
        .then_with(|| a.work.title.cmp(&b.work.title))
        .then_with(|| a.work.id.cmp(&b.work.id))
}

impl Catalog {
    pub fn from_ranked(works: Vec<RankedWork>) -> Self {
        let mut shelves: Vec<CategoryShelf> = Category::ALL
            .into_iter()
            .map(|category| CategoryShelf {
                category,
                works: Vec::new(),
            })
            .collect();

        for ranked in works {
            if let Some(shelf) = shelves
                .iter_mut()
                .find(|shelf| shelf.category == ranked.work.category)
            {
                shelf.works.push(ranked);
            }
        }

        for shelf in &mut shelves {
            shelf.works.sort_by(rank_order);
        }

        Self { shelves }
    }

    pub fn shelf(&self, category: Category) -> Option<&CategoryShelf> {
        self.shelves.iter().find(|shelf| shelf.category == category)
    }

    /// The most voted work overall; ties go to the oldest record.
    pub fn spotlight(&self) -> Option<&RankedWork> {
        self.shelves
            .iter()
            .flat_map(|shelf| shelf.works.iter())
            .max_by(|a, b| {
                a.vote_count
                    .cmp(&b.vote_count)
                    .then_with(|| b.work.id.cmp(&a.work.id))
            })
    }

    pub fn into_root_listing(self, per_category: usize) -> RootListing {
        let spotlight = self.spotlight().cloned();
        let shelves = self
            .shelves
            .into_iter()
            .map(|mut shelf| {
                shelf.works.truncate(per_category);
                shelf
            })
            .collect();

        RootListing { spotlight, shelves }
    }
}
