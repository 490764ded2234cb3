//! Work lifecycle and listings.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::unit_of_work::AppUnitOfWork;
use crate::domain::catalog::{Catalog, RootListing, TOP_PER_CATEGORY};
use crate::domain::validation::ValidationError;
use crate::domain::vote::WorkVote;
use crate::domain::work::{Category, Work, WorkDraft, WorkId};
use crate::error::{RankerError, Result};

/// Everything the work page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkDetails {
    pub work: Work,
    pub vote_count: i64,
    pub votes: Vec<WorkVote>,
}

#[derive(Clone, Debug)]
pub struct CatalogService {
    uow: Arc<AppUnitOfWork>,
}

impl CatalogService {
    pub fn new(uow: Arc<AppUnitOfWork>) -> Self {
        Self { uow }
    }

    /// Spotlight plus the top works of every category.
    pub async fn root_listing(&self) -> Result<RootListing> {
        Ok(self.index().await?.into_root_listing(TOP_PER_CATEGORY))
    }

    /// Every work, grouped by category and ranked by votes.
    pub async fn index(&self) -> Result<Catalog> {
        let ranked = self.uow.works.list_ranked().await?;
        Ok(Catalog::from_ranked(ranked))
    }

    pub async fn get(&self, id: WorkId) -> Result<Work> {
        self.uow
            .works
            .get_work(id)
            .await?
            .ok_or_else(|| RankerError::work_not_found(id))
    }

    pub async fn show(&self, id: WorkId) -> Result<WorkDetails> {
        let work = self.get(id).await?;
        let votes = self.uow.votes.votes_for_work(id).await?;

        Ok(WorkDetails {
            work,
            vote_count: votes.len() as i64,
            votes,
        })
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: WorkDraft) -> Result<Work> {
        let new_work = draft.into_new_work()?;
        self.ensure_title_available(new_work.category, &new_work.title, None)
            .await?;

        let work = self.uow.works.create_work(&new_work).await?;
        info!(work_id = work.id, "work created");
        Ok(work)
    }

    /// The id is resolved before the payload is validated, so an unknown
    /// work is reported as not found even when the payload is also invalid.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: WorkId, draft: WorkDraft) -> Result<Work> {
        let mut candidate = self.get(id).await?;
        let changes = draft.into_changes()?;
        if changes.is_empty() {
            debug!(work_id = id, "update carried no fields");
            return Ok(candidate);
        }

        changes.apply_to(&mut candidate);
        self.ensure_title_available(candidate.category, &candidate.title, Some(id))
            .await?;

        let work = self
            .uow
            .works
            .update_work(id, &changes)
            .await?
            .ok_or_else(|| RankerError::work_not_found(id))?;
        info!(work_id = work.id, "work updated");
        Ok(work)
    }

    #[instrument(skip(self))]
    pub async fn destroy(&self, id: WorkId) -> Result<()> {
        if !self.uow.works.delete_work(id).await? {
            return Err(RankerError::work_not_found(id));
        }
        info!(work_id = id, "work deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        self.uow.works.count_works().await
    }

    async fn ensure_title_available(
        &self,
        category: Category,
        title: &str,
        except: Option<WorkId>,
    ) -> Result<()> {
        match self.uow.works.find_work_by_title(category, title).await? {
            Some(existing) if Some(existing.id) != except => {
                Err(ValidationError::DuplicateTitle {
                    title: title.to_string(),
                    category,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}
