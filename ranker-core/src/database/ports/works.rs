use async_trait::async_trait;

use crate::domain::catalog::RankedWork;
use crate::domain::work::{Category, NewWork, Work, WorkChanges, WorkId};
use crate::error::Result;

/// Storage for works.
///
/// Adapters reject a `(category, title)` pair that already exists with
/// `RankerError::Validation(ValidationError::DuplicateTitle { .. })`.
#[async_trait]
pub trait WorksRepository: Send + Sync {
    async fn create_work(&self, work: &NewWork) -> Result<Work>;
    async fn get_work(&self, id: WorkId) -> Result<Option<Work>>;
    async fn find_work_by_title(
        &self,
        category: Category,
        title: &str,
    ) -> Result<Option<Work>>;
    /// Apply `changes` and bump `updated_at`. `None` when the work is absent.
    async fn update_work(&self, id: WorkId, changes: &WorkChanges) -> Result<Option<Work>>;
    /// Delete a work and its votes. Returns whether a row was removed.
    async fn delete_work(&self, id: WorkId) -> Result<bool>;
    /// Every work with its vote count, in id order.
    async fn list_ranked(&self) -> Result<Vec<RankedWork>>;
    async fn count_works(&self) -> Result<i64>;
}
