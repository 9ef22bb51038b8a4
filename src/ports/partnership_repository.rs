//! Partnership repository port.

use crate::domain::foundation::{DomainError, PartnershipId, RecordKey, Repository};
use crate::domain::project::Partnership;
use async_trait::async_trait;

/// Repository port for partnerships.
#[async_trait]
pub trait PartnershipRepository: Repository<Partnership, PartnershipId> {
    /// Partnerships of one project, in id order.
    async fn find_by_project(&self, project: RecordKey) -> Result<Vec<Partnership>, DomainError>;
}
