//! Sampling documentation repository port.

use crate::domain::foundation::{DomainError, RecordKey, Repository, SamplingDocumentationId};
use crate::domain::sampling::SamplingDocumentation;
use async_trait::async_trait;

/// Repository port for sampling documentation.
#[async_trait]
pub trait SamplingDocumentationRepository:
    Repository<SamplingDocumentation, SamplingDocumentationId>
{
    /// Documents filed under one sampling activity, in id order.
    async fn find_by_activity(
        &self,
        activity: RecordKey,
    ) -> Result<Vec<SamplingDocumentation>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn sampling_documentation_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SamplingDocumentationRepository) {}
    }
}
