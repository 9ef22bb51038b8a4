//! Expenditure repository port.

use crate::domain::expenditure::Expenditure;
use crate::domain::foundation::{DomainError, ExpenditureId, Repository};
use async_trait::async_trait;

/// Repository port for expenditures.
#[async_trait]
pub trait ExpenditureRepository: Repository<Expenditure, ExpenditureId> {
    /// Expenditures reported against an ILRI code, in id order.
    async fn find_by_ilri_code(&self, ilri_code: &str) -> Result<Vec<Expenditure>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn expenditure_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ExpenditureRepository) {}
    }
}
