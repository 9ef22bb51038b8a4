//! The set of repositories fixtures write through.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::domain::foundation::{ReferenceId, Repository};
use crate::domain::reference::{
    Organisation, PartnershipType, SamplingActivity, SamplingDocumentType, Sdg,
};
use crate::ports::{
    ExpenditureRepository, PartnershipRepository, ProjectRepository,
    SamplingDocumentationRepository, SdgRoleRepository, StaffMemberRepository,
};

/// One handle per record type.
#[derive(Clone)]
pub struct Repositories {
    pub staff_members: Arc<dyn StaffMemberRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub sdg_roles: Arc<dyn SdgRoleRepository>,
    pub partnerships: Arc<dyn PartnershipRepository>,
    pub expenditures: Arc<dyn ExpenditureRepository>,
    pub sampling_documentation: Arc<dyn SamplingDocumentationRepository>,
    pub organisations: Arc<dyn Repository<Organisation, ReferenceId>>,
    pub partnership_types: Arc<dyn Repository<PartnershipType, ReferenceId>>,
    pub sdgs: Arc<dyn Repository<Sdg, ReferenceId>>,
    pub sampling_activities: Arc<dyn Repository<SamplingActivity, ReferenceId>>,
    pub sampling_document_types: Arc<dyn Repository<SamplingDocumentType, ReferenceId>>,
}

impl Repositories {
    /// Every handle backed by the same in-memory store.
    pub fn in_memory(store: &InMemoryStore) -> Self {
        let store = Arc::new(store.clone());
        Self {
            staff_members: store.clone(),
            projects: store.clone(),
            sdg_roles: store.clone(),
            partnerships: store.clone(),
            expenditures: store.clone(),
            sampling_documentation: store.clone(),
            organisations: store.clone(),
            partnership_types: store.clone(),
            sdgs: store.clone(),
            sampling_activities: store.clone(),
            sampling_document_types: store,
        }
    }
}
