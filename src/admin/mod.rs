//! Declarative admin presentation.
//!
//! Each admin entity is described once (list, filter, form and show fields,
//! widgets, extra routes) and served as JSON by the HTTP adapter.

mod descriptor;
mod expenditure;
mod sampling_documentation;
mod staff_member;

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

pub use descriptor::{
    AdminAction, AdminDescriptor, DashboardAction, FieldSpec, Widget, ACTIONS_FIELD,
    CREATE_MULTIPLE,
};

/// All admin descriptors, keyed by slug.
static DESCRIPTORS: Lazy<BTreeMap<&'static str, AdminDescriptor>> = Lazy::new(|| {
    [
        expenditure::descriptor(),
        sampling_documentation::descriptor(),
        staff_member::descriptor(),
    ]
    .into_iter()
    .map(|descriptor| (descriptor.slug, descriptor))
    .collect()
});

/// Looks up the descriptor served at `/admin/<slug>`.
pub fn descriptor(slug: &str) -> Option<&'static AdminDescriptor> {
    DESCRIPTORS.get(slug)
}

/// Slugs of all admin entities, sorted.
pub fn slugs() -> Vec<&'static str> {
    DESCRIPTORS.keys().copied().collect()
}

/// All descriptors in slug order.
pub fn descriptors() -> impl Iterator<Item = &'static AdminDescriptor> {
    DESCRIPTORS.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_every_admin() {
        assert_eq!(
            slugs(),
            vec!["expenditure", "sampling-documentation", "staff-member"]
        );
        assert_eq!(descriptor("expenditure").unwrap().entity, "Expenditure");
        assert!(descriptor("project").is_none());
    }

    #[test]
    fn every_field_names_an_entity_attribute() {
        for descriptor in descriptors() {
            assert!(
                descriptor.unknown_fields().is_empty(),
                "{} has unknown fields {:?}",
                descriptor.entity,
                descriptor.unknown_fields()
            );
        }
    }
}
