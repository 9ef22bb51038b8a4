//! Data transfer objects for the admin descriptor API.

use serde::Serialize;

use crate::admin::{AdminDescriptor, DashboardAction};

/// One dashboard entry in `GET /admin`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub slug: &'static str,
    pub entity: &'static str,
    pub dashboard_actions: Vec<DashboardAction>,
}

impl From<&AdminDescriptor> for AdminSummary {
    fn from(descriptor: &AdminDescriptor) -> Self {
        Self {
            slug: descriptor.slug,
            entity: descriptor.entity,
            dashboard_actions: descriptor.dashboard_actions(),
        }
    }
}

/// Header buttons of one admin page.
#[derive(Debug, Clone, Serialize)]
pub struct ActionButtonsResponse {
    pub action: String,
    pub buttons: Vec<&'static str>,
}
