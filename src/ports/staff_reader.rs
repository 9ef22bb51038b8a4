//! Staff reader port (read side).
//!
//! Serves the public staff API: one flat view per member with the
//! aggregated role percentage.

use crate::domain::foundation::{DomainError, ErrorCode, Record, StaffMemberId};
use crate::domain::staff::StaffMember;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default page size for staff listings.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Reader port for staff queries.
#[async_trait]
pub trait StaffReader: Send + Sync {
    /// Get a staff view by username.
    ///
    /// Returns `None` if not found.
    async fn get_by_username(&self, username: &str) -> Result<Option<StaffView>, DomainError>;

    /// List staff in id order.
    ///
    /// # Errors
    ///
    /// - `InvalidRole` if some member has a role without a numeric percent
    async fn list(&self, options: &ListOptions) -> Result<StaffList, DomainError>;
}

/// Options for listing staff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions {
    /// Maximum number of results to return.
    pub limit: Option<u32>,

    /// Number of results to skip.
    pub offset: Option<u32>,
}

impl ListOptions {
    /// Create options for a paginated query (pages start at 1).
    ///
    /// Offsets past `u32::MAX` saturate, which still lands beyond the last
    /// member and yields an empty page.
    pub fn paginated(page: u32, per_page: u32) -> Self {
        Self {
            limit: Some(per_page),
            offset: Some(page.saturating_sub(1).saturating_mul(per_page)),
        }
    }

    /// Applies the window to an already ordered list.
    pub fn window<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = self.offset.unwrap_or(0) as usize;
        let iter = items.into_iter().skip(offset);
        match self.limit {
            Some(limit) => iter.take(limit as usize).collect(),
            None => iter.collect(),
        }
    }
}

/// Paginated list of staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffList {
    /// Members in this page.
    pub items: Vec<StaffView>,

    /// Total number of members.
    pub total: u64,

    /// Whether there are more results.
    pub has_more: bool,
}

/// Public view of a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    pub id: StaffMemberId,
    pub username: String,
    pub email: String,
    pub home_program: String,
    pub total_roles_percent: f64,
}

impl StaffView {
    /// Builds the view of a persisted member.
    ///
    /// # Errors
    ///
    /// - `NotPersisted` if the member has no id
    /// - `InvalidRole` if a role has no numeric percent
    pub fn from_member(member: &StaffMember) -> Result<Self, DomainError> {
        let id = member.id().ok_or_else(|| {
            DomainError::new(ErrorCode::NotPersisted, "Staff member has not been saved")
        })?;
        Ok(Self {
            id,
            username: member.username().unwrap_or_default().to_string(),
            email: member.email().unwrap_or_default().to_string(),
            home_program: member.home_program().unwrap_or_default().to_string(),
            total_roles_percent: member.total_roles_percent()?,
        })
    }
}
