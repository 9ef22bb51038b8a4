//! PostgreSQL implementation of StaffReader.
//!
//! Role totals are aggregated in Rust from the loaded roles so that the
//! per-step rounding matches the domain exactly.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::ports::{ListOptions, StaffList, StaffReader, StaffView};

use super::staff_member_repository::{count_members, load_members, MemberFilter};

/// PostgreSQL implementation of StaffReader.
#[derive(Clone)]
pub struct PostgresStaffReader {
    pool: PgPool,
}

impl PostgresStaffReader {
    /// Creates a new PostgresStaffReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffReader for PostgresStaffReader {
    async fn get_by_username(&self, username: &str) -> Result<Option<StaffView>, DomainError> {
        let username = username.to_lowercase();
        match load_members(&self.pool, MemberFilter::Username(&username))
            .await?
            .first()
        {
            Some(member) => Ok(Some(StaffView::from_member(member)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, options: &ListOptions) -> Result<StaffList, DomainError> {
        let total = count_members(&self.pool).await?;
        let offset = i64::from(options.offset.unwrap_or(0));
        let filter = match options.limit {
            Some(limit) => MemberFilter::Page {
                limit: i64::from(limit),
                offset,
            },
            None if offset == 0 => MemberFilter::All,
            None => MemberFilter::Page {
                limit: i64::MAX,
                offset,
            },
        };

        let items = load_members(&self.pool, filter)
            .await?
            .iter()
            .map(StaffView::from_member)
            .collect::<Result<Vec<_>, _>>()?;

        let has_more = (offset as u64) + (items.len() as u64) < total;

        Ok(StaffList {
            items,
            total,
            has_more,
        })
    }
}
