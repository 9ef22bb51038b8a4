//! PostgreSQL implementation of StaffMemberRepository.
//!
//! Persists staff members together with their roles in one transaction.
//! The member's project list is not stored; it is read back from
//! `app_project.principal_investigator_key`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, Record, RecordKey, Repository, StaffMemberId, StaffRoleId, StoreId,
    Validate,
};
use crate::domain::staff::{StaffMember, StaffRole};
use crate::ports::StaffMemberRepository;

const MEMBER_COLUMNS: &str = "id, key, username, email, first_name, last_name, home_program";

/// PostgreSQL implementation of StaffMemberRepository.
#[derive(Clone)]
pub struct PostgresStaffMemberRepository {
    pool: PgPool,
}

impl PostgresStaffMemberRepository {
    /// Creates a new PostgresStaffMemberRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<StaffMember, StaffMemberId> for PostgresStaffMemberRepository {
    async fn find_by_id(&self, id: StaffMemberId) -> Result<Option<StaffMember>, DomainError> {
        Ok(load_members(&self.pool, MemberFilter::Id(id))
            .await?
            .into_iter()
            .next())
    }

    async fn save(&self, member: &mut StaffMember) -> Result<StaffMemberId, DomainError> {
        if member.is_persisted() {
            return Err(DomainError::new(
                ErrorCode::AlreadyPersisted,
                format!("Staff member {} is already persisted", member.key()),
            ));
        }
        validate(member)?;

        let mut tx = begin(&self.pool).await?;

        let row = sqlx::query(
            r#"
            INSERT INTO app_staff_member (
                key, username, email, first_name, last_name, home_program
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(*member.key().as_uuid())
        .bind(member.username())
        .bind(member.email())
        .bind(member.first_name())
        .bind(member.last_name())
        .bind(member.home_program())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("insert staff member", e))?;

        let id = StaffMemberId::from_raw(column(&row, "id")?)?;
        let role_ids = write_roles(&mut tx, member).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        assign_role_ids(member, &role_ids);
        member.take_orphaned_roles();
        member.assign_id(id);
        debug!(%id, roles = member.staff_roles().len(), "staff member inserted");
        Ok(id)
    }

    async fn update(&self, member: &mut StaffMember) -> Result<(), DomainError> {
        let id = member.id().ok_or_else(|| {
            DomainError::new(ErrorCode::NotPersisted, "Staff member has not been persisted")
        })?;
        validate(member)?;

        let mut tx = begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            UPDATE app_staff_member SET
                username = $2,
                email = $3,
                first_name = $4,
                last_name = $5,
                home_program = $6
            WHERE id = $1
            "#,
        )
        .bind(id.raw())
        .bind(member.username())
        .bind(member.email())
        .bind(member.first_name())
        .bind(member.last_name())
        .bind(member.home_program())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("update staff member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("StaffMember", id));
        }

        let role_ids = write_roles(&mut tx, member).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        assign_role_ids(member, &role_ids);
        member.take_orphaned_roles();
        debug!(%id, roles = member.staff_roles().len(), "staff member updated");
        Ok(())
    }

    async fn delete(&self, id: StaffMemberId) -> Result<(), DomainError> {
        // Roles go with the member (ON DELETE CASCADE); led projects keep
        // no principal investigator (ON DELETE SET NULL).
        let result = sqlx::query("DELETE FROM app_staff_member WHERE id = $1")
            .bind(id.raw())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete staff member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("StaffMember", id));
        }

        debug!(%id, "staff member deleted");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<StaffMember>, DomainError> {
        load_members(&self.pool, MemberFilter::All).await
    }

    async fn exists(&self, id: StaffMemberId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM app_staff_member WHERE id = $1")
            .bind(id.raw())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check staff member existence", e))?;

        Ok(result.0 > 0)
    }
}

#[async_trait]
impl StaffMemberRepository for PostgresStaffMemberRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StaffMember>, DomainError> {
        let username = username.to_lowercase();
        Ok(load_members(&self.pool, MemberFilter::Username(&username))
            .await?
            .into_iter()
            .next())
    }

    async fn find_by_key(&self, key: RecordKey) -> Result<Option<StaffMember>, DomainError> {
        Ok(load_members(&self.pool, MemberFilter::Key(key))
            .await?
            .into_iter()
            .next())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Shared loading (also used by the reader)
// ════════════════════════════════════════════════════════════════════════════

/// Which members to load.
pub(super) enum MemberFilter<'a> {
    All,
    Id(StaffMemberId),
    Key(RecordKey),
    Username(&'a str),
    Page { limit: i64, offset: i64 },
}

/// Loads members with their roles and led projects, in id order.
pub(super) async fn load_members(
    pool: &PgPool,
    filter: MemberFilter<'_>,
) -> Result<Vec<StaffMember>, DomainError> {
    let rows = match filter {
        MemberFilter::All => {
            sqlx::query(&format!(
                "SELECT {} FROM app_staff_member ORDER BY id",
                MEMBER_COLUMNS
            ))
            .fetch_all(pool)
            .await
        }
        MemberFilter::Id(id) => {
            sqlx::query(&format!(
                "SELECT {} FROM app_staff_member WHERE id = $1",
                MEMBER_COLUMNS
            ))
            .bind(id.raw())
            .fetch_all(pool)
            .await
        }
        MemberFilter::Key(key) => {
            sqlx::query(&format!(
                "SELECT {} FROM app_staff_member WHERE key = $1",
                MEMBER_COLUMNS
            ))
            .bind(*key.as_uuid())
            .fetch_all(pool)
            .await
        }
        MemberFilter::Username(username) => {
            sqlx::query(&format!(
                "SELECT {} FROM app_staff_member WHERE username = $1",
                MEMBER_COLUMNS
            ))
            .bind(username)
            .fetch_all(pool)
            .await
        }
        MemberFilter::Page { limit, offset } => {
            sqlx::query(&format!(
                "SELECT {} FROM app_staff_member ORDER BY id LIMIT $1 OFFSET $2",
                MEMBER_COLUMNS
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
    .map_err(|e| db_error("fetch staff members", e))?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let keys = rows
        .iter()
        .map(|row| column::<Uuid>(row, "key"))
        .collect::<Result<Vec<_>, _>>()?;

    let role_rows = sqlx::query(
        r#"
        SELECT id, key, staff_member_key, project_key, percent
        FROM app_staff_role
        WHERE staff_member_key = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(&keys[..])
    .fetch_all(pool)
    .await
    .map_err(|e| db_error("fetch staff roles", e))?;

    let project_rows = sqlx::query(
        r#"
        SELECT key, principal_investigator_key
        FROM app_project
        WHERE principal_investigator_key = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(&keys[..])
    .fetch_all(pool)
    .await
    .map_err(|e| db_error("fetch led projects", e))?;

    let mut roles: HashMap<Uuid, Vec<StaffRole>> = HashMap::new();
    for row in &role_rows {
        let owner: Uuid = column(row, "staff_member_key")?;
        roles.entry(owner).or_default().push(row_to_role(row)?);
    }

    let mut projects: HashMap<Uuid, Vec<RecordKey>> = HashMap::new();
    for row in &project_rows {
        let owner: Uuid = column(row, "principal_investigator_key")?;
        let key: Uuid = column(row, "key")?;
        projects
            .entry(owner)
            .or_default()
            .push(RecordKey::from_uuid(key));
    }

    rows.iter()
        .map(|row| -> Result<StaffMember, DomainError> {
            let key: Uuid = column(row, "key")?;
            Ok(StaffMember::reconstitute(
                RecordKey::from_uuid(key),
                StaffMemberId::from_raw(column(row, "id")?)?,
                column(row, "username")?,
                column(row, "email")?,
                column(row, "first_name")?,
                column(row, "last_name")?,
                column(row, "home_program")?,
                projects.remove(&key).unwrap_or_default(),
                roles.remove(&key).unwrap_or_default(),
            ))
        })
        .collect()
}

/// Total number of staff members.
pub(super) async fn count_members(pool: &PgPool) -> Result<u64, DomainError> {
    let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM app_staff_member")
        .fetch_one(pool)
        .await
        .map_err(|e| db_error("count staff members", e))?;

    Ok(result.0 as u64)
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn validate(member: &StaffMember) -> Result<(), DomainError> {
    member.validate().map_err(|violations| {
        let err = DomainError::from(violations);
        warn!(error = %err, "staff member write rejected");
        err
    })
}

async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, DomainError> {
    pool.begin()
        .await
        .map_err(|e| db_error("start transaction", e))
}

/// Upserts every role of `member` and deletes the orphaned ones. Role ids
/// are assigned here; the orphan list is cleared by the caller once the
/// transaction commits.
/// Upserts the member's roles and deletes its orphans inside `tx`.
///
/// Returns the store id of every written role. Ids are applied with
/// `assign_role_ids` once the transaction has committed.
async fn write_roles(
    tx: &mut Transaction<'static, Postgres>,
    member: &StaffMember,
) -> Result<Vec<(RecordKey, StaffRoleId)>, DomainError> {
    let owner = *member.key().as_uuid();
    let mut assigned = Vec::new();

    for role in member.staff_roles().iter() {
        let row = sqlx::query(
            r#"
            INSERT INTO app_staff_role (key, staff_member_key, project_key, percent)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (key) DO UPDATE SET
                staff_member_key = EXCLUDED.staff_member_key,
                project_key = EXCLUDED.project_key,
                percent = EXCLUDED.percent
            RETURNING id
            "#,
        )
        .bind(*role.key().as_uuid())
        .bind(owner)
        .bind(role.project().map(|key| *key.as_uuid()))
        .bind(role.percent())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| write_error("upsert staff role", e))?;

        assigned.push((role.key(), StaffRoleId::from_raw(column(&row, "id")?)?));
    }

    let orphaned = member.staff_roles().orphaned();
    if !orphaned.is_empty() {
        let keys: Vec<Uuid> = orphaned.iter().map(|key| *key.as_uuid()).collect();
        let result = sqlx::query("DELETE FROM app_staff_role WHERE key = ANY($1)")
            .bind(&keys[..])
            .execute(&mut **tx)
            .await
            .map_err(|e| db_error("delete orphaned staff roles", e))?;
        debug!(member = %member.key(), removed = result.rows_affected(), "orphaned staff roles deleted");
    }

    Ok(assigned)
}

/// Gives roles written in a committed transaction their store ids.
fn assign_role_ids(member: &mut StaffMember, role_ids: &[(RecordKey, StaffRoleId)]) {
    for role in member.staff_roles_mut() {
        if role.id().is_some() {
            continue;
        }
        if let Some((_, id)) = role_ids.iter().find(|(key, _)| *key == role.key()) {
            role.assign_id(*id);
        }
    }
}

fn row_to_role(row: &PgRow) -> Result<StaffRole, DomainError> {
    let key: Uuid = column(row, "key")?;
    let owner: Uuid = column(row, "staff_member_key")?;
    let project: Option<Uuid> = column(row, "project_key")?;
    Ok(StaffRole::reconstitute(
        RecordKey::from_uuid(key),
        StaffRoleId::from_raw(column(row, "id")?)?,
        Some(RecordKey::from_uuid(owner)),
        project.map(RecordKey::from_uuid),
        column(row, "percent")?,
    ))
}

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

pub(super) fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", action, e),
    )
}

/// Maps unique-constraint failures to `UniqueViolation`, naming the
/// attribute the constraint guards.
fn write_error(action: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            let constraint = unique_attribute(db.constraint().unwrap_or_default());
            let err = DomainError::new(
                ErrorCode::UniqueViolation,
                format!("StaffMember with {} already exists", constraint),
            )
            .with_detail("entity", "StaffMember")
            .with_detail("constraint", constraint);
            warn!(error = %err, "staff member write rejected");
            return err;
        }
    }
    db_error(action, e)
}

fn unique_attribute(constraint: &str) -> &str {
    constraint
        .strip_prefix("app_staff_member_")
        .unwrap_or(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lazy_repository() -> Arc<dyn StaffMemberRepository> {
        let pool = PgPool::connect_lazy("postgres://localhost/project_tracker").unwrap();
        Arc::new(PostgresStaffMemberRepository::new(pool))
    }

    fn valid_member() -> StaffMember {
        let mut member = StaffMember::new();
        member
            .set_username("jdoe")
            .set_email("j.doe@cgiar.org")
            .set_home_program("Livestock Genetics");
        member
    }

    #[tokio::test]
    async fn save_rejects_invalid_member_before_touching_the_database() {
        let repository = lazy_repository();
        let mut member = valid_member();
        member.set_email("not-an-email");

        let err = repository.save(&mut member).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(member.id().is_none());
    }

    #[tokio::test]
    async fn save_and_update_check_persistence_state() {
        let repository = lazy_repository();

        let mut persisted = valid_member();
        persisted.assign_id(StaffMemberId::new(1).unwrap());
        let err = repository.save(&mut persisted).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyPersisted);

        let mut fresh = valid_member();
        let err = repository.update(&mut fresh).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotPersisted);
    }

    #[test]
    fn unique_attribute_strips_table_prefix() {
        assert_eq!(unique_attribute("app_staff_member_username"), "username");
        assert_eq!(unique_attribute("app_staff_member_email"), "email");
        assert_eq!(unique_attribute("app_staff_role_key_key"), "app_staff_role_key_key");
    }

    #[test]
    fn role_ids_are_applied_only_to_new_roles() {
        let mut member = StaffMember::new();
        member
            .set_username("jdoe")
            .set_email("j.doe@cgiar.org")
            .set_home_program("Livestock Genetics");
        let mut kept = StaffRole::new();
        kept.set_percent(40.0);
        kept.assign_id(StaffRoleId::new(3).unwrap());
        let kept_key = kept.key();
        let mut added = StaffRole::new();
        added.set_percent(60.0);
        let added_key = added.key();
        member.add_staff_role(kept);
        member.add_staff_role(added);

        let before: Vec<_> = member.staff_roles().iter().map(|r| r.id()).collect();
        assert_eq!(before.iter().filter(|id| id.is_none()).count(), 1);

        assign_role_ids(
            &mut member,
            &[
                (kept_key, StaffRoleId::new(9).unwrap()),
                (added_key, StaffRoleId::new(4).unwrap()),
            ],
        );

        let ids: Vec<_> = member
            .staff_roles()
            .iter()
            .map(|r| (r.key(), r.id()))
            .collect();
        assert!(ids.contains(&(kept_key, Some(StaffRoleId::new(3).unwrap()))));
        assert!(ids.contains(&(added_key, Some(StaffRoleId::new(4).unwrap()))));
    }

    #[test]
    fn member_columns_match_row_mapping() {
        for name in ["id", "key", "username", "email", "home_program"] {
            assert!(MEMBER_COLUMNS.contains(name));
        }
    }
}
