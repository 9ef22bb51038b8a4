//! Data transfer objects for the staff API.

use serde::{Deserialize, Serialize};

use crate::ports::{StaffList, StaffView};

/// Query parameters for `GET /api/staff`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListStaffQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Paginated staff collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffListResponse {
    pub items: Vec<StaffView>,
    pub total: u64,
    pub has_more: bool,
}

impl From<StaffList> for StaffListResponse {
    fn from(list: StaffList) -> Self {
        Self {
            items: list.items,
            total: list.total,
            has_more: list.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::StaffMemberId;

    #[test]
    fn list_response_serializes_camel_case() {
        let response = StaffListResponse::from(StaffList {
            items: vec![StaffView {
                id: StaffMemberId::new(1).unwrap(),
                username: "jdoe".to_string(),
                email: "jdoe@cgiar.org".to_string(),
                home_program: "Livestock Genetics".to_string(),
                total_roles_percent: 50.0,
            }],
            total: 1,
            has_more: false,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["items"][0]["homeProgram"], "Livestock Genetics");
        assert_eq!(json["items"][0]["totalRolesPercent"], 50.0);
    }

    #[test]
    fn list_query_fields_are_optional() {
        let query: ListStaffQuery = serde_json::from_str("{}").unwrap();
        assert!(query.page.is_none());
        assert!(query.per_page.is_none());
    }
}
