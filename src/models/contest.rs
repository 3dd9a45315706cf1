use serde::{Deserialize, Serialize};

/// Contest document. Every field is optional: the collection is schema-less and
/// absent fields are never written (`winnerName` presence marks a decided contest).
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::models::deserialize_lenient_opt_f64"
    )]
    pub price: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::models::deserialize_lenient_opt_f64"
    )]
    pub prize: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_image: Option<String>,
}

/// Editable metadata for `PUT /contests/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::models::deserialize_lenient_opt_f64"
    )]
    pub price: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::models::deserialize_lenient_opt_f64"
    )]
    pub prize: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AttendanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WinnerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Query string of `GET /contests`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ContestListQuery {
    /// Matches `contestType` exactly
    pub category: Option<String>,
    /// Matches `creatorEmail` exactly
    pub email: Option<String>,
    pub status: Option<String>,
    /// `asc`/`desc` (or `1`/`-1`) on attendance
    pub sort_order: Option<String>,
    /// 1-based page number
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Query string of `GET /contests/popular`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PopularQuery {
    pub attendance: Option<String>,
    pub order: Option<String>,
    /// Whitespace-separated keywords matched against `contestType`
    pub search_value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestListResponse<T> {
    pub all_contest: Vec<T>,
    pub contest_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let contest: Contest = serde_json::from_value(serde_json::json!({
            "contestName": "Poster Jam",
            "contestType": "Art",
            "price": 10,
            "attendance": 0,
            "status": "pending"
        }))
        .unwrap();

        let document = mongodb::bson::to_document(&contest).unwrap();
        assert_eq!(document.get_str("contestType").unwrap(), "Art");
        assert!(!document.contains_key("winnerName"));
        assert!(!document.contains_key("deadline"));
    }

    #[test]
    fn test_price_accepts_numeric_strings() {
        let contest: Contest = serde_json::from_value(serde_json::json!({
            "contestName": "Poster Jam",
            "price": "10",
            "prize": 250
        }))
        .unwrap();
        assert_eq!(contest.price, Some(10.0));
        assert_eq!(contest.prize, Some(250.0));

        let without_price: Contest = serde_json::from_value(serde_json::json!({ "contestName": "Free" })).unwrap();
        assert_eq!(without_price.price, None);

        let bad = serde_json::from_value::<ContestUpdate>(serde_json::json!({ "price": "ten" }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_list_query_parses_camel_case() {
        let query: ContestListQuery =
            serde_json::from_value(serde_json::json!({ "sortOrder": "desc", "page": 2, "limit": 5 }))
                .unwrap();
        assert_eq!(query.sort_order.as_deref(), Some("desc"));
        assert_eq!(query.page, Some(2));
        assert_eq!(query.limit, Some(5));
    }
}
