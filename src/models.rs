use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAction {
    pub action: String,
    pub severity: i64,
}

/// The strict-JSON reply the model is instructed to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub action: String,
    pub subactions: Vec<SubAction>,
    pub keywords: Vec<String>,
    pub severity: i64,
    pub factor: i64,
}

/// One persisted action row. `subactions` and `keywords` are stored as JSON
/// text and round-trip through these typed fields.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRecord {
    pub id: String,
    pub action: String,
    pub subactions: Vec<SubAction>,
    pub keywords: Vec<String>,
    pub severity: i64,
    pub factor: i64,
    pub user_id: String,
    pub created_at: String,
}

// Request bodies keep every field optional so a missing key surfaces as a 400
// instead of a deserialization rejection.

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    #[serde(rename = "userUuid")]
    pub user_uuid: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitActionRequest {
    #[serde(rename = "userUuid")]
    pub user_uuid: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoredClassification {
    #[serde(flatten)]
    pub classification: Classification,
    pub points: i64,
}

#[derive(Debug, Serialize)]
pub struct SubmitActionResponse {
    pub response: ScoredClassification,
}

#[derive(Debug, Serialize)]
pub struct ScoredAction {
    #[serde(flatten)]
    pub record: ActionRecord,
    pub points: i64,
}

#[derive(Debug, Serialize)]
pub struct ActionPage {
    pub results: Vec<ScoredAction>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub actions: ActionPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_response_uses_camel_case_key() {
        let value = serde_json::to_value(CreateUserResponse {
            user_uuid: "abc".into(),
        })
        .unwrap();
        assert_eq!(value["userUuid"], "abc");
    }

    #[test]
    fn submit_request_tolerates_missing_fields() {
        let request: SubmitActionRequest = serde_json::from_str("{}").unwrap();
        assert!(request.user_uuid.is_none());
        assert!(request.message.is_none());

        let request: SubmitActionRequest =
            serde_json::from_str(r#"{"userUuid":"u-1","message":"hi"}"#).unwrap();
        assert_eq!(request.user_uuid.as_deref(), Some("u-1"));
        assert_eq!(request.message.as_deref(), Some("hi"));
    }

    #[test]
    fn scored_classification_flattens_points_beside_fields() {
        let scored = ScoredClassification {
            classification: Classification {
                action: "eating a hamburger".into(),
                subactions: vec![SubAction {
                    action: "tastes good".into(),
                    severity: 2,
                }],
                keywords: vec!["food".into()],
                severity: 6,
                factor: 50,
            },
            points: -50,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["action"], "eating a hamburger");
        assert_eq!(value["severity"], 6);
        assert_eq!(value["points"], -50);
    }

    #[test]
    fn user_response_nests_actions_under_results() {
        let response = UserResponse {
            id: "u-1".into(),
            username: "alice".into(),
            actions: ActionPage { results: vec![] },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["username"], "alice");
        assert!(value["actions"]["results"].as_array().unwrap().is_empty());
    }
}
