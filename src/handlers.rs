use crate::errors::AppError;
use crate::models::{
    ActionPage, CreateUserRequest, CreateUserResponse, ScoredAction, ScoredClassification,
    SubmitActionRequest, SubmitActionResponse, UserResponse,
};
use crate::score::calculate_points;
use crate::state::AppState;
use crate::store::RECENT_LIMIT;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    response::Html,
};
use tracing::info;
use uuid::Uuid;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, AppError> {
    let username = required_field(payload.username.as_deref(), "username is required")?;

    let store = state.store.lock().await;
    let user = store.create_user(username)?;
    info!("created user {} ({})", user.username, user.id);

    Ok(Json(CreateUserResponse { user_uuid: user.id }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    if Uuid::parse_str(&id).is_err() {
        return Err(AppError::not_found("user not found"));
    }

    let store = state.store.lock().await;
    let user = store
        .get_user(&id)?
        .ok_or_else(|| AppError::not_found("user not found"))?;
    let actions = store.recent_actions(&id, RECENT_LIMIT)?;
    drop(store);

    let results = actions
        .into_iter()
        .map(|record| {
            let points = calculate_points(record.severity, record.factor);
            ScoredAction { record, points }
        })
        .collect();

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        actions: ActionPage { results },
    }))
}

pub async fn submit_action(
    State(state): State<AppState>,
    Json(payload): Json<SubmitActionRequest>,
) -> Result<Json<SubmitActionResponse>, AppError> {
    let user_uuid = required_field(payload.user_uuid.as_deref(), "userUuid is required")?;
    let message = required_field(payload.message.as_deref(), "message is required")?;

    // Check the user before spending an LLM call; the lock is released for
    // the duration of that call.
    {
        let store = state.store.lock().await;
        if store.get_user(user_uuid)?.is_none() {
            return Err(AppError::not_found("user not found"));
        }
    }

    let classification = state.llm.classify(message).await?;
    info!(
        "classified {:?} as severity {} factor {}",
        classification.action, classification.severity, classification.factor
    );

    // A storage failure here leaves the LLM call spent and nothing persisted;
    // the client sees a 500 and may retry.
    let store = state.store.lock().await;
    store.insert_action(user_uuid, &classification)?;
    drop(store);

    let points = calculate_points(classification.severity, classification.factor);
    Ok(Json(SubmitActionResponse {
        response: ScoredClassification {
            classification,
            points,
        },
    }))
}

fn required_field<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::bad_request(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_field_rejects_missing_and_blank() {
        assert!(required_field(None, "missing").is_err());
        assert!(required_field(Some(""), "missing").is_err());
        assert!(required_field(Some("   "), "missing").is_err());
        assert_eq!(required_field(Some(" alice "), "missing").unwrap(), "alice");
    }
}
