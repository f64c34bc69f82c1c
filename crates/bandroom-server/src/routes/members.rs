use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

fn member_json(member: &bandroom_core::Member) -> serde_json::Value {
    serde_json::json!({
        "id": member.id,
        "name": member.name,
        "email": member.email,
        "rules": member.rules,
        "created_at": member.created_at,
        "updated_at": member.updated_at,
    })
}

/// GET /api/members — list all members.
pub async fn list_members(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let members = bandroom_core::Member::list(&root)?;
        let list: Vec<serde_json::Value> = members.iter().map(member_json).collect();
        Ok::<_, bandroom_core::BandroomError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateMemberBody {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /api/members — create a new member.
pub async fn create_member(
    State(app): State<AppState>,
    Json(body): Json<CreateMemberBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut member = bandroom_core::Member::create(&root, body.name)?;
        if body.email.is_some() {
            member.email = body.email;
            member.save(&root)?;
        }
        Ok::<_, bandroom_core::BandroomError>(member_json(&member))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/members/:id — member detail including availability rules.
pub async fn get_member(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let member = bandroom_core::Member::load(&root, id)?;
        Ok::<_, bandroom_core::BandroomError>(member_json(&member))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/members/:id/rules — a member's availability rules.
pub async fn list_rules(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<bandroom_core::AvailabilityRule>>, AppError> {
    let root = app.root.clone();
    let rules = tokio::task::spawn_blocking(move || {
        let member = bandroom_core::Member::load(&root, id)?;
        Ok::<_, bandroom_core::BandroomError>(member.rules)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(rules))
}

/// POST /api/members/:id/rules — add a free/busy rule.
///
/// The body is the rule kind itself, e.g.
/// `{"kind": "one_off", "interval": {"start": ..., "end": ...}, "busy": true}`.
pub async fn add_rule(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(kind): Json<bandroom_core::RuleKind>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut member = bandroom_core::Member::load(&root, id)?;
        let rule_id = member.add_rule(kind)?;
        member.save(&root)?;
        Ok::<_, bandroom_core::BandroomError>(serde_json::json!({ "rule_id": rule_id }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(result)))
}

/// DELETE /api/members/:id/rules/:rule_id — remove a rule.
pub async fn delete_rule(
    State(app): State<AppState>,
    Path((id, rule_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut member = bandroom_core::Member::load(&root, id)?;
        member.remove_rule(rule_id)?;
        member.save(&root)?;
        Ok::<_, bandroom_core::BandroomError>(serde_json::json!({ "deleted": true }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
