use std::collections::HashMap;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use serde::{Deserialize, Serialize};

use crate::core::Value;
use crate::gateway::CallerIdentity;
use crate::models::{Conference, ConferenceForm, Profile, ProfileForm};
use crate::query::{ConferenceQuery, Filter};
use crate::web::error::{AppError, AppResult};
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Profile payload, enriched with its web-safe key.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    profile: Profile,
    websafe_key: String,
}

impl ProfileResponse {
    fn new(profile: Profile) -> Self {
        let websafe_key = profile.key().web_safe();
        Self {
            profile,
            websafe_key,
        }
    }
}

/// Conference payload, enriched with its web-safe key and (on query
/// responses) the prefetched organizer display name.
#[derive(Debug, Serialize)]
pub struct ConferenceResponse {
    #[serde(flatten)]
    conference: Conference,
    websafe_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    organizer_display_name: Option<String>,
}

impl ConferenceResponse {
    fn new(conference: Conference, organizer_display_name: Option<String>) -> Self {
        let websafe_key = conference.key().web_safe();
        Self {
            conference,
            websafe_key,
            organizer_display_name,
        }
    }
}

/// One filter criterion as it arrives on the wire.
#[derive(Debug, Deserialize)]
pub struct RawFilter {
    pub field: String,
    pub operator: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryConferencesRequest {
    #[serde(default)]
    pub filters: Vec<RawFilter>,
    #[serde(default)]
    pub sort: Option<String>,
}

pub async fn health() -> Json<ApiResponse<ApiMessage>> {
    Json(ApiResponse {
        data: ApiMessage {
            message: "ok".to_string(),
        },
    })
}

pub async fn save_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<ProfileForm>,
) -> AppResult<Json<ApiResponse<ProfileResponse>>> {
    let caller = caller_from_headers(&state, &headers).await;
    let profile = state.api.save_profile(caller.as_ref(), form).await?;
    Ok(Json(ApiResponse {
        data: ProfileResponse::new(profile),
    }))
}

/// Absence of a profile maps to 404 on the HTTP surface; the facade itself
/// treats it as a plain empty result.
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<ProfileResponse>>> {
    let caller = caller_from_headers(&state, &headers).await;
    let profile = state
        .api
        .get_profile(caller.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("profile not found"))?;
    Ok(Json(ApiResponse {
        data: ProfileResponse::new(profile),
    }))
}

pub async fn create_conference(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<ConferenceForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<ConferenceResponse>>)> {
    validate_conference_form(&form)?;

    let caller = caller_from_headers(&state, &headers).await;
    let conference = state.api.create_conference(caller.as_ref(), form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: ConferenceResponse::new(conference, None),
        }),
    ))
}

pub async fn get_conferences_created(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<Vec<ConferenceResponse>>>> {
    let caller = caller_from_headers(&state, &headers).await;
    let conferences = state.api.get_conferences_created(caller.as_ref()).await?;
    Ok(Json(ApiResponse {
        data: conferences
            .into_iter()
            .map(|c| ConferenceResponse::new(c, None))
            .collect(),
    }))
}

pub async fn query_conferences(
    State(state): State<AppState>,
    Json(request): Json<QueryConferencesRequest>,
) -> AppResult<Json<ApiResponse<Vec<ConferenceResponse>>>> {
    let query = build_query(request)?;
    let outcome = state.api.query_conferences(query).await?;

    // One batch fetch for every organizer referenced by the result set.
    let organizers = state
        .api
        .profiles()
        .get_many(&outcome.organizer_keys)
        .await?;
    let names: HashMap<String, String> = organizers
        .into_iter()
        .flatten()
        .map(|p| (p.user_id().to_string(), p.display_name().to_string()))
        .collect();

    Ok(Json(ApiResponse {
        data: outcome
            .conferences
            .into_iter()
            .map(|c| {
                let name = names.get(c.organizer_user_id()).cloned();
                ConferenceResponse::new(c, name)
            })
            .collect(),
    }))
}

async fn caller_from_headers(state: &AppState, headers: &HeaderMap) -> Option<CallerIdentity> {
    let credential = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    state.gateway.resolve(credential).await
}

fn build_query(request: QueryConferencesRequest) -> AppResult<ConferenceQuery> {
    let mut query = ConferenceQuery::new();
    for raw in request.filters {
        let field = raw.field.parse()?;
        let op = raw.operator.parse()?;
        let value = Value::from_json(&raw.value)?;
        query = query.filter(Filter::new(field, op, value));
    }
    if let Some(sort) = request.sort {
        query = query.order_by(sort.parse()?);
    }
    Ok(query)
}

fn validate_conference_form(form: &ConferenceForm) -> AppResult<()> {
    if form.name.trim().is_empty() {
        return Err(AppError::validation("conference name must not be blank"));
    }
    if let Some(max) = form.max_attendees
        && max < 0
    {
        return Err(AppError::validation("max_attendees must not be negative"));
    }
    if let (Some(start), Some(end)) = (form.start_date, form.end_date)
        && end < start
    {
        return Err(AppError::validation("end_date must not precede start_date"));
    }
    Ok(())
}
