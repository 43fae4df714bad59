//! HTTP surface for the marketplace.
//!
//! The authentication collaborator in front of this service resolves
//! credentials to a user id; handlers receive it as the `x-user-id` header
//! and resolve it against the user store before touching anything.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::catalog::{category_filter, BrowseFilter};
use super::domain::{
    ApplicationId, AuthenticatedUser, JobDraft, JobId, NotificationId, PageParams, ProfileDraft,
    UserId,
};
use super::repository::MarketplaceStore;
use super::{Marketplace, MarketplaceError};

/// Router builder exposing the full role-gated marketplace API.
pub fn marketplace_router<S>(marketplace: Arc<Marketplace<S>>) -> Router
where
    S: MarketplaceStore + 'static,
{
    Router::new()
        // Employer surface
        .route(
            "/api/v1/employer/jobs",
            get(list_jobs_handler::<S>).post(create_job_handler::<S>),
        )
        .route(
            "/api/v1/employer/jobs/:job_id",
            put(update_job_handler::<S>).delete(delete_job_handler::<S>),
        )
        .route(
            "/api/v1/employer/jobs/:job_id/applicants",
            get(job_applicants_handler::<S>),
        )
        .route(
            "/api/v1/employer/jobs/:job_id/applicants/swipe",
            post(applicant_swipe_handler::<S>),
        )
        .route(
            "/api/v1/employer/candidates/recommended",
            get(recommended_candidates_handler::<S>),
        )
        .route(
            "/api/v1/employer/candidates/swipe",
            post(candidate_swipe_handler::<S>),
        )
        .route("/api/v1/employer/shortlist", get(shortlist_handler::<S>))
        .route(
            "/api/v1/employer/shortlist/:candidate_id",
            delete(shortlist_remove_handler::<S>),
        )
        .route("/api/v1/employer/interviews", get(interviews_handler::<S>))
        .route(
            "/api/v1/employer/interviews/schedule",
            post(schedule_interview_handler::<S>),
        )
        // Employee surface
        .route(
            "/api/v1/employee/jobs/recommended",
            get(browse_jobs_handler::<S>),
        )
        .route("/api/v1/employee/jobs/swipe", post(job_swipe_handler::<S>))
        .route(
            "/api/v1/employee/applications",
            get(candidate_applications_handler::<S>),
        )
        .route(
            "/api/v1/employee/applications/:application_id",
            delete(withdraw_handler::<S>),
        )
        .route(
            "/api/v1/employee/applications/reapply",
            post(reapply_handler::<S>),
        )
        .route(
            "/api/v1/employee/profile",
            get(own_profile_handler::<S>).put(upsert_profile_handler::<S>),
        )
        // Shared surface
        .route("/api/v1/me", get(me_handler::<S>))
        .route("/api/v1/dashboard", get(dashboard_handler::<S>))
        .route(
            "/api/v1/notifications",
            get(notifications_handler::<S>),
        )
        .route(
            "/api/v1/notifications/mark-all-read",
            post(mark_all_read_handler::<S>),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            patch(mark_read_handler::<S>),
        )
        .route(
            "/api/v1/notifications/:notification_id",
            delete(delete_notification_handler::<S>),
        )
        .with_state(marketplace)
}

fn identity<S>(
    marketplace: &Marketplace<S>,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, MarketplaceError>
where
    S: MarketplaceStore,
{
    let raw = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or(MarketplaceError::Unauthenticated)?;
    let id = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| MarketplaceError::Unauthenticated)?;
    marketplace.verified_identity(UserId(id))
}

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BrowseQuery {
    category: Option<String>,
    search: Option<String>,
    location: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobSwipeRequest {
    job_id: Option<u64>,
    #[serde(default)]
    interested: bool,
}

#[derive(Debug, Deserialize)]
struct ApplicantSwipeRequest {
    applicant_id: u64,
    #[serde(default)]
    advance: bool,
}

#[derive(Debug, Deserialize)]
struct CandidateSwipeRequest {
    candidate_id: u64,
    #[serde(default)]
    interested: bool,
}

#[derive(Debug, Deserialize)]
struct ReapplyRequest {
    job_id: u64,
}

#[derive(Debug, Deserialize)]
struct ScheduleInterviewRequest {
    application_id: u64,
    scheduled_at: DateTime<Utc>,
}

// Employer handlers

async fn list_jobs_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Query(query): Query<CategoryQuery>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let category = category_filter(query.category.as_deref())?;
    let jobs = marketplace.list_jobs(&user, category)?;
    Ok(Json(json!({ "jobs": jobs })).into_response())
}

async fn create_job_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Json(draft): Json<JobDraft>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let job = marketplace.create_job(&user, draft)?;
    Ok((StatusCode::CREATED, Json(job)).into_response())
}

async fn update_job_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(job_id): Path<u64>,
    Json(draft): Json<JobDraft>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let job = marketplace.update_job(&user, JobId(job_id), draft)?;
    Ok(Json(job).into_response())
}

async fn delete_job_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(job_id): Path<u64>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    marketplace.delete_job(&user, JobId(job_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn job_applicants_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(job_id): Path<u64>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let applicants = marketplace.job_applicants(&user, JobId(job_id))?;
    Ok(Json(json!({ "applicants": applicants })).into_response())
}

async fn applicant_swipe_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(job_id): Path<u64>,
    Json(request): Json<ApplicantSwipeRequest>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let status = marketplace.advance_or_reject(
        &user,
        JobId(job_id),
        ApplicationId(request.applicant_id),
        request.advance,
    )?;
    Ok(Json(json!({ "message": "updated", "status": status.label() })).into_response())
}

async fn recommended_candidates_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Query(query): Query<CategoryQuery>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let category = category_filter(query.category.as_deref())?;
    let candidates = marketplace.recommend_candidates(&user, category)?;
    Ok(Json(json!({ "candidates": candidates })).into_response())
}

async fn candidate_swipe_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Json(request): Json<CandidateSwipeRequest>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let shortlisted =
        marketplace.swipe_candidate(&user, UserId(request.candidate_id), request.interested)?;
    Ok(Json(json!({ "message": "saved", "shortlisted": shortlisted })).into_response())
}

async fn shortlist_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let candidates = marketplace.shortlist(&user)?;
    Ok(Json(json!({ "candidates": candidates })).into_response())
}

async fn shortlist_remove_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(candidate_id): Path<u64>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    marketplace.remove_from_shortlist(&user, UserId(candidate_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn interviews_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let interviews = marketplace.employer_interviews(&user)?;
    Ok(Json(json!({ "interviews": interviews })).into_response())
}

async fn schedule_interview_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Json(request): Json<ScheduleInterviewRequest>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let interview = marketplace.schedule_interview(
        &user,
        ApplicationId(request.application_id),
        request.scheduled_at,
    )?;
    Ok((StatusCode::CREATED, Json(interview)).into_response())
}

// Employee handlers

async fn browse_jobs_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Query(query): Query<BrowseQuery>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    identity(&marketplace, &headers)?;
    let filter = BrowseFilter {
        category: category_filter(query.category.as_deref())?,
        search: query.search,
        location: query.location,
        page: PageParams::lenient(query.page.as_deref(), query.page_size.as_deref()),
    };
    let page = marketplace.browse_jobs(&filter)?;
    Ok(Json(page).into_response())
}

async fn job_swipe_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Json(request): Json<JobSwipeRequest>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    if let (true, Some(job_id)) = (request.interested, request.job_id) {
        marketplace.apply_to_job(&user, JobId(job_id))?;
    }
    Ok(Json(json!({ "message": "ok" })).into_response())
}

async fn candidate_applications_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let applications = marketplace.candidate_applications(&user)?;
    Ok(Json(json!({ "applications": applications })).into_response())
}

async fn withdraw_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(application_id): Path<u64>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    marketplace.withdraw(&user, ApplicationId(application_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn reapply_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Json(request): Json<ReapplyRequest>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    marketplace.reapply(&user, JobId(request.job_id))?;
    Ok(Json(json!({ "message": "reapplied" })).into_response())
}

async fn own_profile_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let profile = marketplace.own_profile(&user)?;
    Ok(Json(profile).into_response())
}

async fn upsert_profile_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Json(draft): Json<ProfileDraft>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let profile = marketplace.upsert_profile(&user, draft)?;
    Ok(Json(profile).into_response())
}

// Shared handlers

async fn me_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let account = marketplace.me(&user)?;
    Ok(Json(account).into_response())
}

async fn dashboard_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let dashboard = marketplace.dashboard(&user)?;
    Ok(Json(dashboard).into_response())
}

async fn notifications_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let notifications = marketplace.notifications(&user)?;
    Ok(Json(json!({ "notifications": notifications })).into_response())
}

async fn mark_read_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(notification_id): Path<u64>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    marketplace.mark_notification_read(&user, NotificationId(notification_id))?;
    Ok(Json(json!({ "message": "read" })).into_response())
}

async fn mark_all_read_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    let marked = marketplace.mark_all_notifications_read(&user)?;
    Ok(Json(json!({ "message": "all_read", "marked": marked })).into_response())
}

async fn delete_notification_handler<S>(
    State(marketplace): State<Arc<Marketplace<S>>>,
    headers: HeaderMap,
    Path(notification_id): Path<u64>,
) -> Result<Response, MarketplaceError>
where
    S: MarketplaceStore + 'static,
{
    let user = identity(&marketplace, &headers)?;
    marketplace.delete_notification(&user, NotificationId(notification_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
