//! The marketplace module tree: domain types, storage seams, per-component
//! services, and the HTTP router.
//!
//! Ownership scoping is the load-bearing rule everywhere here: employer
//! operations are filtered to jobs the caller owns and candidate operations
//! to the caller's own records, so a miss and a record owned by somebody
//! else are both reported as `NotFound`.

pub mod accounts;
pub mod candidates;
pub mod catalog;
pub mod domain;
pub mod interviews;
pub mod lifecycle;
pub mod notifications;
pub mod repository;
pub mod router;
pub mod views;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::{AuthenticatedUser, Role, UserAccount, UserId};
use repository::{MarketplaceStore, RepositoryError};

pub use domain::{
    Application, ApplicationId, ApplicationStatus, CandidateProfile, EducationEntry,
    ExperienceEntry, Interview, InterviewId, InterviewStatus, Job, JobCategory, JobDraft, JobId,
    NewUser, Notification, NotificationId, NotificationKind, PageParams, ProfileDraft, WorkType,
};
pub use router::marketplace_router;

/// Facade over the storage seams. One instance serves every component; the
/// per-component operations live in sibling modules as `impl` blocks.
pub struct Marketplace<S> {
    store: Arc<S>,
}

impl<S> Clone for Marketplace<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S> Marketplace<S>
where
    S: MarketplaceStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub(crate) fn account(&self, id: UserId) -> Result<Option<UserAccount>, MarketplaceError> {
        Ok(self.store.fetch_user(id)?)
    }

    /// Display name for denormalized views; dangling references render empty
    /// rather than failing the whole listing.
    pub(crate) fn account_name(&self, id: UserId) -> Result<String, MarketplaceError> {
        Ok(self
            .store
            .fetch_user(id)?
            .map(|account| account.display_name())
            .unwrap_or_default())
    }
}

pub(crate) fn require_employer(user: &AuthenticatedUser) -> Result<(), MarketplaceError> {
    match user.role {
        Role::Employer => Ok(()),
        Role::Employee => Err(MarketplaceError::Forbidden("employer")),
    }
}

pub(crate) fn require_employee(user: &AuthenticatedUser) -> Result<(), MarketplaceError> {
    match user.role {
        Role::Employee => Ok(()),
        Role::Employer => Err(MarketplaceError::Forbidden("employee")),
    }
}

/// Error raised by marketplace operations.
///
/// `NotFound` deliberately collapses "does not exist" and "not owned by the
/// caller" so callers cannot probe other tenants' records; `Forbidden` is
/// reserved for role mismatches, which leak nothing about specific records.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("record not found")]
    NotFound,
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("{0} role required")]
    Forbidden(&'static str),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("illegal status transition from '{from}' to '{to}'")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match &self {
            MarketplaceError::NotFound => StatusCode::NOT_FOUND,
            MarketplaceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            MarketplaceError::Forbidden(_) => StatusCode::FORBIDDEN,
            MarketplaceError::Validation(_) => StatusCode::BAD_REQUEST,
            MarketplaceError::InvalidTransition { .. } => StatusCode::CONFLICT,
            MarketplaceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            MarketplaceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
