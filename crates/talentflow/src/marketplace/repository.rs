use chrono::{DateTime, Utc};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateProfile, Interview, InterviewStatus,
    Job, JobDraft, JobId, NewUser, Notification, NotificationId, NotificationKind, UserAccount,
    UserId,
};

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// A job posting ready for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub employer_id: UserId,
    pub details: JobDraft,
    pub created_at: DateTime<Utc>,
}

/// An application ready for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: JobId,
    pub candidate_id: UserId,
    pub status: ApplicationStatus,
    pub feedback_notes: String,
    pub created_at: DateTime<Utc>,
}

/// An interview ready for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewInterview {
    pub application_id: ApplicationId,
    pub scheduled_at: DateTime<Utc>,
    pub status: InterviewStatus,
}

/// A feed entry ready for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: UserId,
    pub message: String,
    pub kind: NotificationKind,
    pub action_url: String,
    pub created_at: DateTime<Utc>,
}

/// Identity records. Registration mechanics live with the auth collaborator;
/// the marketplace only reads accounts plus seeds them in demos and tests.
pub trait UserStore: Send + Sync {
    /// Insert fails with `Conflict` when the username is already taken.
    fn insert_user(&self, user: NewUser) -> Result<UserAccount, RepositoryError>;
    fn fetch_user(&self, id: UserId) -> Result<Option<UserAccount>, RepositoryError>;
}

pub trait JobStore: Send + Sync {
    fn insert_job(&self, job: NewJob) -> Result<Job, RepositoryError>;
    fn update_job(&self, job: Job) -> Result<(), RepositoryError>;
    /// Removes the job together with its applications and their interviews.
    fn delete_job(&self, id: JobId) -> Result<(), RepositoryError>;
    fn fetch_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;
    fn jobs_for_employer(&self, employer: UserId) -> Result<Vec<Job>, RepositoryError>;
    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError>;
}

pub trait ProfileStore: Send + Sync {
    fn upsert_profile(&self, profile: CandidateProfile) -> Result<(), RepositoryError>;
    fn fetch_profile(&self, user: UserId) -> Result<Option<CandidateProfile>, RepositoryError>;
    fn all_profiles(&self) -> Result<Vec<CandidateProfile>, RepositoryError>;
}

pub trait ApplicationStore: Send + Sync {
    /// Get-or-create for the (job, candidate) pair under a single guard so
    /// concurrent applies cannot produce duplicates. The flag reports
    /// whether a record was newly created.
    fn insert_application(
        &self,
        new: NewApplication,
    ) -> Result<(Application, bool), RepositoryError>;
    fn update_application(&self, application: Application) -> Result<(), RepositoryError>;
    /// Removes the application together with its interviews.
    fn delete_application(&self, id: ApplicationId) -> Result<(), RepositoryError>;
    fn fetch_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn applications_for_candidate(
        &self,
        candidate: UserId,
    ) -> Result<Vec<Application>, RepositoryError>;
    fn applications_for_job(&self, job: JobId) -> Result<Vec<Application>, RepositoryError>;
}

pub trait InterviewStore: Send + Sync {
    fn insert_interview(&self, new: NewInterview) -> Result<Interview, RepositoryError>;
    fn interviews_for_application(
        &self,
        application: ApplicationId,
    ) -> Result<Vec<Interview>, RepositoryError>;
    fn all_interviews(&self) -> Result<Vec<Interview>, RepositoryError>;
}

pub trait NotificationStore: Send + Sync {
    fn insert_notification(&self, new: NewNotification) -> Result<Notification, RepositoryError>;
    fn update_notification(&self, notification: Notification) -> Result<(), RepositoryError>;
    fn delete_notification(&self, id: NotificationId) -> Result<(), RepositoryError>;
    fn fetch_notification(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, RepositoryError>;
    fn notifications_for_user(&self, user: UserId) -> Result<Vec<Notification>, RepositoryError>;
}

/// The full storage surface the marketplace services run against. Blanket
/// implemented for anything providing every per-entity store.
pub trait MarketplaceStore:
    UserStore + JobStore + ProfileStore + ApplicationStore + InterviewStore + NotificationStore
{
}

impl<S> MarketplaceStore for S where
    S: UserStore + JobStore + ProfileStore + ApplicationStore + InterviewStore + NotificationStore
{
}
