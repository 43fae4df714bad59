use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace users (employers and employees alike).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub u64);

/// Identifier wrapper for applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub u64);

/// Identifier wrapper for interviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterviewId(pub u64);

/// Identifier wrapper for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// Account role. Immutable after creation; no operation changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Employer,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Employer => "employer",
        }
    }
}

/// A registered account as stored by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl UserAccount {
    /// Full name when present, username otherwise.
    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            self.username.clone()
        } else {
            self.full_name.clone()
        }
    }
}

/// Fields for registering an account; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

/// The opaque verified identity supplied by the authentication collaborator.
///
/// Credential issuance and verification live outside this crate; by the time
/// request handling reaches the marketplace, the caller is already resolved
/// to an id plus role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: Role,
}

/// Closed set of job categories advertised on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobCategory {
    Accountancy,
    Administration,
    ICT,
    Manufacturing,
    HR,
    Sales,
    Logistics,
}

impl JobCategory {
    pub const ALL: [JobCategory; 7] = [
        JobCategory::Accountancy,
        JobCategory::Administration,
        JobCategory::ICT,
        JobCategory::Manufacturing,
        JobCategory::HR,
        JobCategory::Sales,
        JobCategory::Logistics,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            JobCategory::Accountancy => "Accountancy",
            JobCategory::Administration => "Administration",
            JobCategory::ICT => "ICT",
            JobCategory::Manufacturing => "Manufacturing",
            JobCategory::HR => "HR",
            JobCategory::Sales => "Sales",
            JobCategory::Logistics => "Logistics",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == value)
    }
}

/// Where the work happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    #[default]
    Office,
    Remote,
    Hybrid,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_open() -> bool {
    true
}

/// The mutable fields of a job posting, as submitted by an employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub category: JobCategory,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub required_certifications: String,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub salary_amount: Option<String>,
    #[serde(default = "default_currency")]
    pub salary_currency: String,
    #[serde(default)]
    pub duties_responsibilities: String,
    #[serde(default)]
    pub expected_hours: String,
    #[serde(default)]
    pub work_type: WorkType,
    #[serde(default)]
    pub work_days: String,
    #[serde(default = "default_open")]
    pub is_open: bool,
    #[serde(default)]
    pub closing_date: Option<NaiveDate>,
}

/// A posting owned by exactly one employer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: JobId,
    #[serde(skip_serializing)]
    pub employer_id: UserId,
    #[serde(flatten)]
    pub details: JobDraft,
    pub created_at: DateTime<Utc>,
}

/// One prior role on a candidate profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub description: String,
}

/// One qualification on a candidate profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// The searchable fields of a candidate profile, as submitted by the candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub years_experience: u32,
}

/// 1:1 with an employee account. Created lazily; absence is a valid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    #[serde(skip_serializing)]
    pub user_id: UserId,
    #[serde(flatten)]
    pub details: ProfileDraft,
}

/// Lifecycle state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    Rejected,
    Interview,
    Accepted,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Accepted => "accepted",
        }
    }

    /// Legal moves in the lifecycle graph. Same-status moves are permitted
    /// so repeated employer actions stay idempotent; `Accepted` is terminal
    /// and `Rejected` can only return to `Pending` (reapplication).
    pub fn can_transition(self, to: Self) -> bool {
        use ApplicationStatus::*;
        if self == to {
            return true;
        }
        matches!(
            (self, to),
            (Pending, Shortlisted | Interview | Rejected)
                | (Shortlisted, Interview | Rejected)
                | (Interview, Accepted | Rejected)
                | (Rejected, Pending)
        )
    }
}

/// Links one candidate to one job. At most one per (job, candidate) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: UserId,
    pub status: ApplicationStatus,
    pub feedback_notes: String,
    pub created_at: DateTime<Utc>,
}

/// State of a scheduled interview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// Belongs to exactly one application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interview {
    pub id: InterviewId,
    pub application_id: ApplicationId,
    pub scheduled_at: DateTime<Utc>,
    pub status: InterviewStatus,
}

/// Tag on a feed entry so clients can route taps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    General,
    Application,
    StatusUpdate,
    Interview,
}

/// Per-user feed entry. Append-only except for the read flag and deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(skip_serializing)]
    pub user_id: UserId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub action_url: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Pagination window for the candidate-facing job browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: usize,
    pub page_size: usize,
}

impl PageParams {
    pub const DEFAULT_PAGE: usize = 1;
    pub const DEFAULT_PAGE_SIZE: usize = 20;
    pub const MAX_PAGE_SIZE: usize = 100;

    /// Malformed or non-positive values fall back to the defaults rather
    /// than erroring; oversized windows are clamped.
    pub fn lenient(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = page
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(Self::DEFAULT_PAGE);
        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|s| *s >= 1)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .min(Self::MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
