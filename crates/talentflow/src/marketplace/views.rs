//! Denormalized response shapes assembled by the services.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    ApplicationId, EducationEntry, ExperienceEntry, InterviewId, InterviewStatus, JobId, UserId,
};

/// One row of the candidate-facing job browse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseJobView {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    #[serde(rename = "type")]
    pub job_type: &'static str,
    pub requirements: Vec<String>,
}

/// A browse page plus the window it covers.
#[derive(Debug, Clone, Serialize)]
pub struct BrowsePage {
    pub jobs: Vec<BrowseJobView>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

/// A discovered candidate, profile fields joined with account identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummaryView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub title: String,
    pub location: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub resume_url: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub years_experience: u32,
}

/// One applicant row for an employer reviewing a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantView {
    pub id: ApplicationId,
    pub name: String,
    pub email: String,
    pub summary: String,
    pub experience: Vec<String>,
}

/// Shortlist entry flattened to a candidate summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistEntryView {
    pub id: UserId,
    pub name: String,
    pub title: String,
}

/// One row of a candidate's own application list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateApplicationView {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub company: String,
    pub status: &'static str,
    pub applied_date: DateTime<Utc>,
    pub location: String,
    pub job_type: &'static str,
    pub interview_date: Option<DateTime<Utc>>,
}

/// One row of an employer's interview schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewView {
    pub id: InterviewId,
    pub scheduled_at: DateTime<Utc>,
    pub status: InterviewStatus,
    pub candidate_name: String,
    pub job_title: String,
    pub application_id: ApplicationId,
}

/// Role-specific landing stats plus the profile nudge flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub message: &'static str,
    pub stats: DashboardStats,
    pub profile_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Employer { jobs_posted: usize, applicants: usize },
    Employee { jobs_suggested: usize, applications: usize },
}
