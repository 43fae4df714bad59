//! Application lifecycle: apply, withdraw, review, and the shortlist.

use chrono::Utc;
use tracing::debug;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, AuthenticatedUser, JobId, NotificationKind,
    UserId,
};
use super::repository::{MarketplaceStore, NewApplication};
use super::views::{ApplicantView, CandidateApplicationView, ShortlistEntryView};
use super::{require_employee, require_employer, Marketplace, MarketplaceError};

/// Moves an application along the lifecycle graph. Returns whether anything
/// changed; same-status moves are idempotent no-ops.
pub(crate) fn transition(
    application: &mut Application,
    to: ApplicationStatus,
) -> Result<bool, MarketplaceError> {
    if application.status == to {
        return Ok(false);
    }
    if !application.status.can_transition(to) {
        return Err(MarketplaceError::InvalidTransition {
            from: application.status.label(),
            to: to.label(),
        });
    }
    application.status = to;
    Ok(true)
}

impl<S> Marketplace<S>
where
    S: MarketplaceStore,
{
    /// Idempotent apply: at most one application ever exists per
    /// (job, candidate) pair. The owning employer is notified on first
    /// creation only.
    pub fn apply_to_job(
        &self,
        candidate: &AuthenticatedUser,
        job_id: JobId,
    ) -> Result<Application, MarketplaceError> {
        require_employee(candidate)?;
        let job = self
            .store()
            .fetch_job(job_id)?
            .ok_or(MarketplaceError::NotFound)?;

        let (application, created) = self.store().insert_application(NewApplication {
            job_id,
            candidate_id: candidate.id,
            status: ApplicationStatus::Pending,
            feedback_notes: String::new(),
            created_at: Utc::now(),
        })?;

        if created {
            let candidate_name = self.account_name(candidate.id)?;
            self.notify(
                job.employer_id,
                NotificationKind::Application,
                format!(
                    "New application from {candidate_name} for {}",
                    job.details.title
                ),
                String::new(),
            )?;
            debug!(job = job_id.0, candidate = candidate.id.0, "application created");
        }
        Ok(application)
    }

    /// Re-activates a rejected application back to pending; creates one if
    /// none exists; leaves every other status untouched.
    pub fn reapply(
        &self,
        candidate: &AuthenticatedUser,
        job_id: JobId,
    ) -> Result<Application, MarketplaceError> {
        require_employee(candidate)?;
        self.store()
            .fetch_job(job_id)?
            .ok_or(MarketplaceError::NotFound)?;

        let (mut application, created) = self.store().insert_application(NewApplication {
            job_id,
            candidate_id: candidate.id,
            status: ApplicationStatus::Pending,
            feedback_notes: String::new(),
            created_at: Utc::now(),
        })?;

        if !created
            && application.status == ApplicationStatus::Rejected
            && transition(&mut application, ApplicationStatus::Pending)?
        {
            self.store().update_application(application.clone())?;
        }
        Ok(application)
    }

    /// Hard delete, scoped to the requesting candidate; cascades to the
    /// application's interviews.
    pub fn withdraw(
        &self,
        candidate: &AuthenticatedUser,
        application_id: ApplicationId,
    ) -> Result<(), MarketplaceError> {
        require_employee(candidate)?;
        match self.store().fetch_application(application_id)? {
            Some(application) if application.candidate_id == candidate.id => {
                self.store().delete_application(application_id)?;
                Ok(())
            }
            _ => Err(MarketplaceError::NotFound),
        }
    }

    /// The candidate's applications with job and employer display fields
    /// flattened in, plus the earliest scheduled interview if any.
    pub fn candidate_applications(
        &self,
        candidate: &AuthenticatedUser,
    ) -> Result<Vec<CandidateApplicationView>, MarketplaceError> {
        require_employee(candidate)?;

        let mut applications = self.store().applications_for_candidate(candidate.id)?;
        applications.sort_by_key(|application| application.id);

        let mut rows = Vec::new();
        for application in applications {
            let Some(job) = self.store().fetch_job(application.job_id)? else {
                continue;
            };
            let company = self.account_name(job.employer_id)?;
            let interview_date = self
                .store()
                .interviews_for_application(application.id)?
                .into_iter()
                .map(|interview| interview.scheduled_at)
                .min();
            rows.push(CandidateApplicationView {
                id: application.id,
                job_id: job.id,
                job_title: job.details.title,
                company,
                status: application.status.label(),
                applied_date: application.created_at,
                location: job.details.location,
                job_type: "Full-time",
                interview_date,
            });
        }
        Ok(rows)
    }

    /// Applications for one of the employer's own jobs, candidate profile
    /// fields flattened in. Missing profiles render as empty fields.
    pub fn job_applicants(
        &self,
        employer: &AuthenticatedUser,
        job_id: JobId,
    ) -> Result<Vec<ApplicantView>, MarketplaceError> {
        require_employer(employer)?;
        self.owned_job(employer, job_id)?;

        let mut applications = self.store().applications_for_job(job_id)?;
        applications.sort_by_key(|application| application.id);

        let mut rows = Vec::new();
        for application in applications {
            let account = self.account(application.candidate_id)?;
            let profile = self.store().fetch_profile(application.candidate_id)?;
            let (name, email) = match account {
                Some(account) => (account.display_name(), account.email),
                None => (String::new(), String::new()),
            };
            let (summary, skills) = match profile {
                Some(profile) => (profile.details.summary, profile.details.skills),
                None => (String::new(), Vec::new()),
            };
            rows.push(ApplicantView {
                id: application.id,
                name,
                email,
                summary,
                experience: skills,
            });
        }
        Ok(rows)
    }

    /// The employer's review swipe: advance to interview or reject. Scoped
    /// to the employer's own job; illegal moves (e.g. out of `accepted`)
    /// are refused rather than overwritten.
    pub fn advance_or_reject(
        &self,
        employer: &AuthenticatedUser,
        job_id: JobId,
        application_id: ApplicationId,
        advance: bool,
    ) -> Result<ApplicationStatus, MarketplaceError> {
        require_employer(employer)?;
        let job = self.owned_job(employer, job_id)?;

        let mut application = match self.store().fetch_application(application_id)? {
            Some(application) if application.job_id == job_id => application,
            _ => return Err(MarketplaceError::NotFound),
        };

        let target = if advance {
            ApplicationStatus::Interview
        } else {
            ApplicationStatus::Rejected
        };
        if transition(&mut application, target)? {
            self.store().update_application(application.clone())?;
            let message = match target {
                ApplicationStatus::Interview => {
                    format!("You advanced to interview for {}", job.details.title)
                }
                _ => format!(
                    "Your application for {} was not taken forward",
                    job.details.title
                ),
            };
            self.notify(
                application.candidate_id,
                NotificationKind::StatusUpdate,
                message,
                String::new(),
            )?;
        }
        Ok(application.status)
    }

    /// Every shortlisted application across the employer's jobs, flattened
    /// to candidate summaries.
    pub fn shortlist(
        &self,
        employer: &AuthenticatedUser,
    ) -> Result<Vec<ShortlistEntryView>, MarketplaceError> {
        require_employer(employer)?;

        let mut rows = Vec::new();
        for application in self.shortlisted_applications(employer.id)? {
            let name = self.account_name(application.candidate_id)?;
            let title = self
                .store()
                .fetch_profile(application.candidate_id)?
                .map(|profile| profile.details.title)
                .unwrap_or_default();
            rows.push(ShortlistEntryView {
                id: application.candidate_id,
                name,
                title,
            });
        }
        Ok(rows)
    }

    /// The shortlist is keyed by candidate, so removal rejects every
    /// application of that candidate currently shortlisted under this
    /// employer. Returns how many were rejected.
    pub fn remove_from_shortlist(
        &self,
        employer: &AuthenticatedUser,
        candidate_id: UserId,
    ) -> Result<usize, MarketplaceError> {
        require_employer(employer)?;

        let mut removed = 0;
        for application in self.shortlisted_applications(employer.id)? {
            if application.candidate_id != candidate_id {
                continue;
            }
            let mut application = application;
            if transition(&mut application, ApplicationStatus::Rejected)? {
                self.store().update_application(application)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn shortlisted_applications(
        &self,
        employer: UserId,
    ) -> Result<Vec<Application>, MarketplaceError> {
        let mut shortlisted = Vec::new();
        for job in self.store().jobs_for_employer(employer)? {
            for application in self.store().applications_for_job(job.id)? {
                if application.status == ApplicationStatus::Shortlisted {
                    shortlisted.push(application);
                }
            }
        }
        shortlisted.sort_by_key(|application| application.id);
        Ok(shortlisted)
    }
}
