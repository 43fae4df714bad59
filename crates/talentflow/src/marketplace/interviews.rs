//! Interview scheduling over the employer's own jobs.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{
    ApplicationId, ApplicationStatus, AuthenticatedUser, Interview, InterviewStatus,
    NotificationKind,
};
use super::repository::{MarketplaceStore, NewInterview};
use super::views::InterviewView;
use super::{require_employer, Marketplace, MarketplaceError};

impl<S> Marketplace<S>
where
    S: MarketplaceStore,
{
    /// Books an interview for an application on one of the employer's jobs
    /// and moves the application to `interview` so the two never diverge.
    /// The candidate is told the slot.
    pub fn schedule_interview(
        &self,
        employer: &AuthenticatedUser,
        application_id: ApplicationId,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Interview, MarketplaceError> {
        require_employer(employer)?;

        let mut application = self
            .store()
            .fetch_application(application_id)?
            .ok_or(MarketplaceError::NotFound)?;
        let job = self.owned_job(employer, application.job_id)?;

        if super::lifecycle::transition(&mut application, ApplicationStatus::Interview)? {
            self.store().update_application(application.clone())?;
        }

        let interview = self.store().insert_interview(NewInterview {
            application_id,
            scheduled_at,
            status: InterviewStatus::Scheduled,
        })?;

        self.notify(
            application.candidate_id,
            NotificationKind::Interview,
            format!(
                "Interview scheduled for {} on {}",
                job.details.title,
                scheduled_at.format("%Y-%m-%d %H:%M UTC")
            ),
            String::new(),
        )?;
        debug!(
            interview = interview.id.0,
            application = application_id.0,
            "interview scheduled"
        );
        Ok(interview)
    }

    /// Interviews whose application's job the employer owns, candidate and
    /// job display fields flattened in.
    pub fn employer_interviews(
        &self,
        employer: &AuthenticatedUser,
    ) -> Result<Vec<InterviewView>, MarketplaceError> {
        require_employer(employer)?;

        let mut interviews = self.store().all_interviews()?;
        interviews.sort_by_key(|interview| interview.id);

        let mut rows = Vec::new();
        for interview in interviews {
            let Some(application) = self.store().fetch_application(interview.application_id)?
            else {
                continue;
            };
            let Some(job) = self.store().fetch_job(application.job_id)? else {
                continue;
            };
            if job.employer_id != employer.id {
                continue;
            }
            let candidate_name = self.account_name(application.candidate_id)?;
            rows.push(InterviewView {
                id: interview.id,
                scheduled_at: interview.scheduled_at,
                status: interview.status,
                candidate_name,
                job_title: job.details.title,
                application_id: application.id,
            });
        }
        Ok(rows)
    }
}
