//! Job catalog: employer-owned postings plus the candidate-facing browse.

use chrono::Utc;
use tracing::debug;

use super::domain::{
    AuthenticatedUser, Job, JobCategory, JobDraft, JobId, PageParams,
};
use super::repository::{MarketplaceStore, NewJob};
use super::views::{BrowseJobView, BrowsePage};
use super::{require_employer, Marketplace, MarketplaceError};

/// Candidate-facing browse filters. Substring matches are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    pub category: Option<JobCategory>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub page: PageParams,
}

/// Resolves a raw query-string category. The literal `All` sentinel (and
/// absence) means no filter; anything outside the closed set is rejected.
pub fn category_filter(raw: Option<&str>) -> Result<Option<JobCategory>, MarketplaceError> {
    match raw {
        None => Ok(None),
        Some("All") => Ok(None),
        Some(value) => JobCategory::parse(value)
            .map(Some)
            .ok_or_else(|| MarketplaceError::Validation(format!("unknown category '{value}'"))),
    }
}

fn validate_draft(draft: &JobDraft) -> Result<(), MarketplaceError> {
    if draft.title.trim().is_empty() {
        return Err(MarketplaceError::Validation("title must not be empty".into()));
    }
    if draft.location.trim().is_empty() {
        return Err(MarketplaceError::Validation(
            "location must not be empty".into(),
        ));
    }
    Ok(())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl<S> Marketplace<S>
where
    S: MarketplaceStore,
{
    pub fn create_job(
        &self,
        employer: &AuthenticatedUser,
        draft: JobDraft,
    ) -> Result<Job, MarketplaceError> {
        require_employer(employer)?;
        validate_draft(&draft)?;

        let job = self.store().insert_job(NewJob {
            employer_id: employer.id,
            details: draft,
            created_at: Utc::now(),
        })?;
        debug!(job = job.id.0, employer = employer.id.0, "job posted");
        Ok(job)
    }

    /// The employer's own postings, newest first, optionally narrowed to an
    /// exact category.
    pub fn list_jobs(
        &self,
        employer: &AuthenticatedUser,
        category: Option<JobCategory>,
    ) -> Result<Vec<Job>, MarketplaceError> {
        require_employer(employer)?;

        let mut jobs = self.store().jobs_for_employer(employer.id)?;
        if let Some(category) = category {
            jobs.retain(|job| job.details.category == category);
        }
        jobs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(jobs)
    }

    /// Full replace of a job's mutable fields, scoped to the owning employer.
    pub fn update_job(
        &self,
        employer: &AuthenticatedUser,
        job_id: JobId,
        draft: JobDraft,
    ) -> Result<Job, MarketplaceError> {
        require_employer(employer)?;
        validate_draft(&draft)?;

        let mut job = self.owned_job(employer, job_id)?;
        job.details = draft;
        self.store().update_job(job.clone())?;
        Ok(job)
    }

    /// Removes the posting and cascades to its applications and interviews.
    pub fn delete_job(
        &self,
        employer: &AuthenticatedUser,
        job_id: JobId,
    ) -> Result<(), MarketplaceError> {
        require_employer(employer)?;
        self.owned_job(employer, job_id)?;
        self.store().delete_job(job_id)?;
        debug!(job = job_id.0, employer = employer.id.0, "job deleted");
        Ok(())
    }

    /// Paginated browse across every employer's postings.
    pub fn browse_jobs(&self, filter: &BrowseFilter) -> Result<BrowsePage, MarketplaceError> {
        let mut jobs = self.store().all_jobs()?;
        jobs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        if let Some(category) = filter.category {
            jobs.retain(|job| job.details.category == category);
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            jobs.retain(|job| contains_ignore_case(&job.details.title, search));
        }
        if let Some(location) = filter.location.as_deref().filter(|s| !s.is_empty()) {
            jobs.retain(|job| contains_ignore_case(&job.details.location, location));
        }

        let total = jobs.len();
        let window = jobs
            .into_iter()
            .skip(filter.page.offset())
            .take(filter.page.page_size);

        let mut rows = Vec::new();
        for job in window {
            let company = self.account_name(job.employer_id)?;
            rows.push(BrowseJobView {
                id: job.id,
                title: job.details.title,
                company,
                location: job.details.location,
                salary: if job.details.salary_range.is_empty() {
                    "Competitive".to_string()
                } else {
                    job.details.salary_range
                },
                description: job.details.description,
                job_type: "Full-time",
                requirements: job.details.requirements,
            });
        }

        Ok(BrowsePage {
            jobs: rows,
            page: filter.page.page,
            page_size: filter.page.page_size,
            total,
        })
    }

    /// Fetches a job only when the employer owns it; a miss and somebody
    /// else's job are indistinguishable to the caller.
    pub(crate) fn owned_job(
        &self,
        employer: &AuthenticatedUser,
        job_id: JobId,
    ) -> Result<Job, MarketplaceError> {
        match self.store().fetch_job(job_id)? {
            Some(job) if job.employer_id == employer.id => Ok(job),
            _ => Err(MarketplaceError::NotFound),
        }
    }
}
