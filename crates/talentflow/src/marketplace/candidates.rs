//! Candidate discovery: profiles, the employer-facing recommendation slice,
//! and the employer swipe.

use tracing::debug;

use super::domain::{
    ApplicationStatus, AuthenticatedUser, CandidateProfile, JobCategory, NotificationKind,
    ProfileDraft, UserId,
};
use super::repository::MarketplaceStore;
use super::views::CandidateSummaryView;
use super::{require_employee, require_employer, Marketplace, MarketplaceError};

/// Discovery returns at most this many profiles per request.
pub const RECOMMENDATION_LIMIT: usize = 20;

impl<S> Marketplace<S>
where
    S: MarketplaceStore,
{
    /// Create-or-replace the caller's candidate profile. Profiles are lazy;
    /// employees without one are simply not discoverable yet.
    pub fn upsert_profile(
        &self,
        candidate: &AuthenticatedUser,
        draft: ProfileDraft,
    ) -> Result<CandidateProfile, MarketplaceError> {
        require_employee(candidate)?;
        let profile = CandidateProfile {
            user_id: candidate.id,
            details: draft,
        };
        self.store().upsert_profile(profile.clone())?;
        Ok(profile)
    }

    pub fn own_profile(
        &self,
        candidate: &AuthenticatedUser,
    ) -> Result<CandidateProfile, MarketplaceError> {
        require_employee(candidate)?;
        self.store()
            .fetch_profile(candidate.id)?
            .ok_or(MarketplaceError::NotFound)
    }

    /// Up to [`RECOMMENDATION_LIMIT`] profiles, optionally narrowed by a
    /// substring match of the category against the profile title. No scoring
    /// is applied; this is a default-ordered slice.
    pub fn recommend_candidates(
        &self,
        employer: &AuthenticatedUser,
        category: Option<JobCategory>,
    ) -> Result<Vec<CandidateSummaryView>, MarketplaceError> {
        require_employer(employer)?;

        let mut profiles = self.store().all_profiles()?;
        profiles.sort_by_key(|profile| profile.user_id);
        if let Some(category) = category {
            let needle = category.label().to_lowercase();
            profiles.retain(|profile| profile.details.title.to_lowercase().contains(&needle));
        }

        let mut rows = Vec::new();
        for profile in profiles.into_iter().take(RECOMMENDATION_LIMIT) {
            let account = self.account(profile.user_id)?;
            let (name, email) = match account {
                Some(account) => (account.display_name(), account.email),
                None => (String::new(), String::new()),
            };
            rows.push(CandidateSummaryView {
                id: profile.user_id,
                name,
                email,
                title: profile.details.title,
                location: profile.details.location,
                summary: profile.details.summary,
                skills: profile.details.skills,
                resume_url: profile.details.resume_url,
                education: profile.details.education,
                experience: profile.details.experience,
                years_experience: profile.details.years_experience,
            });
        }
        Ok(rows)
    }

    /// An interested swipe promotes the candidate's pending applications to
    /// the employer's jobs onto the shortlist and tells the candidate; a
    /// pass is acknowledged without mutation. Returns how many applications
    /// were shortlisted.
    pub fn swipe_candidate(
        &self,
        employer: &AuthenticatedUser,
        candidate_id: UserId,
        interested: bool,
    ) -> Result<usize, MarketplaceError> {
        require_employer(employer)?;
        if !interested {
            return Ok(0);
        }

        let owned: Vec<_> = self.store().jobs_for_employer(employer.id)?;
        let mut promoted = 0;
        for application in self.store().applications_for_candidate(candidate_id)? {
            let Some(job) = owned.iter().find(|job| job.id == application.job_id) else {
                continue;
            };
            if application.status != ApplicationStatus::Pending {
                continue;
            }
            let mut application = application;
            application.status = ApplicationStatus::Shortlisted;
            self.store().update_application(application)?;
            self.notify(
                candidate_id,
                NotificationKind::StatusUpdate,
                format!("You have been shortlisted for {}", job.details.title),
                String::new(),
            )?;
            promoted += 1;
        }
        debug!(
            employer = employer.id.0,
            candidate = candidate_id.0,
            promoted,
            "candidate swipe"
        );
        Ok(promoted)
    }
}
