//! Identity lookups and the role-specific dashboard.

use super::domain::{AuthenticatedUser, Role, UserAccount, UserId};
use super::repository::MarketplaceStore;
use super::views::{DashboardStats, DashboardView};
use super::{Marketplace, MarketplaceError};

impl<S> Marketplace<S>
where
    S: MarketplaceStore,
{
    /// Resolves an id the plumbing has already verified into an identity the
    /// services accept. Unknown ids read as unauthenticated, not as a probe
    /// result.
    pub fn verified_identity(&self, id: UserId) -> Result<AuthenticatedUser, MarketplaceError> {
        let account = self
            .account(id)?
            .ok_or(MarketplaceError::Unauthenticated)?;
        Ok(AuthenticatedUser {
            id: account.id,
            role: account.role,
        })
    }

    pub fn me(&self, user: &AuthenticatedUser) -> Result<UserAccount, MarketplaceError> {
        self.account(user.id)?.ok_or(MarketplaceError::NotFound)
    }

    /// Landing stats per role. Employees are nudged until a candidate
    /// profile exists; employers are always considered complete.
    pub fn dashboard(&self, user: &AuthenticatedUser) -> Result<DashboardView, MarketplaceError> {
        match user.role {
            Role::Employer => {
                let jobs = self.store().jobs_for_employer(user.id)?;
                let mut applicants = 0;
                for job in &jobs {
                    applicants += self.store().applications_for_job(job.id)?.len();
                }
                Ok(DashboardView {
                    message: "Employer dashboard",
                    stats: DashboardStats::Employer {
                        jobs_posted: jobs.len(),
                        applicants,
                    },
                    profile_complete: true,
                })
            }
            Role::Employee => {
                let open_jobs = self
                    .store()
                    .all_jobs()?
                    .iter()
                    .filter(|job| job.details.is_open)
                    .count();
                let applications = self.store().applications_for_candidate(user.id)?.len();
                Ok(DashboardView {
                    message: "Employee dashboard",
                    stats: DashboardStats::Employee {
                        jobs_suggested: open_jobs.min(3),
                        applications,
                    },
                    profile_complete: self.store().fetch_profile(user.id)?.is_some(),
                })
            }
        }
    }
}
