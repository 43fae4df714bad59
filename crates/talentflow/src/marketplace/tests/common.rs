use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::marketplace::domain::{
    Application, ApplicationId, AuthenticatedUser, CandidateProfile, Interview, InterviewId, Job,
    JobCategory, JobDraft, JobId, NewUser, Notification, NotificationId, ProfileDraft, Role,
    UserAccount, UserId, WorkType,
};
use crate::marketplace::repository::{
    ApplicationStore, InterviewStore, JobStore, NewApplication, NewInterview, NewJob,
    NewNotification, NotificationStore, ProfileStore, RepositoryError, UserStore,
};
use crate::marketplace::Marketplace;

#[derive(Default)]
struct Inner {
    users: BTreeMap<u64, UserAccount>,
    profiles: BTreeMap<u64, CandidateProfile>,
    jobs: BTreeMap<u64, Job>,
    applications: BTreeMap<u64, Application>,
    interviews: BTreeMap<u64, Interview>,
    notifications: BTreeMap<u64, Notification>,
    next_user: u64,
    next_job: u64,
    next_application: u64,
    next_interview: u64,
    next_notification: u64,
}

/// In-memory store backing the unit suites; one mutex keeps the apply
/// get-or-create atomic.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl UserStore for MemoryStore {
    fn insert_user(&self, user: NewUser) -> Result<UserAccount, RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict);
        }
        inner.next_user += 1;
        let account = UserAccount {
            id: UserId(inner.next_user),
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        };
        inner.users.insert(account.id.0, account.clone());
        Ok(account)
    }

    fn fetch_user(&self, id: UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.users.get(&id.0).cloned())
    }
}

impl JobStore for MemoryStore {
    fn insert_job(&self, job: NewJob) -> Result<Job, RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        inner.next_job += 1;
        let job = Job {
            id: JobId(inner.next_job),
            employer_id: job.employer_id,
            details: job.details,
            created_at: job.created_at,
        };
        inner.jobs.insert(job.id.0, job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if !inner.jobs.contains_key(&job.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner.jobs.insert(job.id.0, job);
        Ok(())
    }

    fn delete_job(&self, id: JobId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if inner.jobs.remove(&id.0).is_none() {
            return Err(RepositoryError::NotFound);
        }
        let doomed: Vec<u64> = inner
            .applications
            .values()
            .filter(|a| a.job_id == id)
            .map(|a| a.id.0)
            .collect();
        for application_id in doomed {
            inner.applications.remove(&application_id);
            inner
                .interviews
                .retain(|_, i| i.application_id.0 != application_id);
        }
        Ok(())
    }

    fn fetch_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.jobs.get(&id.0).cloned())
    }

    fn jobs_for_employer(&self, employer: UserId) -> Result<Vec<Job>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner
            .jobs
            .values()
            .filter(|j| j.employer_id == employer)
            .cloned()
            .collect())
    }

    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.jobs.values().cloned().collect())
    }
}

impl ProfileStore for MemoryStore {
    fn upsert_profile(&self, profile: CandidateProfile) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        inner.profiles.insert(profile.user_id.0, profile);
        Ok(())
    }

    fn fetch_profile(&self, user: UserId) -> Result<Option<CandidateProfile>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.profiles.get(&user.0).cloned())
    }

    fn all_profiles(&self) -> Result<Vec<CandidateProfile>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.profiles.values().cloned().collect())
    }
}

impl ApplicationStore for MemoryStore {
    fn insert_application(
        &self,
        new: NewApplication,
    ) -> Result<(Application, bool), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if let Some(existing) = inner
            .applications
            .values()
            .find(|a| a.job_id == new.job_id && a.candidate_id == new.candidate_id)
        {
            return Ok((existing.clone(), false));
        }
        inner.next_application += 1;
        let application = Application {
            id: ApplicationId(inner.next_application),
            job_id: new.job_id,
            candidate_id: new.candidate_id,
            status: new.status,
            feedback_notes: new.feedback_notes,
            created_at: new.created_at,
        };
        inner
            .applications
            .insert(application.id.0, application.clone());
        Ok((application, true))
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if !inner.applications.contains_key(&application.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner.applications.insert(application.id.0, application);
        Ok(())
    }

    fn delete_application(&self, id: ApplicationId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if inner.applications.remove(&id.0).is_none() {
            return Err(RepositoryError::NotFound);
        }
        inner.interviews.retain(|_, i| i.application_id != id);
        Ok(())
    }

    fn fetch_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.applications.get(&id.0).cloned())
    }

    fn applications_for_candidate(
        &self,
        candidate: UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner
            .applications
            .values()
            .filter(|a| a.candidate_id == candidate)
            .cloned()
            .collect())
    }

    fn applications_for_job(&self, job: JobId) -> Result<Vec<Application>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner
            .applications
            .values()
            .filter(|a| a.job_id == job)
            .cloned()
            .collect())
    }
}

impl InterviewStore for MemoryStore {
    fn insert_interview(&self, new: NewInterview) -> Result<Interview, RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        inner.next_interview += 1;
        let interview = Interview {
            id: InterviewId(inner.next_interview),
            application_id: new.application_id,
            scheduled_at: new.scheduled_at,
            status: new.status,
        };
        inner.interviews.insert(interview.id.0, interview.clone());
        Ok(interview)
    }

    fn interviews_for_application(
        &self,
        application: ApplicationId,
    ) -> Result<Vec<Interview>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner
            .interviews
            .values()
            .filter(|i| i.application_id == application)
            .cloned()
            .collect())
    }

    fn all_interviews(&self) -> Result<Vec<Interview>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.interviews.values().cloned().collect())
    }
}

impl NotificationStore for MemoryStore {
    fn insert_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        inner.next_notification += 1;
        let notification = Notification {
            id: NotificationId(inner.next_notification),
            user_id: new.user_id,
            message: new.message,
            kind: new.kind,
            action_url: new.action_url,
            read: false,
            created_at: new.created_at,
        };
        inner
            .notifications
            .insert(notification.id.0, notification.clone());
        Ok(notification)
    }

    fn update_notification(&self, notification: Notification) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if !inner.notifications.contains_key(&notification.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner.notifications.insert(notification.id.0, notification);
        Ok(())
    }

    fn delete_notification(&self, id: NotificationId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("lock");
        if inner.notifications.remove(&id.0).is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn fetch_notification(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.notifications.get(&id.0).cloned())
    }

    fn notifications_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner
            .notifications
            .values()
            .filter(|n| n.user_id == user)
            .cloned()
            .collect())
    }
}

pub(super) fn marketplace() -> Marketplace<MemoryStore> {
    Marketplace::new(Arc::new(MemoryStore::default()))
}

pub(super) fn employer(
    marketplace: &Marketplace<MemoryStore>,
    username: &str,
) -> AuthenticatedUser {
    let account = marketplace
        .store()
        .insert_user(NewUser {
            username: username.to_string(),
            full_name: String::new(),
            email: format!("{username}@example.com"),
            role: Role::Employer,
        })
        .expect("employer registered");
    AuthenticatedUser {
        id: account.id,
        role: account.role,
    }
}

pub(super) fn candidate(
    marketplace: &Marketplace<MemoryStore>,
    username: &str,
    full_name: &str,
) -> AuthenticatedUser {
    let account = marketplace
        .store()
        .insert_user(NewUser {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: format!("{username}@example.com"),
            role: Role::Employee,
        })
        .expect("candidate registered");
    AuthenticatedUser {
        id: account.id,
        role: account.role,
    }
}

pub(super) fn job_draft(title: &str, category: JobCategory) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        location: "Harare".to_string(),
        description: "Build things".to_string(),
        category,
        requirements: vec!["Teamwork".to_string()],
        salary_range: String::new(),
        required_certifications: String::new(),
        education_level: String::new(),
        salary_amount: None,
        salary_currency: "USD".to_string(),
        duties_responsibilities: String::new(),
        expected_hours: String::new(),
        work_type: WorkType::Office,
        work_days: String::new(),
        is_open: true,
        closing_date: None,
    }
}

pub(super) fn profile_draft(title: &str, location: &str, skills: &[&str]) -> ProfileDraft {
    ProfileDraft {
        title: title.to_string(),
        location: location.to_string(),
        summary: format!("{title} based in {location}"),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        resume_url: String::new(),
        education: Vec::new(),
        experience: Vec::new(),
        years_experience: 3,
    }
}
