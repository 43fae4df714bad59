use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use talentflow::marketplace::domain::{
    Application, ApplicationId, CandidateProfile, Interview, InterviewId, Job, JobId, NewUser,
    Notification, NotificationId, UserAccount, UserId,
};
use talentflow::marketplace::repository::{
    ApplicationStore, InterviewStore, JobStore, NewApplication, NewInterview, NewJob,
    NewNotification, NotificationStore, ProfileStore, RepositoryError, UserStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Tables {
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

/// Process-local store for the service binary. A single mutex over every
/// table keeps the apply get-or-create and the cascading deletes atomic.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl UserStore for InMemoryStore {
    fn insert_user(&self, user: NewUser) -> Result<UserAccount, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict);
        }
        tables.next_user += 1;
        let account = UserAccount {
            id: UserId(tables.next_user),
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        };
        tables.users.insert(account.id.0, account.clone());
        Ok(account)
    }

    fn fetch_user(&self, id: UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.users.get(&id.0).cloned())
    }
}

impl JobStore for InMemoryStore {
    fn insert_job(&self, job: NewJob) -> Result<Job, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.next_job += 1;
        let job = Job {
            id: JobId(tables.next_job),
            employer_id: job.employer_id,
            details: job.details,
            created_at: job.created_at,
        };
        tables.jobs.insert(job.id.0, job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if !tables.jobs.contains_key(&job.id.0) {
            return Err(RepositoryError::NotFound);
        }
        tables.jobs.insert(job.id.0, job);
        Ok(())
    }

    fn delete_job(&self, id: JobId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.jobs.remove(&id.0).is_none() {
            return Err(RepositoryError::NotFound);
        }
        let doomed: Vec<u64> = tables
            .applications
            .values()
            .filter(|a| a.job_id == id)
            .map(|a| a.id.0)
            .collect();
        for application_id in doomed {
            tables.applications.remove(&application_id);
            tables
                .interviews
                .retain(|_, i| i.application_id.0 != application_id);
        }
        Ok(())
    }

    fn fetch_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.jobs.get(&id.0).cloned())
    }

    fn jobs_for_employer(&self, employer: UserId) -> Result<Vec<Job>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .jobs
            .values()
            .filter(|j| j.employer_id == employer)
            .cloned()
            .collect())
    }

    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.jobs.values().cloned().collect())
    }
}

impl ProfileStore for InMemoryStore {
    fn upsert_profile(&self, profile: CandidateProfile) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.profiles.insert(profile.user_id.0, profile);
        Ok(())
    }

    fn fetch_profile(&self, user: UserId) -> Result<Option<CandidateProfile>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.profiles.get(&user.0).cloned())
    }

    fn all_profiles(&self) -> Result<Vec<CandidateProfile>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.profiles.values().cloned().collect())
    }
}

impl ApplicationStore for InMemoryStore {
    fn insert_application(
        &self,
        new: NewApplication,
    ) -> Result<(Application, bool), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if let Some(existing) = tables
            .applications
            .values()
            .find(|a| a.job_id == new.job_id && a.candidate_id == new.candidate_id)
        {
            return Ok((existing.clone(), false));
        }
        tables.next_application += 1;
        let application = Application {
            id: ApplicationId(tables.next_application),
            job_id: new.job_id,
            candidate_id: new.candidate_id,
            status: new.status,
            feedback_notes: new.feedback_notes,
            created_at: new.created_at,
        };
        tables
            .applications
            .insert(application.id.0, application.clone());
        Ok((application, true))
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if !tables.applications.contains_key(&application.id.0) {
            return Err(RepositoryError::NotFound);
        }
        tables.applications.insert(application.id.0, application);
        Ok(())
    }

    fn delete_application(&self, id: ApplicationId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.applications.remove(&id.0).is_none() {
            return Err(RepositoryError::NotFound);
        }
        tables.interviews.retain(|_, i| i.application_id != id);
        Ok(())
    }

    fn fetch_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.applications.get(&id.0).cloned())
    }

    fn applications_for_candidate(
        &self,
        candidate: UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .applications
            .values()
            .filter(|a| a.candidate_id == candidate)
            .cloned()
            .collect())
    }

    fn applications_for_job(&self, job: JobId) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .applications
            .values()
            .filter(|a| a.job_id == job)
            .cloned()
            .collect())
    }
}

impl InterviewStore for InMemoryStore {
    fn insert_interview(&self, new: NewInterview) -> Result<Interview, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.next_interview += 1;
        let interview = Interview {
            id: InterviewId(tables.next_interview),
            application_id: new.application_id,
            scheduled_at: new.scheduled_at,
            status: new.status,
        };
        tables.interviews.insert(interview.id.0, interview.clone());
        Ok(interview)
    }

    fn interviews_for_application(
        &self,
        application: ApplicationId,
    ) -> Result<Vec<Interview>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .interviews
            .values()
            .filter(|i| i.application_id == application)
            .cloned()
            .collect())
    }

    fn all_interviews(&self) -> Result<Vec<Interview>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.interviews.values().cloned().collect())
    }
}

impl NotificationStore for InMemoryStore {
    fn insert_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.next_notification += 1;
        let notification = Notification {
            id: NotificationId(tables.next_notification),
            user_id: new.user_id,
            message: new.message,
            kind: new.kind,
            action_url: new.action_url,
            read: false,
            created_at: new.created_at,
        };
        tables
            .notifications
            .insert(notification.id.0, notification.clone());
        Ok(notification)
    }

    fn update_notification(&self, notification: Notification) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if !tables.notifications.contains_key(&notification.id.0) {
            return Err(RepositoryError::NotFound);
        }
        tables.notifications.insert(notification.id.0, notification);
        Ok(())
    }

    fn delete_notification(&self, id: NotificationId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.notifications.remove(&id.0).is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn fetch_notification(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.notifications.get(&id.0).cloned())
    }

    fn notifications_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .notifications
            .values()
            .filter(|n| n.user_id == user)
            .cloned()
            .collect())
    }
}
