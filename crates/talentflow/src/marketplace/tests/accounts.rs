use super::common::*;
use crate::marketplace::domain::{JobCategory, UserId};
use crate::marketplace::views::DashboardStats;
use crate::marketplace::MarketplaceError;

#[test]
fn verified_identity_rejects_unknown_ids() {
    let marketplace = marketplace();

    match marketplace.verified_identity(UserId(42)) {
        Err(MarketplaceError::Unauthenticated) => {}
        other => panic!("expected unauthenticated, got {other:?}"),
    }
}

#[test]
fn verified_identity_carries_the_stored_role() {
    let marketplace = marketplace();
    let boss = employer(&marketplace, "employer1");

    let identity = marketplace.verified_identity(boss.id).expect("identity");
    assert_eq!(identity.id, boss.id);
    assert_eq!(identity.role, boss.role);
}

#[test]
fn employer_dashboard_counts_jobs_and_applicants() {
    let marketplace = marketplace();
    let boss = employer(&marketplace, "employer1");
    let worker = candidate(&marketplace, "candidate1", "Tariro Moyo");
    let job = marketplace
        .create_job(&boss, job_draft("Flutter Developer", JobCategory::ICT))
        .expect("job posted");
    marketplace
        .create_job(&boss, job_draft("Backend Engineer", JobCategory::ICT))
        .expect("job posted");
    marketplace.apply_to_job(&worker, job.id).expect("applied");

    let dashboard = marketplace.dashboard(&boss).expect("dashboard");
    assert!(dashboard.profile_complete);
    assert_eq!(
        dashboard.stats,
        DashboardStats::Employer {
            jobs_posted: 2,
            applicants: 1
        }
    );
}

#[test]
fn employee_dashboard_nudges_until_profile_exists() {
    let marketplace = marketplace();
    let boss = employer(&marketplace, "employer1");
    let worker = candidate(&marketplace, "candidate1", "Tariro Moyo");
    let job = marketplace
        .create_job(&boss, job_draft("Flutter Developer", JobCategory::ICT))
        .expect("job posted");
    marketplace.apply_to_job(&worker, job.id).expect("applied");

    let before = marketplace.dashboard(&worker).expect("dashboard");
    assert!(!before.profile_complete);
    assert_eq!(
        before.stats,
        DashboardStats::Employee {
            jobs_suggested: 1,
            applications: 1
        }
    );

    marketplace
        .upsert_profile(&worker, profile_draft("Flutter Developer", "Harare", &["Dart"]))
        .expect("profile saved");
    let after = marketplace.dashboard(&worker).expect("dashboard");
    assert!(after.profile_complete);
}

#[test]
fn me_returns_the_stored_account() {
    let marketplace = marketplace();
    let worker = candidate(&marketplace, "candidate1", "Tariro Moyo");

    let account = marketplace.me(&worker).expect("account");
    assert_eq!(account.username, "candidate1");
    assert_eq!(account.display_name(), "Tariro Moyo");
}
