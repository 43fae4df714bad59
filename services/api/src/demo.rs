use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use clap::Args;
use talentflow::error::AppError;
use talentflow::marketplace::catalog::BrowseFilter;
use talentflow::marketplace::domain::{
    AuthenticatedUser, JobCategory, JobDraft, NewUser, ProfileDraft, Role, WorkType,
};
use talentflow::marketplace::repository::UserStore;
use talentflow::marketplace::{Marketplace, MarketplaceError};

use crate::infra::InMemoryStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Interview date for the walkthrough (YYYY-MM-DD). Defaults to a week out.
    #[arg(long, value_parser = parse_date)]
    pub(crate) interview_date: Option<NaiveDate>,
    /// Print the raw browse payload the mobile client would receive.
    #[arg(long)]
    pub(crate) show_payloads: bool,
}

pub(crate) struct SeededAccounts {
    pub(crate) employer: AuthenticatedUser,
    pub(crate) candidate1: AuthenticatedUser,
    pub(crate) candidate2: AuthenticatedUser,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Registers the sample employer and the two sample candidates, profiles
/// included. Used by the demo walkthrough and by `serve --seed`.
pub(crate) fn seed_marketplace(
    marketplace: &Marketplace<InMemoryStore>,
) -> Result<SeededAccounts, AppError> {
    let employer = register(
        marketplace,
        "employer1",
        "",
        "employer1@example.com",
        Role::Employer,
    )?;
    let candidate1 = register(
        marketplace,
        "candidate1",
        "Tariro Moyo",
        "candidate1@example.com",
        Role::Employee,
    )?;
    let candidate2 = register(
        marketplace,
        "candidate2",
        "Kuda Ncube",
        "candidate2@example.com",
        Role::Employee,
    )?;

    marketplace.upsert_profile(
        &candidate1,
        ProfileDraft {
            title: "Flutter Developer".to_string(),
            location: "Harare".to_string(),
            summary: "Mobile developer shipping Flutter apps".to_string(),
            skills: vec![
                "Dart".to_string(),
                "Flutter".to_string(),
                "REST APIs".to_string(),
            ],
            resume_url: String::new(),
            education: Vec::new(),
            experience: Vec::new(),
            years_experience: 3,
        },
    )?;
    marketplace.upsert_profile(
        &candidate2,
        ProfileDraft {
            title: "Backend Engineer".to_string(),
            location: "Bulawayo".to_string(),
            summary: "Backend engineer building web services".to_string(),
            skills: vec![
                "Python".to_string(),
                "Django".to_string(),
                "PostgreSQL".to_string(),
            ],
            resume_url: String::new(),
            education: Vec::new(),
            experience: Vec::new(),
            years_experience: 5,
        },
    )?;

    Ok(SeededAccounts {
        employer,
        candidate1,
        candidate2,
    })
}

fn register(
    marketplace: &Marketplace<InMemoryStore>,
    username: &str,
    full_name: &str,
    email: &str,
    role: Role,
) -> Result<AuthenticatedUser, AppError> {
    let account = marketplace
        .store()
        .insert_user(NewUser {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            role,
        })
        .map_err(MarketplaceError::from)?;
    Ok(AuthenticatedUser {
        id: account.id,
        role: account.role,
    })
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        interview_date,
        show_payloads,
    } = args;

    let interview_date =
        interview_date.unwrap_or_else(|| Local::now().date_naive() + Duration::days(7));
    let interview_slot = interview_slot(interview_date);

    let marketplace = Marketplace::new(Arc::new(InMemoryStore::default()));
    let accounts = seed_marketplace(&marketplace)?;

    println!("TalentFlow hiring demo");
    println!("Seeded accounts: employer1, candidate1 (Tariro Moyo), candidate2 (Kuda Ncube)");

    let job = marketplace.create_job(
        &accounts.employer,
        JobDraft {
            title: "Flutter Developer".to_string(),
            location: "Harare".to_string(),
            description: "Ship the consumer mobile app".to_string(),
            category: JobCategory::ICT,
            requirements: vec!["Dart".to_string(), "Flutter".to_string()],
            salary_range: "$1500-$2000".to_string(),
            required_certifications: String::new(),
            education_level: String::new(),
            salary_amount: None,
            salary_currency: "USD".to_string(),
            duties_responsibilities: String::new(),
            expected_hours: String::new(),
            work_type: WorkType::Hybrid,
            work_days: String::new(),
            is_open: true,
            closing_date: None,
        },
    )?;
    println!(
        "- employer1 posted '{}' ({} / {})",
        job.details.title,
        job.details.category.label(),
        job.details.location
    );

    let page = marketplace.browse_jobs(&BrowseFilter {
        search: Some("flutter".to_string()),
        ..BrowseFilter::default()
    })?;
    println!(
        "- candidate1 browsed for 'flutter': {} of {} jobs on page {}",
        page.jobs.len(),
        page.total,
        page.page
    );
    if show_payloads {
        match serde_json::to_string_pretty(&page) {
            Ok(json) => println!("  Browse payload:\n{json}"),
            Err(err) => println!("  Browse payload unavailable: {err}"),
        }
    }

    let application = marketplace.apply_to_job(&accounts.candidate1, job.id)?;
    println!(
        "- candidate1 swiped right -> application {} is {}",
        application.id.0,
        application.status.label()
    );

    for notification in marketplace.notifications(&accounts.employer)? {
        println!("  employer feed: {}", notification.message);
    }

    let applicants = marketplace.job_applicants(&accounts.employer, job.id)?;
    for applicant in &applicants {
        println!(
            "- applicant review: {} <{}> with {:?}",
            applicant.name, applicant.email, applicant.experience
        );
    }

    let shortlisted = marketplace.swipe_candidate(&accounts.employer, accounts.candidate1.id, true)?;
    println!("- employer1 swiped right on Tariro Moyo -> {shortlisted} application shortlisted");

    let interview = marketplace.schedule_interview(&accounts.employer, application.id, interview_slot)?;
    println!(
        "- interview {} scheduled for {}",
        interview.id.0,
        interview.scheduled_at.format("%Y-%m-%d %H:%M UTC")
    );

    for row in marketplace.candidate_applications(&accounts.candidate1)? {
        println!(
            "- candidate1 tracker: '{}' at {} is {} (interview {})",
            row.job_title,
            row.company,
            row.status,
            row.interview_date
                .map(|date| date.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "unscheduled".to_string())
        );
    }

    for notification in marketplace.notifications(&accounts.candidate1)? {
        println!("  candidate feed: {}", notification.message);
    }

    let second = marketplace.apply_to_job(&accounts.candidate2, job.id)?;
    let outcome = marketplace.advance_or_reject(&accounts.employer, job.id, second.id, false)?;
    println!("- Kuda Ncube applied too; employer1 swiped left -> {}", outcome.label());
    marketplace.reapply(&accounts.candidate2, job.id)?;
    println!("- Kuda Ncube reapplied -> back to pending");

    let recommended = marketplace.recommend_candidates(&accounts.employer, None)?;
    println!(
        "- recommended candidates for employer1: {}",
        recommended
            .iter()
            .map(|candidate| candidate.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}

fn interview_slot(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_hms_opt(9, 0, 0).unwrap_or_else(|| {
        date.and_time(chrono::NaiveTime::MIN)
    });
    Utc.from_utc_datetime(&naive)
}
