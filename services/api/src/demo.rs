use crate::infra::InMemoryApplicationStore;
use crate::routes::transition_table;
use clap::Args;
use gensanworks::error::AppError;
use gensanworks::workflows::applications::{
    plan_transition_labels, ApplicantId, ApplicationLifecycleService, ApplicationServiceError,
    EmploymentStatus, EmploymentUpdate, JobId, NewApplication, ReferralId, StatusUpdateOutcome,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Current application status
    #[arg(long)]
    pub(crate) from: String,
    /// Requested application status
    #[arg(long)]
    pub(crate) to: String,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Comma-separated statuses to request in order after the application opens
    #[arg(long, value_delimiter = ',', default_value = "reviewed,interview,hired")]
    pub(crate) path: Vec<String>,
    /// Employment status on the applicant profile before the first update
    #[arg(long, default_value = "Unemployed")]
    pub(crate) employment_status: String,
    /// Open the application from this PESO referral
    #[arg(long, default_value = "R-DEMO-0001")]
    pub(crate) referral_id: String,
    /// Emit one JSON document per step instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_transition_table() -> Result<(), AppError> {
    println!("{:<12} {:<9} {:<14} allowed", "status", "terminal", "referral");
    for entry in transition_table() {
        let allowed = if entry.allowed.is_empty() {
            "-".to_string()
        } else {
            entry
                .allowed
                .iter()
                .map(|status| status.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:<12} {:<9} {:<14} {}",
            entry.status.label(),
            if entry.terminal { "yes" } else { "no" },
            entry.referral_status.label(),
            allowed
        );
    }
    Ok(())
}

pub(crate) fn run_transition_check(args: CheckArgs) -> Result<(), AppError> {
    let plan = plan_transition_labels(&args.from, &args.to)
        .map_err(|err| AppError::from(ApplicationServiceError::from(err)))?;

    println!("{} -> {}: allowed", plan.from(), plan.to());
    println!("  referral status: {}", plan.referral_status());
    println!("  employment:      {}", describe_employment(plan.employment()));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        path,
        employment_status,
        referral_id,
        json,
    } = args;

    let store = Arc::new(InMemoryApplicationStore::default());
    let applicant_id = ApplicantId("demo-applicant".to_string());
    store
        .register_applicant(
            applicant_id.clone(),
            Some(EmploymentStatus::from(employment_status)),
        )
        .map_err(|err| AppError::from(ApplicationServiceError::from(err)))?;

    let service = ApplicationLifecycleService::new(store);
    let record = service.create(NewApplication {
        applicant_id,
        job_id: JobId("demo-job".to_string()),
        referral_id: Some(ReferralId(referral_id)),
    })?;

    if !json {
        println!("GensanWorks application lifecycle demo");
        println!("opened {} as {}", record.id.0, record.status);
    }

    for requested in path.iter().map(|step| step.trim()).filter(|step| !step.is_empty()) {
        let outcome = service.update_status(&record.id, requested, None)?;
        if json {
            let line = serde_json::to_string(&outcome)
                .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
            println!("{line}");
        } else {
            render_outcome(&outcome);
        }
    }

    Ok(())
}

fn render_outcome(outcome: &StatusUpdateOutcome) {
    println!("{} -> {}", outcome.previous_status, outcome.application.status);
    println!("  referral status: {}", outcome.referral_status);
    println!(
        "  employment:      {} (now {})",
        describe_employment(&outcome.employment_update),
        outcome
            .applicant_employment_status
            .as_ref()
            .map(|status| status.as_str())
            .unwrap_or("unset")
    );
}

fn describe_employment(update: &EmploymentUpdate) -> String {
    match update {
        EmploymentUpdate::Set(status) => format!("set to {status}"),
        EmploymentUpdate::NoChange => "no change".to_string(),
    }
}
