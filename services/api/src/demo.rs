use crate::infra::{start_of_day, InMemoryDirectory, InMemoryRequestRepository};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use interview_tracker::config::WorkflowConfig;
use interview_tracker::error::AppError;
use interview_tracker::requests::{
    DocumentDraft, InterviewRequestService, Request, StepTemplateDraft,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Candidate name used for the demo request
    #[arg(long, default_value = "Alex Candidate")]
    pub(crate) candidate: String,
    /// Date the candidate is available from (YYYY-MM-DD). Defaults to two weeks from today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) available_on: Option<NaiveDate>,
    /// Reject the panel step instead of approving it.
    #[arg(long)]
    pub(crate) reject: bool,
    /// Restart the workflow once every step has been decided.
    #[arg(long)]
    pub(crate) restart: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        candidate,
        available_on,
        reject,
        restart,
    } = args;

    let available_on =
        available_on.unwrap_or_else(|| Local::now().date_naive() + Duration::days(14));

    let service = InterviewRequestService::new(
        Arc::new(InMemoryRequestRepository::default()),
        Arc::new(InMemoryDirectory::default()),
        WorkflowConfig::default(),
    );

    println!("Interview approval demo");
    let applicants = service.register_role("Applicant")?;
    let panel = service.register_role("Interview Panel")?;
    let requester = service.register_user(&candidate, "candidate@example.com", applicants.id())?;
    let lead = service.register_user("Robin Lead", "robin.lead@example.com", panel.id())?;

    let template = service.create_template(
        "Engineering interview loop",
        vec![
            StepTemplateDraft {
                name: "Recruiter screen".to_string(),
                user_id: Some(requester.id()),
                role_id: applicants.id(),
            },
            StepTemplateDraft {
                name: "Panel interview".to_string(),
                user_id: None,
                role_id: panel.id(),
            },
        ],
    )?;
    println!(
        "- Template '{}' with {} steps",
        template.name(),
        template.steps().len()
    );

    let request = service.create_request(
        &template.id(),
        &requester.id(),
        DocumentDraft {
            name: candidate.clone(),
            email: "candidate@example.com".to_string(),
            age: start_of_day(available_on),
            experience: 5,
        },
    )?;
    println!(
        "- Request {} created for {} (available {})",
        request.id(),
        request.user().name(),
        available_on
    );

    service.approve(&request.id(), &lead.id())?;
    let request = if reject {
        service.reject(&request.id(), &lead.id())?
    } else {
        service.approve(&request.id(), &lead.id())?
    };
    render_request(&request);

    if restart {
        let request = service.restart(&request.id())?;
        println!("\nAfter restart");
        render_request(&request);
    }

    Ok(())
}

fn render_request(request: &Request) {
    let outcome = if request.workflow().is_approve() {
        "approved"
    } else if request.workflow().is_reject() {
        "rejected"
    } else if request.workflow().first_pending().is_none() {
        "decided with mixed outcomes"
    } else {
        "in progress"
    };
    println!("  Workflow '{}' is {}", request.workflow().name(), outcome);

    println!("  Steps:");
    for step in request.workflow().steps() {
        println!(
            "    {}. {} [{}] {}",
            step.order(),
            step.name(),
            step.status().label(),
            step.comment()
        );
    }

    println!("  Events:");
    for event in request.events() {
        println!("    - {}", event.data());
    }
}
