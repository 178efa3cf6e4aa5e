//! Waitlist server demo
//!
//! Seeds a handful of applicants into the in-memory service and serves the
//! REST API.
//!
//! ```text
//! cargo run --example waitlist_server -- [config.yaml]
//! curl 'http://127.0.0.1:3000/applicants?q=a&sort=age:desc'
//! curl -X POST http://127.0.0.1:3000/applicants/query \
//!      -H 'content-type: application/json' \
//!      -d '{"filter":{"logic":"AND","conditions":[{"field":"age","operator":"greater-than","value":"25"}]}}'
//! ```

use waitlist::prelude::*;

fn seed() -> Vec<Applicant> {
    vec![
        Applicant::new("Abel Tesfaye", "abel@example.com")
            .with_age(24.0)
            .with_status("employed")
            .with_batch("B1"),
        Applicant::new("Sara Bekele", "sara@example.com")
            .with_age(31.0)
            .with_status("unemployed")
            .with_batch("B1")
            .with_stage("Under Review"),
        Applicant::new("Kidus Alemu", "kidus@example.com")
            .with_age("twenty")
            .with_status("student")
            .with_batch("B2")
            .with_stage("1"),
        Applicant::new("Hanna Girma", "hanna@example.com")
            .with_status("unemployed")
            .with_batch("B2")
            .with_stage("approved"),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    waitlist::init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => WaitlistConfig::from_yaml_file(&path)?,
        None => WaitlistConfig::default(),
    };

    let applicants = seed();
    tracing::info!(applicants = applicants.len(), "seeded applicants");

    // Resolve the opening view through the debounced search worker.
    let options = config.resolve_options(&ListQuery::default());
    let rows = applicants.clone();
    let preview = config.spawn_search_worker(move |state: &ListState| {
        state.resolve(&rows, &options).total
    });
    let mut updates = preview.subscribe();
    preview.submit(ListState::default());
    updates.changed().await?;
    tracing::info!(visible = ?preview.latest(), "initial view resolved");
    preview.shutdown().await;
    let service = InMemoryApplicantService::with_applicants(applicants);

    ServerBuilder::new()
        .with_applicant_service(service)
        .with_config(config)
        .serve(None)
        .await
}
