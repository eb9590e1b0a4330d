use clap::Args;
use lifeline::alerting::{
    scoring, AlertOutcome, ChannelSet, GeoLocation, InMemoryContactDirectory, SafetyService,
    ThreatScorer, UserId,
};
use lifeline::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Text to score with the threat detector
    #[arg(long)]
    pub(crate) text: String,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// User id registered for the walkthrough
    #[arg(long, default_value = "demo-user")]
    pub(crate) user_id: String,
    /// Latitude reported with the demo alert
    #[arg(long, default_value_t = 41.5868)]
    pub(crate) latitude: f64,
    /// Longitude reported with the demo alert
    #[arg(long, default_value_t = -93.625)]
    pub(crate) longitude: f64,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let scorer = ThreatScorer::new();
    let assessment = scorer.score(&args.text);

    println!(
        "Threat score: {} (max {})",
        assessment.threat_score,
        scoring::MAX_THREAT_SCORE
    );
    println!("Threat detected: {}", assessment.is_threat);
    println!("Confidence: {:.1}", assessment.confidence);
    if assessment.detected_keywords.is_empty() {
        println!("No distress keywords matched");
    } else {
        println!(
            "Matched keywords: {}",
            assessment.detected_keywords.join(", ")
        );
    }
    println!("Recommendations:");
    for tip in scoring::recommendations(assessment.threat_score) {
        println!("  - {tip}");
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = SafetyService::new(
        Arc::new(InMemoryContactDirectory::default()),
        ChannelSet::simulated(),
    );

    let user_id = UserId(args.user_id);
    service.register_user(
        user_id.clone(),
        "+15550100".to_string(),
        "demo@lifeline.invalid".to_string(),
        vec![
            "guardian@lifeline.invalid".to_string(),
            "+15550199".to_string(),
        ],
    )?;
    println!("Registered {user_id} with two emergency contacts");

    let sample = "I am scared, please help, someone is following me";
    let assessment = service.assess_text(sample);
    println!(
        "Sample text scored {} with {} keyword matches",
        assessment.threat_score,
        assessment.detected_keywords.len()
    );

    let location = GeoLocation {
        latitude: args.latitude,
        longitude: args.longitude,
    };
    match service.dispatch_alert(&user_id, location)? {
        AlertOutcome::Sent(report) => {
            println!("Alert fanned out to {} contacts:", report.contacts_notified.len());
            for label in &report.contacts_notified {
                println!("  - {label}");
            }
            println!("Location link: {}", report.maps_link);
        }
        AlertOutcome::NotRegistered => println!("Demo user was not registered"),
    }

    Ok(())
}
