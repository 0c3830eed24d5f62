use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinica_api::{base_url_from_env_value, ApiClient};
use clinica_core::{Alerts, Summary, ViewState};

/// Data the reporting dashboard renders once both fetches land.
struct DashboardData {
    summary: Summary,
    alerts: Alerts,
}

/// Main entry point for the reporting dashboard
///
/// Fetches the summary counts and alert lists concurrently from the remote
/// API (fan-out/fan-in: both requests are issued, then both awaited), then
/// renders the result. A failed fetch surfaces as a single error banner; no
/// retries.
///
/// # Environment Variables
/// - `CLINICA_API_URL`: Remote API base URL (default: "http://localhost:3333/api")
///
/// # Returns
/// * `Ok(())` - If the dashboard rendered (possibly with an error banner)
/// * `Err(anyhow::Error)` - If startup configuration is invalid
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinica_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = base_url_from_env_value(std::env::var("CLINICA_API_URL").ok());
    tracing::info!("-- Clinica dashboard, API at {}", base_url);

    let client = ApiClient::new(&base_url)?;

    let mut view = ViewState::<DashboardData>::default();
    let result = tokio::try_join!(client.report_summary(), client.report_alerts());
    view.resolve(result.map(|(summary, alerts)| DashboardData { summary, alerts }));

    render(&view);
    Ok(())
}

fn render(view: &ViewState<DashboardData>) {
    if let Some(message) = view.error() {
        eprintln!("Error loading reports: {message}");
        return;
    }
    let Some(data) = view.ready() else {
        println!("Loading...");
        return;
    };

    println!("=== Summary ===");
    println!("Total patients:  {}", data.summary.total_patients);
    println!("Pregnant:        {}", data.summary.pregnant_patients);
    println!("Hypertensive:    {}", data.summary.hypertensive_patients);
    println!("Diabetic:        {}", data.summary.diabetic_patients);
    println!("Pending exams:   {}", data.summary.pending_exams);
    println!();

    println!("=== Alerts ===");
    if data.alerts.is_empty() {
        println!("No alerts.");
        return;
    }

    for alert in &data.alerts.high_risk_pregnancies {
        println!("[high-risk pregnancy] {}", alert.patient_name);
    }
    for alert in &data.alerts.elevated_blood_pressure {
        println!(
            "[blood pressure] {}: {}/{} mmHg on {}",
            alert.patient_name,
            alert.systolic,
            alert.diastolic,
            alert.measured_at.format("%Y-%m-%d")
        );
    }
    for alert in &data.alerts.elevated_glucose {
        println!(
            "[glucose] {}: {} mg/dL ({}) on {}",
            alert.patient_name,
            alert.glucose_level,
            alert.measurement_type,
            alert.measured_at.format("%Y-%m-%d")
        );
    }
}
