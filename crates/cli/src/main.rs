use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use clinica_api::{
    base_url_from_env_value, ApiClient, AppointmentFilter, BloodPressureDraft, GlucoseDraft,
};
use clinica_core::{
    filter_by_date_range, filter_by_name_substring, join_patient_names, Alerts, AppointmentStatus,
    ConditionType, MeasurementType, Summary,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "clinica")]
#[command(about = "Primary-care patient management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List patients
    ListPatients {
        /// Free-text search forwarded to the API
        #[arg(long)]
        search: Option<String>,
    },
    /// List prenatal records with gestational age
    ListPregnancies {
        /// Client-side filter on the patient name (case-insensitive substring)
        #[arg(long)]
        name: Option<String>,
    },
    /// List appointments
    ListAppointments {
        /// Patient id
        #[arg(long)]
        patient: Option<Uuid>,
        /// Status (scheduled, completed, cancelled)
        #[arg(long)]
        status: Option<String>,
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End date (YYYY-MM-DD, inclusive through end of day)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show a chronic enrolment's measurement history
    Measurements {
        /// Chronic monitoring id
        monitoring_id: Uuid,
    },
    /// Record a blood-pressure measurement
    RecordPressure {
        /// Chronic monitoring id
        monitoring_id: Uuid,
        /// Systolic pressure (mmHg)
        systolic: u16,
        /// Diastolic pressure (mmHg)
        diastolic: u16,
        /// Free-text note
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a glucose measurement
    RecordGlucose {
        /// Chronic monitoring id
        monitoring_id: Uuid,
        /// Glucose level (mg/dL)
        level: f64,
        /// Measurement context (fasting, post_meal, casual)
        measurement_type: String,
        /// Free-text note
        #[arg(long)]
        notes: Option<String>,
    },
    /// Link exams to a prenatal record, reporting per-item results
    LinkExams {
        /// Pregnancy record id
        pregnancy_id: Uuid,
        /// Exam ids to link
        exam_ids: Vec<Uuid>,
    },
    /// Print the reporting summary and alert lists
    Report {
        /// Rebuild the aggregates client-side from raw collections
        #[arg(long)]
        local: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_url = base_url_from_env_value(std::env::var("CLINICA_API_URL").ok());
    let client = ApiClient::new(&base_url)?;

    match cli.command {
        Some(Commands::ListPatients { search }) => {
            let patients = client.list_patients(search.as_deref()).await?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    let mut groups = Vec::new();
                    if patient.is_pregnant {
                        groups.push("pregnant");
                    }
                    if patient.is_hypertensive {
                        groups.push("hypertensive");
                    }
                    if patient.is_diabetic {
                        groups.push("diabetic");
                    }
                    println!(
                        "ID: {}, Name: {}, Groups: {}",
                        patient.id,
                        patient.full_name,
                        if groups.is_empty() {
                            "-".to_string()
                        } else {
                            groups.join(", ")
                        }
                    );
                }
            }
        }
        Some(Commands::ListPregnancies { name }) => {
            let (pregnancies, patients) =
                tokio::try_join!(client.list_pregnancies(None), client.list_patients(None))?;

            let today = Utc::now().date_naive();
            let joined = join_patient_names(pregnancies, &patients);
            let joined =
                filter_by_name_substring(joined, |j| &j.patient_name, name.as_deref().unwrap_or(""));

            if joined.is_empty() {
                println!("No prenatal records found.");
            }
            for entry in joined {
                let record = &entry.record;
                println!(
                    "{}: {} weeks ({}), DPP {}, risk {}, pregnancy #{}",
                    entry.patient_name,
                    record.gestational_age_weeks(today),
                    record.trimester(today),
                    record.expected_birth_date(),
                    record.risk_classification,
                    record.pregnancy_number
                );
            }
        }
        Some(Commands::ListAppointments {
            patient,
            status,
            from,
            to,
        }) => {
            let status = status
                .as_deref()
                .map(AppointmentStatus::from_wire)
                .transpose()?;
            let filter = AppointmentFilter {
                patient_id: patient,
                status,
            };

            let (appointments, patients) = tokio::try_join!(
                client.list_appointments(&filter),
                client.list_patients(None)
            )?;

            let joined = join_patient_names(appointments, &patients);
            let joined = filter_by_date_range(joined, from, to);

            if joined.is_empty() {
                println!("No appointments found.");
            }
            for entry in joined {
                let appointment = &entry.record;
                println!(
                    "{}: {} with {} at {} [{}]",
                    entry.patient_name,
                    appointment.appointment_type,
                    appointment.professional,
                    appointment.scheduled_at.format("%Y-%m-%d %H:%M"),
                    appointment.status
                );
            }
        }
        Some(Commands::Measurements { monitoring_id }) => {
            let monitoring = client.get_chronic_monitoring(monitoring_id).await?;
            let patient = client.get_patient(monitoring.patient_id).await?;

            println!(
                "{} - {} (adherence: {:?})",
                patient.full_name, monitoring.condition_type, monitoring.treatment_adherence
            );

            match monitoring.condition_type {
                ConditionType::Hypertension => {
                    let readings = client.list_blood_pressure(monitoring_id).await?;
                    if readings.is_empty() {
                        println!("No blood-pressure measurements recorded.");
                    }
                    for reading in readings {
                        println!(
                            "{}  {}/{} mmHg{}",
                            reading.measured_at.format("%Y-%m-%d %H:%M"),
                            reading.systolic,
                            reading.diastolic,
                            if reading.is_elevated() { "  ELEVATED" } else { "" }
                        );
                    }
                }
                ConditionType::Diabetes => {
                    let readings = client.list_glucose(monitoring_id).await?;
                    if readings.is_empty() {
                        println!("No glucose measurements recorded.");
                    }
                    for reading in readings {
                        println!(
                            "{}  {} mg/dL ({}){}",
                            reading.measured_at.format("%Y-%m-%d %H:%M"),
                            reading.glucose_level,
                            reading.measurement_type,
                            if reading.is_elevated() { "  ELEVATED" } else { "" }
                        );
                    }
                }
            }
        }
        Some(Commands::RecordPressure {
            monitoring_id,
            systolic,
            diastolic,
            notes,
        }) => {
            let draft = BloodPressureDraft {
                measured_at: Utc::now(),
                systolic,
                diastolic,
                notes,
            };
            match client.add_blood_pressure(monitoring_id, &draft).await {
                Ok(reading) => println!(
                    "Recorded {}/{} mmHg{}",
                    reading.systolic,
                    reading.diastolic,
                    if reading.is_elevated() { " (elevated)" } else { "" }
                ),
                Err(e) => eprintln!("Error recording measurement: {e}"),
            }
        }
        Some(Commands::RecordGlucose {
            monitoring_id,
            level,
            measurement_type,
            notes,
        }) => {
            let measurement_type = MeasurementType::from_wire(&measurement_type)?;
            let draft = GlucoseDraft {
                measured_at: Utc::now(),
                glucose_level: level,
                measurement_type,
                notes,
            };
            match client.add_glucose(monitoring_id, &draft).await {
                Ok(reading) => println!(
                    "Recorded {} mg/dL ({}){}",
                    reading.glucose_level,
                    reading.measurement_type,
                    if reading.is_elevated() { " (elevated)" } else { "" }
                ),
                Err(e) => eprintln!("Error recording measurement: {e}"),
            }
        }
        Some(Commands::LinkExams {
            pregnancy_id,
            exam_ids,
        }) => {
            if exam_ids.is_empty() {
                println!("No exam ids given.");
                return Ok(());
            }
            let report = client.add_pregnancy_exams(pregnancy_id, &exam_ids).await;
            for id in report.succeeded() {
                println!("linked: {id}");
            }
            for (id, message) in report.failed() {
                println!("FAILED: {id} ({message})");
            }
            if report.all_succeeded() {
                println!("All {} exams linked.", exam_ids.len());
            }
        }
        Some(Commands::Report { local }) => {
            let (summary, alerts) = if local {
                fetch_local_report(&client).await?
            } else {
                tokio::try_join!(client.report_summary(), client.report_alerts())?
            };
            print_report(&summary, &alerts);
        }
        None => {
            println!("Use 'clinica --help' for commands");
        }
    }

    Ok(())
}

/// Rebuild the reporting aggregates from raw collections.
///
/// Fans out one request per collection, awaits all of them, then computes
/// locally. Useful when the reporting endpoints are unavailable or their
/// numbers need cross-checking.
async fn fetch_local_report(client: &ApiClient) -> anyhow::Result<(Summary, Alerts)> {
    let exam_filter = clinica_api::ExamFilter::default();
    let chronic_filter = clinica_api::ChronicFilter::default();
    let (patients, exams, pregnancies, monitorings) = tokio::try_join!(
        client.list_patients(None),
        client.list_exams(&exam_filter),
        client.list_pregnancies(None),
        client.list_chronic_monitorings(&chronic_filter),
    )?;

    // Histories hang off each enrolment, so these cannot be fanned out
    // until the enrolment list is in hand.
    let mut pressure_readings = Vec::new();
    let mut glucose_readings = Vec::new();
    for monitoring in &monitorings {
        match monitoring.condition_type {
            ConditionType::Hypertension => {
                pressure_readings.extend(client.list_blood_pressure(monitoring.id).await?);
            }
            ConditionType::Diabetes => {
                glucose_readings.extend(client.list_glucose(monitoring.id).await?);
            }
        }
    }

    let summary = Summary::from_collections(&patients, &exams);
    let alerts = Alerts::from_collections(
        &pregnancies,
        &monitorings,
        &pressure_readings,
        &glucose_readings,
        &patients,
    );
    Ok((summary, alerts))
}

fn print_report(summary: &Summary, alerts: &Alerts) {
    println!("Patients: {}", summary.total_patients);
    println!("  pregnant:     {}", summary.pregnant_patients);
    println!("  hypertensive: {}", summary.hypertensive_patients);
    println!("  diabetic:     {}", summary.diabetic_patients);
    println!("Pending exams: {}", summary.pending_exams);
    println!();

    if alerts.is_empty() {
        println!("No alerts.");
        return;
    }

    if !alerts.high_risk_pregnancies.is_empty() {
        println!("High-risk pregnancies:");
        for alert in &alerts.high_risk_pregnancies {
            println!("  {} ({})", alert.patient_name, alert.pregnancy_id);
        }
    }
    if !alerts.elevated_blood_pressure.is_empty() {
        println!("Elevated blood pressure:");
        for alert in &alerts.elevated_blood_pressure {
            println!(
                "  {}: {}/{} mmHg on {}",
                alert.patient_name,
                alert.systolic,
                alert.diastolic,
                alert.measured_at.format("%Y-%m-%d")
            );
        }
    }
    if !alerts.elevated_glucose.is_empty() {
        println!("Elevated glucose:");
        for alert in &alerts.elevated_glucose {
            println!(
                "  {}: {} mg/dL ({}) on {}",
                alert.patient_name,
                alert.glucose_level,
                alert.measurement_type,
                alert.measured_at.format("%Y-%m-%d")
            );
        }
    }
}
