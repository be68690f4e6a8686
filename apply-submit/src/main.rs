//! apply-submit - Submit a job application
//!
//! Records are always saved locally first. When an endpoint is configured
//! (config file, `APPLYFORM_SUBMIT_ENDPOINT`, or `--endpoint`) each record is
//! also POSTed there; delivery failures are logged and otherwise ignored.

use anyhow::{Context, Result};
use clap::Parser;
use libapplyform::form::{ConsoleNotifier, FormFields, MemoryForm};
use libapplyform::service::submission::{SubmissionOutcome, SubmissionService};
use libapplyform::service::ApplyformService;
use libapplyform::{ApplyformError, Config, FieldId};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "apply-submit")]
#[command(version)]
#[command(about = "Submit a job application and save it locally", long_about = None)]
struct Cli {
    /// Preferred work area
    #[arg(long)]
    work_area: Option<String>,

    /// First-choice role
    #[arg(long)]
    role1: Option<String>,

    /// Second-choice role
    #[arg(long)]
    role2: Option<String>,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    nickname: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: Option<String>,

    /// Earliest start date
    #[arg(long)]
    start_date: Option<String>,

    #[arg(long)]
    expected_salary: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    address: Option<String>,

    /// Military service status
    #[arg(long)]
    military: Option<String>,

    #[arg(long)]
    nationality: Option<String>,

    #[arg(long)]
    tattoo: Option<String>,

    #[arg(long)]
    driver_license: Option<String>,

    /// Resume file; only its file name is recorded
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Prompt for each field and keep taking applications
    #[arg(short, long)]
    interactive: bool,

    /// Forward records to this URL (overrides configuration)
    #[arg(long)]
    endpoint: Option<String>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Interactive answer that empties a field instead of keeping its value
const CLEAR_ANSWER: &str = "-";

/// Fields asked for in interactive mode, in form order
const PROMPTS: [(FieldId, &str); 16] = [
    (FieldId::WorkArea, "Work area"),
    (FieldId::Role1, "Role (1st choice)"),
    (FieldId::Role2, "Role (2nd choice)"),
    (FieldId::FirstName, "First name"),
    (FieldId::LastName, "Last name"),
    (FieldId::Nickname, "Nickname"),
    (FieldId::Dob, "Date of birth (YYYY-MM-DD)"),
    (FieldId::StartDate, "Start date"),
    (FieldId::ExpectedSalary, "Expected salary"),
    (FieldId::Email, "E-Mail"),
    (FieldId::Phone, "Phone"),
    (FieldId::Address, "Address"),
    (FieldId::Military, "Military status"),
    (FieldId::Nationality, "Nationality"),
    (FieldId::Tattoo, "Tattoo"),
    (FieldId::DriverLicense, "Driver license"),
];

impl Cli {
    fn form(&self) -> MemoryForm {
        let values = [
            (FieldId::WorkArea, &self.work_area),
            (FieldId::Role1, &self.role1),
            (FieldId::Role2, &self.role2),
            (FieldId::FirstName, &self.first_name),
            (FieldId::LastName, &self.last_name),
            (FieldId::Nickname, &self.nickname),
            (FieldId::Dob, &self.dob),
            (FieldId::StartDate, &self.start_date),
            (FieldId::ExpectedSalary, &self.expected_salary),
            (FieldId::Email, &self.email),
            (FieldId::Phone, &self.phone),
            (FieldId::Address, &self.address),
            (FieldId::Military, &self.military),
            (FieldId::Nationality, &self.nationality),
            (FieldId::Tattoo, &self.tattoo),
            (FieldId::DriverLicense, &self.driver_license),
        ];

        let mut form = MemoryForm::new();
        for (id, value) in values {
            if let Some(value) = value {
                form.set_value(id, value);
            }
        }
        SubmissionService::refresh_age(&mut form);
        if let Some(resume) = &self.resume {
            form.attach(resume);
        }
        form
    }

    fn output_format(&self) -> libapplyform::Result<OutputFormat> {
        match self.format.as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApplyformError::InvalidInput(format!(
                "Invalid format '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    libapplyform::logging::init_default(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<ApplyformError>()
            .map(ApplyformError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output_format()?;

    let mut config = Config::load()?;
    if let Some(endpoint) = &cli.endpoint {
        config.submission.endpoint = Some(endpoint.clone());
    }

    let service = ApplyformService::from_config(&config).await?;
    let mut notifier = ConsoleNotifier {
        quiet: format == OutputFormat::Json,
    };
    let mut form = cli.form();

    if cli.interactive {
        return run_interactive(&service, &mut form, &mut notifier, format).await;
    }

    let outcome = service
        .submission()
        .submit(&mut form, &mut notifier)
        .await?;
    finish(outcome, format).await
}

/// Report an outcome and wait for any background delivery
async fn finish(outcome: SubmissionOutcome, format: OutputFormat) -> Result<()> {
    match outcome {
        SubmissionOutcome::Rejected { field, .. } => Err(ApplyformError::InvalidInput(format!(
            "Missing required field: {}",
            field
        ))
        .into()),
        SubmissionOutcome::Accepted { record, forward } => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string(&record)?);
            }
            if let Some(handle) = forward {
                debug!("Waiting for background delivery");
                handle.await.context("Delivery task failed")?;
            }
            Ok(())
        }
    }
}

async fn run_interactive(
    service: &ApplyformService,
    form: &mut MemoryForm,
    notifier: &mut ConsoleNotifier,
    format: OutputFormat,
) -> Result<()> {
    loop {
        println!();
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("New application (Enter keeps [current], '-' clears a field)");
        println!("Leave the work area empty to finish");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        if !fill_form(form)? {
            return Ok(());
        }

        let outcome = service.submission().submit(form, notifier).await?;
        if !outcome.is_accepted() {
            // Values are kept; the next round re-asks with them as defaults
            continue;
        }
        finish(outcome, format).await?;

        if !prompt_yes_no("Submit another application?", true)? {
            return Ok(());
        }
    }
}

/// Prompt for every field; returns false when the session is over
///
/// The session ends at end of input, or when the work area is left blank
/// and no work area is kept from the previous application.
fn fill_form(form: &mut MemoryForm) -> Result<bool> {
    for (id, label) in PROMPTS {
        let current = form.value(id).unwrap_or_default();
        let Some(answer) = prompt(label, &current)? else {
            return Ok(false);
        };
        let answer = answer.trim();

        if id == FieldId::WorkArea && answer.is_empty() && current.trim().is_empty() {
            return Ok(false);
        }

        if answer == CLEAR_ANSWER {
            form.set_value(id, "");
        } else if !answer.is_empty() {
            form.set_value(id, answer);
        }

        if id == FieldId::Dob {
            SubmissionService::refresh_age(form);
            let age = form.value(FieldId::Age).unwrap_or_default();
            if !age.is_empty() {
                println!("  Age: {}", age);
            }
        }
    }

    let Some(resume) = prompt("Resume file", "")? else {
        return Ok(false);
    };
    match resume.trim() {
        "" => {}
        CLEAR_ANSWER => form.clear_attachment(),
        path => form.attach(path),
    }

    Ok(true)
}

/// Read one line; `None` at end of input
fn prompt(label: &str, current: &str) -> Result<Option<String>> {
    if current.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, current);
    }
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt_yes_no(question: &str, default: bool) -> Result<bool> {
    let default_str = if default { "Y/n" } else { "y/N" };
    print!("{} [{}]: ", question, default_str);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(false);
    }

    Ok(match input.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    })
}
