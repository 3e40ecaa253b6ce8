//! CLI entry point for simplify.
//!
//! Manages Simplify skill types from the terminal, sharing the screen
//! logic of the web frontend.

mod transport;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use core_types::{NavLink, Resource, ResourceId, Session, SkillType};
use resource::session::{Credentials, login, logout};
use resource::{FormPanel, ResourceClient, ScreenController, ToastStatus};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::transport::{HttpTransport, load_cookies, save_cookies};

/// simplify: manage Simplify simulation resources
#[derive(Parser)]
#[command(name = "simplify")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend host
    #[arg(
        long,
        global = true,
        env = "SIMPLIFY_API_HOST",
        default_value = "http://localhost:8000"
    )]
    host: String,

    /// File holding the session cookies between runs
    #[arg(
        long,
        global = true,
        env = "SIMPLIFY_COOKIE_FILE",
        default_value = ".simplify-cookies"
    )]
    cookie_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session cookies
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "SIMPLIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and drop the CSRF cookie
    Logout,

    /// Manage skill types
    SkillType {
        #[command(subcommand)]
        command: SkillTypeCommand,
    },
}

#[derive(Subcommand)]
enum SkillTypeCommand {
    /// List all skill types
    List,

    /// Create a skill type
    Create {
        #[command(flatten)]
        fields: SkillTypeFields,
    },

    /// Update the given fields of a skill type
    Update {
        /// Skill type ID
        id: u64,

        #[command(flatten)]
        fields: SkillTypeFields,
    },

    /// Delete a skill type
    Delete {
        /// Skill type ID
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Form values, taken as typed and checked against the field patterns.
#[derive(Args, Debug, Default)]
struct SkillTypeFields {
    #[arg(long)]
    name: Option<String>,

    /// Cost per day (positive number)
    #[arg(long)]
    cost_per_day: Option<String>,

    /// Error rate between 0 and 1
    #[arg(long)]
    error_rate: Option<String>,

    /// Throughput (positive number)
    #[arg(long)]
    throughput: Option<String>,

    /// Management quality between 0 and 100
    #[arg(long)]
    management_quality: Option<String>,

    /// Development quality between 0 and 100
    #[arg(long)]
    development_quality: Option<String>,

    /// Signing bonus (positive number)
    #[arg(long)]
    signing_bonus: Option<String>,
}

impl SkillTypeFields {
    /// Given values keyed by wire name.
    fn values(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("cost_per_day", &self.cost_per_day),
            ("error_rate", &self.error_rate),
            ("throughput", &self.throughput),
            ("management_quality", &self.management_quality),
            ("development_quality", &self.development_quality),
            ("signing_bonus", &self.signing_bonus),
        ]
        .into_iter()
        .filter_map(|(wire, value)| value.as_deref().map(|v| (wire, v)))
        .collect()
    }

    /// Copy the given values into the open form.
    fn apply(&self, form: &mut FormPanel) -> Result<()> {
        let mode = form.mode().context("No form is open")?;
        for (wire, value) in self.values() {
            let spec = SkillType::FIELDS
                .iter()
                .find(|f| f.wire == wire)
                .with_context(|| format!("Unknown field: {wire}"))?;
            form.set(spec.input_name(mode), value)?;
        }
        Ok(())
    }
}

type Controller = ScreenController<SkillType, HttpTransport>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let jar = load_cookies(&cli.cookie_file)
        .with_context(|| format!("Failed to read {}", cli.cookie_file.display()))?;
    tracing::debug!(cookies = %cli.cookie_file.display(), host = %cli.host, "starting");
    let transport = HttpTransport::new(&cli.host, jar);

    let succeeded = match cli.command {
        Commands::Login { username, password } => {
            run_login(&transport, Credentials { username, password }).await
        }
        Commands::Logout => run_logout(&transport).await,
        Commands::SkillType { command } => {
            let mut controller = ScreenController::new(ResourceClient::new(transport.clone()));
            run_skill_type(&mut controller, command).await
        }
    };

    save_cookies(&cli.cookie_file, &transport.jar())
        .with_context(|| format!("Failed to write {}", cli.cookie_file.display()))?;

    if !succeeded? {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run_login(transport: &HttpTransport, credentials: Credentials) -> Result<bool> {
    let session = match login(transport, &credentials).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Login failed: {e}");
            return Ok(false);
        }
    };

    if let Some(user) = session.user() {
        println!("Logged in as {}", user.username);
    }
    println!("Sections: {}", section_titles(&session));
    Ok(true)
}

async fn run_logout(transport: &HttpTransport) -> Result<bool> {
    let mut session = Session::Anonymous;
    match logout(transport, &mut session).await {
        Ok(()) => {
            println!("Logged out");
            Ok(true)
        }
        Err(e) => {
            eprintln!("Logout request failed: {e}");
            Ok(false)
        }
    }
}

fn section_titles(session: &Session) -> String {
    NavLink::visible_for(session)
        .iter()
        .map(|link| link.title())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn run_skill_type(controller: &mut Controller, command: SkillTypeCommand) -> Result<bool> {
    match command {
        SkillTypeCommand::List => {
            if !controller.load().await {
                eprintln!("Could not load skill types");
                return Ok(false);
            }
            print!("{}", render_table(controller.screen().store().records()));
            Ok(true)
        }
        SkillTypeCommand::Create { fields } => {
            if fields.name.is_none() {
                bail!("--name is required");
            }
            controller.screen_mut().form_mut().open_create();
            fields.apply(controller.screen_mut().form_mut())?;
            submit(controller).await
        }
        SkillTypeCommand::Update { id, fields } => {
            let record = find_record(controller, ResourceId(id)).await?;
            controller.screen_mut().form_mut().open_edit(&record)?;
            fields.apply(controller.screen_mut().form_mut())?;
            submit(controller).await
        }
        SkillTypeCommand::Delete { id, yes } => {
            let record = find_record(controller, ResourceId(id)).await?;
            let label = record.label().to_string();
            controller.screen_mut().request_delete(record);

            if !yes && !confirm(&format!("Delete {label}?"))? {
                controller.screen_mut().cancel_delete();
                println!("Cancelled");
                return Ok(true);
            }
            let succeeded = controller.confirm_delete().await.unwrap_or(false);
            print_toasts(controller);
            Ok(succeeded)
        }
    }
}

async fn find_record(controller: &mut Controller, id: ResourceId) -> Result<SkillType> {
    if !controller.load().await {
        bail!("Could not load skill types");
    }
    controller
        .screen()
        .store()
        .get(id)
        .cloned()
        .with_context(|| format!("Skill type not found: {id}"))
}

async fn submit(controller: &mut Controller) -> Result<bool> {
    let succeeded = match controller.submit().await {
        Some(succeeded) => succeeded,
        None => {
            for violation in controller.screen().form().violations() {
                eprintln!(
                    "{}: {} (got '{}')",
                    violation.input, violation.title, violation.value
                );
            }
            false
        }
    };
    print_toasts(controller);
    Ok(succeeded)
}

fn print_toasts(controller: &mut Controller) {
    for toast in controller.screen_mut().take_toasts() {
        match toast.status {
            ToastStatus::Success => println!("{}", toast.title),
            ToastStatus::Error => eprintln!("{}", toast.title),
        }
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn render_table(records: &[SkillType]) -> String {
    if records.is_empty() {
        return "No skill types found.\n".to_string();
    }

    let header = [
        "ID",
        "Name",
        "Cost per Day",
        "Error Rate",
        "Throughput",
        "Management Quality",
        "Development Quality",
        "Signing Bonus",
    ];
    let rows: Vec<[String; 8]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.cost_per_day.to_string(),
                r.error_rate.to_string(),
                r.throughput.to_string(),
                r.management_quality.to_string(),
                r.development_quality.to_string(),
                r.signing_bonus.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = format_row(header.into_iter(), &widths);
    for row in &rows {
        out.push_str(&format_row(row.iter().map(String::as_str), &widths));
    }
    out
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}
