use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod bulletin;
mod config;
mod data;
mod digest;
mod error;
mod models;
mod planner;
mod report;
mod routes;
mod students;
mod sync;

use bulletin::{BulletinComposer, Recipient};
use config::Config;
use error::DashboardError;
use planner::LessonQueue;
use routes::Route;
use sync::SimulatedSync;

#[derive(Parser)]
#[command(name = "scholars-dashboard")]
#[command(about = "Nabha Scholars teacher dashboard", long_about = None)]
struct Cli {
    /// Dashboard data document (JSON); defaults to the built-in snapshot
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Replace the student list with a CSV roster
    #[arg(long, global = true)]
    roster: Option<PathBuf>,
    /// Name shown in the dashboard greeting
    #[arg(long, global = true)]
    teacher: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the daily digest
    Digest,
    /// List students and those needing attention
    Students {
        #[arg(long, default_value = "")]
        search: String,
        /// Export only students needing attention
        #[arg(long)]
        flagged: bool,
        /// Write the current student view to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Build tomorrow's lesson queue
    Planner {
        #[arg(long = "add", value_name = "LESSON_ID")]
        add: Vec<String>,
        #[arg(long = "remove", value_name = "LESSON_ID")]
        remove: Vec<String>,
        /// Push the queue to tomorrow's sync
        #[arg(long)]
        confirm: bool,
    },
    /// Read help requests and send bulletins
    Bulletin {
        /// Only show the help request inbox
        #[arg(long)]
        inbox: bool,
        #[arg(long, default_value = "all")]
        to: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Open a page by its route, e.g. /students
    Open { route: String },
    /// Write every page to a markdown report
    Report {
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.data, cli.roster, cli.teacher);
    let data = data::load(&config).context("failed to load dashboard data")?;
    let teacher = config.teacher_name.as_str();

    match cli.command {
        Commands::Digest => {
            print!("{}", report::render_route(Route::Digest, "/", &data, teacher));
        }
        Commands::Students {
            search,
            flagged,
            export,
        } => {
            print!("{}", report::render_shell(Route::Students, teacher));
            print!("{}", report::render_students(&data, &search));

            if let Some(path) = export {
                let view: Vec<&models::Student> = students::search(&data.student_reports, &search)
                    .into_iter()
                    .filter(|student| !flagged || student.is_flagged())
                    .collect();
                let written = data::export_students(&path, &view)
                    .with_context(|| format!("failed to export students to {}", path.display()))?;
                println!();
                println!("Exported {written} students to {}.", path.display());
            }
        }
        Commands::Planner {
            add,
            remove,
            confirm,
        } => {
            let mut queue = LessonQueue::new();
            for lesson_id in &add {
                let (subject, lesson) = planner::find_lesson(&data.available_lessons, lesson_id)?;
                queue.add(lesson, subject);
            }
            for lesson_id in &remove {
                queue.remove(lesson_id);
            }

            print!("{}", report::render_shell(Route::ContentPlanner, teacher));
            print!("{}", report::render_planner(&data, &queue));

            if confirm {
                println!();
                if queue.is_empty() {
                    println!("No lessons queued yet; nothing to push.");
                } else {
                    let mut sync = SimulatedSync::new();
                    let count = queue.push_to(&mut sync);
                    println!("Successfully queued {count} lessons for tomorrow's sync!");
                    if let Some(receipt) = sync.receipts().last() {
                        println!("Delivery: {} (receipt {})", receipt.deliver_on, receipt.id);
                    }
                }
            }
        }
        Commands::Bulletin { inbox, to, message } => {
            if inbox {
                print!("{}", report::render_help_requests(&data.help_requests));
                return Ok(());
            }

            let mut composer = BulletinComposer::new();
            let Some(message) = message else {
                print!("{}", report::render_shell(Route::BulletinBoard, teacher));
                print!("{}", report::render_bulletin_board(&data, &composer));
                return Ok(());
            };

            composer.set_draft(message, Recipient::parse(&to));
            print!("{}", report::render_shell(Route::BulletinBoard, teacher));
            print!("{}", report::render_bulletin_board(&data, &composer));

            let draft = composer.draft().clone();
            let mut sync = SimulatedSync::new();
            match composer.send(&mut sync) {
                Ok(receipt) => {
                    println!();
                    println!("Message queued for tomorrow's sync!");
                    println!("Recipient: {}", draft.recipient);
                    println!("Message: {}", draft.message);
                    println!("Delivery: {} (receipt {})", receipt.deliver_on, receipt.id);
                }
                Err(DashboardError::EmptyMessage) => {
                    println!();
                    println!("Message is empty; nothing was queued.");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Open { route } => {
            let resolved = Route::resolve(&route);
            if resolved == Route::NotFound {
                warn!(route = %route, "no page for route");
            }
            print!("{}", report::render_route(resolved, &route, &data, teacher));
        }
        Commands::Report { out } => {
            let report = report::build_report(&data, teacher);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
