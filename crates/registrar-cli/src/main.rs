// crates/registrar-cli/src/main.rs
//
// CLI entrypoint for the Registrar developer tools.
//
// Provides subcommands for registering students and courses, enrolling,
// listing enrollments, checking daemon status, and running a scripted demo.

mod commands;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::course::CourseCmd;
use commands::enroll::EnrollCmd;
use commands::student::StudentCmd;
use output::OutputFormat;
use rpc_client::RpcClient;

/// Registrar CLI: talk to a running registrar-daemon.
#[derive(Parser, Debug)]
#[command(
    name = "registrar",
    version,
    about = "Registrar CLI for the student/course enrollment service"
)]
struct Cli {
    /// RPC endpoint for the registrar-daemon.
    #[arg(long, global = true, default_value = "http://localhost:50051")]
    rpc: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Student management: register, courses.
    #[command(subcommand)]
    Student(StudentCmd),

    /// Course management: register, students.
    #[command(subcommand)]
    Course(CourseCmd),

    /// Enroll a student in a course.
    Enroll(EnrollCmd),

    /// Display daemon health and registry counts.
    Status,

    /// Run a sample enrollment session against the daemon.
    Demo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RpcClient::new(&cli.rpc);
    let format = OutputFormat::from_json_flag(cli.json);

    match &cli.command {
        Commands::Student(cmd) => commands::student::run(&client, cmd, format).await?,
        Commands::Course(cmd) => commands::course::run(&client, cmd, format).await?,
        Commands::Enroll(cmd) => commands::enroll::run(&client, cmd, format).await?,
        Commands::Status => commands::status::run(&client, &cli.rpc, format).await?,
        Commands::Demo => commands::demo::run(&client, format).await?,
    }

    Ok(())
}
