// crates/registrar-cli/src/commands/student.rs
//
// `registrar student {register, courses}`: student commands.

use clap::Subcommand;

use registrar_core::Student;
use registrar_rpc::handlers::student::{
    ListCoursesForStudentRequest, ListCoursesForStudentResponse, RegisterStudentRequest,
    RegisterStudentResponse,
};

use crate::output::{format_json, render_courses, OutputFormat};
use crate::rpc_client::RpcClient;

/// Student subcommands.
#[derive(Debug, Subcommand)]
pub enum StudentCmd {
    /// Register a new student.
    Register {
        /// Civil-registry id of the student.
        #[arg(long)]
        id: String,
        /// Given names.
        #[arg(long, default_value = "")]
        given_names: String,
        /// Surnames.
        #[arg(long, default_value = "")]
        surnames: String,
        /// Degree program or major.
        #[arg(long, default_value = "")]
        program: String,
    },
    /// List the courses a student is enrolled in.
    Courses {
        /// Id of the student.
        #[arg(long)]
        id: String,
    },
}

/// Run the student subcommand.
pub async fn run(
    client: &RpcClient,
    cmd: &StudentCmd,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        StudentCmd::Register {
            id,
            given_names,
            surnames,
            program,
        } => {
            let request = RegisterStudentRequest {
                student: Student {
                    id: id.clone(),
                    given_names: given_names.clone(),
                    surnames: surnames.clone(),
                    program: program.clone(),
                },
            };
            let resp: RegisterStudentResponse = client.call("student/register", &request).await?;
            match format {
                OutputFormat::Json => println!("{}", format_json(&resp.student)),
                OutputFormat::Table => println!(
                    "Student registered: {} ({})",
                    resp.student.id,
                    resp.student.full_name()
                ),
            }
        }
        StudentCmd::Courses { id } => {
            let request = ListCoursesForStudentRequest {
                student_id: id.clone(),
            };
            let resp: ListCoursesForStudentResponse =
                client.call("student/courses", &request).await?;
            println!("{}", render_courses(&resp.courses, format));
        }
    }

    Ok(())
}
