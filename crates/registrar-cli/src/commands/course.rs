// crates/registrar-cli/src/commands/course.rs
//
// `registrar course {register, students}`: course commands.

use clap::Subcommand;

use registrar_core::Course;
use registrar_rpc::handlers::course::{
    ListStudentsForCourseRequest, ListStudentsForCourseResponse, RegisterCourseRequest,
    RegisterCourseResponse,
};

use crate::output::{format_json, render_students, OutputFormat};
use crate::rpc_client::RpcClient;

/// Course subcommands.
#[derive(Debug, Subcommand)]
pub enum CourseCmd {
    /// Register a new course.
    Register {
        /// Course code (e.g., INF101).
        #[arg(long)]
        code: String,
        /// Course name.
        #[arg(long, default_value = "")]
        name: String,
        /// Instructor teaching the course.
        #[arg(long, default_value = "")]
        instructor: String,
    },
    /// List the students enrolled in a course.
    Students {
        /// Course code.
        #[arg(long)]
        code: String,
    },
}

/// Run the course subcommand.
pub async fn run(
    client: &RpcClient,
    cmd: &CourseCmd,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        CourseCmd::Register {
            code,
            name,
            instructor,
        } => {
            let request = RegisterCourseRequest {
                course: Course {
                    code: code.clone(),
                    name: name.clone(),
                    instructor: instructor.clone(),
                },
            };
            let resp: RegisterCourseResponse = client.call("course/register", &request).await?;
            match format {
                OutputFormat::Json => println!("{}", format_json(&resp.course)),
                OutputFormat::Table => {
                    println!("Course registered: {} ({})", resp.course.code, resp.course.name)
                }
            }
        }
        CourseCmd::Students { code } => {
            let request = ListStudentsForCourseRequest {
                course_code: code.clone(),
            };
            let resp: ListStudentsForCourseResponse =
                client.call("course/students", &request).await?;
            println!("{}", render_students(&resp.students, format));
        }
    }

    Ok(())
}
