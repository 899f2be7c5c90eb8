// crates/registrar-cli/src/commands/enroll.rs
//
// `registrar enroll`: enroll a student in a course.

use clap::Args;

use registrar_rpc::handlers::enrollment::{EnrollRequest, EnrollResponse};

use crate::output::{format_json, OutputFormat};
use crate::rpc_client::RpcClient;

/// Arguments for the enroll command.
#[derive(Debug, Args)]
pub struct EnrollCmd {
    /// Id of the student.
    #[arg(long)]
    pub student: String,
    /// Code of the course.
    #[arg(long)]
    pub course: String,
}

/// Run the enroll command.
pub async fn run(
    client: &RpcClient,
    cmd: &EnrollCmd,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = EnrollRequest {
        student_id: cmd.student.clone(),
        course_code: cmd.course.clone(),
    };
    let resp: EnrollResponse = client.call("enrollment/enroll", &request).await?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&resp)),
        OutputFormat::Table => println!("{} ({} -> {})", resp.message, cmd.student, cmd.course),
    }
    Ok(())
}
