// crates/registrar-cli/src/commands/status.rs
//
// `registrar status`: display daemon health and registry counts.

use registrar_rpc::handlers::node::{GetHealthRequest, GetHealthResponse};

use crate::output::{format_json, OutputFormat};
use crate::rpc_client::RpcClient;

/// Run the status command.
pub async fn run(
    client: &RpcClient,
    endpoint: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let health: GetHealthResponse = client.call("node/health", &GetHealthRequest {}).await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&health));
        return Ok(());
    }

    println!("Registrar v{}", health.version);
    println!();
    println!("Node Status");
    println!("-----------");
    println!("  RPC endpoint: {}", endpoint);
    println!("  Status:       {}", health.status);
    println!("  Started at:   {}", health.started_at.to_rfc3339());
    println!("  Uptime:       {}s", health.uptime_seconds);
    println!("  Students:     {}", health.students);
    println!("  Courses:      {}", health.courses);
    println!("  Enrollments:  {}", health.enrollments);

    Ok(())
}
