use employee_service::config::EmployeeConfig;
use employee_service::services::init_metrics;
use employee_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics()?;

    let config = EmployeeConfig::load()?;

    init_tracing(
        "employee-service",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    // Store or seed failures end the process here
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
