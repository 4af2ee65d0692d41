//! Waypoint CLI Application
//!
//! Command-line interface and MCP server for the waypoint task planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::PlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        no_color,
        json,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("Waypoint started");

    if let Some(Serve) = command {
        info!("Starting Waypoint MCP server");
        return run_stdio_server(WaypointMcpServer::new(planner))
            .await
            .context("MCP server failed");
    }

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color), user, json);
    match command {
        Some(Ask { message }) => cli.ask(message).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Risks { days }) => cli.risks(days).await,
        Some(Progress(args)) => cli.progress(args).await,
        Some(Feedback(args)) => cli.feedback(args),
        Some(Reschedule { message }) => cli.reschedule(message).await,
        Some(Alternatives) => cli.alternatives().await,
        Some(Tool { name, params }) => cli.tool(name, &params).await,
        Some(Serve) | None => cli.list_plans().await,
    }
}
