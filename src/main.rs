use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use portcheck::bandwidth::{self, report};
use portcheck::cable;
use portcheck::config::Config;
use portcheck::session::commands::{bandwidth_test_command, cable_test_command};
use portcheck::session::{
    run_workflow, ConsoleOperator, Operator, ReplayRunner, UnattendedOperator, WorkflowOutcome,
};
use portcheck::verdict::{evaluate_bandwidth, evaluate_cable};

#[derive(Parser)]
#[command(
    name = "portcheck",
    about = "Switch port commissioning: cable and bandwidth test diagnostics",
    version,
    long_about = None
)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, env = "PORTCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a captured cable-test output ("-" reads stdin)
    CableTest {
        capture: PathBuf,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Parse a captured bandwidth-test output and judge it ("-" reads stdin)
    BandwidthTest {
        capture: PathBuf,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Run the commissioning procedure against captured outputs
    Run {
        /// Cable-test capture taken with the loopback plug inserted
        #[arg(long)]
        loopback: PathBuf,

        /// Cable-test capture taken with the peer switch connected
        #[arg(long)]
        link: PathBuf,

        /// Bandwidth-test capture
        #[arg(long)]
        bandwidth: PathBuf,

        /// Skip operator prompts and settle pauses
        #[arg(long)]
        yes: bool,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Print the device commands for the effective configuration
    Commands,

    /// Print the effective configuration (secrets hidden)
    ShowConfig,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_capture(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read capture from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, source) = Config::resolve(cli.config.as_deref())?;
    init_tracing(&config.logging.level, cli.json_logs);
    tracing::info!(%source, "resolved configuration");

    let passed = match cli.command {
        Commands::CableTest { capture, json } => {
            tracing::info!(capture = %capture.display(), "Parsing cable test");
            let parsed = cable::parse(&read_capture(&capture)?)?;
            let verdict = evaluate_cable(&parsed);
            if json {
                let out = serde_json::json!({ "report": parsed, "verdict": verdict });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", report::render_cable(&parsed));
            }
            verdict.is_normal()
        }
        Commands::BandwidthTest { capture, json } => {
            tracing::info!(capture = %capture.display(), "Parsing bandwidth test");
            let result = bandwidth::parse(&read_capture(&capture)?)?;
            let verdict = evaluate_bandwidth(&result, &config.thresholds);
            if json {
                let out = serde_json::json!({ "result": result, "verdict": verdict });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", report::render_with(&result, &config.thresholds));
            }
            verdict.all_ok()
        }
        Commands::Run {
            loopback,
            link,
            bandwidth,
            yes,
            json,
        } => {
            if config.device.port_to_test.is_empty() {
                anyhow::bail!("PORT_TO_TEST is not set (config [device] port_to_test or env)");
            }
            if !json {
                println!("Using config values:\n{config}");
            }

            let mut runner = ReplayRunner::new()
                .with_cable_test(read_capture(&loopback)?)
                .with_cable_test(read_capture(&link)?)
                .with_bandwidth_test(read_capture(&bandwidth)?);
            let mut console = ConsoleOperator;
            let mut unattended = UnattendedOperator;
            let operator: &mut dyn Operator = if yes { &mut unattended } else { &mut console };

            let outcome = run_workflow(&mut runner, operator, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome, &config);
            }
            outcome.passed()
        }
        Commands::Commands => {
            config.validate_device()?;
            println!("{}", cable_test_command(&config.device.port_to_test)?);
            println!("{}", bandwidth_test_command(&config.bandwidth)?);
            true
        }
        Commands::ShowConfig => {
            println!("{config}");
            true
        }
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

fn print_outcome(outcome: &WorkflowOutcome, config: &Config) {
    match outcome {
        WorkflowOutcome::WiringFault { report: cable, .. } => {
            println!("Cable test failed - check for wiring errors");
            print!("{}", report::render_cable(cable));
        }
        WorkflowOutcome::NoLink { report: cable, .. } => {
            println!("No link established with the peer switch");
            print!("{}", report::render_cable(cable));
        }
        WorkflowOutcome::Completed { bandwidth, .. } => {
            println!("Wiring of cable OK");
            println!("Link established between switches");
            print!("{}", report::render_with(bandwidth, &config.thresholds));
        }
    }
}
