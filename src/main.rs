//! diffscribe - CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use diffscribe::budget::{DEFAULT_MODEL, LARGE_MODEL};
use diffscribe::diff::{is_empty_diff, read_diff, staged_diff_at};
use diffscribe::llm::{CachingClient, OpenAiClient, OpenAiConfig};
use diffscribe::output::{WRAP_WIDTH, wrap_message};
use diffscribe::logging;
use diffscribe::summarize::prompt::normalize_prompt;
use diffscribe::summarize::{DEFAULT_MAX_COMPRESSION_PASSES, SummarizeConfig, commit_message};

/// Write a commit message for a diff of any size using an LLM.
#[derive(Parser, Debug)]
#[command(name = "diffscribe")]
#[command(about = "Write a commit message for a diff of any size using an LLM")]
#[command(version)]
struct Cli {
    /// Describe the staged changes of the current repository instead of stdin
    #[arg(short = 'g', long)]
    git: bool,

    /// Use gpt-4 instead of gpt-3.5-turbo
    #[arg(short = '4', long = "gpt4")]
    gpt4: bool,

    /// Model name (overrides --gpt4)
    #[arg(short = 'm', long)]
    model: Option<String>,

    /// Sampling temperature between 0 and 2
    #[arg(short = 't', long, default_value_t = 0.0, value_parser = parse_temperature)]
    temperature: f32,

    /// Log prompts and responses at debug level
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Prompt for the commit message (the diff summary is appended)
    #[arg(short = 'p', long)]
    prompt: Option<String>,

    /// Do not print the request counter
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Append logs to this file instead of stderr
    #[arg(short = 'l', long)]
    logfile: Option<PathBuf>,

    /// Compression passes before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_COMPRESSION_PASSES)]
    max_passes: usize,
}

fn parse_temperature(value: &str) -> Result<f32, String> {
    let temperature: f32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=2.0).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(format!("temperature must be between 0 and 2, got {temperature}"))
    }
}

/// Usage counter as printed after the message.
fn usage_line(counter: &str) -> String {
    format!("({counter})")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.logfile.as_deref()).context("Failed to open log file")?;

    // Step 1: Collect the diff
    let diff = if cli.git {
        staged_diff_at(".").context("Failed to collect staged changes")?
    } else {
        read_diff(io::stdin().lock()).context("Failed to read diff")?
    };

    if is_empty_diff(&diff) {
        println!("Empty diff.");
        return Ok(ExitCode::FAILURE);
    }

    // Step 2: Resolve model and budget
    let model = cli
        .model
        .unwrap_or_else(|| (if cli.gpt4 { LARGE_MODEL } else { DEFAULT_MODEL }).to_string());
    let mut config = SummarizeConfig::for_model(&model)?.max_compression_passes(cli.max_passes);
    if let Some(prompt) = cli.prompt.as_deref() {
        config = config.final_prompt(normalize_prompt(prompt));
    }
    info!("model: {model}, budget: {} tokens", config.budget);

    // Step 3: Build the client
    let openai_config = OpenAiConfig::from_env(&model, cli.temperature)?;
    let client = CachingClient::new(
        OpenAiClient::new(openai_config).context("Failed to create OpenAI client")?,
    );

    // Step 4: Summarize and ask for the message
    let message = commit_message(&client, &diff, &config)
        .await
        .context("Failed to write commit message")?;

    println!("{}", wrap_message(&message, WRAP_WIDTH));
    if !cli.quiet {
        println!("{}", usage_line(&client.counter_string()));
    }

    Ok(ExitCode::SUCCESS)
}
