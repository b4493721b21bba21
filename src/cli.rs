//! Command-line interface for portfolio-qa

use clap::{Parser, Subcommand};

/// Config file read when `--config` is not given, if it exists
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Question-answering API grounded in a knowledge document
#[derive(Parser)]
#[command(name = "portfolio-qa")]
#[command(version)]
#[command(about = "Question-answering API grounded in a knowledge document")]
#[command(
    long_about = "portfolio-qa serves POST /query, answering questions by sending a \
    static knowledge document and the question to an OpenAI-compatible completions API."
)]
pub struct Cli {
    /// Path to configuration file [default: config.toml if present, else built-in defaults]
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# portfolio-qa configuration
#
# Every key is optional; the values below are the built-in defaults.
# The API key is never read from this file. Set it in the environment
# variable named by provider.api_key_env (OPENAI_API_KEY by default).

[server]
# Address to bind (0.0.0.0 for all interfaces)
host = "0.0.0.0"

# Port to listen on (the PORT environment variable takes precedence)
port = 8000

[provider]
# Model identifier, also reported back as model_used
model = "gpt-4o-mini"

# OpenAI-compatible API base URL
base_url = "https://api.openai.com/v1"

# Completion length limit and sampling temperature (0.0-2.0)
max_tokens = 500
temperature = 0.7

# Provider request timeout in seconds
request_timeout_seconds = 600

# Environment variable holding the API key
api_key_env = "OPENAI_API_KEY"

[knowledge]
# Text file embedded into every prompt. Re-read on each request.
path = "knowledge.txt"

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
log_level = "info"
"#
}
