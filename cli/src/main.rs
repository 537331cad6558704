//! Weft CLI binary: run one of the agent loops from the terminal.
//!
//! Subcommands: `bot`, `chat`, `drafter`, `react`, and `tools` (print tool specs).

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use weft::{ChatOpenAI, StdConsole, ToolChoiceMode, DEFAULT_REACT_INPUT, DEFAULT_TRANSCRIPT_PATH};
use weft_cli::{logging, run_variant, tool_registry, RunError, RunOptions, Variant};

const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Parser, Debug)]
#[command(name = "weft", version)]
#[command(about = "Weft: small tool-calling agent loops")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Chat model name
    #[arg(long, global = true, env = "WEFT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible API base URL
    #[arg(long, global = true, env = "OPENAI_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// API key for the model endpoint
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Sampling temperature
    #[arg(long, global = true, env = "WEFT_TEMPERATURE")]
    temperature: Option<f32>,

    /// Whether the model may (auto), must not (none) or must (required) call tools
    #[arg(long, global = true, env = "WEFT_TOOL_CHOICE", default_value = "auto")]
    tool_choice: ToolChoiceMode,

    /// Verbose: log node enter/exit and model calls
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, env = "WEFT_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One model call per line, no memory
    Bot,
    /// Conversation with history; transcript written on exit
    Chat {
        /// Transcript path (overwritten)
        #[arg(long, env = "WEFT_TRANSCRIPT", default_value = DEFAULT_TRANSCRIPT_PATH)]
        transcript: PathBuf,
    },
    /// Edit a document with the model; ends when it is saved
    Drafter {
        /// Folder saved documents are written into
        #[arg(short, long, env = "WEFT_WORKING_FOLDER", default_value = ".")]
        working_folder: PathBuf,
    },
    /// Answer one arithmetic query with tools
    React {
        /// Query to run
        #[arg(default_value = DEFAULT_REACT_INPUT)]
        input: String,
    },
    /// Print the tool specs a variant exposes, as JSON
    Tools {
        #[arg(value_enum, default_value = "react")]
        variant: ToolSet,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ToolSet {
    Drafter,
    React,
}

impl From<ToolSet> for Variant {
    fn from(set: ToolSet) -> Self {
        match set {
            ToolSet::Drafter => Variant::Drafter,
            ToolSet::React => Variant::React,
        }
    }
}

impl Args {
    fn variant_and_options(&self) -> Option<(Variant, RunOptions)> {
        let mut options = RunOptions::default();
        let variant = match &self.cmd {
            Command::Bot => Variant::Bot,
            Command::Chat { transcript } => {
                options.transcript = transcript.clone();
                Variant::Chat
            }
            Command::Drafter { working_folder } => {
                options.working_folder = working_folder.clone();
                Variant::Drafter
            }
            Command::React { input } => {
                options.input = input.clone();
                Variant::React
            }
            Command::Tools { .. } => return None,
        };
        Some((variant, options))
    }

    fn chat_model(&self, variant: Variant, options: &RunOptions) -> Result<ChatOpenAI, RunError> {
        if self.api_key.is_none() && self.base_url.is_none() {
            return Err(RunError::MissingApiKey);
        }
        let mut llm = ChatOpenAI::for_endpoint(
            &self.model,
            self.base_url.as_deref(),
            self.api_key.as_deref(),
        );
        let specs = tool_registry(variant, options).list();
        if !specs.is_empty() {
            llm = llm.with_tools(specs).with_tool_choice(self.tool_choice);
        }
        if let Some(t) = self.temperature {
            llm = llm.with_temperature(t);
        }
        Ok(llm)
    }
}

fn print_tools(set: ToolSet) -> Result<(), Box<dyn std::error::Error>> {
    let specs = tool_registry(set.into(), &RunOptions::default()).list();
    println!("{}", serde_json::to_string_pretty(&specs)?);
    Ok(())
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some((variant, options)) = args.variant_and_options() else {
        if let Command::Tools { variant } = args.cmd {
            print_tools(variant)?;
        }
        return Ok(());
    };
    let llm = args.chat_model(variant, &options)?;
    tracing::debug!(model = %llm.model(), %variant, "starting");
    run_variant(variant, &options, Arc::new(llm), Arc::new(StdConsole::new())).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = weft_config::load_and_apply("weft", None) {
        eprintln!("weft: {}", e);
        std::process::exit(1);
    }
    let args = Args::parse();
    let guard = logging::init(args.verbose, args.log_file.as_deref())?;

    if let Err(e) = run(&args).await {
        drop(guard);
        eprintln!("weft: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
