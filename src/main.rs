use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use tokentrim::utils::clipboard::copy_to_clipboard;
use tokentrim::utils::tokens::count_tokens;
use tokentrim::{
    OptimizationLevel, OptimizationMethod, OptimizeRequest, OptimizeResponse, SavingsReport,
    SimulatedOptimizer, TransformationResult, TrimConfig, handle_request, handle_with_config,
    optimize_batch,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLevel {
    Mild,
    Moderate,
    Aggressive,
}

impl From<CliLevel> for OptimizationLevel {
    fn from(l: CliLevel) -> Self {
        match l {
            CliLevel::Mild => OptimizationLevel::Mild,
            CliLevel::Moderate => OptimizationLevel::Moderate,
            CliLevel::Aggressive => OptimizationLevel::Aggressive,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMethod {
    RuleBased,
    AiPowered,
}

impl From<CliMethod> for OptimizationMethod {
    fn from(m: CliMethod) -> Self {
        match m {
            CliMethod::RuleBased => OptimizationMethod::RuleBased,
            CliMethod::AiPowered => OptimizationMethod::AiPowered,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Trim chat prompts before they cost you tokens", long_about = None)]
struct Args {
    /// Prompt text (reads stdin when omitted)
    text: Option<String>,

    /// Read the prompt from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Optimize every line on its own (rule-based only)
    #[arg(long)]
    lines: bool,

    /// Optimization level
    #[arg(short, long, value_enum)]
    level: Option<CliLevel>,

    /// Optimization method
    #[arg(short, long, value_enum)]
    method: Option<CliMethod>,

    /// Credential for the ai-powered method
    #[arg(long)]
    credential: Option<String>,

    /// Config file (defaults to tokentrim.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat input as an OptimizeRequest JSON document and print the JSON response
    #[arg(long)]
    json: bool,

    /// Print savings to stderr
    #[arg(short, long)]
    stats: bool,

    /// Use tiktoken for exact token counts in --stats
    #[arg(long)]
    exact: bool,

    /// Copy the optimized prompt to the clipboard
    #[arg(short, long)]
    copy: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // 1. Load from file or default
    let mut config = match &args.config {
        Some(path) => TrimConfig::from_path(path)?,
        None => TrimConfig::load_from_file().unwrap_or_default(),
    };

    // 2. Override with CLI args
    if let Some(l) = args.level {
        config.level = l.into();
    }
    if let Some(m) = args.method {
        config.method = m.into();
    }
    if let Some(c) = &args.credential {
        config.credential = c.clone();
    }

    let input = read_input(&args)?;
    let optimizer = SimulatedOptimizer::default();

    if args.json {
        let mut request: OptimizeRequest =
            serde_json::from_str(&input).context("Input is not a valid optimize request")?;
        let response = if config.enabled {
            if request.credential.is_none() {
                request.credential = Some(config.credential.clone());
            }
            handle_request(&request, &optimizer).await
        } else {
            OptimizeResponse::ok(request.text)
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    if input.trim().is_empty() {
        anyhow::bail!("Nothing to optimize: input is empty");
    }

    if !config.enabled {
        tracing::debug!("Optimizer disabled, passing text through");
        print!("{input}");
        return Ok(());
    }
    config.validate()?;

    let optimized = if args.lines {
        if config.method != OptimizationMethod::RuleBased {
            anyhow::bail!("--lines supports only the rule-based method");
        }
        let lines: Vec<String> = input.lines().map(String::from).collect();
        optimize_batch(&lines, config.level).join("\n")
    } else {
        let response = handle_with_config(&input, &config, &optimizer).await;
        match (response.success, response.optimized_text) {
            (true, Some(text)) => text,
            _ => anyhow::bail!(
                "Optimization failed: {}",
                response.error.as_deref().unwrap_or("Unknown error")
            ),
        }
    };

    println!("{optimized}");

    if args.stats {
        print_stats(&input, &optimized, args.exact)?;
    }
    if args.copy {
        copy_to_clipboard(&optimized)?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tokentrim=debug")
    } else {
        EnvFilter::new("tokentrim=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn print_stats(original: &str, optimized: &str, exact: bool) -> Result<()> {
    let savings = SavingsReport::compute(original, optimized);
    let result = TransformationResult::new(original, optimized.to_string());

    eprintln!(
        "Tokens Saved: ~{} ({}%)",
        savings.words_saved, savings.percent_reduction
    );
    eprintln!(
        "  Words: {} -> {}",
        savings.original_words, savings.optimized_words
    );
    eprintln!(
        "  Estimated tokens: {} -> {}",
        result.original_token_estimate, result.optimized_token_estimate
    );
    if exact {
        eprintln!(
            "  Exact tokens (cl100k): {} -> {}",
            count_tokens(original)?,
            count_tokens(optimized)?
        );
    }
    Ok(())
}
