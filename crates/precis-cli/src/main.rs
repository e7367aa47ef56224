#![deny(unsafe_code)]

//! Précis CLI: summarize and count words from files or stdin.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use precis_config::AppConfig;
use precis_core::build_info::{self, BuildInfo};
use precis_core::{Analysis, SummaryEngine, SummaryOutcome, SummaryRequest, count_words, job};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Précis: extractive text summarizer.
#[derive(Parser)]
#[command(name = "precis", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "precis.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a document and report word counts.
    Summarize {
        /// Input file; reads stdin when omitted or "-".
        file: Option<PathBuf>,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,

        /// Also show every sentence's score and the most frequent words.
        #[arg(long)]
        explain: bool,
    },

    /// Count the words of a document.
    Count {
        /// Input file; reads stdin when omitted or "-".
        file: Option<PathBuf>,
    },

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },

    /// Show build information.
    Info {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .await
        .with_context(|| format!("invalid configuration at '{}'", cli.config.display()))?;

    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    // Logs go to stderr so summaries can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Summarize {
            file,
            json,
            explain,
        } => cmd_summarize(file.as_deref(), json, explain).await?,
        Commands::Count { file } => cmd_count(file.as_deref()).await?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
        Commands::Info { json } => cmd_info(json)?,
    }

    Ok(())
}

async fn cmd_summarize(file: Option<&Path>, json: bool, explain: bool) -> Result<()> {
    let text = read_input(file).await?;
    let request = SummaryRequest::new(&text)?;
    info!(bytes = request.text().len(), "summarizing");

    let (outcome, analysis) = summarize_request(&request, explain).await?;

    if json {
        let mut value = serde_json::to_value(&outcome)?;
        if let Some(analysis) = &analysis {
            value["ranking"] = serde_json::to_value(&analysis.ranked)?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        if let Some(analysis) = &analysis {
            print!("{}", render_explain(analysis));
        }
        print!("{}", render_outcome(&outcome));
    }
    Ok(())
}

/// Summarize on the blocking pool, or inline with the intermediate tables
/// when `explain` asks for them.
async fn summarize_request(
    request: &SummaryRequest,
    explain: bool,
) -> Result<(SummaryOutcome, Option<Analysis<'_>>)> {
    if explain {
        let analysis = SummaryEngine::new().analyze(request.text());
        let outcome = SummaryOutcome::from_analysis(request.text(), &analysis);
        Ok((outcome, Some(analysis)))
    } else {
        Ok((job::run_in_background(request.clone()).await?, None))
    }
}

async fn cmd_count(file: Option<&Path>) -> Result<()> {
    let text = read_input(file).await?;
    println!("{}", count_words(text.as_str()));
    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str = config
            .to_toml()
            .map_err(|e| anyhow::anyhow!("TOML error: {e}"))?;
        println!("{toml_str}");
    } else if config_path.exists() {
        println!("Configuration at '{}' is valid.", config_path.display());
    } else {
        println!(
            "No configuration at '{}'; using defaults.",
            config_path.display()
        );
    }
    Ok(())
}

fn cmd_info(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&BuildInfo::current())?);
    } else {
        println!("precis {}", build_info::version_string());
    }
    Ok(())
}

/// Read the whole document from `file`, or from stdin for `None` and `-`.
async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "reading input file");
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read '{}'", path.display()))
        }
        _ => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// The summary followed by word and sentence counts.
fn render_outcome(outcome: &SummaryOutcome) -> String {
    format!(
        "{summary}\n\ninput:   {iw} words, {sc} sentences\nsummary: {sw} words, {sel} sentences\n",
        summary = outcome.summary,
        iw = outcome.input_words,
        sc = outcome.sentence_count,
        sw = outcome.summary_words,
        sel = outcome.selected_count,
    )
}

/// Ranked score table with selected sentences marked `*`.
fn render_explain(analysis: &Analysis<'_>) -> String {
    let mut out = String::new();
    let selected = analysis.selected().len();
    let _ = writeln!(out, "rank  score  pos  sentence");
    for (rank, scored) in analysis.ranked.iter().enumerate() {
        let mark = if rank < selected { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{mark}{:>3}  {:>5}  {:>3}  {}",
            rank + 1,
            scored.score,
            scored.position,
            scored.text
        );
    }

    let top: Vec<String> = analysis
        .frequencies
        .most_frequent()
        .into_iter()
        .take(5)
        .map(|(token, count)| format!("{token}={count}"))
        .collect();
    let _ = writeln!(out, "top words: {}\n", top.join(" "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use precis_config::ThemeMode;
    use precis_test_utils::config::{TestConfigBuilder, TestConfigFile};
    use precis_test_utils::documents;
    use precis_test_utils::tracing_setup::init_test_tracing;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses_summarize() {
        let cli = Cli::try_parse_from(["precis", "summarize", "doc.txt", "--json"]).unwrap();
        match cli.command {
            Commands::Summarize {
                file,
                json,
                explain,
            } => {
                assert_eq!(file, Some(PathBuf::from("doc.txt")));
                assert!(json);
                assert!(!explain);
            }
            _ => panic!("expected summarize"),
        }
        assert_eq!(cli.config, PathBuf::from("precis.toml"));
    }

    #[test]
    fn test_cli_verbosity_counts() {
        let cli = Cli::try_parse_from(["precis", "-vv", "count"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Count { file: None }));
    }

    #[test]
    fn test_render_outcome() {
        let outcome = SummaryRequest::new(documents::CAT_AND_DOG).unwrap().run();
        assert_eq!(
            render_outcome(&outcome),
            "The cat sat.\n\ninput:   9 words, 3 sentences\nsummary: 3 words, 1 sentences\n"
        );
    }

    #[test]
    fn test_render_explain_marks_selection() {
        let analysis = SummaryEngine::new().analyze(documents::CAT_AND_DOG);
        let table = render_explain(&analysis);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "rank  score  pos  sentence");
        assert_eq!(lines[1], "*  1      5    0  The cat sat");
        assert_eq!(lines[2], "   2      5    1  The cat ran");
        assert_eq!(lines[3], "   3      3    2  A dog barked.");
        assert!(lines[4].starts_with("top words: cat=2 the=2"));
    }

    #[tokio::test]
    async fn test_read_input_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.txt");
        tokio::fs::write(&path, documents::TITLED).await.unwrap();

        let text = read_input(Some(&path)).await.unwrap();
        assert_eq!(text, documents::TITLED);
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/doc.txt")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[tokio::test]
    async fn test_explain_analyzes_once_and_matches_plain_run() {
        let request = SummaryRequest::new(documents::ARTICLE).unwrap();
        let (plain, none) = summarize_request(&request, false).await.unwrap();
        assert!(none.is_none());

        let (explained, analysis) = summarize_request(&request, true).await.unwrap();
        let analysis = analysis.unwrap();
        assert_eq!(explained, plain);
        assert_eq!(explained.selected_count, analysis.selected().len());
        assert_eq!(explained.summary, analysis.render());
    }

    #[tokio::test]
    async fn test_cmd_config_with_file_on_disk() {
        init_test_tracing();
        let expected = TestConfigBuilder::new()
            .log_level("precis_core=trace")
            .theme(ThemeMode::Light)
            .build();
        let file = TestConfigFile::from_config(&expected).await;

        let config = AppConfig::load_or_default(&file.path).await.unwrap();
        assert_eq!(config, expected);
        cmd_config(&file.path, &config, false).unwrap();
        cmd_config(&file.path, &config, true).unwrap();
    }

    #[tokio::test]
    async fn test_invalid_config_file_is_reported() {
        init_test_tracing();
        let file = TestConfigFile::with_toml("[ui]\ntick_rate_ms = 0\n").await;
        let err = AppConfig::load_or_default(&file.path).await.unwrap_err();
        assert!(err.to_string().contains("tick_rate_ms"));
    }
}
