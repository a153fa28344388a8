mod pipeline;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use tubemood_config::{AppConfig, DEFAULT_CONFIG_PATH};
use tubemood_report::TerminalReport;
use tubemood_youtube::YoutubeClient;

use crate::pipeline::{Outcome, Pipeline};

#[derive(Debug, Parser)]
#[command(
    name = "tubemood",
    version,
    about = "Sentiment snapshot of a YouTube video's comments",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Log at debug level (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    analyze: AnalyzeArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, filter and score the comments of one video (default).
    Analyze(AnalyzeArgs),
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
struct AnalyzeArgs {
    /// Video URL (youtube.com/watch?v=… or youtu.be/…). Prompted for when omitted.
    url: Option<String>,
    /// Where to write the filtered comments.
    #[arg(long, value_name = "PATH")]
    output: Option<String>,
    /// Stop fetching after this many comments.
    #[arg(long, value_name = "N")]
    max_comments: Option<usize>,
    /// Emoji ratio a comment must exceed to be kept.
    #[arg(long, value_name = "RATIO")]
    threshold: Option<f64>,
    /// Print the summary as JSON instead of drawing the chart.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    no_chart: bool,
}

impl AnalyzeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.report.output_path = output.clone();
        }
        if let Some(max) = self.max_comments {
            config.youtube.max_comments = max;
        }
        if let Some(threshold) = self.threshold {
            config.filter.emoji_ratio_threshold = threshold;
        }
        if self.json || self.no_chart {
            config.report.show_chart = false;
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)?;
    init_logging(&config.telemetry.log_level, cli.verbose);

    match cli.command {
        Some(Commands::Init { force }) => run_init(&cli.config, force),
        Some(Commands::Analyze(args)) => run_analyze(&mut config, &args),
        None => run_analyze(&mut config, &cli.analyze),
    }
}

fn init_logging(level: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    AppConfig::default().save_to(path)?;
    println!("wrote default config to {}", path.display());
    println!("set YOUTUBE_API_KEY (or API_KEY) in your environment or .env file");
    Ok(())
}

fn run_analyze(config: &mut AppConfig, args: &AnalyzeArgs) -> Result<()> {
    args.apply(config);
    config.validate()?;

    let url = match &args.url {
        Some(url) => url.clone(),
        None => prompt_for_url(args.json)?,
    };

    let client = YoutubeClient::new(&config.youtube)?;
    let pipeline = Pipeline::from_config(client, config);

    // With --json, stdout carries the JSON document and nothing else.
    let outcome = if args.json {
        let mut report = TerminalReport::new(&config.report, io::stderr(), false);
        pipeline.run(&url, &mut report, &mut io::stderr())?
    } else {
        let mut report = TerminalReport::stdout(&config.report);
        pipeline.run(&url, &mut report, &mut io::stdout())?
    };

    print_outcome(&outcome, args.json, &mut io::stdout())
}

fn print_outcome<W: Write>(outcome: &Outcome, as_json: bool, out: &mut W) -> Result<()> {
    match outcome {
        Outcome::Halted(halt) if as_json => {
            let rendered = json!({ "halted": halt.to_string() });
            writeln!(out, "{}", serde_json::to_string_pretty(&rendered)?)?;
        }
        Outcome::Halted(halt) => writeln!(out, "{halt}")?,
        Outcome::Completed(run) if as_json => {
            let rendered = json!({
                "video_id": run.video_id,
                "channel_id": run.video.channel_id,
                "title": run.video.title,
                "fetched": run.fetched,
                "filtered": run.filtered,
                "summary": run.summary,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&rendered)?)?;
        }
        Outcome::Completed(_) => {}
    }
    Ok(())
}

fn prompt_for_url(as_json: bool) -> Result<String> {
    const PROMPT: &str = "Enter YouTube Video URL: ";
    if as_json {
        eprint!("{PROMPT}");
        io::stderr().flush()?;
    } else {
        print!("{PROMPT}");
        io::stdout().flush()?;
    }
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tubemood_analysis::{Bucket, BucketCounts, SentimentSummary, resolve_video_id};
    use tubemood_youtube::VideoInfo;

    use crate::pipeline::{Halt, RunReport};

    fn completed() -> Outcome {
        Outcome::Completed(RunReport {
            video_id: resolve_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            video: VideoInfo {
                channel_id: "UC_owner".to_string(),
                title: "Test upload".to_string(),
            },
            fetched: 7,
            filtered: 5,
            summary: SentimentSummary {
                average_polarity: 0.25,
                verdict: Bucket::Positive,
                counts: BucketCounts {
                    positive: 3,
                    negative: 1,
                    neutral: 1,
                },
            },
        })
    }

    #[test]
    fn bare_url_runs_analyze() {
        let cli = Cli::try_parse_from(["tubemood", "https://youtu.be/dQw4w9WgXcQ"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.analyze.url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn analyze_subcommand_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "tubemood",
            "analyze",
            "https://youtu.be/dQw4w9WgXcQ",
            "--max-comments",
            "50",
            "--threshold",
            "0.8",
            "--output",
            "out.txt",
            "--json",
        ])
        .unwrap();
        let Some(Commands::Analyze(args)) = cli.command else {
            panic!("expected analyze subcommand");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.youtube.max_comments, 50);
        assert!((config.filter.emoji_ratio_threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.report.output_path, "out.txt");
        assert!(!config.report.show_chart, "--json replaces the chart");
    }

    #[test]
    fn init_subcommand_parses() {
        let cli = Cli::try_parse_from(["tubemood", "init", "--force", "--config", "x.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
        assert_eq!(cli.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn json_outcome_is_a_single_parseable_document() {
        let mut out = Vec::new();
        print_outcome(&completed(), true, &mut out).unwrap();

        let doc: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["video_id"], "dQw4w9WgXcQ");
        assert_eq!(doc["channel_id"], "UC_owner");
        assert_eq!(doc["filtered"], 5);
        assert_eq!(doc["summary"]["verdict"], "positive");
        assert_eq!(doc["summary"]["counts"]["positive"], 3);
    }

    #[test]
    fn json_halt_is_still_json() {
        let mut out = Vec::new();
        print_outcome(&Outcome::Halted(Halt::InvalidUrl), true, &mut out).unwrap();
        let doc: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["halted"], "Invalid YouTube URL");
    }

    #[test]
    fn plain_outcome_prints_only_halts() {
        let mut out = Vec::new();
        print_outcome(&completed(), false, &mut out).unwrap();
        assert!(out.is_empty(), "progress already went to the terminal");

        print_outcome(&Outcome::Halted(Halt::NoComments), false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No comments found for this video.\n");
    }

    #[test]
    fn no_overrides_keep_config_values() {
        let mut config = AppConfig::default();
        AnalyzeArgs::default().apply(&mut config);
        assert_eq!(config.youtube.max_comments, 600);
        assert!(config.report.show_chart);
    }
}
