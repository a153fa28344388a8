//! Output side of a run: the filtered-comment file and the category chart.

mod chart;
mod file;

use std::io::{self, IsTerminal, Stdout, Write};
use std::path::PathBuf;

use thiserror::Error;

use tubemood_analysis::SentimentSummary;
use tubemood_config::ReportConfig;

pub use chart::{CHART_TITLE, render_bar_chart};
pub use file::write_comments;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to render chart: {0}")]
    Render(#[from] io::Error),
}

/// Where the results of a run end up.
pub trait ReportSink {
    /// Store the filtered comments, replacing any earlier run's output.
    fn persist(&mut self, comments: &[String]) -> Result<(), ReportError>;

    /// Show the per-category counts.
    fn render(&mut self, summary: &SentimentSummary) -> Result<(), ReportError>;
}

/// Writes comments to a file and draws the chart on a terminal stream.
pub struct TerminalReport<W: Write> {
    output_path: PathBuf,
    show_chart: bool,
    color: bool,
    out: W,
}

impl TerminalReport<Stdout> {
    pub fn stdout(config: &ReportConfig) -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self::new(config, out, color)
    }
}

impl<W: Write> TerminalReport<W> {
    pub fn new(config: &ReportConfig, out: W, color: bool) -> Self {
        Self {
            output_path: PathBuf::from(&config.output_path),
            show_chart: config.show_chart,
            color,
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TerminalReport<W> {
    fn persist(&mut self, comments: &[String]) -> Result<(), ReportError> {
        write_comments(&self.output_path, comments)?;
        writeln!(self.out, "Comments stored successfully!")?;
        Ok(())
    }

    fn render(&mut self, summary: &SentimentSummary) -> Result<(), ReportError> {
        if !self.show_chart {
            return Ok(());
        }
        render_bar_chart(&mut self.out, &summary.counts, self.color)?;
        Ok(())
    }
}
