//! One end-to-end run: URL → comments → filter → scores → verdict.

use std::fmt;
use std::io::Write;

use anyhow::Result;
use tracing::{info, warn};

use tubemood_analysis::{
    AnalysisError, EmojiCounter, LexiconScorer, PolarityScorer, RelevanceFilter,
    SentimentClassifier, SentimentSummary, UnicodeEmojiCounter, VideoId, resolve_video_id,
    summarize,
};
use tubemood_config::AppConfig;
use tubemood_report::ReportSink;
use tubemood_youtube::{CommentSource, VideoInfo, YoutubeError, fetch_comments};

/// Reasons a run stops early without producing a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    InvalidUrl,
    VideoNotFound(String),
    NoComments,
    NoRelevantComments,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::InvalidUrl => f.write_str("Invalid YouTube URL"),
            Halt::VideoNotFound(_) => f.write_str("Video not found or invalid video ID."),
            Halt::NoComments => f.write_str("No comments found for this video."),
            Halt::NoRelevantComments => {
                f.write_str("Insufficient data: no comments survived relevance filtering.")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub video_id: VideoId,
    pub video: VideoInfo,
    pub fetched: usize,
    pub filtered: usize,
    pub summary: SentimentSummary,
}

#[derive(Debug)]
pub enum Outcome {
    Completed(RunReport),
    Halted(Halt),
}

pub struct Pipeline<S, E, P> {
    source: S,
    filter: RelevanceFilter<E>,
    classifier: SentimentClassifier<P>,
    max_comments: usize,
    preview_count: usize,
}

impl<S: CommentSource> Pipeline<S, UnicodeEmojiCounter, LexiconScorer> {
    pub fn from_config(source: S, config: &AppConfig) -> Self {
        Self::new(
            source,
            RelevanceFilter::new(config.filter.emoji_ratio_threshold),
            SentimentClassifier::new(LexiconScorer::new()),
            config.youtube.max_comments,
            config.report.preview_count,
        )
    }
}

impl<S, E, P> Pipeline<S, E, P>
where
    S: CommentSource,
    E: EmojiCounter,
    P: PolarityScorer,
{
    pub fn new(
        source: S,
        filter: RelevanceFilter<E>,
        classifier: SentimentClassifier<P>,
        max_comments: usize,
        preview_count: usize,
    ) -> Self {
        Self {
            source,
            filter,
            classifier,
            max_comments,
            preview_count,
        }
    }

    /// Run every stage for `url`, echoing progress to `out` and handing the
    /// results to `sink`.
    ///
    /// Transport and API failures are returned as errors; the expected
    /// dead ends (bad URL, unknown video, nothing to score) come back as
    /// [`Outcome::Halted`].
    pub fn run<R, W>(&self, url: &str, sink: &mut R, out: &mut W) -> Result<Outcome>
    where
        R: ReportSink,
        W: Write,
    {
        let Some(video_id) = resolve_video_id(url) else {
            return Ok(Outcome::Halted(Halt::InvalidUrl));
        };
        writeln!(out, "video id: {video_id}")?;

        let video = match self.source.video(video_id.as_str()) {
            Ok(video) => video,
            Err(YoutubeError::VideoNotFound(id)) => {
                return Ok(Outcome::Halted(Halt::VideoNotFound(id)));
            }
            Err(err) => return Err(err.into()),
        };
        writeln!(out, "channel id: {}", video.channel_id)?;
        if !video.title.is_empty() {
            writeln!(out, "title: {}", video.title)?;
        }

        writeln!(out, "Fetching Comments...")?;
        let comments = fetch_comments(
            &self.source,
            video_id.as_str(),
            &video.channel_id,
            self.max_comments,
        )?;
        if comments.is_empty() {
            return Ok(Outcome::Halted(Halt::NoComments));
        }
        writeln!(out, "{:?}", preview(&comments, self.preview_count))?;

        let relevant = self.filter.filter(&comments);
        if relevant.is_empty() {
            warn!(fetched = comments.len(), "every fetched comment was filtered out");
            return Ok(Outcome::Halted(Halt::NoRelevantComments));
        }
        writeln!(out, "{:?}", preview(&relevant, self.preview_count))?;

        sink.persist(&relevant)?;

        let classification = self.classifier.classify(&relevant);
        writeln!(
            out,
            "Polarity Scores: {:?}",
            preview(&classification.scores, self.preview_count)
        )?;

        let summary = match summarize(&classification) {
            Ok(summary) => summary,
            Err(AnalysisError::InsufficientData) => {
                return Ok(Outcome::Halted(Halt::NoRelevantComments));
            }
        };
        writeln!(out, "Average Polarity: {}", summary.average_polarity)?;
        writeln!(out, "{}", summary.verdict_sentence())?;
        info!(
            video_id = %video_id,
            verdict = %summary.verdict,
            average = summary.average_polarity,
            "analysis complete"
        );

        sink.render(&summary)?;

        Ok(Outcome::Completed(RunReport {
            video_id,
            video,
            fetched: comments.len(),
            filtered: relevant.len(),
            summary,
        }))
    }
}

fn preview<T>(items: &[T], count: usize) -> &[T] {
    &items[..items.len().min(count)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tubemood_analysis::{Bucket, BucketCounts};
    use tubemood_config::{ReportConfig, YoutubeConfig};
    use tubemood_report::{ReportError, TerminalReport};
    use tubemood_youtube::{CommentPage, RawComment, YoutubeClient};

    const OWNER: &str = "UC_owner";

    struct FakeSource {
        found: bool,
        comments: Vec<(&'static str, &'static str)>,
        fail: bool,
    }

    impl FakeSource {
        fn with_comments(comments: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                found: true,
                comments,
                fail: false,
            }
        }
    }

    impl CommentSource for FakeSource {
        fn video(&self, video_id: &str) -> Result<VideoInfo, YoutubeError> {
            if !self.found {
                return Err(YoutubeError::VideoNotFound(video_id.to_string()));
            }
            Ok(VideoInfo {
                channel_id: OWNER.to_string(),
                title: "Test upload".to_string(),
            })
        }

        fn comment_page(
            &self,
            _video_id: &str,
            _page_token: Option<&str>,
        ) -> Result<CommentPage, YoutubeError> {
            if self.fail {
                return Err(YoutubeError::Api {
                    status: 403,
                    message: "quota exceeded".to_string(),
                });
            }
            Ok(CommentPage {
                comments: self
                    .comments
                    .iter()
                    .map(|(author, text)| RawComment {
                        text: text.to_string(),
                        author_channel_id: Some(author.to_string()),
                    })
                    .collect(),
                next_page_token: None,
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        persisted: Option<Vec<String>>,
        rendered: Option<SentimentSummary>,
    }

    impl ReportSink for RecordingSink {
        fn persist(&mut self, comments: &[String]) -> Result<(), ReportError> {
            self.persisted = Some(comments.to_vec());
            Ok(())
        }

        fn render(&mut self, summary: &SentimentSummary) -> Result<(), ReportError> {
            self.rendered = Some(summary.clone());
            Ok(())
        }
    }

    fn fixed_scores(text: &str) -> f64 {
        match text {
            "love it" => 0.8,
            "hated it" => -0.6,
            _ => 0.0,
        }
    }

    fn pipeline(source: FakeSource) -> Pipeline<FakeSource, UnicodeEmojiCounter, fn(&str) -> f64> {
        Pipeline::new(
            source,
            RelevanceFilter::new(0.65),
            SentimentClassifier::new(fixed_scores as fn(&str) -> f64),
            600,
            5,
        )
    }

    const URL: &str = "https://youtube.com/watch?v=dQw4w9WgXcQ";

    #[test]
    fn full_run_filters_scores_and_reports() {
        let source = FakeSource::with_comments(vec![
            ("UC_a", "Love it"),
            ("UC_b", "check this out http://spam.example/x"),
            (OWNER, "thanks all for watching"),
            ("UC_c", "hated it"),
            ("UC_d", "😀😀😀"),
            ("UC_e", "  First  "),
        ]);
        let mut sink = RecordingSink::default();
        let mut out = Vec::new();

        let outcome = pipeline(source).run(URL, &mut sink, &mut out).unwrap();

        let report = match outcome {
            Outcome::Completed(report) => report,
            other => panic!("expected a completed run, got {other:?}"),
        };
        assert_eq!(report.video_id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(report.fetched, 5, "uploader comment is excluded at fetch time");
        assert_eq!(report.filtered, 3);
        assert_eq!(
            report.summary.counts,
            BucketCounts {
                positive: 1,
                negative: 1,
                neutral: 1
            }
        );
        assert_eq!(report.summary.verdict, Bucket::Positive);
        assert_eq!(
            report.summary.counts.total(),
            report.filtered,
            "every filtered comment is counted once"
        );

        assert_eq!(
            sink.persisted.as_deref(),
            Some(&["love it".to_string(), "hated it".to_string(), "first".to_string()][..])
        );
        assert_eq!(sink.rendered.as_ref(), Some(&report.summary));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("video id: dQw4w9WgXcQ"));
        assert!(text.contains("channel id: UC_owner"));
        assert!(text.contains("The Video has got a Positive response"));
    }

    #[test]
    fn invalid_url_halts_before_any_request() {
        let mut source = FakeSource::with_comments(vec![]);
        source.fail = true;
        let mut sink = RecordingSink::default();
        let outcome = pipeline(source)
            .run("not a url", &mut sink, &mut Vec::new())
            .unwrap();
        assert!(matches!(outcome, Outcome::Halted(Halt::InvalidUrl)));
        assert!(sink.persisted.is_none());
    }

    #[test]
    fn invalid_url_halts_even_without_an_api_key() {
        let client = YoutubeClient::new(&YoutubeConfig::default()).unwrap();
        let pipeline = Pipeline::from_config(client, &AppConfig::default());
        let outcome = pipeline
            .run("not a url", &mut RecordingSink::default(), &mut Vec::new())
            .unwrap();
        assert!(matches!(outcome, Outcome::Halted(Halt::InvalidUrl)));
    }

    #[test]
    fn valid_url_without_an_api_key_is_fatal() {
        let client = YoutubeClient::new(&YoutubeConfig::default()).unwrap();
        let pipeline = Pipeline::from_config(client, &AppConfig::default());
        let err = pipeline
            .run(URL, &mut RecordingSink::default(), &mut Vec::new())
            .unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<YoutubeError>(),
                Some(YoutubeError::MissingApiKey)
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn multi_line_comments_take_one_line_each_in_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ytcomments.txt");
        let config = ReportConfig {
            output_path: path.display().to_string(),
            show_chart: false,
            ..ReportConfig::default()
        };
        let source = FakeSource::with_comments(vec![
            ("UC_a", "Great video\nloved the ending"),
            ("UC_b", "nice\r\n"),
        ]);
        let mut report = TerminalReport::new(&config, Vec::new(), false);

        let outcome = pipeline(source).run(URL, &mut report, &mut Vec::new()).unwrap();
        let Outcome::Completed(run) = outcome else {
            panic!("expected a completed run");
        };

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), run.filtered);
        assert_eq!(written, "great video loved the ending\nnice\n");
    }

    #[test]
    fn unknown_video_halts() {
        let mut source = FakeSource::with_comments(vec![]);
        source.found = false;
        let outcome = pipeline(source)
            .run(URL, &mut RecordingSink::default(), &mut Vec::new())
            .unwrap();
        match outcome {
            Outcome::Halted(halt) => {
                assert_eq!(halt, Halt::VideoNotFound("dQw4w9WgXcQ".to_string()));
                assert_eq!(halt.to_string(), "Video not found or invalid video ID.");
            }
            other => panic!("expected halt, got {other:?}"),
        }
    }

    #[test]
    fn no_comments_halts() {
        let source = FakeSource::with_comments(vec![(OWNER, "only the uploader spoke")]);
        let outcome = pipeline(source)
            .run(URL, &mut RecordingSink::default(), &mut Vec::new())
            .unwrap();
        assert!(matches!(outcome, Outcome::Halted(Halt::NoComments)));
    }

    #[test]
    fn nothing_relevant_halts_without_persisting() {
        let source = FakeSource::with_comments(vec![
            ("UC_a", "🔥🔥🔥"),
            ("UC_b", "https://spam.example"),
        ]);
        let mut sink = RecordingSink::default();
        let outcome = pipeline(source).run(URL, &mut sink, &mut Vec::new()).unwrap();
        assert!(matches!(outcome, Outcome::Halted(Halt::NoRelevantComments)));
        assert!(sink.persisted.is_none(), "halted runs produce no report");
        assert!(sink.rendered.is_none());
    }

    #[test]
    fn transport_failures_are_fatal() {
        let mut source = FakeSource::with_comments(vec![("UC_a", "love it")]);
        source.fail = true;
        let err = pipeline(source)
            .run(URL, &mut RecordingSink::default(), &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("quota exceeded"), "got {err}");
    }

    #[test]
    fn preview_is_bounded() {
        let items = [1, 2, 3];
        assert_eq!(preview(&items, 5), &[1, 2, 3]);
        assert_eq!(preview(&items, 2), &[1, 2]);
        assert!(preview(&items, 0).is_empty());
    }
}
