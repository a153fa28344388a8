use std::io::{self, Write};

use crossterm::style::{Color, Stylize};

use tubemood_analysis::{Bucket, BucketCounts};

pub const CHART_TITLE: &str = "Sentiment Analysis of Comments";

const BAR_WIDTH: usize = 40;

fn bar_color(bucket: Bucket) -> Color {
    match bucket {
        Bucket::Positive => Color::Blue,
        Bucket::Negative => Color::Red,
        Bucket::Neutral => Color::Grey,
    }
}

/// Bar length for `count`, scaled so the largest category fills `BAR_WIDTH`.
/// Non-zero counts always get at least one cell.
fn bar_len(count: usize, max: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    (count * BAR_WIDTH).div_ceil(max).clamp(1, BAR_WIDTH)
}

/// Draw a horizontal bar per category (Positive, Negative, Neutral).
pub fn render_bar_chart<W: Write>(out: &mut W, counts: &BucketCounts, color: bool) -> io::Result<()> {
    let max = Bucket::ALL.iter().map(|b| counts.get(*b)).max().unwrap_or(0);

    writeln!(out, "{CHART_TITLE}")?;
    writeln!(out, "{}", "─".repeat(CHART_TITLE.chars().count()))?;
    for bucket in Bucket::ALL {
        let count = counts.get(bucket);
        let bar = "█".repeat(bar_len(count, max));
        if color {
            writeln!(out, "{:<9}│{} {count}", bucket.label(), bar.with(bar_color(bucket)))?;
        } else {
            writeln!(out, "{:<9}│{bar} {count}", bucket.label())?;
        }
    }
    writeln!(out, "{:<9}└ comment count", "Sentiment")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(counts: BucketCounts) -> Vec<String> {
        let mut out = Vec::new();
        render_bar_chart(&mut out, &counts, false).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn largest_category_fills_the_width() {
        let lines = render(BucketCounts {
            positive: 10,
            negative: 5,
            neutral: 0,
        });
        assert_eq!(lines[0], CHART_TITLE);
        assert_eq!(lines[2], format!("Positive │{} 10", "█".repeat(40)));
        assert_eq!(lines[3], format!("Negative │{} 5", "█".repeat(20)));
        assert_eq!(lines[4], "Neutral  │ 0");
    }

    #[test]
    fn small_counts_stay_visible() {
        assert_eq!(bar_len(1, 1000), 1);
        assert_eq!(bar_len(0, 1000), 0);
        assert_eq!(bar_len(0, 0), 0);
    }

    #[test]
    fn categories_render_in_fixed_order() {
        let lines = render(BucketCounts {
            positive: 1,
            negative: 2,
            neutral: 3,
        });
        let labels: Vec<&str> = lines[2..5]
            .iter()
            .map(|line| line.split('│').next().unwrap().trim())
            .collect();
        assert_eq!(labels, vec!["Positive", "Negative", "Neutral"]);
    }

    #[test]
    fn colored_output_still_carries_counts() {
        let mut out = Vec::new();
        let counts = BucketCounts {
            positive: 3,
            negative: 0,
            neutral: 1,
        };
        render_bar_chart(&mut out, &counts, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" 3\n") && text.contains(" 1\n"));
    }
}
