use std::path::PathBuf;

use anyhow::{Context, Result};

use timeline_sentiment::aggregate::{Series, SourceShare, Summary};

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const BAR_WIDTH: f64 = 50.0;

/// Where rendered charts go
#[derive(Debug, Clone)]
pub enum ChartOutput {
    Terminal,
    Directory(PathBuf),
}

impl ChartOutput {
    fn emit(&self, name: &str, chart: &str) -> Result<()> {
        match self {
            ChartOutput::Terminal => {
                println!("{chart}");
                Ok(())
            }
            ChartOutput::Directory(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create chart directory {dir:?}"))?;
                let path = dir.join(format!("{name}.txt"));
                tracing::info!("writing {name} chart to {path:?}");
                std::fs::write(&path, chart)
                    .with_context(|| format!("failed to write chart {path:?}"))
            }
        }
    }
}

pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|value| {
            let normalized = if range > 1e-10 {
                (value - min) / range
            } else {
                0.5
            };
            let index = (normalized * (BLOCKS.len() - 1) as f64) as usize;
            BLOCKS[index.min(BLOCKS.len() - 1)]
        })
        .collect()
}

/// One sparkline per series, over a shared time axis
pub fn line_chart(title: &str, series: &[&Series<u32>]) -> String {
    let mut chart = format!("{title}\n{}\n", "=".repeat(title.chars().count()));

    let label_width = series
        .iter()
        .map(|line| line.label.len())
        .max()
        .unwrap_or(0);
    for line in series {
        let values = line.values();
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                (min.min(*value), max.max(*value))
            });
        chart.push_str(&format!(
            "{:>label_width$} | {} [{min}..{max}]\n",
            line.label,
            sparkline(&values),
        ));
    }

    if let Some(first) = series.first() {
        if let (Some((start, _)), Some((end, _))) = (first.points.first(), first.points.last()) {
            chart.push_str(&format!(
                "{:>label_width$}   {} .. {}\n",
                "",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M"),
            ));
        }
    }
    chart
}

/// Source shares as horizontal bars, standing in for a pie chart
pub fn share_chart(title: &str, shares: &[SourceShare]) -> String {
    let mut chart = format!("{title}\n{}\n", "=".repeat(title.chars().count()));

    let label_width = shares
        .iter()
        .map(|share| share.source.chars().count())
        .max()
        .unwrap_or(0);
    for share in shares {
        let bar = "#".repeat((share.percent / 100.0 * BAR_WIDTH).round() as usize);
        chart.push_str(&format!(
            "{:>label_width$} | {bar} {:.2}%\n",
            share.source, share.percent
        ));
    }
    chart
}

pub fn render(summary: &Summary, output: &ChartOutput) -> Result<()> {
    if summary.length.points.is_empty() {
        tracing::warn!("no posts, skipping charts");
        return Ok(());
    }

    output.emit(
        "length",
        &line_chart("Post length over time", &[&summary.length]),
    )?;
    output.emit(
        "engagement",
        &line_chart(
            "Likes and retweets over time",
            &[&summary.likes, &summary.shares],
        ),
    )?;
    output.emit("sources", &share_chart("Sources", &summary.sources))
}
