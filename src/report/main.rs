/// Text rendering of the summary series
mod charts;

use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context;
use clap::Parser;
use confique::Config;
use tracing_subscriber::EnvFilter;

use charts::ChartOutput;
use timeline_sentiment::{
    aggregate::Summary,
    breakdown::SentimentBreakdown,
    core::TimelineCount,
    fetcher,
    oauth::Credentials,
    sentiment::{Classifier, PolarityMapping},
    table::PostTable,
    twitter_api::TwitterClient,
    Error,
};

#[derive(Config)]
struct Configuration {
    #[config(env = "TIMELINE_SCREEN_NAME", default = "business")]
    screen_name: String,
    #[config(env = "TIMELINE_COUNT", default = 150)]
    count: u16,
    #[config(env = "TWITTER_API_URL", default = "https://api.twitter.com/1.1/")]
    api_base_url: String,
    #[config(env = "REQUEST_TIMEOUT_SECS", default = 30)]
    request_timeout_secs: u64,
    #[config(env = "POLARITY_MAPPING", default = "legacy")]
    polarity_mapping: PolarityMapping,
    #[config(env = "RENDER_CHARTS", default = true)]
    charts: bool,
    #[config(env = "CHART_DIR")]
    chart_dir: Option<PathBuf>,
    #[config(nested)]
    credentials: CredentialsConfiguration,
}

#[derive(Config)]
struct CredentialsConfiguration {
    #[config(env = "TWITTER_CONSUMER_KEY")]
    consumer_key: String,
    #[config(env = "TWITTER_CONSUMER_SECRET")]
    consumer_secret: String,
    #[config(env = "TWITTER_ACCESS_TOKEN")]
    access_token: String,
    #[config(env = "TWITTER_ACCESS_SECRET")]
    access_secret: String,
}

impl From<CredentialsConfiguration> for Credentials {
    fn from(value: CredentialsConfiguration) -> Self {
        Credentials {
            consumer_key: value.consumer_key,
            consumer_secret: value.consumer_secret,
            access_token: value.access_token,
            access_secret: value.access_secret,
        }
    }
}

#[derive(clap::Parser, Debug)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Account whose timeline is analysed
    #[arg(short, long)]
    screen_name: Option<String>,
    /// Number of recent posts, at most 200
    #[arg(short = 'n', long)]
    count: Option<u16>,
    /// `legacy` or `signed`
    #[arg(long)]
    polarity_mapping: Option<PolarityMapping>,
    /// Write charts as files into this directory instead of stdout
    #[arg(long)]
    chart_dir: Option<PathBuf>,
    #[arg(long)]
    no_charts: bool,
}

fn print_summary(table: &PostTable, summary: &Summary) {
    match summary.mean_length {
        Some(mean) => println!("The length's average in posts: {mean}"),
        None => println!("The length's average in posts: n/a"),
    }

    if let Some(row) = summary.most_liked.map(|index| &table.rows()[index]) {
        println!("The post with more likes is: \n{}", row.post.text);
        println!("Number of likes: {}", row.post.like_count);
        println!("{} characters.\n", row.length);
    }
    if let Some(row) = summary.most_shared.map(|index| &table.rows()[index]) {
        println!("The post with more retweets is: \n{}", row.post.text);
        println!("Number of retweets: {}", row.post.share_count);
        println!("{} characters.\n", row.length);
    }

    println!("Creation of content sources:");
    for share in &summary.sources {
        println!("* {}", share.source);
    }
    println!();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Configuration::builder()
        .file(&args.config)
        .env()
        .load()
        .context("failed to load configuration")?;

    let screen_name = args.screen_name.unwrap_or(config.screen_name);
    let count = TimelineCount::new(args.count.unwrap_or(config.count))?;
    let mapping = args.polarity_mapping.unwrap_or(config.polarity_mapping);
    let skip_charts = args.no_charts || !config.charts;
    let chart_output = match (skip_charts, args.chart_dir.or(config.chart_dir)) {
        (true, _) => None,
        (false, Some(dir)) => Some(ChartOutput::Directory(dir)),
        (false, None) => Some(ChartOutput::Terminal),
    };
    tracing::info!("analysing {count} posts of {screen_name} with {mapping} polarity mapping");

    let client = TwitterClient::new(
        &config.api_base_url,
        config.credentials.into(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let posts = fetcher::fetch_posts(&client, &screen_name, count).await?;

    println!("Number of posts extracted: {}.\n", posts.len());
    println!("5 recent posts:\n");
    for post in posts.iter().take(5) {
        println!("{}\n", post.text);
    }

    let table = PostTable::from_posts(posts);
    println!("{}", table.preview(10));

    let summary = Summary::compute(&table);
    print_summary(&table, &summary);
    if let Some(output) = &chart_output {
        charts::render(&summary, output)?;
    }

    let classified = table.classify(&Classifier::new(mapping));
    println!("{}", classified.preview(10));

    let breakdown = SentimentBreakdown::compute(&classified)?;
    print!("{breakdown}");

    Ok(())
}

/// Usage errors never share a code with the failures reported by `run`
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };
    tracing::info!("Run with args {args:?}");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(err.downcast_ref::<Error>().map_or(1, Error::exit_code))
        }
    }
}
