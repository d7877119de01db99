use std::{sync::OnceLock, time::Duration};

use async_trait::async_trait;
use regex::Regex;
use reqwest::{header::AUTHORIZATION, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::{
    core::{DateTime, Post, PostId, TimelineCount},
    error::Error,
    fetcher::UserTimeline,
    oauth::{Credentials, Nonce},
};

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1/";

const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// One status object as served by the user timeline endpoint
#[derive(Debug, Deserialize)]
pub struct StatusRecord {
    pub id: PostId,
    pub text: Option<String>,
    pub full_text: Option<String>,
    pub created_at: String,
    pub source: String,
    pub favorite_count: u64,
    pub retweet_count: u64,
}

fn source_anchor() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| Regex::new(r"(?s)^\s*<a\b[^>]*>(.*)</a>\s*$").unwrap())
}

/// Client name out of the `<a href=..>name</a>` markup the platform reports
pub fn parse_source(raw: &str) -> String {
    match source_anchor().captures(raw).and_then(|caps| caps.get(1)) {
        Some(name) => name.as_str().trim().to_owned(),
        None => raw.trim().to_owned(),
    }
}

pub fn parse_created_at(raw: &str) -> Result<DateTime, Error> {
    chrono::DateTime::parse_from_str(raw.trim(), CREATED_AT_FORMAT)
        .map(|moment| moment.with_timezone(&chrono::Utc))
        .map_err(|err| Error::Decode(format!("bad created_at {raw:?}: {err}")))
}

impl TryFrom<StatusRecord> for Post {
    type Error = Error;

    fn try_from(record: StatusRecord) -> Result<Self, Self::Error> {
        let text = record
            .full_text
            .or(record.text)
            .ok_or_else(|| Error::Decode(format!("status {} carries no text", record.id)))?;

        Ok(Post {
            post_id: record.id,
            created_at: parse_created_at(&record.created_at)?,
            source: parse_source(&record.source),
            like_count: record.favorite_count,
            share_count: record.retweet_count,
            text,
        })
    }
}

pub fn parse_timeline(body: &[u8]) -> Result<Vec<Post>, Error> {
    serde_json::from_slice::<Vec<StatusRecord>>(body)?
        .into_iter()
        .map(Post::try_from)
        .collect()
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: i64,
    message: String,
}

const RATE_LIMIT_CODES: [i64; 1] = [88];
const AUTHENTICATION_CODES: [i64; 3] = [32, 89, 215];

/// Map a non-success response onto the error taxonomy
pub fn classify_failure(status: StatusCode, body: &str) -> Error {
    let details = serde_json::from_str::<ErrorPayload>(body)
        .map(|payload| payload.errors)
        .unwrap_or_default();
    let message = match details.first() {
        Some(detail) => detail.message.clone(),
        None if body.trim().is_empty() => status.to_string(),
        None => body.trim().to_owned(),
    };
    let has_code = |codes: &[i64]| details.iter().any(|detail| codes.contains(&detail.code));

    if status == StatusCode::TOO_MANY_REQUESTS || has_code(&RATE_LIMIT_CODES) {
        Error::RateLimit(message)
    } else if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || has_code(&AUTHENTICATION_CODES)
    {
        Error::Authentication(message)
    } else {
        Error::Api { status, message }
    }
}

/// Authenticated client, constructed once and passed to the fetch
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    timeline_url: Url,
    credentials: Credentials,
}

impl TwitterClient {
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self, Error> {
        let timeline_url = Url::parse(base_url)?.join("statuses/user_timeline.json")?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            timeline_url,
            credentials,
        })
    }

    pub fn timeline_url(&self) -> &Url {
        &self.timeline_url
    }
}

#[async_trait]
impl UserTimeline for TwitterClient {
    async fn user_timeline(
        &self,
        screen_name: &str,
        count: TimelineCount,
    ) -> Result<Vec<Post>, Error> {
        let params = vec![
            ("count".to_owned(), count.to_string()),
            ("screen_name".to_owned(), screen_name.to_owned()),
            ("tweet_mode".to_owned(), "extended".to_owned()),
        ];
        let authorization = self.credentials.authorization_header(
            "GET",
            &self.timeline_url,
            &params,
            &Nonce::generate(),
        )?;

        tracing::debug!("GET {}", self.timeline_url);
        let response = self
            .http
            .get(self.timeline_url.clone())
            .query(&params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let err = classify_failure(status, &body);
            tracing::debug!("user timeline request failed with {status}");
            return Err(err);
        }

        parse_timeline(&response.bytes().await?)
    }
}
