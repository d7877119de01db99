use async_trait::async_trait;

use crate::{
    core::{Post, TimelineCount},
    error::Error,
};

/// Source of an account's most recent posts, newest first
#[async_trait]
pub trait UserTimeline {
    async fn user_timeline(
        &self,
        screen_name: &str,
        count: TimelineCount,
    ) -> Result<Vec<Post>, Error>;
}

/// Fetch at most `count` posts of `screen_name`.
///
/// Order is kept as returned by the platform. Errors are not retried.
pub async fn fetch_posts(
    timeline: &impl UserTimeline,
    screen_name: &str,
    count: TimelineCount,
) -> Result<Vec<Post>, Error> {
    tracing::info!("fetching {count} posts of {screen_name}");

    let mut posts = timeline.user_timeline(screen_name, count).await?;
    if posts.len() > count.get() as usize {
        tracing::warn!(
            "platform returned {} posts for {count} requested, dropping the surplus",
            posts.len()
        );
        posts.truncate(count.get() as usize);
    }

    tracing::info!("fetched {} posts of {screen_name}", posts.len());
    Ok(posts)
}
