use std::fmt;

use crate::error::Error;

pub type DateTime = chrono::DateTime<chrono::Utc>;
pub type PostId = u64;

/// Largest page the user timeline endpoint serves in one request
pub const MAX_TIMELINE_COUNT: u16 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    pub text: String,
    pub created_at: DateTime,
    pub source: String,
    pub like_count: u64,
    pub share_count: u64,
}

/// Number of posts to request, always within `1..=MAX_TIMELINE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimelineCount(u16);

impl TimelineCount {
    pub fn new(count: u16) -> Result<Self, Error> {
        if (1..=MAX_TIMELINE_COUNT).contains(&count) {
            Ok(Self(count))
        } else {
            Err(Error::InvalidCount {
                requested: count,
                max: MAX_TIMELINE_COUNT,
            })
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimelineCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
