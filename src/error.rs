use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("authentication rejected by platform: {0}")]
    Authentication(String),
    #[error("request throttled by platform: {0}")]
    RateLimit(String),
    #[error("network failure")]
    Network(#[source] reqwest::Error),
    #[error("there are no posts to compute percentages over")]
    ZeroPosts,
    #[error("requested {requested} posts, but count must be within 1..={max}")]
    InvalidCount { requested: u16, max: u16 },
    #[error("platform answered {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("malformed platform response: {0}")]
    Decode(String),
    #[error("failed to sign request: {0}")]
    Signing(String),
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Process exit code reported for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Authentication(_) => 2,
            Error::RateLimit(_) => 3,
            Error::Network(_) => 4,
            Error::ZeroPosts => 5,
            Error::InvalidCount { .. }
            | Error::Api { .. }
            | Error::Decode(_)
            | Error::Signing(_)
            | Error::InvalidUrl(_) => 1,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            Error::Authentication("expired".to_owned()).exit_code(),
            Error::RateLimit("slow down".to_owned()).exit_code(),
            Error::ZeroPosts.exit_code(),
            Error::Decode("bad".to_owned()).exit_code(),
        ];
        assert_eq!(codes, [2, 3, 5, 1]);
    }
}
