use std::fmt;

use base64::prelude::*;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;
use url::Url;

use crate::error::Error;

type HmacSha1 = Hmac<Sha1>;

/// Everything except the RFC 3986 unreserved characters
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, RFC3986).to_string()
}

/// The four secrets issued for an application acting on behalf of an account
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

/// Per-request values that make a signature unique
#[derive(Debug, Clone)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    pub fn generate() -> Self {
        Self {
            nonce: rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(32)
                .map(char::from)
                .collect(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Build the RFC 5849 signature base string.
///
/// Query parameters already present on `url` are merged with `params`.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    let mut encoded = url
        .query_pairs()
        .map(|(key, value)| (encode(&key), encode(&value)))
        .chain(params.iter().map(|(key, value)| (encode(key), encode(value))))
        .collect::<Vec<_>>();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(base_url.as_str()),
        encode(&normalized)
    )
}

impl Credentials {
    pub fn sign(&self, base_string: &str) -> Result<String, Error> {
        let key = format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.access_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|err| Error::Signing(err.to_string()))?;
        mac.update(base_string.as_bytes());

        Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Value of the `Authorization` header for one request
    pub fn authorization_header(
        &self,
        method: &str,
        url: &Url,
        request_params: &[(String, String)],
        nonce: &Nonce,
    ) -> Result<String, Error> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_owned(), self.consumer_key.clone()),
            ("oauth_nonce".to_owned(), nonce.nonce.clone()),
            ("oauth_signature_method".to_owned(), "HMAC-SHA1".to_owned()),
            ("oauth_timestamp".to_owned(), nonce.timestamp.to_string()),
            ("oauth_token".to_owned(), self.access_token.clone()),
            ("oauth_version".to_owned(), "1.0".to_owned()),
        ];

        let all_params = request_params
            .iter()
            .cloned()
            .chain(oauth_params.iter().cloned())
            .collect::<Vec<_>>();
        let signature = self.sign(&signature_base_string(method, url, &all_params))?;
        oauth_params.push(("oauth_signature".to_owned(), signature));
        oauth_params.sort();

        Ok(format!(
            "OAuth {}",
            oauth_params
                .iter()
                .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the platform's "creating a signature" guide
    fn reference_credentials() -> Credentials {
        Credentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".to_owned(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_owned(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_owned(),
            access_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_owned(),
        }
    }

    fn reference_params() -> Vec<(String, String)> {
        [
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            (
                "oauth_token",
                "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            ),
            ("oauth_version", "1.0"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
    }

    #[test]
    fn test_encode_unreserved() {
        assert_eq!(encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(encode("!"), "%21");
    }

    #[test]
    fn test_base_string() {
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let base = signature_base_string("post", &url, &reference_params());

        assert!(base.starts_with(
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key"
        ));
        assert!(base.ends_with(
            "oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        ));
    }

    #[test]
    fn test_query_params_are_signed() {
        let with_query =
            Url::parse("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
                .unwrap();
        let without_query = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let params = reference_params();

        assert_eq!(
            signature_base_string("POST", &with_query, &params[..1]),
            signature_base_string("POST", &without_query, &params[..2]),
        );
    }

    #[test]
    fn test_reference_signature() {
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let base = signature_base_string("POST", &url, &reference_params());

        assert_eq!(
            reference_credentials().sign(&base).unwrap(),
            "hCtSmYh+iHYCEqBWrE7C7hYmtUk="
        );
    }

    #[test]
    fn test_authorization_header() {
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let nonce = Nonce {
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".to_owned(),
            timestamp: 1318622958,
        };
        let header = reference_credentials()
            .authorization_header("POST", &url, &reference_params()[..2], &nonce)
            .unwrap();

        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.ends_with("oauth_version=\"1.0\""));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", reference_credentials());
        assert!(!debug.contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_nonce_shape() {
        let nonce = Nonce::generate();
        assert_eq!(nonce.nonce.len(), 32);
        assert!(nonce.nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
