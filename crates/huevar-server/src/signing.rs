//! Signed retrieval URLs.
//!
//! A URL has the form
//! `{public_url}/objects/{key}?expires={unix}&signature={hex}` where the
//! signature is `sha256(secret "\n" key "\n" expires)`.

use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

/// Produces and checks signed object URLs.
pub trait UrlSigner: Send + Sync {
    /// Signed URL for `key`, valid from now for the configured lifetime.
    fn sign(&self, key: &str) -> String;

    /// Whether `signature` is valid for `key` and `expires` has not passed.
    fn verify(&self, key: &str, expires: u64, signature: &str) -> bool;
}

/// SHA-256 keyed [`UrlSigner`].
#[derive(Clone)]
pub struct Sha256UrlSigner {
    public_url: String,
    secret: String,
    ttl_secs: u64,
}

impl std::fmt::Debug for Sha256UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256UrlSigner")
            .field("public_url", &self.public_url)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Percent-encodes each path segment, keeping the `/` separators.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl Sha256UrlSigner {
    /// Creates a signer. A trailing `/` on `public_url` is ignored.
    pub fn new(public_url: impl Into<String>, secret: impl Into<String>, ttl_secs: u64) -> Self {
        let mut public_url = public_url.into();
        while public_url.ends_with('/') {
            public_url.pop();
        }
        Self {
            public_url,
            secret: secret.into(),
            ttl_secs,
        }
    }

    /// Hex signature of `key` expiring at `expires`.
    pub fn signature(&self, key: &str, expires: u64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b"\n");
        hasher.update(key.as_bytes());
        hasher.update(b"\n");
        hasher.update(expires.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// [`UrlSigner::sign`] with an explicit clock.
    pub fn sign_at(&self, key: &str, now: u64) -> String {
        let expires = now.saturating_add(self.ttl_secs);
        format!(
            "{}/objects/{}?expires={expires}&signature={}",
            self.public_url,
            encode_key(key),
            self.signature(key, expires)
        )
    }

    /// [`UrlSigner::verify`] with an explicit clock.
    pub fn verify_at(&self, key: &str, expires: u64, signature: &str, now: u64) -> bool {
        if expires < now {
            return false;
        }
        let expected = self.signature(key, expires);
        expected.len() == signature.len()
            && expected
                .bytes()
                .zip(signature.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl UrlSigner for Sha256UrlSigner {
    fn sign(&self, key: &str) -> String {
        self.sign_at(key, unix_now())
    }

    fn verify(&self, key: &str, expires: u64, signature: &str) -> bool {
        self.verify_at(key, expires, signature, unix_now())
    }
}
