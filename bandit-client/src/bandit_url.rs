use url::Url;

use crate::BanditError;

/// A URL on the Time Bandit backend, built by appending paths to the base.
#[derive(Debug, Clone)]
pub struct BanditURL(String);

impl AsRef<str> for BanditURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl BanditURL {
    /// Validates `base` as an absolute http(s) URL.
    pub fn parse(base: &str) -> Result<Self, BanditError> {
        let url = Url::parse(base)
            .map_err(|e| BanditError::InvalidBaseUrl(format!("{}: {}", base, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(BanditError::InvalidBaseUrl(format!(
                "{}: scheme must be http or https",
                base
            )));
        }

        Ok(Self(base.trim_end_matches('/').to_string()))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }
}
