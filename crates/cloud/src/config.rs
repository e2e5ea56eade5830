use std::time::Duration;

/// Default lifetime of a presigned URL in seconds.
const DEFAULT_PRESIGN_EXPIRE_SECS: u64 = 900;

/// Region used when the configured value is empty or `auto` (R2 style).
const FALLBACK_REGION: &str = "us-east-1";

/// S3-compatible storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for R2 / MinIO. Enables path-style addressing.
    pub endpoint_url: Option<String>,
    /// Static credentials. When absent the default AWS provider chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub presign_expiry: Duration,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                | Required | Default     |
    /// |------------------------|----------|-------------|
    /// | `S3_BUCKET`            | **yes**  | --          |
    /// | `S3_REGION`            | no       | `us-east-1` |
    /// | `S3_ENDPOINT_URL`      | no       | --          |
    /// | `S3_ACCESS_KEY_ID`     | no       | --          |
    /// | `S3_SECRET_ACCESS_KEY` | no       | --          |
    /// | `PRESIGN_EXPIRE_SEC`   | no       | `900`       |
    ///
    /// # Panics
    ///
    /// Panics if `S3_BUCKET` is not set or `PRESIGN_EXPIRE_SEC` is not a u64.
    pub fn from_env() -> Self {
        let bucket = std::env::var("S3_BUCKET").expect("S3_BUCKET must be set in the environment");
        assert!(!bucket.is_empty(), "S3_BUCKET must not be empty");

        let region = normalize_region(std::env::var("S3_REGION").ok().as_deref());

        let presign_expire_secs: u64 = std::env::var("PRESIGN_EXPIRE_SEC")
            .unwrap_or_else(|_| DEFAULT_PRESIGN_EXPIRE_SECS.to_string())
            .parse()
            .expect("PRESIGN_EXPIRE_SEC must be a valid u64");

        Self {
            bucket,
            region,
            endpoint_url: non_empty_var("S3_ENDPOINT_URL"),
            access_key_id: non_empty_var("S3_ACCESS_KEY_ID"),
            secret_access_key: non_empty_var("S3_SECRET_ACCESS_KEY"),
            presign_expiry: Duration::from_secs(presign_expire_secs),
        }
    }

    /// Whether requests must use path-style addressing.
    pub fn force_path_style(&self) -> bool {
        self.endpoint_url.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Map an unset, empty or `auto` region to a concrete signing region.
pub fn normalize_region(region: Option<&str>) -> String {
    match region.map(str::trim) {
        None | Some("") | Some("auto") => FALLBACK_REGION.to_string(),
        Some(r) => r.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_fallbacks() {
        assert_eq!(normalize_region(None), "us-east-1");
        assert_eq!(normalize_region(Some("")), "us-east-1");
        assert_eq!(normalize_region(Some("auto")), "us-east-1");
        assert_eq!(normalize_region(Some("eu-central-1")), "eu-central-1");
    }

    #[test]
    fn path_style_follows_custom_endpoint() {
        let mut config = StorageConfig {
            bucket: "media".to_string(),
            region: "us-east-1".to_string(),
            endpoint_url: None,
            access_key_id: None,
            secret_access_key: None,
            presign_expiry: Duration::from_secs(DEFAULT_PRESIGN_EXPIRE_SECS),
        };
        assert!(!config.force_path_style());

        config.endpoint_url = Some("http://localhost:9000".to_string());
        assert!(config.force_path_style());
    }
}
