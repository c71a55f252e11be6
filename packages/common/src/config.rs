use serde::Deserialize;

/// Object storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Bucket holding customer images.
    pub bucket: String,
    /// Region name. Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    /// When unset the AWS endpoint for `region` is used.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Static access key. When unset credentials come from the environment.
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Use path-style addressing (`{endpoint}/{bucket}/{key}`).
    #[serde(default)]
    pub path_style: bool,
    /// Base of public object URLs. Default: `https://{bucket}.s3.amazonaws.com`.
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Lifetime of presigned upload URLs in seconds. Default: 300.
    #[serde(default = "default_presign_expiry_secs")]
    pub presign_expiry_secs: u32,
}

fn default_region() -> String {
    "us-east-1".into()
}
fn default_presign_expiry_secs() -> u32 {
    300
}

impl StorageConfig {
    /// Config for `bucket` with every other field at its default.
    pub fn for_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
            public_base_url: None,
            presign_expiry_secs: default_presign_expiry_secs(),
        }
    }

    /// Base URL that object keys are appended to, without a trailing slash.
    pub fn public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.s3.amazonaws.com", self.bucket),
        }
    }
}
