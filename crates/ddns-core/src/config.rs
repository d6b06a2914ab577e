//! Configuration types for the DDNS reconciler
//!
//! The configuration is built once at startup and passed by reference to every
//! component. [`DdnsConfig::from_env`] is the only code in the workspace that
//! reads the process environment.

/// AWS access key id (required)
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// AWS secret access key (required)
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// AWS region, selects the Route53 partition (required)
pub const ENV_REGION: &str = "AWS_REGION";
/// Fully qualified record name to reconcile (required)
pub const ENV_DOMAIN_NAME: &str = "ROUTE53_DOMAIN_NAME";
/// Record type, e.g. `A` (required)
pub const ENV_RECORD_TYPE: &str = "ROUTE53_TYPE";
/// Record TTL in seconds (required)
pub const ENV_TTL: &str = "ROUTE53_TTL";
/// Schedule expression for the external trigger (required, unused by the core)
pub const ENV_SCHEDULE: &str = "CRON_SCHEDULE";

/// AWS session token for temporary credentials (optional)
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
/// IP-echo endpoint override (optional)
pub const ENV_IP_ECHO_URL: &str = "DDNS_IP_ECHO_URL";
/// Log level (optional)
pub const ENV_LOG_LEVEL: &str = "DDNS_LOG_LEVEL";
/// `dry-run` to skip the upsert (optional)
pub const ENV_MODE: &str = "DDNS_MODE";

/// Every setting that must be present before the run may start
pub const REQUIRED_ENV_VARS: &[&str] = &[
    ENV_ACCESS_KEY_ID,
    ENV_SECRET_ACCESS_KEY,
    ENV_REGION,
    ENV_DOMAIN_NAME,
    ENV_RECORD_TYPE,
    ENV_TTL,
    ENV_SCHEDULE,
];

/// Default public IP echo service (returns the IPv4 address as plain text)
pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org";

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main DDNS configuration
#[derive(Debug, Clone)]
pub struct DdnsConfig {
    /// Provider credentials
    pub credentials: AwsCredentials,

    /// AWS region
    pub region: String,

    /// DNS record name (e.g., "home.example.com")
    pub domain_name: String,

    /// Record type, compared and written verbatim
    pub record_type: String,

    /// Record TTL in seconds
    pub ttl: u32,

    /// Schedule expression, consumed by the external scheduler only
    pub schedule: String,

    /// Public IP echo endpoint
    pub ip_echo_url: String,

    /// Log level name
    pub log_level: String,

    /// Live or dry-run
    pub mode: RunMode,
}

impl DdnsConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, crate::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// A variable that is set to an empty string counts as present. All
    /// missing required variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&str> = REQUIRED_ENV_VARS
            .iter()
            .copied()
            .filter(|key| lookup(key).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(crate::Error::config(format!(
                "Missing environment variable(s): {}",
                missing.join(", ")
            )));
        }

        let required = |key: &str| lookup(key).unwrap_or_default();

        let ttl_raw = required(ENV_TTL);
        let ttl = ttl_raw.trim().parse::<u32>().map_err(|_| {
            crate::Error::config(format!("{} must be an integer. Got: '{}'", ENV_TTL, ttl_raw))
        })?;

        let mode = match lookup(ENV_MODE) {
            Some(raw) => raw.parse()?,
            None => RunMode::Live,
        };

        let config = Self {
            credentials: AwsCredentials {
                access_key_id: required(ENV_ACCESS_KEY_ID),
                secret_access_key: required(ENV_SECRET_ACCESS_KEY),
                session_token: lookup(ENV_SESSION_TOKEN).filter(|t| !t.is_empty()),
            },
            region: required(ENV_REGION),
            domain_name: required(ENV_DOMAIN_NAME),
            record_type: required(ENV_RECORD_TYPE),
            ttl,
            schedule: required(ENV_SCHEDULE),
            ip_echo_url: lookup(ENV_IP_ECHO_URL)
                .filter(|u| !u.is_empty())
                .unwrap_or_else(default_ip_echo_url),
            log_level: lookup(ENV_LOG_LEVEL)
                .filter(|l| !l.is_empty())
                .unwrap_or_else(default_log_level),
            mode,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the optional settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.ip_echo_url.starts_with("https://") && !self.ip_echo_url.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "{} must use HTTP or HTTPS scheme. Got: {}",
                ENV_IP_ECHO_URL, self.ip_echo_url
            )));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(crate::Error::config(format!(
                "{} '{}' is not valid. Valid levels: {}",
                ENV_LOG_LEVEL,
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Whether the run must skip the upsert
    pub fn is_dry_run(&self) -> bool {
        self.mode == RunMode::DryRun
    }
}

/// AWS credentials
///
/// The Debug implementation does NOT expose the secret key or session token.
#[derive(Clone)]
pub struct AwsCredentials {
    /// Access key id
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Session token for temporary credentials
    pub session_token: Option<String>,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<REDACTED>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

/// Run mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Apply updates
    #[default]
    Live,
    /// Perform every read, log the intended upsert, skip it
    DryRun,
}

impl std::str::FromStr for RunMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "live" => Ok(RunMode::Live),
            "dry-run" | "dryrun" => Ok(RunMode::DryRun),
            other => Err(crate::Error::config(format!(
                "{} '{}' is not supported. Supported modes: live, dry-run",
                ENV_MODE, other
            ))),
        }
    }
}

fn default_ip_echo_url() -> String {
    DEFAULT_IP_ECHO_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
