//! Application constants for suckson
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names recognised as configuration overrides
pub mod env {
    /// Mirror prefix prepended to every template archive URL
    pub const MIRROR: &str = "SUCKSON_MIRROR";

    /// Acquisition timeout budget in whole seconds
    pub const FETCH_TIMEOUT_SECS: &str = "SUCKSON_FETCH_TIMEOUT_SECS";
}

/// Remote template archives
pub mod templates {
    /// Archive every template has historically been served from
    pub const SUCKSON_ADMIN_ARCHIVE: &str =
        "https://github.com/suckson/suckson_admin/archive/main.zip";

    /// Default archive for the `vue` template
    pub const VUE_ARCHIVE_URL: &str = SUCKSON_ADMIN_ARCHIVE;

    /// Default archive for the `react` template
    pub const REACT_ARCHIVE_URL: &str = SUCKSON_ADMIN_ARCHIVE;

    /// Default archive for the `node` template
    pub const NODE_ARCHIVE_URL: &str = SUCKSON_ADMIN_ARCHIVE;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// User agent sent with every archive request
    pub const USER_AGENT: &str = "suckson-cli/1.0";

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// TCP keep-alive interval
    pub const TCP_KEEPALIVE: Duration = Duration::from_secs(30);
}

/// Template acquisition limits
pub mod acquisition {
    use super::Duration;

    /// Time budget for downloading and extracting a template
    pub const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

    /// Largest archive accepted (200MB)
    pub const MAX_ARCHIVE_BYTES: u64 = 200 * 1024 * 1024;

    /// Prefix of the hidden sibling directory used while extracting
    pub const STAGING_PREFIX: &str = ".suckson-staging-";
}

/// Troubleshooting hints shown after a failed download
pub mod remediation {
    /// Mirror suggested when GitHub is unreachable
    pub const SUGGESTED_MIRROR: &str = "https://ghproxy.com/";

    /// Host users are asked to ping
    pub const CONNECTIVITY_HOST: &str = "github.com";
}

/// File operation constants
pub mod files {
    /// Temporary file suffix for atomic writes
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";
}

/// Project manifest constants
pub mod manifest {
    /// Manifest file name at the project root
    pub const FILE_NAME: &str = "package.json";

    /// Indentation used when writing the manifest back
    pub const INDENT: &[u8] = b"  ";

    /// Version offered when prompting
    pub const DEFAULT_VERSION: &str = "1.0.0";

    /// Fields owned by the answer set; everything else is preserved
    pub const MANAGED_FIELDS: [&str; 4] = ["name", "version", "description", "author"];
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file
    pub const LOCAL_FILE_NAME: &str = "suckson.toml";

    /// Directory under the user config dir
    pub const DIR_NAME: &str = "suckson";

    /// File name inside `DIR_NAME`
    pub const FILE_NAME: &str = "config.toml";
}

// Re-export commonly used constants for convenience
pub use acquisition::FETCH_TIMEOUT;
pub use http::USER_AGENT;
pub use manifest::FILE_NAME as MANIFEST_FILE_NAME;
