use std::time::Duration;

/// `max-age` (seconds) advertised in the `Cache-Control` header of every upload
pub const CACHE_CONTROL_MAXAGE: u64 = 3600 * 4;

/// Lifetime of the pre-signed PUT URL handed to the HTTP uploader
pub const PRESIGNED_URL_EXPIRY: Duration = Duration::from_secs(30 * 60);

/// Key of the per-purpose bucket that receives telemetry artifacts
pub const TELEMETRY_PURPOSE: &str = "telemetry";

/// Extension mappings registered on top of the standard MIME table.
///
/// Maven publications carry a handful of extensions the standard table
/// either lacks or maps to something a browser will not render.
pub const MIME_MAP: &[(&str, &str)] = &[
    ("asc", "text/plain"),
    ("md5", "text/plain"),
    ("sha1", "text/plain"),
    ("pom", "application/xml"),
    ("aar", "application/java-archive"),
    ("jar", "application/java-archive"),
    ("beet", "text/plain"),
    ("checksums", "text/plain"),
];

/// Last-resort suffix table, matched against the end of the full path
pub const SUFFIX_OVERRIDES: &[(&str, &str)] = &[
    (".module", "text/plain"),
    (".sha256", "text/plain"),
    (".sha512", "text/plain"),
];
