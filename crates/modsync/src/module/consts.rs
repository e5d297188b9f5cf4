use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($regex).expect("static regex should compile"));
    };
}

/// Timestamp used for release pointers that resolved to nothing.
pub const EPOCH: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// Content type a release asset needs for the release to be installable.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Organization repositories that are never modules.
pub const EXCLUDED_MODULES: [&str; 4] = [".github", "submission", "developers", "modules"];

// Characters allowed in a module id; must start with a letter.
regex!(MODULE_ID_REGEX, r"^[a-zA-Z][a-zA-Z0-9._-]+$");

// Release tags look like `<version code>-<version name>`.
regex!(RELEASE_TAG_REGEX, r"^\d+-.+$");

// Prerelease names that mark snapshot builds rather than betas.
regex!(SNAPSHOT_NAME_REGEX, r"(?i)^(snapshot|nightly)");

// Image attachments as written in release note markdown. Captures the UUID.
regex!(
    PUBLIC_IMAGE_REGEX,
    r"https://github\.com/[a-zA-Z0-9-]+/[\w\-.]+/assets/\d+/([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})"
);

// `https://github.com/<owner>/<name>` prefix of a source URL.
regex!(SOURCE_URL_REGEX, r"^https://github\.com/([^/]+)/([^/]+)");

// Bare URLs, `www.` hosts and email addresses in README text that should
// become links.
regex!(
    AUTOLINK_REGEX,
    r#"(?:https?://|\bwww\.)[^\s<>"]*[^\s<>".,;:!?)'\]]|[\w.+-]+@[\w-]+(?:\.[\w-]+)+"#
);
