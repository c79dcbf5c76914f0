//! URL classifier for telling Google Drive links apart from other input.

use regex::Regex;
use std::sync::LazyLock;

/// Google Drive, Docs, Sheets, Slides and folder links.
///
/// Group 2 is the item ID. IDs shorter than 20 characters are rejected so
/// that short query strings like `?id=42` are not taken for Drive items.
static DRIVE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(https?://)?(?:drive|docs)\.google\.[a-z]+/.*(?:/d/|/folders/|[?&]id=)([a-z0-9\-_]{20,})(?:[/?&#]|$)",
    )
    .expect("Invalid Drive URL regex")
});

/// Anything that looks like a URL, internationalized hosts included.
static GENERIC_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?[a-z0-9.@\-_\x{80}-\x{10FFFF}]+(?::[0-9]+)?(?:/|$)")
        .expect("Invalid generic URL regex")
});

/// What a user-supplied string points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlClassification {
    /// A file, folder or document on Google Drive.
    GoogleDriveResource { id: String },
    /// Some other HTTP(S) URL. The scheme defaults to `http://`.
    GenericHttpUrl { normalized_url: String },
    /// Not a URL at all.
    Unrecognized,
}

impl UrlClassification {
    /// The Drive item ID, if the input is a Drive link.
    pub fn drive_id(&self) -> Option<&str> {
        match self {
            UrlClassification::GoogleDriveResource { id } => Some(id),
            _ => None,
        }
    }
}

/// Classify a URL.
///
/// Recognized Drive link formats include:
/// - `https://drive.google.com/file/d/<ID>/view`
/// - `https://drive.google.com/drive/u/0/folders/<ID>`
/// - `https://drive.google.com/open?id=<ID>`
/// - `https://docs.google.com/spreadsheets/d/<ID>/edit`
/// - `https://docs.google.com/presentation/d/<ID>/edit`
///
/// No request is made to check that the ID exists.
///
/// # Examples
///
/// ```
/// use ping_drive::url_parser::{classify, UrlClassification};
///
/// let kind = classify("https://drive.google.com/open?id=0B5q9i2h-vGaCYUE0ZTM4MDhseTQ");
/// assert_eq!(kind.drive_id(), Some("0B5q9i2h-vGaCYUE0ZTM4MDhseTQ"));
///
/// assert_eq!(
///     classify("wikipedia.org/Foo"),
///     UrlClassification::GenericHttpUrl {
///         normalized_url: "http://wikipedia.org/Foo".to_string()
///     }
/// );
/// assert_eq!(classify("1+2"), UrlClassification::Unrecognized);
/// ```
pub fn classify(input: &str) -> UrlClassification {
    let trimmed = input.trim();

    if let Some(captures) = DRIVE_URL_REGEX.captures(trimmed) {
        if let Some(id) = captures.get(2) {
            return UrlClassification::GoogleDriveResource {
                id: id.as_str().to_string(),
            };
        }
    }

    if let Some(captures) = GENERIC_URL_REGEX.captures(trimmed) {
        let normalized_url = if captures.get(1).is_some() {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };
        return UrlClassification::GenericHttpUrl { normalized_url };
    }

    UrlClassification::Unrecognized
}
