//! Data models for Google Drive, Sheets and OAuth2 JSON documents.

use serde::{Deserialize, Serialize};

/// MIME type of a Google Drive folder.
pub const MIME_TYPE_DRIVE_FOLDER: &str = "application/vnd.google-apps.folder";

/// MIME type of a Google Sheets file.
pub const MIME_TYPE_GOOGLE_SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";

/// MIME type of a Google Slides file.
pub const MIME_TYPE_GOOGLE_PRESENTATION: &str = "application/vnd.google-apps.presentation";

/// Metadata for a file or folder in Google Drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl FileMetadata {
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(MIME_TYPE_DRIVE_FOLDER)
    }
}

impl std::fmt::Display for FileMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_folder() { "folder" } else { "file" };
        write!(f, "A {}. Name: {}", kind, self.name)
    }
}

/// Response from the files.list API endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileMetadata>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Response from the spreadsheets.get API endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub properties: SheetProperties,
    #[serde(default)]
    pub data: Vec<GridData>,
    #[serde(default)]
    pub merges: Vec<GridRange>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    #[serde(default)]
    pub row_data: Vec<RowData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RowData {
    #[serde(default)]
    pub values: Vec<CellData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    #[serde(default)]
    pub formatted_value: Option<String>,
}

/// A range of cells. Google omits indexes that are zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    #[serde(default)]
    pub sheet_id: Option<i64>,
    #[serde(default)]
    pub start_row_index: usize,
    #[serde(default)]
    pub end_row_index: usize,
    #[serde(default)]
    pub start_column_index: usize,
    #[serde(default)]
    pub end_column_index: usize,
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// OAuth2 client secret file, as downloaded from the Google API console.
#[derive(Debug, Deserialize)]
pub struct ClientSecretFile {
    #[serde(default)]
    pub installed: Option<ClientSecret>,
    #[serde(default)]
    pub web: Option<ClientSecret>,
}

impl ClientSecretFile {
    /// The application secret, preferring the `installed` section.
    pub fn into_secret(self) -> Option<ClientSecret> {
        self.installed.or(self.web)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// OAuth2 error response.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenErrorResponse {
    pub fn description(&self) -> &str {
        self.error_description.as_deref().unwrap_or(&self.error)
    }
}

/// Access token as kept in the token file between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Unix time the token was issued at.
    #[serde(default)]
    pub created: u64,
}

impl StoredToken {
    /// Build a stored token from a token endpoint response received at `now`.
    ///
    /// Google leaves the refresh token out of refresh responses, so the
    /// previous one is carried over.
    pub fn from_response(response: TokenResponse, now: u64, previous_refresh: Option<String>) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in.unwrap_or(0),
            refresh_token: response.refresh_token.or(previous_refresh),
            scope: response.scope,
            created: now,
        }
    }

    /// Whether the token is expired, or expires within 30 seconds of `now`.
    pub fn is_expired(&self, now: u64) -> bool {
        self.created.saturating_add(self.expires_in) <= now.saturating_add(30)
    }
}
