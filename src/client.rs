//! Google Drive and Sheets API client.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{DriveError, Result};
use crate::models::{ApiErrorResponse, FileListResponse, FileMetadata, Spreadsheet};

/// Base URL for Google Drive API v3.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Base URL for Google Sheets API v4.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Page size for listing folder content.
const PAGE_SIZE: &str = "1000";

/// Client for reading Google Drive items with an access token.
pub struct DriveClient {
    access_token: String,
    drive_api_base: String,
    sheets_api_base: String,
    http: Client,
}

impl DriveClient {
    /// Create a new DriveClient.
    ///
    /// # Arguments
    /// * `access_token` - OAuth2 access token with read access to Drive and Sheets
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            drive_api_base: DRIVE_API_BASE.to_string(),
            sheets_api_base: SHEETS_API_BASE.to_string(),
            http: Client::new(),
        }
    }

    /// Send requests to other API hosts.
    pub fn with_api_bases(mut self, drive_api_base: &str, sheets_api_base: &str) -> Self {
        self.drive_api_base = drive_api_base.trim_end_matches('/').to_string();
        self.sheets_api_base = sheets_api_base.trim_end_matches('/').to_string();
        self
    }

    /// Get file or folder metadata by ID.
    pub async fn get_file(&self, file_id: &str) -> Result<FileMetadata> {
        debug!("Getting Drive item {}", file_id);

        let response = self
            .http
            .get(format!("{}/files/{}", self.drive_api_base, file_id))
            .bearer_auth(&self.access_token)
            .query(&[
                ("supportsAllDrives", "true"),
                ("fields", "id,name,mimeType"),
            ])
            .send()
            .await?;

        parse_response(response).await
    }

    /// List everything inside a folder, following pagination.
    ///
    /// # Arguments
    /// * `folder_id` - The ID of the folder
    pub async fn list_children(&self, folder_id: &str) -> Result<Vec<FileMetadata>> {
        let query = format!("'{}' in parents", folder_id);
        let mut children = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(format!("{}/files", self.drive_api_base))
                .bearer_auth(&self.access_token)
                .query(&[
                    ("pageSize", PAGE_SIZE),
                    ("q", query.as_str()),
                    ("fields", "nextPageToken, files(id,name,mimeType)"),
                ]);

            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let list_response: FileListResponse = parse_response(request.send().await?).await?;
            debug!(
                "Got {} item(s) of folder {}",
                list_response.files.len(),
                folder_id
            );
            children.extend(list_response.files);

            match list_response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(children)
    }

    /// Get a spreadsheet with the cell data of `range` (e.g. `A1:E5`).
    pub async fn get_spreadsheet(&self, spreadsheet_id: &str, range: &str) -> Result<Spreadsheet> {
        debug!("Getting range {} of spreadsheet {}", range, spreadsheet_id);

        let response = self
            .http
            .get(format!(
                "{}/spreadsheets/{}",
                self.sheets_api_base, spreadsheet_id
            ))
            .bearer_auth(&self.access_token)
            .query(&[("includeGridData", "true"), ("ranges", range)])
            .send()
            .await?;

        parse_response(response).await
    }
}

/// Decode a JSON response body, turning failures into `ApiError`.
async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
            return Err(DriveError::ApiError {
                status: api_error.error.code,
                message: api_error.error.message,
            });
        }
        return Err(DriveError::ApiError {
            status: status.as_u16(),
            message: error_body,
        });
    }

    Ok(response.json().await?)
}
