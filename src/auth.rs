//! OAuth2 user authentication for Google APIs.
//!
//! Implements the installed-application flow: the user opens an
//! authorization URL, pastes back the auth code, and the code is exchanged
//! for an access token. The token can be kept in a file so that later runs
//! skip the prompt.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{DriveError, Result};
use crate::models::{
    ApiErrorResponse, ClientSecret, ClientSecretFile, StoredToken, TokenErrorResponse,
    TokenResponse,
};

/// Read-only access to Google Drive.
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// Read-only access to Google Sheets.
pub const SPREADSHEETS_READONLY_SCOPE: &str =
    "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Redirect URI for copy-and-paste auth codes.
const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Authenticator for Google APIs using a user's OAuth2 consent.
#[derive(Clone)]
pub struct Authenticator {
    client_secret_file: PathBuf,
    access_token_file: Option<PathBuf>,
    scopes: Vec<String>,
    force_authenticate: bool,
    client: Client,
}

impl Authenticator {
    /// Create an authenticator for a client secret file and an optional
    /// token file. The token file need not exist.
    pub fn new<P: Into<PathBuf>>(client_secret_file: P, access_token_file: Option<PathBuf>) -> Self {
        Self {
            client_secret_file: client_secret_file.into(),
            access_token_file,
            scopes: vec![
                DRIVE_READONLY_SCOPE.to_string(),
                SPREADSHEETS_READONLY_SCOPE.to_string(),
            ],
            force_authenticate: false,
            client: Client::new(),
        }
    }

    /// Replace the requested scopes.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Ask the user to authenticate even if a stored token exists.
    pub fn force_authenticate(mut self, force: bool) -> Self {
        self.force_authenticate = force;
        self
    }

    /// Get a usable access token.
    ///
    /// `prompt` receives the authorization URL and returns the auth code the
    /// user got from it. It is only called when there is no stored token or
    /// re-authentication is forced.
    pub async fn authenticate<F>(&self, prompt: F) -> Result<StoredToken>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        info!(
            "Getting the Google API client secret from the `{}` file",
            self.client_secret_file.display()
        );
        let secret = load_json::<ClientSecretFile>(&self.client_secret_file)?
            .into_secret()
            .ok_or(DriveError::InvalidClientSecret)?;

        let stored = match &self.access_token_file {
            Some(path) if !self.force_authenticate && path.exists() => {
                info!(
                    "Getting the last Google API access token from the `{}` file",
                    path.display()
                );
                Some(load_json::<StoredToken>(path)?)
            }
            _ => None,
        };

        let mut token = match stored {
            Some(token) => token,
            None => {
                let auth_url = self.auth_url(&secret)?;
                let code = prompt(auth_url.as_str())?;
                let code = code.trim();
                if code.is_empty() {
                    return Err(DriveError::AuthCodePrompt(
                        "the auth code is empty".to_string(),
                    ));
                }

                info!("Sending the authentication code to Google");
                let token = self.exchange_code(&secret, code).await?;
                info!("Authenticated successfully");

                if let Some(path) = &self.access_token_file {
                    info!(
                        "Saving the access token to the `{}` file, so subsequent executions will not prompt for authorization",
                        path.display()
                    );
                    save_token(path, &token)?;
                }
                token
            }
        };

        if token.is_expired(unix_now()) {
            info!("The access token is expired; refreshing the token");
            token = self.refresh(&secret, &token).await?;

            if let Some(path) = &self.access_token_file {
                info!(
                    "Saving the refreshed access token to the `{}` file",
                    path.display()
                );
                save_token(path, &token)?;
            }
        }

        info!("The Google authentication is completed");
        Ok(token)
    }

    /// Build the URL the user opens to grant access.
    pub fn auth_url(&self, secret: &ClientSecret) -> Result<Url> {
        let redirect_uri = secret
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI);
        let scope = self.scopes.join(" ");

        Url::parse_with_params(
            &secret.auth_uri,
            &[
                ("response_type", "code"),
                ("access_type", "offline"),
                ("client_id", secret.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("scope", scope.as_str()),
            ],
        )
        .map_err(|e| DriveError::InvalidUrl(format!("{}: {}", secret.auth_uri, e)))
    }

    /// Exchange an auth code for an access token.
    async fn exchange_code(&self, secret: &ClientSecret, code: &str) -> Result<StoredToken> {
        let redirect_uri = secret
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI);

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
        ];

        match self.request_token(secret, &params).await {
            Ok(response) => Ok(StoredToken::from_response(response, unix_now(), None)),
            Err(TokenRequestError::Declined(description)) => {
                Err(DriveError::AuthCodeDeclined(description))
            }
            Err(TokenRequestError::Other(e)) => Err(e),
        }
    }

    /// Refresh an expired access token.
    async fn refresh(&self, secret: &ClientSecret, token: &StoredToken) -> Result<StoredToken> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or(DriveError::MissingRefreshToken)?;

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
        ];

        match self.request_token(secret, &params).await {
            Ok(response) => Ok(StoredToken::from_response(
                response,
                unix_now(),
                token.refresh_token.clone(),
            )),
            Err(TokenRequestError::Declined(description)) => {
                Err(DriveError::TokenRefreshDeclined(description))
            }
            Err(TokenRequestError::Other(e)) => Err(e),
        }
    }

    async fn request_token(
        &self,
        secret: &ClientSecret,
        params: &[(&str, &str)],
    ) -> std::result::Result<TokenResponse, TokenRequestError> {
        let response = self
            .client
            .post(&secret.token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| TokenRequestError::Other(e.into()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TokenRequestError::Other(e.into()))?;

        if let Ok(error) = serde_json::from_str::<TokenErrorResponse>(&body) {
            return Err(TokenRequestError::Declined(error.description().to_string()));
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|api_error| api_error.error.message)
                .unwrap_or(body);
            return Err(TokenRequestError::Other(DriveError::ApiError {
                status: status.as_u16(),
                message,
            }));
        }

        serde_json::from_str(&body).map_err(|e| TokenRequestError::Other(e.into()))
    }
}

enum TokenRequestError {
    /// Google answered with an OAuth2 error.
    Declined(String),
    Other(DriveError),
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Read a JSON document from a credentials file.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(DriveError::FileMissing(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DriveError::NotAFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| DriveError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn save_token(path: &Path, token: &StoredToken) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(token)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> ClientSecret {
        ClientSecret {
            client_id: "client-123.apps.googleusercontent.com".to_string(),
            client_secret: "shh".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            redirect_uris: vec![],
        }
    }

    #[test]
    fn test_auth_url_parameters() {
        let auth = Authenticator::new("secret.json", None);
        let url = auth.auth_url(&secret()).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.as_str().starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&("access_type".to_string(), "offline".to_string())));
        assert!(pairs.contains(&(
            "client_id".to_string(),
            "client-123.apps.googleusercontent.com".to_string()
        )));
        assert!(pairs.contains(&("redirect_uri".to_string(), OOB_REDIRECT_URI.to_string())));
        assert!(pairs.contains(&(
            "scope".to_string(),
            format!("{} {}", DRIVE_READONLY_SCOPE, SPREADSHEETS_READONLY_SCOPE)
        )));
    }

    #[test]
    fn test_auth_url_uses_configured_redirect() {
        let mut secret = secret();
        secret.redirect_uris = vec!["http://localhost".to_string()];

        let auth = Authenticator::new("secret.json", None).with_scopes(["a", "b"]);
        let url = auth.auth_url(&secret).unwrap();
        let query = url.query().unwrap_or_default();

        assert!(query.contains("redirect_uri=http%3A%2F%2Flocalhost"));
        assert!(query.contains("scope=a+b"));
    }

    #[test]
    fn test_load_json_missing_file() {
        let result = load_json::<StoredToken>(Path::new("/nonexistent/token.json"));
        assert!(matches!(result, Err(DriveError::FileMissing(_))));
    }
}
