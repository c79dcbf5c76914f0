//! The ping command: classify a URL, read the Drive item and describe it.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::auth::Authenticator;
use crate::client::{DriveClient, DRIVE_API_BASE, SHEETS_API_BASE};
use crate::config::Settings;
use crate::error::{DriveError, Result};
use crate::grid::{render, sheet_grid};
use crate::models::{
    FileMetadata, MIME_TYPE_DRIVE_FOLDER, MIME_TYPE_GOOGLE_PRESENTATION,
    MIME_TYPE_GOOGLE_SPREADSHEET,
};
use crate::table::draw;
use crate::url_parser::{classify, UrlClassification};

/// Cells shown from the first sheet of a spreadsheet.
pub const SHEET_PREVIEW_RANGE: &str = "A1:E5";

/// Exit status of a successful ping.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status of a failed ping.
pub const EXIT_FAILURE: u8 = 1;

/// Everything the ping command needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingOptions {
    pub url: String,
    pub client_secret_file: PathBuf,
    pub access_token_file: Option<PathBuf>,
    pub force_authenticate: bool,
}

impl PingOptions {
    /// Fill in credential paths missing from the command line from the
    /// settings file found in `search_from` or its parents.
    ///
    /// The settings file is optional when the client secret is given on the
    /// command line: a missing `scapesettings.yaml` is then not an error and
    /// the access token is not stored.
    pub fn resolve(
        url: String,
        client_secret_file: Option<PathBuf>,
        access_token_file: Option<PathBuf>,
        force_authenticate: bool,
        search_from: &Path,
    ) -> Result<Self> {
        let mut client_secret_file = client_secret_file;
        let mut access_token_file = access_token_file;

        if client_secret_file.is_none() || access_token_file.is_none() {
            if client_secret_file.is_none() {
                info!("The client secret file path is not specified, will try to get the path from a configuration file");
            }
            if access_token_file.is_none() {
                info!("The access token file path is not specified, will try to get the path from a configuration file");
            }

            match Settings::discover(search_from) {
                Ok(settings) => {
                    client_secret_file = client_secret_file.or(settings.client_secret_file);
                    access_token_file = access_token_file.or(settings.access_token_file);
                }
                Err(DriveError::ConfigNotFound(name)) if client_secret_file.is_some() => {
                    info!("No `{}` file found, the access token will not be stored", name);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Self {
            url,
            client_secret_file: client_secret_file.ok_or(DriveError::MissingClientSecret)?,
            access_token_file,
            force_authenticate,
        })
    }
}

/// Pings a Google Drive folder, Google Docs, Google Sheets or Google Slides URL.
pub struct PingCommand {
    options: PingOptions,
    drive_api_base: String,
    sheets_api_base: String,
}

impl PingCommand {
    pub fn new(options: PingOptions) -> Self {
        Self {
            options,
            drive_api_base: DRIVE_API_BASE.to_string(),
            sheets_api_base: SHEETS_API_BASE.to_string(),
        }
    }

    /// Send API requests to other hosts.
    pub fn with_api_bases(mut self, drive_api_base: &str, sheets_api_base: &str) -> Self {
        self.drive_api_base = drive_api_base.to_string();
        self.sheets_api_base = sheets_api_base.to_string();
        self
    }

    /// Run the command. The auth code, if needed, is read from `input`.
    ///
    /// Returns the process exit status. `Err` is only returned when writing
    /// to `out` or `err` fails.
    pub async fn run<R, W, E>(&self, input: &mut R, out: &mut W, err: &mut E) -> Result<u8>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        match classify(&self.options.url) {
            UrlClassification::GoogleDriveResource { id } => {
                info!("The URL points to Google Drive, will get more information from Google");
                self.ping_drive_item(&id, input, out, err).await
            }
            UrlClassification::GenericHttpUrl { normalized_url } => {
                info!("{} is not a Google Drive URL", normalized_url);
                write_error(
                    err,
                    "The URL does NOT point to a file or folder on Google Drive",
                )?;
                Ok(EXIT_FAILURE)
            }
            UrlClassification::Unrecognized => {
                write_error(err, "The given URL is not a URL")?;
                Ok(EXIT_FAILURE)
            }
        }
    }

    async fn ping_drive_item<R, W, E>(
        &self,
        id: &str,
        input: &mut R,
        out: &mut W,
        err: &mut E,
    ) -> Result<u8>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let authenticator = Authenticator::new(
            self.options.client_secret_file.clone(),
            self.options.access_token_file.clone(),
        )
        .force_authenticate(self.options.force_authenticate);

        let mut prompted = false;
        let authenticated = authenticator
            .authenticate(|auth_url| {
                prompted = true;
                prompt_auth_code(input, &mut *out, auth_url)
            })
            .await;
        let token = match authenticated {
            Ok(token) => {
                if prompted {
                    writeln!(out, "Authenticated successfully")?;
                }
                token
            }
            Err(e) => {
                write_error(err, &format!("Failed to authenticate to Google: {}", e))?;
                return Ok(EXIT_FAILURE);
            }
        };

        let client = DriveClient::new(token.access_token)
            .with_api_bases(&self.drive_api_base, &self.sheets_api_base);

        let file = match client.get_file(id).await {
            Ok(file) => file,
            Err(e) => {
                write_error(err, &inaccessible_message(&e))?;
                return Ok(EXIT_FAILURE);
            }
        };

        let written = match file.mime_type.as_deref() {
            Some(MIME_TYPE_DRIVE_FOLDER) => write_folder(out, &client, &file).await,
            Some(MIME_TYPE_GOOGLE_SPREADSHEET) => write_spreadsheet(out, &client, &file).await,
            Some(MIME_TYPE_GOOGLE_PRESENTATION) => {
                writeln!(out, "The URL is a Google Slides file")?;
                writeln!(out, "Name: {}", file.name)?;
                Ok(())
            }
            mime_type => {
                writeln!(out, "The URL is a Google Drive file")?;
                writeln!(out, "Name: {}", file.name)?;
                writeln!(out, "Type: {}", mime_type.unwrap_or_default())?;
                Ok(())
            }
        };

        match written {
            Ok(()) => Ok(EXIT_SUCCESS),
            Err(DriveError::Io(e)) => Err(DriveError::Io(e)),
            Err(e) => {
                write_error(err, &format!("Failed to read the item content: {}", e))?;
                Ok(EXIT_FAILURE)
            }
        }
    }
}

fn inaccessible_message(error: &DriveError) -> String {
    let reason = match error {
        DriveError::ApiError { status: 403, .. } => "access denied".to_string(),
        DriveError::ApiError { status: 404, .. } => "file not found".to_string(),
        DriveError::ApiError { message, .. } => message.clone(),
        other => other.to_string(),
    };
    format!("The Google Drive URL is no accessible: {}", reason)
}

async fn write_folder<W: Write>(
    out: &mut W,
    client: &DriveClient,
    folder: &FileMetadata,
) -> Result<()> {
    writeln!(out, "The URL is a Google Drive folder")?;
    writeln!(out, "Name: {}", folder.name)?;
    writeln!(out, "Content:")?;

    for child in client.list_children(&folder.id).await? {
        writeln!(out, " - {}", child)?;
    }
    Ok(())
}

async fn write_spreadsheet<W: Write>(
    out: &mut W,
    client: &DriveClient,
    file: &FileMetadata,
) -> Result<()> {
    writeln!(out, "The URL is a Google Sheets file")?;
    writeln!(out, "Name: {}", file.name)?;

    let spreadsheet = client.get_spreadsheet(&file.id, SHEET_PREVIEW_RANGE).await?;
    let Some(first_sheet) = spreadsheet.sheets.first() else {
        writeln!(out, "The file has no sheets")?;
        return Ok(());
    };

    let titles: Vec<&str> = spreadsheet
        .sheets
        .iter()
        .map(|sheet| sheet.properties.title.as_str())
        .collect();
    writeln!(out, "Sheets: {}", titles.join(", "))?;
    writeln!(out, "A piece of the first sheet content:")?;

    let (rows, merges) = sheet_grid(first_sheet);
    write!(out, "{}", draw(&render(&rows, &merges)))?;
    Ok(())
}

/// Show the authorization URL and read an auth code, asking again on
/// empty input.
fn prompt_auth_code<R: BufRead, W: Write>(input: &mut R, out: &mut W, auth_url: &str) -> Result<String> {
    writeln!(out, "You need to authenticate to your Google account to proceed")?;
    writeln!(out, "Open the following URL in a browser, get an auth code and paste it below:")?;
    writeln!(out)?;
    writeln!(out, "{}", auth_url)?;
    writeln!(out)?;

    loop {
        write!(out, "Auth code: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(DriveError::AuthCodePrompt("the input has ended".to_string()));
        }

        let code = line.trim();
        if !code.is_empty() {
            return Ok(code.to_string());
        }
        writeln!(out, "Please enter an auth code")?;
    }
}

fn write_error<E: Write>(err: &mut E, message: &str) -> Result<()> {
    writeln!(err, "[ERROR] {}", message)?;
    Ok(())
}
