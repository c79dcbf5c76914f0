//! ping_drive - A CLI tool that pings Google Drive URLs.
//!
//! This library provides functionality to:
//! - Tell Google Drive links apart from other URLs and extract item IDs
//! - Authenticate to Google with a user's OAuth2 consent
//! - Describe a Drive file, folder, Google Sheet or Google Slides deck
//! - Lay out a spreadsheet preview with merged cells as a console table
//!
//! # Example
//!
//! ```
//! use ping_drive::grid::{render, GridCell, MergeRegion};
//! use ping_drive::table::draw;
//!
//! let rows = vec![
//!     vec![GridCell::new("Total"), GridCell::new("")],
//!     vec![GridCell::new("1"), GridCell::new("2")],
//! ];
//! let merges = [MergeRegion::new(0, 0, 1, 2)];
//!
//! print!("{}", draw(&render(&rows, &merges)));
//! ```

pub mod auth;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod models;
pub mod table;
pub mod url_parser;

// Re-exports for convenience
pub use auth::Authenticator;
pub use client::DriveClient;
pub use command::{PingCommand, PingOptions};
pub use config::Settings;
pub use error::{DriveError, Result};
pub use grid::{render, GridCell, MergeRegion, RenderedCell};
pub use models::FileMetadata;
pub use table::draw;
pub use url_parser::{classify, UrlClassification};
