//! Tests for DriveClient with mocked HTTP responses.

use mockito::{Matcher, Server, ServerGuard};
use ping_drive::error::DriveError;
use ping_drive::models::{FileListResponse, FileMetadata, MIME_TYPE_DRIVE_FOLDER};
use ping_drive::DriveClient;
use serde_json::json;

fn client(server: &ServerGuard) -> DriveClient {
    let base = server.url();
    DriveClient::new("token123".to_string())
        .with_api_bases(&format!("{}/drive/v3", base), &format!("{}/v4", base))
}

mod models {
    use super::*;

    #[test]
    fn test_file_metadata_deserialization() {
        let json = json!({
            "id": "file123",
            "name": "document.pdf",
            "mimeType": "application/pdf"
        });

        let metadata: FileMetadata = serde_json::from_value(json).unwrap();

        assert_eq!(metadata.id, "file123");
        assert_eq!(metadata.name, "document.pdf");
        assert_eq!(metadata.mime_type, Some("application/pdf".to_string()));
        assert!(!metadata.is_folder());
    }

    #[test]
    fn test_file_list_response_empty() {
        let response: FileListResponse = serde_json::from_value(json!({"files": []})).unwrap();

        assert!(response.files.is_empty());
        assert!(response.next_page_token.is_none());
    }
}

mod get_file {
    use super::*;

    #[tokio::test]
    async fn test_get_file() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/drive/v3/files/0B5q9i2h-vGaCR1BvbXAzNEtmeTQ")
            .match_header("authorization", "Bearer token123")
            .match_query(Matcher::UrlEncoded(
                "fields".into(),
                "id,name,mimeType".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "0B5q9i2h-vGaCR1BvbXAzNEtmeTQ",
                    "name": "Test 1",
                    "mimeType": MIME_TYPE_DRIVE_FOLDER
                })
                .to_string(),
            )
            .create_async()
            .await;

        let file = client(&server)
            .get_file("0B5q9i2h-vGaCR1BvbXAzNEtmeTQ")
            .await
            .unwrap();

        assert_eq!(file.name, "Test 1");
        assert!(file.is_folder());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_file_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/drive/v3/files/missing")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"error": {"code": 404, "message": "File not found: missing."}}).to_string(),
            )
            .create_async()
            .await;

        let result = client(&server).get_file("missing").await;

        match result {
            Err(DriveError::ApiError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "File not found: missing.");
            }
            other => panic!("unexpected result: {:?}", other.map(|f| f.id)),
        }
    }

    #[tokio::test]
    async fn test_get_file_plain_error_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/drive/v3/files/broken")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("Internal error")
            .create_async()
            .await;

        let result = client(&server).get_file("broken").await;

        assert!(matches!(
            result,
            Err(DriveError::ApiError { status: 500, ref message }) if message == "Internal error"
        ));
    }
}

mod list_children {
    use super::*;

    #[tokio::test]
    async fn test_list_children_follows_pages() {
        let mut server = Server::new_async().await;
        let first_page = server
            .mock("GET", "/drive/v3/files")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pageSize".into(), "1000".into()),
                Matcher::UrlEncoded("q".into(), "'folder-id' in parents".into()),
                Matcher::UrlEncoded(
                    "fields".into(),
                    "nextPageToken, files(id,name,mimeType)".into(),
                ),
                Matcher::Regex("fields=[^&]*$".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "files": [
                        {"id": "a", "name": "Foo", "mimeType": "application/pdf"},
                        {"id": "b", "name": "Bar", "mimeType": MIME_TYPE_DRIVE_FOLDER}
                    ],
                    "nextPageToken": "next-page-token-4"
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let second_page = server
            .mock("GET", "/drive/v3/files")
            .match_query(Matcher::UrlEncoded(
                "pageToken".into(),
                "next-page-token-4".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"files": [{"id": "c", "name": "Baz", "mimeType": "text/plain"}]})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let children = client(&server).list_children("folder-id").await.unwrap();
        let names: Vec<&str> = children.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["Foo", "Bar", "Baz"]);
        first_page.assert_async().await;
        second_page.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_empty_folder() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/drive/v3/files")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"files": []}).to_string())
            .create_async()
            .await;

        let children = client(&server).list_children("folder-id").await.unwrap();
        assert!(children.is_empty());
    }
}

mod get_spreadsheet {
    use super::*;

    #[tokio::test]
    async fn test_get_spreadsheet_with_grid_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v4/spreadsheets/sheet-id")
            .match_header("authorization", "Bearer token123")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("includeGridData".into(), "true".into()),
                Matcher::UrlEncoded("ranges".into(), "A1:E5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "sheets": [
                        {"properties": {"title": "Sheet A"}, "data": [{"rowData": []}], "merges": []},
                        {"properties": {"title": "Sheet B"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let spreadsheet = client(&server)
            .get_spreadsheet("sheet-id", "A1:E5")
            .await
            .unwrap();

        assert_eq!(spreadsheet.sheets.len(), 2);
        assert_eq!(spreadsheet.sheets[1].properties.title, "Sheet B");
        mock.assert_async().await;
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriveError::ApiError {
            status: 404,
            message: "File not found".to_string(),
        };

        let display = format!("{}", err);
        assert!(display.contains("404"));
        assert!(display.contains("File not found"));
    }
}
