use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use bson::{doc, Document};
use serde_json::json;
use tower::ServiceExt; // for .oneshot()

use donorlink_backend::model::reference::{ReferenceSheet, SHEET_DISTRICTS};
use donorlink_backend::repository::reference_repo::ReferenceRepository;
use donorlink_backend::repository::repository_error::RepositoryResult;
use donorlink_backend::router::reference_router::reference_router;

struct InMemorySheets {
    sheets: Vec<ReferenceSheet>,
}

#[async_trait]
impl ReferenceRepository for InMemorySheets {
    async fn load_sheet(&self, name: &str) -> RepositoryResult<Option<ReferenceSheet>> {
        Ok(self.sheets.iter().find(|s| s.name == name).cloned())
    }

    async fn find_item(&self, name: &str, id: &str) -> RepositoryResult<Option<Document>> {
        let sheet = self.load_sheet(name).await?;
        Ok(sheet.and_then(|s| s.find_item(id).cloned()))
    }
}

// Districts seeded, upazilas deliberately absent
fn app() -> axum::Router {
    let repo = Arc::new(InMemorySheets {
        sheets: vec![ReferenceSheet {
            name: SHEET_DISTRICTS.to_string(),
            data: vec![
                doc! { "id": "7", "name": "Chattogram" },
                doc! { "id": "12", "name": "Dhaka" },
            ],
        }],
    });
    reference_router(repo)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_list_districts_returns_sheet_data() {
    let (status, body) = get_json(app(), "/districts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(|a| a.len()), Some(2));
}

#[tokio::test]
async fn test_district_item_found_by_id() {
    let (status, body) = get_json(app(), "/districts/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Chattogram"));
}

#[tokio::test]
async fn test_unknown_district_id_answers_sentinel_with_ok_status() {
    let (status, body) = get_json(app(), "/districts/999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "message": "Data Not Found" }));
}

#[tokio::test]
async fn test_missing_sheet_answers_sentinel_with_ok_status() {
    let (status, body) = get_json(app(), "/upazilas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "message": "Data Not Found" }));
}

#[tokio::test]
async fn test_item_lookup_in_missing_sheet_answers_sentinel() {
    let (status, body) = get_json(app(), "/upazilas/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "message": "Data Not Found" }));
}
