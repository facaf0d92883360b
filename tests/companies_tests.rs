//! End-to-end tests for the companies resource
//!
//! Requests run through the full router against the in-memory store, so
//! every test exercises the same extraction, envelope and error-translation
//! path as the PostgreSQL-backed binary.

use axum::http::StatusCode;
use axum_test::TestServer;
use biztime::prelude::*;
use serde_json::{Value, json};

fn test_server() -> (TestServer, InMemoryStore) {
    let store = InMemoryStore::new();
    let server = TestServer::new(build_router(AppState::new(store.clone())));
    (server, store)
}

async fn seed_company(store: &InMemoryStore, code: &str, name: &str, description: Option<&str>) {
    store
        .create_company(Company {
            code: code.to_string(),
            name: name.to_string(),
            description: description.map(String::from),
        })
        .await
        .expect("failed to seed company");
}

// =============================================================================
// GET /companies
// =============================================================================

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn empty_table_yields_empty_list() {
        let (server, _) = test_server();
        let response = server.get("/companies").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "companies": [] }));
    }

    #[tokio::test]
    async fn lists_are_projected_to_code_and_name() {
        let (server, store) = test_server();
        seed_company(&store, "apple", "Apple Computer", Some("Maker of OSX.")).await;
        seed_company(&store, "ibm", "IBM", None).await;

        let response = server.get("/companies").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "companies": [
                    { "code": "apple", "name": "Apple Computer" },
                    { "code": "ibm", "name": "IBM" },
                ]
            })
        );
    }
}

// =============================================================================
// GET /companies/{code}
// =============================================================================

mod get_tests {
    use super::*;

    #[tokio::test]
    async fn returns_exactly_the_stored_fields() {
        let (server, store) = test_server();
        seed_company(&store, "apple", "Apple Computer", Some("Maker of OSX.")).await;

        let response = server.get("/companies/apple").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "company": {
                    "code": "apple",
                    "name": "Apple Computer",
                    "description": "Maker of OSX.",
                }
            })
        );
    }

    #[tokio::test]
    async fn missing_code_yields_404_envelope() {
        let (server, _) = test_server();

        let response = server.get("/companies/ghost").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "error": { "message": "company not found: ghost", "status": 404 }
            })
        );
    }
}

// =============================================================================
// POST /companies
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn returns_201_with_the_inserted_row() {
        let (server, _) = test_server();

        let response = server
            .post("/companies")
            .json(&json!({
                "code": "sam",
                "name": "samsung",
                "description": "electronics",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "company": {
                    "code": "sam",
                    "name": "samsung",
                    "description": "electronics",
                }
            })
        );
    }

    #[tokio::test]
    async fn created_company_is_returned_by_a_subsequent_get() {
        let (server, _) = test_server();

        server
            .post("/companies")
            .json(&json!({ "code": "sam", "name": "samsung", "description": "electronics" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/companies/sam").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "company": { "code": "sam", "name": "samsung", "description": "electronics" }
            })
        );
    }

    #[tokio::test]
    async fn description_is_optional() {
        let (server, _) = test_server();

        let response = server
            .post("/companies")
            .json(&json!({ "code": "ibm", "name": "IBM" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["company"]["description"], Value::Null);
    }

    #[tokio::test]
    async fn duplicate_code_yields_400() {
        let (server, store) = test_server();
        seed_company(&store, "sam", "samsung", None).await;

        let response = server
            .post("/companies")
            .json(&json!({ "code": "sam", "name": "Samsung Electronics" }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "error": { "message": "company code and name must be unique", "status": 400 }
            })
        );
    }

    #[tokio::test]
    async fn duplicate_name_yields_400_and_no_partial_insert() {
        let (server, store) = test_server();
        seed_company(&store, "sam", "samsung", None).await;

        server
            .post("/companies")
            .json(&json!({ "code": "sam2", "name": "samsung" }))
            .await
            .assert_status_bad_request();

        // Nothing was inserted under the new code
        server.get("/companies/sam2").await.assert_status_not_found();
    }
}

// =============================================================================
// PUT /companies/{code}
// =============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn updates_name_and_description() {
        let (server, store) = test_server();
        seed_company(&store, "apple", "Apple Computer", Some("Maker of OSX.")).await;

        let response = server
            .put("/companies/apple")
            .json(&json!({ "name": "Apple Inc.", "description": "Computers and phones." }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "company": {
                    "code": "apple",
                    "name": "Apple Inc.",
                    "description": "Computers and phones.",
                }
            })
        );
    }

    #[tokio::test]
    async fn missing_code_yields_404() {
        let (server, _) = test_server();

        let response = server
            .put("/companies/ghost")
            .json(&json!({ "name": "Ghost Corp" }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn name_collision_with_another_row_yields_400() {
        let (server, store) = test_server();
        seed_company(&store, "apple", "Apple Computer", None).await;
        seed_company(&store, "ibm", "IBM", None).await;

        let response = server
            .put("/companies/ibm")
            .json(&json!({ "name": "Apple Computer" }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"]["message"], "company name already exists");
        assert_eq!(body["error"]["status"], 400);
    }
}

// =============================================================================
// DELETE /companies/{code}
// =============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn delete_reports_status_deleted() {
        let (server, store) = test_server();
        seed_company(&store, "apple", "Apple Computer", None).await;

        let response = server.delete("/companies/apple").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "status": "deleted" }));

        server.get("/companies/apple").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn second_delete_yields_404() {
        let (server, store) = test_server();
        seed_company(&store, "apple", "Apple Computer", None).await;

        server.delete("/companies/apple").await.assert_status_ok();
        server.delete("/companies/apple").await.assert_status_not_found();
    }
}
