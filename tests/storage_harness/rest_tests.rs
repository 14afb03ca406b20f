//! REST integration test macro for repository backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! an `EntityRepository<Person>` through the listing route:
//! query string → handler → compiler → repository → JSON page.

/// Generate a REST integration test suite for a repository backend.
///
/// `$factory` must produce an empty `impl EntityRepository<Person> + 'static`.
///
/// # Generated Tests
///
/// - `test_rest_list_defaults`: default page size and pagination metadata
/// - `test_rest_list_filter`: JSON filter parameter narrows results
/// - `test_rest_list_sort_and_page`: sort, direction and page parameters
/// - `test_rest_errors_accumulate`: all invalid conditions reported with 400
/// - `test_rest_invalid_filter_json`: malformed filter parameter → 400
/// - `test_rest_invalid_page`: negative page and oversized page → 400
/// - `test_rest_invalid_query_param`: undeserializable parameters → JSON 400
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};
            use this_query::config::{PaginationConfig, QueryConfig};
            use this_query::server::ServerBuilder;

            async fn make_server() -> TestServer {
                let repository = $factory;
                seed(&repository).await;
                let config = QueryConfig {
                    pagination: PaginationConfig {
                        default_page_size: 4,
                        max_page_size: 10,
                    },
                    ..Default::default()
                };
                let router = ServerBuilder::new()
                    .with_config(config)
                    .register::<Person>(repository)
                    .build();
                TestServer::try_new(router).unwrap()
            }

            fn body_names(body: &Value) -> Vec<&str> {
                body["data"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|p| p["name"].as_str().unwrap())
                    .collect()
            }

            #[tokio::test]
            async fn test_rest_list_defaults() {
                let server = make_server().await;

                let response = server.get("/people").await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["data"].as_array().unwrap().len(), 4);
                assert_eq!(
                    body["pagination"],
                    json!({
                        "page": 0,
                        "size": 4,
                        "total": 6,
                        "total_pages": 2,
                        "has_next": true,
                        "has_prev": false,
                    })
                );
            }

            #[tokio::test]
            async fn test_rest_list_filter() {
                let server = make_server().await;

                let filter = json!([
                    {"field": "gender", "value": "MALE", "operator": "EQ"},
                    {"field": "children", "value": "0", "operator": "GT"},
                ]);
                let response = server
                    .get("/people")
                    .add_query_param("filter", filter.to_string())
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body_names(&body), vec!["Ann_e"]);
                assert_eq!(body["pagination"]["total"], 1);
            }

            #[tokio::test]
            async fn test_rest_list_sort_and_page() {
                let server = make_server().await;

                let response = server
                    .get("/people")
                    .add_query_param("sort", "surname,name")
                    .add_query_param("direction", "DESC")
                    .add_query_param("page", 1)
                    .add_query_param("size", 2)
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body_names(&body), vec!["Ann_e", "Carol"]);
                assert_eq!(body["pagination"]["has_prev"], true);
                assert_eq!(body["pagination"]["has_next"], true);
            }

            #[tokio::test]
            async fn test_rest_errors_accumulate() {
                let server = make_server().await;

                let filter = json!([
                    {"field": "shoe_size", "value": "42", "operator": "EQ"},
                    {"field": "birthday", "value": "not-a-date", "operator": "GT"},
                    {"field": "active", "value": "true", "operator": "GT"},
                ]);
                let response = server
                    .get("/people")
                    .add_query_param("filter", filter.to_string())
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                let details = body["details"]["fields"].as_array().unwrap();
                let fields: Vec<&str> = details
                    .iter()
                    .map(|d| d["field"].as_str().unwrap())
                    .collect();
                assert_eq!(fields, vec!["shoe_size", "birthday", "active"]);
            }

            #[tokio::test]
            async fn test_rest_invalid_filter_json() {
                let server = make_server().await;

                let response = server
                    .get("/people")
                    .add_query_param("filter", "{not json")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_JSON");
            }

            #[tokio::test]
            async fn test_rest_invalid_page() {
                let server = make_server().await;

                let response = server.get("/people").add_query_param("page", -1).await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_PAGE");

                let response = server.get("/people").add_query_param("size", 11).await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_rest_invalid_query_param() {
                let server = make_server().await;

                for (name, value) in [("direction", "desc"), ("page", "abc"), ("size", "1.5")] {
                    let response = server.get("/people").add_query_param(name, value).await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    let body: Value = response.json();
                    assert_eq!(body["code"], "INVALID_QUERY", "{}={}", name, value);
                    assert!(
                        body["message"].as_str().unwrap().contains(name),
                        "{}={}: {}",
                        name,
                        value,
                        body["message"]
                    );
                }
            }
        }
    };
}
