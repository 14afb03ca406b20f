//! Macro-generated test suite for `EntityRepository<Person>` contract validation.
//!
//! The `repository_contract_tests!` macro generates a test module that
//! validates any `EntityRepository<Person>` implementation against the shared
//! semantics: operator behavior per field type, null handling, bytewise text
//! comparison, null placement in sorts, identity tiebreak and paging.
//!
//! # Generated Tests
//!
//! ## Filtering
//! - `test_match_all`: no conditions returns every entity
//! - `test_filters_agree_with_predicate`: every filter case selects exactly
//!   what the in-process predicate selects
//! - `test_text_is_case_sensitive`: EQ and STARTS_WITH respect case
//! - `test_like_wildcards_are_literal`: `%` and `_` in values match literally
//! - `test_not_equal_excludes_nulls`: NE never selects a null field
//! - `test_filter_by_identity`: EQ on `id`
//! - `test_date_time_bound_not_rounded_up`: a stored instant just below a
//!   whole second stays below it
//!
//! ## Sorting and paging
//! - `test_sort_bytewise`: uppercase sorts before lowercase
//! - `test_sort_nulls_last_ascending` / `test_sort_nulls_first_descending`
//! - `test_default_order_is_identity`
//! - `test_pagination_slices`: partial last page and page past the end
//! - `test_unknown_sort_field_rejected`
//!
//! ## Writes
//! - `test_save_replaces_by_id`

/// Generate a full `EntityRepository<Person>` conformance test suite.
///
/// `$factory` must be an expression evaluating to an empty repository. It is
/// re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! repository_contract_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use this_query::core::error::{QueryError, ValidationError};
            use this_query::core::operator::Operator;
            use this_query::query::compiler::CompiledQuery;
            use this_query::query::page::Direction;
            use this_query::storage::EntityRepository;

            // ==================================================================
            // Filtering
            // ==================================================================

            #[tokio::test]
            async fn test_match_all() {
                let repository = $factory;
                let people = seed(&repository).await;

                let result = repository
                    .execute(&CompiledQuery::match_all(), &everything())
                    .await
                    .unwrap();
                assert_eq!(result.total, people.len() as u64);
                assert_eq!(
                    names(&result),
                    vec!["Alice", "Ann_e", "Bob", "Carol", "Dave", "alice"]
                );
            }

            #[tokio::test]
            async fn test_filters_agree_with_predicate() {
                let repository = $factory;
                let people = seed(&repository).await;

                for case in filter_cases() {
                    let query = compile(&case);
                    let result = repository.execute(&query, &everything()).await.unwrap();
                    let actual: Vec<String> =
                        names(&result).into_iter().map(str::to_string).collect();
                    assert_eq!(
                        actual,
                        expected_names(&people, &query),
                        "filters {:?}",
                        case
                    );
                    assert_eq!(result.total, actual.len() as u64, "filters {:?}", case);
                }
            }

            #[tokio::test]
            async fn test_text_is_case_sensitive() {
                let repository = $factory;
                seed(&repository).await;

                let query = compile(&[filter("name", "Alice", Operator::Eq)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["Alice"]);

                let query = compile(&[filter("name", "a", Operator::StartsWith)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["alice"]);
            }

            #[tokio::test]
            async fn test_like_wildcards_are_literal() {
                let repository = $factory;
                seed(&repository).await;

                let query = compile(&[filter("name", "_", Operator::Like)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["Ann_e"]);

                let query = compile(&[filter("surname", "%", Operator::Like)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["Ann_e"]);
            }

            #[tokio::test]
            async fn test_not_equal_excludes_nulls() {
                let repository = $factory;
                seed(&repository).await;

                let query = compile(&[filter("birthday", "2010-11-23", Operator::Ne)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["Alice", "Dave", "alice"]);

                let query = compile(&[filter("gender", "MALE", Operator::Ne)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["Alice", "Carol", "alice"]);
            }

            #[tokio::test]
            async fn test_filter_by_identity() {
                let repository = $factory;
                let people = seed(&repository).await;
                let bob = people.iter().find(|p| p.name == "Bob").unwrap();

                let query = compile(&[filter("id", &bob.id.to_string(), Operator::Eq)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(result.total, 1);
                assert_eq!(result.content[0].id, bob.id);
            }

            #[tokio::test]
            async fn test_date_time_bound_not_rounded_up() {
                use chrono::TimeZone;

                let repository = $factory;
                let people = seed(&repository).await;

                let mut dave = people.iter().find(|p| p.name == "Dave").unwrap().clone();
                dave.created_at = chrono::Utc
                    .with_ymd_and_hms(2030, 1, 1, 10, 15, 30)
                    .unwrap()
                    + chrono::Duration::nanoseconds(999_999_600);
                repository.save(dave).await.unwrap();

                let query = compile(&[
                    filter("created_at", "2030-01-01T10:15:30Z", Operator::Gt),
                    filter("created_at", "2030-01-01T10:15:31Z", Operator::Lt),
                ]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["Dave"]);

                let query = compile(&[filter("created_at", "2030-01-01T10:15:31Z", Operator::Get)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert!(result.content.is_empty());
            }

            // ==================================================================
            // Sorting and paging
            // ==================================================================

            #[tokio::test]
            async fn test_sort_bytewise() {
                let repository = $factory;
                seed(&repository).await;

                let result = repository
                    .execute(
                        &CompiledQuery::match_all(),
                        &page(0, 10, Direction::Desc, &["name"]),
                    )
                    .await
                    .unwrap();
                assert_eq!(
                    names(&result),
                    vec!["alice", "Dave", "Carol", "Bob", "Ann_e", "Alice"]
                );
            }

            #[tokio::test]
            async fn test_sort_nulls_last_ascending() {
                let repository = $factory;
                seed(&repository).await;

                let result = repository
                    .execute(
                        &CompiledQuery::match_all(),
                        &page(0, 10, Direction::Asc, &["height", "name"]),
                    )
                    .await
                    .unwrap();
                assert_eq!(
                    names(&result),
                    vec!["Carol", "Alice", "alice", "Ann_e", "Bob", "Dave"]
                );
            }

            #[tokio::test]
            async fn test_sort_nulls_first_descending() {
                let repository = $factory;
                seed(&repository).await;

                let result = repository
                    .execute(
                        &CompiledQuery::match_all(),
                        &page(0, 10, Direction::Desc, &["birthday", "name"]),
                    )
                    .await
                    .unwrap();
                assert_eq!(
                    names(&result),
                    vec!["Carol", "Bob", "Ann_e", "Dave", "Alice", "alice"]
                );
            }

            #[tokio::test]
            async fn test_default_order_is_identity() {
                let repository = $factory;
                let people = seed(&repository).await;

                let result = repository
                    .execute(&CompiledQuery::match_all(), &page(0, 10, Direction::Desc, &[]))
                    .await
                    .unwrap();
                let ids: Vec<_> = result.content.iter().map(|p| p.id).collect();
                assert_eq!(ids, sorted_ids(&people));
            }

            #[tokio::test]
            async fn test_pagination_slices() {
                let repository = $factory;
                seed(&repository).await;

                let second = repository
                    .execute(
                        &CompiledQuery::match_all(),
                        &page(1, 4, Direction::Asc, &["name"]),
                    )
                    .await
                    .unwrap();
                assert_eq!(second.total, 6);
                assert_eq!(second.page_index, 1);
                assert_eq!(second.page_size, 4);
                assert_eq!(names(&second), vec!["Dave", "alice"]);

                let beyond = repository
                    .execute(
                        &CompiledQuery::match_all(),
                        &page(2, 4, Direction::Asc, &["name"]),
                    )
                    .await
                    .unwrap();
                assert!(beyond.content.is_empty());
                assert_eq!(beyond.total, 6);
            }

            #[tokio::test]
            async fn test_unknown_sort_field_rejected() {
                let repository = $factory;
                seed(&repository).await;

                let err = repository
                    .execute(
                        &CompiledQuery::match_all(),
                        &page(0, 10, Direction::Asc, &["shoe_size"]),
                    )
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    QueryError::Validation(ValidationError::FieldErrors(_))
                ));
            }

            // ==================================================================
            // Writes
            // ==================================================================

            #[tokio::test]
            async fn test_save_replaces_by_id() {
                let repository = $factory;
                let people = seed(&repository).await;

                let mut carol = people.iter().find(|p| p.name == "Carol").unwrap().clone();
                carol.surname = "Smith".to_string();
                carol.touch();
                repository.save(carol).await.unwrap();

                let query = compile(&[filter("surname", "Smith", Operator::Eq)]);
                let result = repository.execute(&query, &everything()).await.unwrap();
                assert_eq!(names(&result), vec!["Alice", "Bob", "Carol"]);

                let all = repository
                    .execute(&CompiledQuery::match_all(), &everything())
                    .await
                    .unwrap();
                assert_eq!(all.total, 6);
            }
        }
    };
}
