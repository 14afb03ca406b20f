//! Shared test harness for repository backend testing
//!
//! Provides a fixed `Person` dataset chosen to exercise nulls, case and byte
//! order, LIKE wildcards in stored values, and ties, plus helpers to compile
//! filters and pages against it.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! repository_contract_tests!(InMemoryRepository::<Person>::new());
//! rest_integration_tests!(InMemoryRepository::<Person>::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod repository_tests;

#[macro_use]
pub mod rest_tests;

use chrono::NaiveDate;
use this_query::core::entity::Entity;
use this_query::core::operator::Operator;
use this_query::core::query::Page;
use this_query::entities::{Gender, Person};
use this_query::query::compiler::{CompiledQuery, FilterCompiler};
use this_query::query::filter::FilterDescriptor;
use this_query::query::page::{Direction, PageSpec, assemble};
use this_query::storage::EntityRepository;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fixture dataset
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Six people:
///
/// | name  | surname  | birthday   | gender | height | active | children |
/// |-------|----------|------------|--------|--------|--------|----------|
/// | Alice | Smith    | 1990-01-01 | FEMALE | 1.70   | true   | 2        |
/// | Bob   | Smith    | 2010-11-23 | MALE   | 1.85   | true   | 0        |
/// | Carol | Jones    | null       | FEMALE | 1.60   | false  | 3        |
/// | Dave  | Brown    | 2001-06-15 | null   | null   | true   | 1        |
/// | alice | Brown    | 1985-03-10 | OTHER  | 1.70   | false  | 0        |
/// | Ann_e | Percent% | 2010-11-23 | MALE   | 1.75   | true   | 5        |
pub fn people() -> Vec<Person> {
    let rows = [
        ("Alice", "Smith", date(1990, 1, 1), Some(Gender::Female), Some(1.70), true, 2),
        ("Bob", "Smith", date(2010, 11, 23), Some(Gender::Male), Some(1.85), true, 0),
        ("Carol", "Jones", None, Some(Gender::Female), Some(1.60), false, 3),
        ("Dave", "Brown", date(2001, 6, 15), None, None, true, 1),
        ("alice", "Brown", date(1985, 3, 10), Some(Gender::Other), Some(1.70), false, 0),
        ("Ann_e", "Percent%", date(2010, 11, 23), Some(Gender::Male), Some(1.75), true, 5),
    ];
    rows.into_iter()
        .map(|(name, surname, birthday, gender, height, active, children)| {
            Person::new(
                name.to_string(),
                surname.to_string(),
                format!("{}@example.com", name.to_lowercase()),
                birthday,
                gender,
                height,
                active,
                children,
            )
        })
        .collect()
}

/// Save the fixture dataset into `repository` and return it
pub async fn seed<R: EntityRepository<Person> + ?Sized>(repository: &R) -> Vec<Person> {
    let people = people();
    for person in &people {
        repository.save(person.clone()).await.unwrap();
    }
    people
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

pub fn filter(field: &str, value: &str, operator: Operator) -> FilterDescriptor {
    FilterDescriptor::new(field, value, operator)
}

pub fn compile(filters: &[FilterDescriptor]) -> CompiledQuery {
    FilterCompiler::for_entity::<Person>()
        .compile(Some(filters))
        .unwrap()
}

pub fn page(index: i64, size: i64, direction: Direction, sort: &[&str]) -> PageSpec {
    let fields: Vec<String> = sort.iter().map(|s| s.to_string()).collect();
    let sort = if fields.is_empty() {
        None
    } else {
        Some(fields.as_slice())
    };
    assemble(Person::descriptor(), index, size, Some(direction), sort).unwrap()
}

/// One page holding everything, sorted by name
pub fn everything() -> PageSpec {
    page(0, 100, Direction::Asc, &["name"])
}

pub fn names(page: &Page<Person>) -> Vec<&str> {
    page.content.iter().map(|p| p.name.as_str()).collect()
}

/// Names of the fixture people the predicate form selects, sorted bytewise
pub fn expected_names(people: &[Person], query: &CompiledQuery) -> Vec<String> {
    let mut names: Vec<String> = people
        .iter()
        .filter(|p| query.predicate.matches(*p))
        .map(|p| p.name.clone())
        .collect();
    names.sort();
    names
}

pub fn sorted_ids(people: &[Person]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = people.iter().map(|p| p.id).collect();
    ids.sort();
    ids
}

/// Filter sets covering every operator and field type of `Person`
pub fn filter_cases() -> Vec<Vec<FilterDescriptor>> {
    vec![
        vec![filter("name", "Alice", Operator::Eq)],
        vec![filter("name", "lic", Operator::Like)],
        vec![filter("name", "A", Operator::StartsWith)],
        vec![filter("name", "e", Operator::EndsWith)],
        vec![filter("name", "_", Operator::Like)],
        vec![filter("surname", "%", Operator::EndsWith)],
        vec![filter("surname", "Smith", Operator::Ne)],
        vec![filter("birthday", "2010-11-23", Operator::Ne)],
        vec![filter("birthday", "2000-01-01", Operator::Gt)],
        vec![filter("birthday", "1990-01-01", Operator::Let)],
        vec![filter("height", "1.75", Operator::Get)],
        vec![filter("height", "1.7", Operator::Lt)],
        vec![filter("height", "1.7", Operator::Eq)],
        vec![filter("children", "1", Operator::Gt)],
        vec![filter("children", "0", Operator::Let)],
        vec![filter("active", "false", Operator::Eq)],
        vec![filter("gender", "FEMALE", Operator::Eq)],
        vec![filter("gender", "MALE", Operator::Ne)],
        vec![
            filter("gender", "MALE", Operator::Eq),
            filter("children", "0", Operator::Gt),
        ],
        vec![
            filter("surname", "S", Operator::StartsWith),
            filter("active", "true", Operator::Eq),
            filter("height", "1.80", Operator::Lt),
        ],
    ]
}
