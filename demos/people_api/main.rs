//! People directory served over REST
//!
//! This example demonstrates:
//! - Loading a `QueryConfig` from YAML
//! - Registering several domain entities on in-memory repositories
//! - Listing with filters, sorting and paging
//!
//! Try:
//!
//! ```sh
//! curl 'http://127.0.0.1:3000/people?sort=surname,name'
//! curl 'http://127.0.0.1:3000/people?filter=[{"field":"birthday","value":"2000-01-01","operator":"GT"}]'
//! curl 'http://127.0.0.1:3000/people?filter=[{"field":"children","value":"x","operator":"LIKE"}]'
//! ```

use std::path::Path;
use this_query::entities::{Gender, Person, Role};
use this_query::prelude::*;

const CONFIG_PATH: &str = "demos/people_api/config.yaml";

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

async fn people() -> Result<InMemoryRepository<Person>> {
    let repository = InMemoryRepository::new();
    let rows = [
        ("Ada", "Lovelace", date(1815, 12, 10), Some(Gender::Female), Some(1.65), false, 3),
        ("Alan", "Turing", date(1912, 6, 23), Some(Gender::Male), Some(1.78), false, 0),
        ("Grace", "Hopper", date(1906, 12, 9), Some(Gender::Female), None, false, 0),
        ("Linus", "Torvalds", date(1969, 12, 28), Some(Gender::Male), Some(1.77), true, 3),
        ("Margaret", "Hamilton", date(1936, 8, 17), Some(Gender::Female), None, true, 1),
        ("Sam", "Rivera", None, None, Some(1.70), true, 2),
    ];
    for (name, surname, birthday, gender, height, active, children) in rows {
        let email = format!("{}.{}@example.com", name, surname).to_lowercase();
        repository
            .save(Person::new(
                name.to_string(),
                surname.to_string(),
                email,
                birthday,
                gender,
                height,
                active,
                children,
            ))
            .await?;
    }
    Ok(repository)
}

async fn roles() -> Result<InMemoryRepository<Role>> {
    let repository = InMemoryRepository::new();
    for (name, description) in [
        ("admin", Some("Full access")),
        ("editor", Some("Can edit content")),
        ("viewer", None),
    ] {
        repository
            .save(Role::new(name.to_string(), description.map(str::to_string)))
            .await?;
    }
    Ok(repository)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = if Path::new(CONFIG_PATH).exists() {
        QueryConfig::from_yaml_file(CONFIG_PATH)?
    } else {
        QueryConfig::default()
    };
    init_tracing(&config.logging.level);

    tracing::info!(
        default_page_size = config.pagination.default_page_size,
        max_page_size = config.pagination.max_page_size,
        "starting people directory"
    );

    ServerBuilder::new()
        .with_config(config)
        .register::<Person>(people().await?)
        .register::<Role>(roles().await?)
        .serve_configured()
        .await
}
