//! Domain entities exposed for paged, filtered listing

use crate::core::field::FieldType;
use crate::{impl_field_enum, impl_queryable_entity};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

impl_field_enum!(Gender {
    Male => "MALE",
    Female => "FEMALE",
    Other => "OTHER",
});

impl_field_enum!(ProviderType {
    Local => "LOCAL",
    Google => "GOOGLE",
    Github => "GITHUB",
    Facebook => "FACEBOOK",
});

impl_queryable_entity!(
    Person,
    "person",
    "people",
    {
        name: String => FieldType::Text,
        surname: String => FieldType::Text,
        email: String => FieldType::Text,
        birthday: Option<NaiveDate> => FieldType::Date,
        gender: Option<Gender> => FieldType::Enum(Gender::VARIANTS),
        height: Option<f64> => FieldType::Decimal,
        active: bool => FieldType::Boolean,
        children: i64 => FieldType::Integer,
    }
);

impl_queryable_entity!(
    Role,
    "role",
    "roles",
    {
        name: String => FieldType::Text,
        description: Option<String> => FieldType::Text,
    }
);

impl_queryable_entity!(
    Permission,
    "permission",
    "permissions",
    {
        name: String => FieldType::Text,
        description: Option<String> => FieldType::Text,
    }
);

impl_queryable_entity!(
    Authentication,
    "authentication",
    "authentications",
    {
        username: String => FieldType::Text,
        provider: ProviderType => FieldType::Enum(ProviderType::VARIANTS),
        person_id: Uuid => FieldType::Text,
        enabled: bool => FieldType::Boolean,
        last_login: Option<DateTime<Utc>> => FieldType::DateTime,
        failed_attempts: i64 => FieldType::Integer,
    }
);

impl_queryable_entity!(
    AuthProvider,
    "auth_provider",
    "auth_providers",
    {
        name: String => FieldType::Text,
        provider: ProviderType => FieldType::Enum(ProviderType::VARIANTS),
        client_id: String => FieldType::Text,
        enabled: bool => FieldType::Boolean,
    }
);
