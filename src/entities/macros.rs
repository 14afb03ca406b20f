//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the struct, the static field-descriptor table and
//! the trait implementations needed for each queryable entity type.

/// Declare an enumerated field type
///
/// The enum serializes to its constant names, exposes them as `VARIANTS`
/// for the descriptor table and converts into [`FieldValue::Enum`].
///
/// # Example
/// ```rust,ignore
/// impl_field_enum!(Gender {
///     Male => "MALE",
///     Female => "FEMALE",
/// });
///
/// assert_eq!(Gender::VARIANTS, &["MALE", "FEMALE"]);
/// ```
///
/// [`FieldValue::Enum`]: crate::core::field::FieldValue::Enum
#[macro_export]
macro_rules! impl_field_enum {
    (
        $type:ident {
            $( $variant:ident => $name:literal ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $type {
            $(
                #[serde(rename = $name)]
                $variant
            ),+
        }

        impl $type {
            /// Constant names accepted by filters on this type
            pub const VARIANTS: &'static [&'static str] = &[ $( $name ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $type::$variant => $name ),+
                }
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::core::field::IntoFieldValue for $type {
            fn to_field_value(&self) -> $crate::core::field::FieldValue {
                $crate::core::field::FieldValue::Enum(self.as_str().to_string())
            }
        }
    };
}

/// Complete macro to create a queryable entity with automatic trait implementations
///
/// Every entity gets `id`, `created_at` and `updated_at`; `id` is the
/// identity field (queried as text), the timestamps are date-times. Each
/// declared field names the [`FieldType`] filters coerce against.
///
/// # Example
///
/// ```rust,ignore
/// use this_query::prelude::*;
///
/// impl_queryable_entity!(
///     Person,
///     "person",
///     "people",
///     {
///         name: String => FieldType::Text,
///         birthday: Option<NaiveDate> => FieldType::Date,
///         gender: Gender => FieldType::Enum(Gender::VARIANTS),
///     }
/// );
///
/// // Usage
/// let person = Person::new("Ada".to_string(), None, Gender::Female);
/// assert_eq!(person.field_value("gender"), Some(FieldValue::Enum("FEMALE".into())));
/// ```
///
/// [`FieldType`]: crate::core::field::FieldType
#[macro_export]
macro_rules! impl_queryable_entity {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        {
            $( $field:ident : $field_type:ty => $kind:expr ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,

            /// When this entity was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,
            $( pub $field : $field_type ),*
        }

        // Implement Entity trait
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn descriptor() -> &'static $crate::core::field::EntityDescriptor {
                use std::sync::OnceLock;
                static DESCRIPTOR: OnceLock<$crate::core::field::EntityDescriptor> = OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::core::field::EntityDescriptor::builder($singular, "id")
                        .field("id", $crate::core::field::FieldType::Text)
                        .field("created_at", $crate::core::field::FieldType::DateTime)
                        .field("updated_at", $crate::core::field::FieldType::DateTime)
                        $( .field(stringify!($field), $kind) )*
                        .build()
                })
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::IntoFieldValue;
                match field {
                    "id" => return Some(self.id.to_field_value()),
                    "created_at" => return Some(self.created_at.to_field_value()),
                    "updated_at" => return Some(self.updated_at.to_field_value()),
                    _ => {}
                }
                $(
                    if field == stringify!($field) {
                        return Some(self.$field.to_field_value());
                    }
                )*
                None
            }
        }

        // Utility methods
        impl $type {
            /// Create a new instance of this entity
            #[allow(clippy::too_many_arguments)]
            pub fn new( $( $field: $field_type ),* ) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    created_at: now,
                    updated_at: now,
                    $( $field ),*
                }
            }

            /// Update the updated_at timestamp to now
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
