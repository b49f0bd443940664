//! Built-in schemas for the MySQL sample databases.

use super::{SchemaRegistry, TableSchema};

/// Column lists of the Sakila sample database.
const SAKILA: &[(&str, &[&str])] = &[
    ("actor", &["actor_id", "first_name", "last_name", "last_update"]),
    (
        "address",
        &[
            "address_id",
            "address",
            "address2",
            "district",
            "city_id",
            "postal_code",
            "phone",
            "location",
            "last_update",
        ],
    ),
    ("category", &["category_id", "name", "last_update"]),
    ("city", &["city_id", "city", "country_id", "last_update"]),
    ("country", &["country_id", "country", "last_update"]),
    (
        "customer",
        &[
            "customer_id",
            "store_id",
            "first_name",
            "last_name",
            "email",
            "address_id",
            "active",
            "create_date",
            "last_update",
        ],
    ),
    (
        "film",
        &[
            "film_id",
            "title",
            "description",
            "release_year",
            "language_id",
            "original_language_id",
            "rental_duration",
            "rental_rate",
            "length",
            "replacement_cost",
            "rating",
            "special_features",
            "last_update",
        ],
    ),
    ("film_actor", &["actor_id", "film_id", "last_update"]),
    ("film_category", &["film_id", "category_id", "last_update"]),
    ("film_text", &["film_id", "title", "description"]),
    (
        "inventory",
        &["inventory_id", "film_id", "store_id", "last_update"],
    ),
    ("language", &["language_id", "name", "last_update"]),
    (
        "payment",
        &[
            "payment_id",
            "customer_id",
            "staff_id",
            "rental_id",
            "amount",
            "payment_date",
            "last_update",
        ],
    ),
    (
        "rental",
        &[
            "rental_id",
            "rental_date",
            "inventory_id",
            "customer_id",
            "return_date",
            "staff_id",
            "last_update",
        ],
    ),
    (
        "staff",
        &[
            "staff_id",
            "first_name",
            "last_name",
            "address_id",
            "picture",
            "email",
            "store_id",
            "active",
            "username",
            "password",
            "last_update",
        ],
    ),
    (
        "store",
        &["store_id", "manager_staff_id", "address_id", "last_update"],
    ),
];

/// Column lists of the World sample database.
const WORLD: &[(&str, &[&str])] = &[
    (
        "city",
        &["ID", "Name", "CountryCode", "District", "Population"],
    ),
    (
        "country",
        &[
            "Code",
            "Name",
            "Continent",
            "Region",
            "SurfaceArea",
            "IndepYear",
            "Population",
            "LifeExpectancy",
            "GNP",
            "GNPOld",
            "LocalName",
            "GovernmentForm",
            "HeadOfState",
            "Capital",
            "Code2",
        ],
    ),
    (
        "countrylanguage",
        &["CountryCode", "Language", "IsOfficial", "Percentage"],
    ),
];

/// A sample database with a compiled-in schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Dataset {
    /// The Sakila DVD rental database.
    Sakila,
    /// The World countries/cities/languages database.
    World,
}

impl Dataset {
    fn specs(self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Dataset::Sakila => SAKILA,
            Dataset::World => WORLD,
        }
    }

    /// Registry holding every table of the dataset.
    #[must_use]
    pub fn registry(self) -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        for &(name, columns) in self.specs() {
            registry.insert_builtin(TableSchema::builtin(name, columns));
        }
        registry
    }

    /// File name of the dataset's data dump.
    #[must_use]
    pub fn default_input(self) -> &'static str {
        match self {
            Dataset::Sakila => "sakila-data.sql",
            Dataset::World => "world.sql",
        }
    }

    /// Directory the exports of the dataset are written to by default.
    #[must_use]
    pub fn default_output_dir(self) -> &'static str {
        match self {
            Dataset::Sakila => "output",
            Dataset::World => "output_world",
        }
    }
}

impl SchemaRegistry {
    /// Registry of the Sakila sample database.
    #[must_use]
    pub fn sakila() -> Self {
        Dataset::Sakila.registry()
    }

    /// Registry of the World sample database.
    #[must_use]
    pub fn world() -> Self {
        Dataset::World.registry()
    }
}
