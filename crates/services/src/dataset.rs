//! Loading country pools from REST Countries style JSON.
//!
//! The expected document is an array of objects shaped like the public
//! `restcountries.com/v3.1/all` response. Only the fields the quiz uses are read;
//! everything else is ignored, and absent or `null` fields become empty.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, info};

use geoquiz_core::model::{Country, Currency, Language};

use crate::error::DatasetError;

#[derive(Debug, Default, Deserialize)]
struct RawName {
    #[serde(default)]
    common: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFlags {
    #[serde(default)]
    png: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    #[serde(default)]
    name: Option<RawName>,
    #[serde(default)]
    capital: Option<Vec<Option<String>>>,
    #[serde(default)]
    flags: Option<RawFlags>,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default, deserialize_with = "ordered_entries")]
    currencies: Vec<(String, Option<RawCurrency>)>,
    #[serde(default, deserialize_with = "ordered_entries")]
    languages: Vec<(String, Option<String>)>,
    #[serde(default)]
    region: Option<String>,
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        // Nameless or regionless records survive parsing with empty strings and
        // are dropped later by `CountryPool::new`.
        let name = raw.name.and_then(|n| n.common).unwrap_or_default();
        let flag = raw.flags.and_then(|f| f.png).unwrap_or_default();
        let mut country = Country::new(name, raw.region.unwrap_or_default())
            .with_flag(flag)
            .with_population(raw.population.unwrap_or_default());
        for capital in raw.capital.unwrap_or_default().into_iter().flatten() {
            country = country.with_capital(capital);
        }
        for (code, currency) in raw.currencies {
            let Some(currency) = currency else { continue };
            country = country.with_currency(Currency::new(
                code,
                currency.name.unwrap_or_default(),
                currency.symbol.unwrap_or_default(),
            ));
        }
        for (code, name) in raw.languages {
            if let Some(name) = name {
                country = country.with_language(Language::new(code, name));
            }
        }
        country
    }
}

/// Reads a JSON object as `(key, value)` pairs in document order; `null` is empty.
fn ordered_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object or null")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor(PhantomData))
}

/// Parses a JSON array of countries.
///
/// # Errors
///
/// Returns `DatasetError::Parse` if the document is not an array of country objects.
pub fn parse_countries(json: &str) -> Result<Vec<Country>, DatasetError> {
    let raw: Vec<RawCountry> = serde_json::from_str(json)?;
    debug!(records = raw.len(), "parsed country records");
    Ok(raw.into_iter().map(Country::from).collect())
}

/// Reads and parses a country dataset file.
///
/// # Errors
///
/// Returns `DatasetError::Io` if the file cannot be read and
/// `DatasetError::Parse` if its contents are not valid country JSON.
pub fn load_countries(path: impl AsRef<Path>) -> Result<Vec<Country>, DatasetError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let countries = parse_countries(&json)?;
    info!(path = %path.display(), countries = countries.len(), "loaded country dataset");
    Ok(countries)
}
