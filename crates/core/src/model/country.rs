use serde::Serialize;

//
// ─── CURRENCY ─────────────────────────────────────────────────────────────────
//

/// A currency listed for a country, keyed by its ISO code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

impl Currency {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

//
// ─── LANGUAGE ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

//
// ─── COUNTRY ──────────────────────────────────────────────────────────────────
//

/// A read-only country record as supplied by the data-access layer.
///
/// Every list field may be empty; records coming from public datasets are sparse
/// (territories without a capital, Antarctica without currencies, and so on).
/// Currencies and languages keep the order in which the source listed them, so
/// "first currency" is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    name: String,
    capital: Vec<String>,
    flag_image_url: String,
    population: u64,
    currencies: Vec<Currency>,
    languages: Vec<Language>,
    region: String,
}

impl Country {
    /// Creates a country with only a name and region; every other fact is absent.
    #[must_use]
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capital: Vec::new(),
            flag_image_url: String::new(),
            population: 0,
            currencies: Vec::new(),
            languages: Vec::new(),
            region: region.into(),
        }
    }

    #[must_use]
    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital.push(capital.into());
        self
    }

    #[must_use]
    pub fn with_flag(mut self, url: impl Into<String>) -> Self {
        self.flag_image_url = url.into();
        self
    }

    #[must_use]
    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currencies.push(currency);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.languages.push(language);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn capitals(&self) -> &[String] {
        &self.capital
    }

    #[must_use]
    pub fn flag_image_url(&self) -> &str {
        &self.flag_image_url
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population
    }

    #[must_use]
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    #[must_use]
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// First listed capital, if it is present and non-empty.
    #[must_use]
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital
            .first()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
    }

    /// Name of the first listed currency, if it is present and non-empty.
    #[must_use]
    pub fn primary_currency_name(&self) -> Option<&str> {
        self.currencies
            .first()
            .map(|c| c.name.as_str())
            .filter(|n| !n.trim().is_empty())
    }

    /// All language names joined with `", "`, treated as a single answer.
    ///
    /// Returns `None` when the country lists no named language.
    #[must_use]
    pub fn joined_languages(&self) -> Option<String> {
        let names: Vec<&str> = self
            .languages
            .iter()
            .map(|l| l.name.as_str())
            .filter(|n| !n.trim().is_empty())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }

    #[must_use]
    pub fn has_flag(&self) -> bool {
        !self.flag_image_url.trim().is_empty()
    }

    /// Countries without a name or a region cannot anchor any question.
    #[must_use]
    pub fn is_quizzable(&self) -> bool {
        !self.name.trim().is_empty() && !self.region.trim().is_empty()
    }
}
