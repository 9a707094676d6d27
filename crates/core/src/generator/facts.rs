//! Per-category fact extraction and prompt wording.

use crate::model::{Category, Country};

/// The answer string `country` contributes for `category`, if it has one.
///
/// Region facts come from the country itself here; region distractors are drawn
/// from the fixed region enumeration instead.
pub(crate) fn fact(category: Category, country: &Country) -> Option<String> {
    let value = match category {
        Category::Capital => country.primary_capital().map(str::to_owned),
        Category::Flag | Category::Population => Some(country.name().to_owned()),
        Category::Currency => country.primary_currency_name().map(str::to_owned),
        Category::Language => country.joined_languages(),
        Category::Region => Some(country.region().to_owned()),
    };
    value.filter(|v| !v.trim().is_empty())
}

/// Whether `country` can be the subject of a `category` question.
pub(crate) fn is_subject(category: Category, country: &Country) -> bool {
    match category {
        // A flag question carries the subject's image, so a country without a
        // flag URL cannot anchor one. A pool with no flag URLs at all reports
        // `UnsatisfiableCategory` for flags like the sparse-field categories.
        Category::Flag => country.has_flag() && fact(category, country).is_some(),
        _ => fact(category, country).is_some(),
    }
}

pub(crate) fn prompt(category: Category, subject: &Country) -> String {
    let name = subject.name();
    match category {
        Category::Capital => format!("What is the capital of {name}?"),
        Category::Flag => "Which country does this flag belong to?".to_string(),
        // Distractors are random country names, not population neighbours.
        Category::Population => format!(
            "Which country has a population closest to {}?",
            group_thousands(subject.population())
        ),
        Category::Currency => format!("What currency is used in {name}?"),
        Category::Language => format!("Which language(s) is/are spoken in {name}?"),
        Category::Region => format!("In which region is {name} located?"),
    }
}

/// Formats `n` with comma thousands separators, e.g. `67,391,582`.
pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
