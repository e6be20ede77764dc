//! Localized strings, resolved once at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Language used when the requested one has no bundle.
pub const DEFAULT_LANG: &str = "en";

/// Bundles compiled into the library.
const BUILTIN: &[(&str, &str)] = &[
    ("en", include_str!("../locale/en.json")),
    ("fr", include_str!("../locale/fr.json")),
    ("de", include_str!("../locale/de.json")),
];

/// Locale errors.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("Invalid locale bundle {lang}: {source}")]
    Parse {
        lang: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Missing default locale bundle")]
    MissingDefault,
}

/// Strings for one tool button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonStrings {
    pub title: String,
}

/// All strings the extension shows for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleBundle {
    /// Display name of the extension.
    pub name: String,
    /// Tool buttons, in the order they are added.
    pub buttons: Vec<ButtonStrings>,
}

impl LocaleBundle {
    /// Title of the button at `index`, falling back to the extension name.
    pub fn button_title(&self, index: usize) -> &str {
        self.buttons
            .get(index)
            .map(|b| b.title.as_str())
            .unwrap_or(self.name.as_str())
    }
}

/// Map of language identifiers to bundles.
#[derive(Debug, Clone)]
pub struct Locales {
    bundles: HashMap<String, LocaleBundle>,
}

impl Locales {
    /// Parse the bundles compiled into the library.
    pub fn builtin() -> Result<Self, LocaleError> {
        Self::from_sources(BUILTIN.iter().copied())
    }

    /// Parse bundles from `(lang, json)` pairs. A default-language bundle
    /// is required.
    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self, LocaleError> {
        let mut bundles = HashMap::new();
        for (lang, json) in sources {
            let bundle: LocaleBundle = serde_json::from_str(json).map_err(|source| LocaleError::Parse {
                lang: lang.to_string(),
                source,
            })?;
            bundles.insert(lang.to_string(), bundle);
        }
        if !bundles.contains_key(DEFAULT_LANG) {
            return Err(LocaleError::MissingDefault);
        }
        Ok(Self { bundles })
    }

    /// Check if a language has its own bundle.
    pub fn contains(&self, lang: &str) -> bool {
        self.bundles.contains_key(lang)
    }

    /// Bundle for `lang`, or the default bundle with a warning.
    pub fn resolve(&self, lang: &str) -> &LocaleBundle {
        if let Some(bundle) = self.bundles.get(lang) {
            return bundle;
        }
        log::warn!("Missing translation ({}) for HTML box - using '{}'", lang, DEFAULT_LANG);
        // from_sources guarantees the default bundle exists.
        &self.bundles[DEFAULT_LANG]
    }
}
