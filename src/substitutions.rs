use log::debug;
use serde::Deserialize;

use crate::error::MatchError;

/// One catalog entry as it appears in the substitutions file
#[derive(Debug, Clone, Deserialize)]
struct RawSubstitution {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Substitutions", default)]
    substitutions: Vec<String>,
}

/// Read-only, insertion-ordered mapping of ingredient name to substitutes
#[derive(Debug, Clone, Default)]
pub struct SubstitutionCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl SubstitutionCatalog {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(item, subs)| (item.as_ref().to_lowercase(), subs))
                .collect(),
        }
    }

    /// Parse a JSON array of `{"Item": ..., "Substitutions": [...]}` records
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let raw: Vec<RawSubstitution> = serde_json::from_str(json)?;
        debug!("Parsed {} substitution entries", raw.len());
        Ok(Self::new(
            raw.into_iter().map(|entry| (entry.item, entry.substitutions)),
        ))
    }

    /// Substitutes of the first entry, in catalog order, whose name contains or
    /// is contained in the ingredient
    pub fn lookup(&self, ingredient: &str) -> Option<&[String]> {
        let ingredient = ingredient.to_lowercase();
        self.entries
            .iter()
            .find(|(item, _)| is_close_match(item, &ingredient))
            .map(|(_, subs)| subs.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Substring relation in either direction between two lower-cased names
pub(crate) fn is_close_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}
