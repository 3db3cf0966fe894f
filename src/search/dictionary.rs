//! Search dictionary document (`summary/dictionary.json`)

use serde::{Deserialize, Deserializer, Serialize};

/// Tag to reference table, plus reference key to label translations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    #[serde(default)]
    pub tag_array: Vec<Tag>,

    /// Absent in older documents
    #[serde(default)]
    pub translation_array: Vec<Translation>,
}

/// A search token and the items it points at
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,

    #[serde(default)]
    pub reference_array: Vec<Reference>,
}

/// Weighted pointer from a tag to an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,

    /// Written either as a number or as a numeric string
    #[serde(deserialize_with = "count_from_number_or_string")]
    pub count: u64,
}

/// Display label for a reference key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub key: String,
    pub value: String,
}

impl Dictionary {
    /// Parse a dictionary document
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// First tag named exactly `name`
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tag_array.iter().find(|tag| tag.name == name)
    }

    /// Label for reference key `key`
    pub fn translation(&self, key: &str) -> Option<&str> {
        self.translation_array
            .iter()
            .find(|translation| translation.key == key)
            .map(|translation| translation.value.as_str())
    }
}

fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(count) => Ok(count),
        Count::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid reference count {:?}", text))),
    }
}
