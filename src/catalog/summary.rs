use serde::{Deserialize, Serialize};

/// Description of one playable video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Media path, relative to the catalog's data directory
    pub path: String,

    pub mime_type: String,

    pub title: String,

    /// People credited on the video
    #[serde(default)]
    pub principal_array: Vec<String>,

    /// Source file name
    pub name: String,
}

impl Summary {
    /// Location of the media relative to the catalog root (`data` + path)
    pub fn media_path(&self) -> String {
        format!("data{}", self.path)
    }
}
