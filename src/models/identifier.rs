use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// Identificador declared at document or line-item level (clave + complementos)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub complement1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub complement2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub complement3: String,
}

impl Identifier {
    pub fn new(key: &str, complement1: &str, complement2: &str, complement3: &str) -> Self {
        Self {
            key: key.to_string(),
            complement1: complement1.to_string(),
            complement2: complement2.to_string(),
            complement3: complement3.to_string(),
        }
    }

    pub fn complements(&self) -> [&str; 3] {
        [&self.complement1, &self.complement2, &self.complement3]
    }
}
