use serde::{Deserialize, Serialize};

use super::error::IndexError;

/// One regulation as supplied by the corpus loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// Regulation key, e.g. `164.502`.
    #[serde(alias = "id")]
    pub regulation_id: String,
    /// Hierarchical text body, one numbered provision per line.
    #[serde(alias = "content")]
    pub regulation_content: String,
    /// Flat section text used by direct section lookup, when the corpus provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CorpusRecord {
    pub fn new(regulation_id: impl Into<String>, regulation_content: impl Into<String>) -> Self {
        Self {
            regulation_id: regulation_id.into(),
            regulation_content: regulation_content.into(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Parses a JSON corpus: either an array of records or an object keyed by regulation id.
    ///
    /// For the keyed form, records keep the key order of the document and a value's own
    /// `regulation_id` is ignored in favour of its key.
    pub fn from_json(json: &str) -> Result<Vec<Self>, IndexError> {
        match serde_json::from_str::<CorpusJson>(json)? {
            CorpusJson::List(records) => Ok(records),
            CorpusJson::Keyed(map) => map
                .into_iter()
                .map(|(regulation_id, value)| {
                    let body: KeyedBody = serde_json::from_value(value)?;
                    Ok(CorpusRecord {
                        regulation_id,
                        regulation_content: body.regulation_content,
                        text: body.text,
                    })
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusJson {
    List(Vec<CorpusRecord>),
    Keyed(serde_json::Map<String, serde_json::Value>),
}

#[derive(Deserialize)]
struct KeyedBody {
    #[serde(alias = "content")]
    regulation_content: String,
    #[serde(default)]
    text: Option<String>,
}
