//! Article Model
//!
//! The body travels twice: as the editor's native JSON document and as the
//! rendered HTML. Neither is validated structurally.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `#word` tokens, Thai letters included
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\w\u{0E00}-\u{0E7F}]+").expect("valid hashtag regex"));

/// Article as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    /// Editor document, either embedded or as a JSON string
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Article {
    /// The editor document, whatever shape the backend stored it in
    ///
    /// A string that is not JSON is wrapped as a single paragraph.
    pub fn document(&self) -> Value {
        match &self.content {
            Value::String(s) => serde_json::from_str(s).unwrap_or_else(|_| paragraph_doc(s)),
            Value::Null => json!({ "type": "doc", "content": [] }),
            other => other.clone(),
        }
    }
}

/// Draft sent to `POST /articles`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub slug: String,
    pub content: Value,
    pub content_html: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<i64>,
}

/// Wrap plain text into a one-paragraph document
pub fn paragraph_doc(text: &str) -> Value {
    json!({
        "type": "doc",
        "content": [
            { "type": "paragraph", "content": [{ "type": "text", "text": text }] }
        ]
    })
}

/// True when the document has no blocks, or one empty paragraph
pub fn is_document_empty(doc: &Value) -> bool {
    let Some(blocks) = doc.get("content").and_then(Value::as_array) else {
        return true;
    };
    match blocks.as_slice() {
        [] => true,
        [only] => {
            only.get("type").and_then(Value::as_str) == Some("paragraph")
                && only
                    .get("content")
                    .and_then(Value::as_array)
                    .is_none_or(|c| c.is_empty())
        }
        _ => false,
    }
}

/// Collect distinct hashtags from every text node, in sorted order
pub fn extract_hashtags(doc: &Value) -> Vec<String> {
    let mut found = BTreeSet::new();
    collect_hashtags(doc, &mut found);
    found.into_iter().collect()
}

fn collect_hashtags(node: &Value, found: &mut BTreeSet<String>) {
    if node.get("type").and_then(Value::as_str) == Some("text") {
        if let Some(text) = node.get("text").and_then(Value::as_str) {
            for m in HASHTAG.find_iter(text) {
                found.insert(m.as_str().to_string());
            }
        }
    }
    if let Some(children) = node.get("content").and_then(Value::as_array) {
        for child in children {
            collect_hashtags(child, found);
        }
    }
}
