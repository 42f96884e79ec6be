//! Article authoring and reading

use serde_json::Value;
use shared::models::{Article, ArticleDraft, extract_hashtags, is_document_empty};

use super::{refuse, required};
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone)]
pub struct ArticlesApi<H> {
    http: H,
}

/// URL slug from a title: lower-case alphanumeric runs joined by `-`
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Check a draft and fill in what can be derived from it
fn prepare(mut draft: ArticleDraft) -> ClientResult<ArticleDraft> {
    draft.title = required(&draft.title, "Please enter a title")?;
    if is_document_empty(&draft.content) {
        return Err(refuse("Article content is empty"));
    }
    if draft.slug.trim().is_empty() {
        draft.slug = slugify(&draft.title);
        if draft.slug.is_empty() {
            return Err(refuse("Please enter a slug for this title"));
        }
    }
    if draft.hashtags.is_empty() {
        draft.hashtags = extract_hashtags(&draft.content);
    }
    Ok(draft)
}

impl<H: HttpClient> ArticlesApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Article>> {
        self.http.get("/articles/").await
    }

    pub async fn get(&self, slug: &str) -> ClientResult<Article> {
        self.http.get(&format!("/articles/{slug}")).await
    }

    /// `POST /articles/`; both bodies are sent as given
    pub async fn create(&self, draft: ArticleDraft) -> ClientResult<Article> {
        let draft = prepare(draft)?;
        tracing::info!(slug = %draft.slug, hashtags = draft.hashtags.len(), "Publishing article");
        self.http.post("/articles/", &draft).await
    }

    pub async fn delete(&self, slug: &str) -> ClientResult<Value> {
        self.http.delete(&format!("/articles/{slug}")).await
    }
}

/// Hashtags of a stored article
pub fn hashtags(article: &Article) -> Vec<String> {
    extract_hashtags(&article.document())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::paragraph_doc;

    fn draft(title: &str, content: Value) -> ArticleDraft {
        ArticleDraft {
            title: title.into(),
            slug: String::new(),
            content,
            content_html: "<p></p>".into(),
            tags: Vec::new(),
            hashtags: Vec::new(),
            category_id: None,
            subcategory_id: None,
        }
    }

    #[test]
    fn test_prepare_fills_slug_and_hashtags() {
        let prepared = prepare(draft(" Hello World! ", paragraph_doc("intro #rust #ไทย"))).unwrap();
        assert_eq!(prepared.title, "Hello World!");
        assert_eq!(prepared.slug, "hello-world");
        assert_eq!(prepared.hashtags, vec!["#rust", "#ไทย"]);
    }

    #[test]
    fn test_prepare_refuses_empty() {
        let empty = json!({"type": "doc", "content": [{"type": "paragraph"}]});
        assert_eq!(
            prepare(draft("Title", empty)).unwrap_err().to_string(),
            "Article content is empty"
        );
        assert_eq!(
            prepare(draft("  ", paragraph_doc("x"))).unwrap_err().to_string(),
            "Please enter a title"
        );
    }

    #[test]
    fn test_punctuation_title_needs_a_slug() {
        let err = prepare(draft("!!!", paragraph_doc("x"))).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a slug for this title");

        let mut named = draft("!!!", paragraph_doc("x"));
        named.slug = "exclaim".into();
        assert_eq!(prepare(named).unwrap().slug, "exclaim");

        assert_eq!(prepare(draft("ภาษาไทย 101", paragraph_doc("x"))).unwrap().slug, "ภาษาไทย-101");
    }
}
