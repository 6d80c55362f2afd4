use reqwest::Client;
use serde_json::Value;

use crate::error::MonitorError;
use crate::models::Post;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Strip the paragraph wrapper WordPress puts around rendered titles.
/// Deliberately not a general HTML sanitizer.
fn strip_paragraph_tags(raw: &str) -> String {
    raw.replace("<p>", "").replace("</p>", "").trim().to_string()
}

/// Normalize one raw post object into a `Post`, coercing every field to a
/// string. Title comes from the nested `title.rendered` field and falls
/// back to empty when absent or malformed. A missing id is a format error
/// since id is the post's identity.
pub fn normalize_post(raw: &Value) -> Result<Post, MonitorError> {
    let id = match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(MonitorError::Format(
                "Post object is missing an id".to_string(),
            ))
        }
    };

    let title = raw
        .get("title")
        .and_then(|t| t.get("rendered"))
        .and_then(|r| r.as_str())
        .unwrap_or("");

    Ok(Post {
        id,
        title: strip_paragraph_tags(title),
        modified: coerce_string(raw.get("modified")),
        link: coerce_string(raw.get("link")),
    })
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Validate and normalize a posts payload. The API must answer with a
/// JSON list; non-object entries in that list are skipped.
pub fn parse_posts(payload: &Value) -> Result<Vec<Post>, MonitorError> {
    let items = payload.as_array().ok_or_else(|| {
        MonitorError::Format("Expected a list of posts from WordPress API".to_string())
    })?;

    items
        .iter()
        .filter(|item| item.is_object())
        .map(normalize_post)
        .collect()
}

/// Most-recently-modified posts, descending.
pub fn build_posts_url(site_url: &str, limit: u32) -> String {
    let base = site_url.trim_end_matches('/');
    format!(
        "{}/wp-json/wp/v2/posts?per_page={}&orderby=modified&order=desc",
        base, limit
    )
}

pub struct WordPressClient {
    client: Client,
    page_size: u32,
}

impl WordPressClient {
    pub fn new() -> Result<Self, MonitorError> {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        Ok(Self { client, page_size })
    }

    /// Fetch the most recently modified posts and normalize them.
    pub async fn fetch_posts(&self, site_url: &str) -> Result<Vec<Post>, MonitorError> {
        let url = build_posts_url(site_url, self.page_size);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(MonitorError::Api { status, body });
        }

        let payload: Value = response.json().await?;
        parse_posts(&payload)
    }

    /// Total count of a resource read from the X-WP-Total header of a
    /// one-item page. Missing or unparsable header counts as zero.
    pub async fn fetch_resource_count(
        &self,
        site_url: &str,
        resource: &str,
    ) -> Result<u64, MonitorError> {
        let base = site_url.trim_end_matches('/');
        let url = format!("{}/wp-json/wp/v2/{}?per_page=1", base, resource);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(MonitorError::Api { status, body });
        }

        let count = response
            .headers()
            .get("X-WP-Total")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(count)
    }

    /// Raw JSON from a caller-configured traffic endpoint.
    pub async fn fetch_traffic_payload(&self, endpoint: &str) -> Result<Value, MonitorError> {
        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(MonitorError::Api { status, body });
        }
        let payload = response.json().await?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_post_with_rendered_title() {
        let raw = json!({
            "id": 42,
            "title": {"rendered": "<p>Hello World</p>"},
            "modified": "2026-02-01T08:00:00",
            "link": "https://example.com/hello"
        });
        let post = normalize_post(&raw).unwrap();
        assert_eq!(post.id, "42");
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.modified, "2026-02-01T08:00:00");
        assert_eq!(post.link, "https://example.com/hello");
    }

    #[test]
    fn test_normalize_post_malformed_title_falls_back_to_empty() {
        let raw = json!({"id": "7", "title": "not-an-object", "modified": "t", "link": "l"});
        let post = normalize_post(&raw).unwrap();
        assert_eq!(post.title, "");
    }

    #[test]
    fn test_normalize_post_missing_fields_coerce_to_empty_strings() {
        let raw = json!({"id": 3});
        let post = normalize_post(&raw).unwrap();
        assert_eq!(post.modified, "");
        assert_eq!(post.link, "");
        assert_eq!(post.title, "");
    }

    #[test]
    fn test_normalize_post_without_id_is_a_format_error() {
        let raw = json!({"title": {"rendered": "No id"}});
        let err = normalize_post(&raw).unwrap_err();
        assert!(matches!(err, MonitorError::Format(_)));
    }

    #[test]
    fn test_parse_posts_rejects_non_list_payload() {
        let err = parse_posts(&json!({"posts": []})).unwrap_err();
        assert!(matches!(err, MonitorError::Format(_)));

        let err = parse_posts(&json!("not a list")).unwrap_err();
        assert!(matches!(err, MonitorError::Format(_)));
    }

    #[test]
    fn test_parse_posts_skips_non_object_entries() {
        let payload = json!([
            {"id": 1, "title": {"rendered": "First"}, "modified": "t1", "link": "l1"},
            "junk",
            42,
            {"id": 2, "title": {"rendered": "Second"}, "modified": "t2", "link": "l2"}
        ]);
        let posts = parse_posts(&payload).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[1].id, "2");
    }

    #[test]
    fn test_build_posts_url_orders_by_modified_descending() {
        let url = build_posts_url("https://example.com/", 20);
        assert_eq!(
            url,
            "https://example.com/wp-json/wp/v2/posts?per_page=20&orderby=modified&order=desc"
        );
    }
}
