//! Test fixtures for creating test data.

use blog_core::domains::posts::Post;
use blog_core::kernel::Record;
use serde_json::json;

/// A stored post record as the store would hold it
pub fn stored_post(id: &str, title: &str, is_draft: bool, tags: &[&str]) -> Record {
    json!({
        "id": id,
        "title": title,
        "summary": format!("Summary of {}", title),
        "content": format!("Content of {}", title),
        "author": "Mario",
        "layout": "post",
        "createDate": "2024-01-01T00:00:00Z",
        "isDraft": is_draft,
        "tags": tags,
    })
    .as_object()
    .cloned()
    .expect("fixture is an object")
}

/// The scan-ordered set used by the neighbor scenarios: a, b, c published
/// with a draft wedged between a and b.
pub fn abc_records() -> Vec<Record> {
    vec![
        stored_post("a", "Alpha", false, &["rust", "go"]),
        stored_post("hidden", "Hidden draft", true, &["rust", "secret"]),
        stored_post("b", "Bravo", false, &["go"]),
        stored_post("c", "Charlie", false, &["Rust"]),
    ]
}

/// A new post as a client would submit it
pub fn new_post(title: &str, tags: &[&str]) -> Post {
    let mut post = Post::default();
    post.card.title = title.to_string();
    post.card.summary = format!("Summary of {}", title);
    post.card.tags = tags.iter().map(|t| t.to_string()).collect();
    post.content = format!("Content of {}", title);
    post.author = "Mario".to_string();
    post.layout = "post".to_string();
    post
}
