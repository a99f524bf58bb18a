use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kernel::Record;

/// Attributes that are derived at read time and never stored.
const DERIVED_ATTRIBUTES: [&str; 2] = ["previous", "next"];

/// Lightweight projection of a post used by every list view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    pub id: String,
    pub create_date: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
}

/// Reference to a neighboring post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub id: String,
    pub title: String,
}

impl Info {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Blog post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    #[serde(flatten)]
    pub card: Card,
    pub author: String,
    pub content: String,
    pub is_draft: bool,
    pub layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
    pub previous: Info,
    pub next: Info,
}

impl Post {
    pub fn id(&self) -> &str {
        &self.card.id
    }

    pub fn to_card(&self) -> Card {
        self.card.clone()
    }

    pub fn info(&self) -> Info {
        Info {
            id: self.card.id.clone(),
            title: self.card.title.clone(),
        }
    }

    /// Lowercase every tag in place.
    pub fn normalize_tags(&mut self) {
        for tag in &mut self.card.tags {
            *tag = tag.to_lowercase();
        }
    }

    /// Marshal into the store's record format, dropping derived neighbors.
    pub fn to_record(&self) -> serde_json::Result<Record> {
        let mut record = match serde_json::to_value(self)? {
            Value::Object(record) => record,
            _ => Record::new(),
        };
        for attribute in DERIVED_ATTRIBUTES {
            record.remove(attribute);
        }
        Ok(record)
    }

    /// Unmarshal a stored record. Neighbors always start empty.
    pub fn from_record(record: Record) -> serde_json::Result<Self> {
        let mut post: Post = serde_json::from_value(Value::Object(record))?;
        post.previous = Info::default();
        post.next = Info::default();
        Ok(post)
    }
}

impl From<Post> for Card {
    fn from(post: Post) -> Self {
        post.card
    }
}

impl Card {
    pub fn from_record(record: Record) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(record))
    }
}
