use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Document, DocumentId};

/// Collection holding blog posts.
pub const POSTS_COLLECTION: &str = "blogposts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

/// Stored body of a blog post document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub author: Author,
    pub content: String,
}

/// API representation of a stored post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: DocumentId,
    pub title: String,
    pub author: Author,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<Document<BlogPost>> for PostResponse {
    fn from(doc: Document<BlogPost>) -> Self {
        Self {
            id: doc.id,
            title: doc.body.title,
            author: doc.body.author,
            content: doc.body.content,
            created: doc.created,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing `{0}` in request body")]
    MissingField(&'static str),

    #[error("`{0}` must not be blank")]
    BlankField(&'static str),
}

// ─── Request bodies ───

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePostReq {
    pub title: Option<String>,
    pub author: Option<AuthorReq>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostReq {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<AuthorReq>,
    pub content: Option<String>,
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(value.to_string())
}

impl AuthorReq {
    fn validate(&self) -> Result<Author, ValidationError> {
        Ok(Author {
            first_name: required(self.first_name.as_deref(), "author.firstName")?,
            last_name: required(self.last_name.as_deref(), "author.lastName")?,
        })
    }
}

impl CreatePostReq {
    pub fn validate(&self) -> Result<BlogPost, ValidationError> {
        let title = required(self.title.as_deref(), "title")?;
        let author = self
            .author
            .as_ref()
            .ok_or(ValidationError::MissingField("author"))?
            .validate()?;
        let content = required(self.content.as_deref(), "content")?;
        Ok(BlogPost { title, author, content })
    }
}

impl UpdatePostReq {
    /// Applies the supplied fields onto `current`, validating each one.
    pub fn apply(&self, current: BlogPost) -> Result<BlogPost, ValidationError> {
        let title = match self.title.as_deref() {
            Some(t) => required(Some(t), "title")?,
            None => current.title,
        };
        let author = match &self.author {
            Some(a) => a.validate()?,
            None => current.author,
        };
        let content = match self.content.as_deref() {
            Some(c) => required(Some(c), "content")?,
            None => current.content,
        };
        Ok(BlogPost { title, author, content })
    }
}
