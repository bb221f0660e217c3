use bson::Document;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 3, max = 128))]
    pub title: String,
    pub thumbnail: String,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}

impl UpdateBlogRequest {
    pub fn to_patch(&self) -> Document {
        let mut patch = Document::new();
        if let Some(ref title) = self.title {
            patch.insert("title", title);
        }
        if let Some(ref thumbnail) = self.thumbnail {
            patch.insert("thumbnail", thumbnail);
        }
        if let Some(ref content) = self.content {
            patch.insert("content", content);
        }
        if let Some(ref status) = self.status {
            patch.insert("status", status);
        }
        patch
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListBlogsQuery {
    pub status: Option<String>,
}

impl ListBlogsQuery {
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(ref status) = self.status {
            filter.insert("status", status);
        }
        filter
    }
}
