use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub video_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub blog_post: BlogPost,
    pub instagram_post: SocialPost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl GenerationResult {
    /// Both posts as wrapped plain text, for printing outside the TUI.
    pub fn to_plain_text(&self, width: usize) -> String {
        let mut out = String::new();

        out.push_str(&self.blog_post.title);
        out.push_str("\n\n");
        for paragraph in self.blog_post.content.split('\n') {
            out.push_str(&textwrap::fill(paragraph, width));
            out.push('\n');
        }
        if !self.blog_post.tags.is_empty() {
            out.push('\n');
            out.push_str(&textwrap::fill(&self.blog_post.tags.join(", "), width));
            out.push('\n');
        }

        out.push_str("\n---\n\n");
        out.push_str(&textwrap::fill(&self.instagram_post.caption, width));
        out.push('\n');
        if !self.instagram_post.hashtags.is_empty() {
            out.push('\n');
            out.push_str(&textwrap::fill(&self.instagram_post.hashtags.join(" "), width));
            out.push('\n');
        }

        out
    }
}

/// Body of a non-success response. `error` is optional on the wire and not
/// always a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Lenient read of a non-success body; anything unparseable has no message.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// The server's message, if it sent a usable one. Blank strings, `null`,
    /// `false` and `0` count as no message.
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}
