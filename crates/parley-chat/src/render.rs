//! Pure transcript rendering.
//!
//! [`render`] turns a transcript into display blocks and [`render_html`] turns
//! blocks into an HTML fragment. Neither touches session state, so the page can
//! be re-rendered after every append without any diffing.

use crate::transcript::Transcript;
use crate::turn::Role;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::{Deserialize, Serialize};

/// Presentation variant for turn blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Bold label followed by the content, no decoration
    Plain,
    /// Colored rounded cards, one palette per role
    #[default]
    Styled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub style: Style,
    pub user_label: String,
    pub assistant_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            user_label: "You".to_string(),
            assistant_label: "Chatbot".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn label(&self, role: Role) -> &str {
        match role {
            Role::User => &self.user_label,
            Role::Assistant => &self.assistant_label,
        }
    }
}

/// Card colors for the styled variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    pub background: &'static str,
    pub color: &'static str,
}

impl BlockStyle {
    pub const USER: BlockStyle = BlockStyle {
        background: "#222831",
        color: "#00ADB5",
    };

    pub const ASSISTANT: BlockStyle = BlockStyle {
        background: "#393E46",
        color: "#EEEEEE",
    };

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::User => Self::USER,
            Role::Assistant => Self::ASSISTANT,
        }
    }

    fn css(&self) -> String {
        format!(
            "background-color:{};color:{};padding:12px;border-radius:12px;margin-bottom:10px;\
             font-family:'Segoe UI', sans-serif;font-size:16px;",
            self.background, self.color
        )
    }
}

/// One display instruction: a labeled turn, optionally styled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub role: Role,
    pub label: String,
    pub content: String,
    pub style: Option<BlockStyle>,
}

impl Block {
    pub fn to_html(&self) -> String {
        let role_class = match self.role {
            Role::User => "turn-user",
            Role::Assistant => "turn-assistant",
        };

        match self.style {
            Some(style) => format!(
                "<div class=\"turn {}\" style=\"{}\"><b>{}:</b> {}</div>",
                role_class,
                style.css(),
                escape_text(&self.label),
                markdown_to_html(&self.content)
            ),
            None => format!(
                "<div class=\"turn {}\">{}</div>",
                role_class,
                markdown_to_html(&format!("**{}:** {}", self.label, self.content))
            ),
        }
    }
}

/// One block per turn, in transcript order
pub fn render(transcript: &Transcript, options: &RenderOptions) -> Vec<Block> {
    transcript
        .iter()
        .map(|turn| Block {
            role: turn.role,
            label: options.label(turn.role).to_string(),
            content: turn.content.clone(),
            style: match options.style {
                Style::Styled => Some(BlockStyle::for_role(turn.role)),
                Style::Plain => None,
            },
        })
        .collect()
}

pub fn render_html(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render Markdown, showing any raw HTML in the source as literal text
pub fn markdown_to_html(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            other => other,
        });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// HTML-escape plain text
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    html::push_html(&mut out, std::iter::once(Event::Text(CowStr::Borrowed(text))));
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    let blocked = ["javascript:", "vbscript:", "data:"];
    if blocked.iter().any(|prefix| scheme.starts_with(prefix)) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Turn;

    fn hello_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("Hello"));
        transcript.append(Turn::assistant("Hi! How can I help?"));
        transcript
    }

    #[test]
    fn test_one_block_per_turn_in_order() {
        let blocks = render(&hello_transcript(), &RenderOptions::default());

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].role, Role::User);
        assert_eq!(blocks[0].label, "You");
        assert_eq!(blocks[1].role, Role::Assistant);
        assert_eq!(blocks[1].label, "Chatbot");
    }

    #[test]
    fn test_render_is_idempotent() {
        let transcript = hello_transcript();
        let options = RenderOptions::default();
        assert_eq!(render(&transcript, &options), render(&transcript, &options));
    }

    #[test]
    fn test_empty_transcript_renders_nothing() {
        let blocks = render(&Transcript::new(), &RenderOptions::default());
        assert!(blocks.is_empty());
        assert_eq!(render_html(&blocks), "");
    }

    #[test]
    fn test_styled_blocks_carry_role_palette() {
        let blocks = render(&hello_transcript(), &RenderOptions::default());
        assert_eq!(blocks[0].style, Some(BlockStyle::USER));
        assert_eq!(blocks[1].style, Some(BlockStyle::ASSISTANT));

        let html = render_html(&blocks);
        let user_at = html.find("background-color:#222831").unwrap();
        let assistant_at = html.find("background-color:#393E46").unwrap();
        assert!(user_at < assistant_at);
        assert!(html.contains("<b>You:</b>"));
        assert!(html.contains("<b>Chatbot:</b>"));
    }

    #[test]
    fn test_plain_blocks_have_no_inline_style() {
        let options = RenderOptions::default().with_style(Style::Plain);
        let blocks = render(&hello_transcript(), &options);
        assert!(blocks.iter().all(|b| b.style.is_none()));

        let html = render_html(&blocks);
        assert!(!html.contains("style="));
        assert!(html.contains("<strong>You:</strong> Hello"));
        assert!(html.contains("<strong>Chatbot:</strong> Hi! How can I help?"));
    }

    #[test]
    fn test_content_markdown_is_rendered() {
        let html = markdown_to_html("Use **bold** and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_raw_html_in_content_is_escaped() {
        let html = markdown_to_html("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let block_html = markdown_to_html("<div onclick=\"x()\">block</div>");
        assert!(!block_html.contains("<div"));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = markdown_to_html("[click](javascript:alert(1))");
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript:"));

        let html = markdown_to_html("[docs](https://example.com)");
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_styled_reply_keeps_paragraphs_separate() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::assistant("First paragraph.\n\nSecond paragraph."));

        let html = render_html(&render(&transcript, &RenderOptions::default()));

        assert!(html.contains("<b>Chatbot:</b> <p>First paragraph.</p>"));
        assert!(html.contains("<p>Second paragraph.</p>"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_custom_labels() {
        let options = RenderOptions {
            style: Style::Plain,
            user_label: "Me".to_string(),
            assistant_label: "Bot".to_string(),
        };
        let blocks = render(&hello_transcript(), &options);
        assert_eq!(blocks[0].label, "Me");
        assert_eq!(blocks[1].label, "Bot");
    }
}
