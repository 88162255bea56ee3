//! Transcript export to downloadable documents.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use vchat::{ExportFormat, Turn, export_transcript};
//!
//! let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
//! let turns = vec![Turn::user("Hi", "grok-1"), Turn::assistant("Hello!", "grok-1")];
//!
//! let document = export_transcript(&turns, "My  chat", ExportFormat::Text, at).unwrap();
//! assert_eq!(document.file_name, "My_chat_2024-05-01.txt");
//! assert!(document.contents.contains("Virtue (using grok-1):\nHello!\n\n"));
//! ```

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::{ChatError, Turn};

pub const DEFAULT_EXPORT_TITLE: &str = "Conversation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub media_type: &'static str,
    pub contents: String,
}

/// Renders `turns` as a document titled `title`. A blank title falls back to
/// [`DEFAULT_EXPORT_TITLE`].
pub fn export_transcript(
    turns: &[Turn],
    title: &str,
    format: ExportFormat,
    exported_at: DateTime<Utc>,
) -> Result<ExportedDocument, ChatError> {
    if turns.is_empty() {
        return Err(ChatError::invalid_request(
            "cannot export an empty transcript",
        ));
    }

    let title = match title.trim() {
        "" => DEFAULT_EXPORT_TITLE,
        trimmed => trimmed,
    };
    let timestamp = exported_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let contents = match format {
        ExportFormat::Text => render_text(turns, title, &timestamp),
        ExportFormat::Html => render_html(turns, title, &timestamp, exported_at),
    };

    Ok(ExportedDocument {
        file_name: file_name(title, exported_at, format),
        media_type: format.media_type(),
        contents,
    })
}

fn file_name(title: &str, exported_at: DateTime<Utc>, format: ExportFormat) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!(
        "{stem}_{}.{}",
        exported_at.format("%Y-%m-%d"),
        format.extension()
    )
}

fn render_text(turns: &[Turn], title: &str, timestamp: &str) -> String {
    let mut out = format!("{title}\nExported on {timestamp}\n\n");
    for turn in turns {
        out.push_str(turn.role.display_name());
        if !turn.model.is_empty() {
            let _ = write!(out, " (using {})", turn.model);
        }
        let _ = write!(out, ":\n{}\n\n", turn.content);
    }

    out
}

fn render_html(
    turns: &[Turn],
    title: &str,
    timestamp: &str,
    exported_at: DateTime<Utc>,
) -> String {
    let title = escape_html(title);
    let mut out = String::new();

    let _ = write!(
        out,
        concat!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>{title} - {date}</title>\n<style>\n",
            "body {{ font-family: Arial, sans-serif; margin: 40px; }}\n",
            ".header {{ text-align: center; margin-bottom: 30px; }}\n",
            ".message {{ margin-bottom: 20px; padding: 10px; border-radius: 5px; }}\n",
            ".user {{ background-color: #f0f0f0; }}\n",
            ".assistant {{ background-color: #e6f7ff; }}\n",
            ".role {{ font-weight: bold; margin-bottom: 5px; }}\n",
            ".content {{ white-space: pre-wrap; }}\n",
            ".model {{ font-size: 0.8em; color: #666; font-style: italic; }}\n",
            "@media print {{ body {{ margin: 0; }} .message {{ break-inside: avoid; }} }}\n",
            "</style>\n</head>\n<body>\n",
            "<div class=\"header\">\n<h1>{title}</h1>\n<p>Exported on {timestamp}</p>\n</div>\n"
        ),
        title = title,
        date = exported_at.format("%Y-%m-%d"),
        timestamp = timestamp,
    );

    for turn in turns {
        let _ = write!(
            out,
            "<div class=\"message {}\">\n<div class=\"role\">{}</div>\n",
            turn.role.as_str(),
            turn.role.display_name()
        );
        if !turn.model.is_empty() {
            let _ = writeln!(
                out,
                "<div class=\"model\">using {}</div>",
                escape_html(&turn.model)
            );
        }
        let _ = write!(
            out,
            "<div class=\"content\">{}</div>\n</div>\n",
            escape_html(&turn.content)
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::ChatErrorKind;

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
            .single()
            .expect("valid timestamp")
    }

    fn sample() -> Vec<Turn> {
        vec![
            Turn::user("What is <b>bold</b> & why?", "claude-3-opus"),
            Turn::assistant("It's \"markup\".", "claude-3-opus"),
        ]
    }

    #[test]
    fn text_export_follows_the_download_layout() {
        let document =
            export_transcript(&sample(), "Design review", ExportFormat::Text, exported_at())
                .expect("export should succeed");

        assert_eq!(document.file_name, "Design_review_2024-03-09.txt");
        assert_eq!(document.media_type, "text/plain; charset=utf-8");
        assert_eq!(
            document.contents,
            concat!(
                "Design review\nExported on 2024-03-09 14:05:00 UTC\n\n",
                "You (using claude-3-opus):\nWhat is <b>bold</b> & why?\n\n",
                "Virtue (using claude-3-opus):\nIt's \"markup\".\n\n",
            )
        );
    }

    #[test]
    fn html_export_escapes_transcript_text() {
        let document = export_transcript(&sample(), "Q&A", ExportFormat::Html, exported_at())
            .expect("export should succeed");

        assert_eq!(document.file_name, "Q&A_2024-03-09.html");
        assert!(document.contents.contains("<h1>Q&amp;A</h1>"));
        assert!(
            document
                .contents
                .contains("What is &lt;b&gt;bold&lt;/b&gt; &amp; why?")
        );
        assert!(document.contents.contains("It&#39;s &quot;markup&quot;."));
        assert!(!document.contents.contains("<b>bold</b>"));
        assert_eq!(document.contents.matches("class=\"message ").count(), 2);
    }

    #[test]
    fn empty_transcript_cannot_be_exported() {
        let error = export_transcript(&[], "Anything", ExportFormat::Text, exported_at())
            .expect_err("empty export must fail");
        assert_eq!(error.kind, ChatErrorKind::InvalidRequest);
    }

    #[test]
    fn blank_title_uses_the_default() {
        let document = export_transcript(&sample(), "  ", ExportFormat::Text, exported_at())
            .expect("export should succeed");

        assert_eq!(document.file_name, "Conversation_2024-03-09.txt");
        assert!(document.contents.starts_with("Conversation\n"));
    }
}
