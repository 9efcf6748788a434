//! Server-side rendering of the form page.

use crate::levels::{self, DEFAULT_LEVEL, MAX_LEVEL, MIN_LEVEL};

/// Notice severity, mapped to a CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Info => "notice info",
            NoticeKind::Success => "notice success",
            NoticeKind::Warning => "notice warning",
            NoticeKind::Error => "notice error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything one render of the page needs
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub level: i64,
    pub text: String,
    pub explanation: Option<String>,
    pub notices: Vec<Notice>,
    /// Shown above everything else while the sink is unavailable
    pub sink_warning: Option<String>,
}

impl PageView {
    /// Fresh form: level 1, empty text
    pub fn fresh() -> Self {
        Self::with_input(DEFAULT_LEVEL, String::new())
    }

    /// Form echoing the submitted input; an invalid level shows as the default
    pub fn with_input(level: i64, text: impl Into<String>) -> Self {
        let level = if levels::lookup(level).is_ok() {
            level
        } else {
            DEFAULT_LEVEL
        };
        Self {
            level,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn notice(mut self, kind: NoticeKind, message: impl Into<String>) -> Self {
        self.notices.push(Notice::new(kind, message));
        self
    }

    pub fn explanation(mut self, text: impl Into<String>) -> Self {
        self.explanation = Some(text.into());
        self
    }

    pub fn sink_warning(mut self, warning: Option<String>) -> Self {
        self.sink_warning = warning;
        self
    }

    /// Render the full HTML document
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        html.push_str(HEAD);
        html.push_str("<body><main>\n");
        html.push_str("<div class=\"header-logo\">Explain Like I'm 5</div>\n");
        html.push_str(
            "<p class=\"caption\">Simplify complicated ideas into plain language for any brain level.</p>\n",
        );

        if let Some(ref warning) = self.sink_warning {
            push_notice(&mut html, &Notice::new(NoticeKind::Warning, warning.as_str()));
        }
        for notice in &self.notices {
            push_notice(&mut html, notice);
        }

        self.push_form(&mut html);

        if let Some(ref explanation) = self.explanation {
            html.push_str("<h3>Simplified Explanation:</h3>\n<div class=\"explanation-box\">");
            html.push_str(&escape_html(explanation).replace('\n', "<br>"));
            html.push_str("</div>\n");
        }

        html.push_str("</main></body></html>\n");
        html
    }

    fn push_form(&self, html: &mut String) {
        html.push_str("<form method=\"post\" action=\"/explain\">\n");
        html.push_str(&format!(
            "<label for=\"level\">Choose your understanding level: <output id=\"level-value\">{level}</output></label>\n\
             <input type=\"range\" id=\"level\" name=\"level\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{level}\" \
             oninput=\"document.getElementById('level-value').value = this.value\">\n",
            level = self.level,
            min = MIN_LEVEL,
            max = MAX_LEVEL,
        ));

        html.push_str("<div class=\"tooltip-legend\">\n");
        for level in levels::all() {
            html.push_str(&format!(
                "  <span title=\"{}\">{}: {}</span>\n",
                escape_html(level.hint),
                level.rank,
                escape_html(level.label)
            ));
        }
        html.push_str("</div>\n");

        html.push_str("<button type=\"submit\" formaction=\"/example\">&#127922; Load Example Text</button>\n");
        html.push_str("<label for=\"text\">Paste your complicated text here:</label>\n");
        html.push_str("<textarea id=\"text\" name=\"text\" rows=\"10\">");
        html.push_str(&escape_html(&self.text));
        html.push_str("</textarea>\n");
        html.push_str("<button type=\"submit\" formaction=\"/explain\">&#10024; Explain it!</button>\n");
        html.push_str("<button type=\"submit\" formaction=\"/log/test\">&#129514; Test Logging</button>\n");
        html.push_str("</form>\n");
    }
}

fn push_notice(html: &mut String, notice: &Notice) {
    html.push_str(&format!(
        "<div class=\"{}\">{}</div>\n",
        notice.kind.css_class(),
        escape_html(&notice.message)
    ));
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Explain Like I'm 5</title>
<link href="https://fonts.googleapis.com/css2?family=Quicksand:wght@500;700&display=swap" rel="stylesheet">
<style>
  body { font-family: 'Quicksand', sans-serif; background: #1e2a38; color: #fff; margin: 0; }
  main { max-width: 960px; margin: 0 auto; padding: 1em; }
  .header-logo { font-size: 4em; font-weight: 900; margin: 20px 0 10px 0; }
  .caption { opacity: 0.8; }
  form { display: flex; flex-direction: column; gap: 0.6em; }
  textarea { min-height: 200px; font: inherit; }
  .tooltip-legend span { margin-right: 1em; cursor: help; border-bottom: 1px dotted #add8e6; }
  .explanation-box {
    background-color: rgba(0, 0, 0, 0.6); padding: 1em; border-radius: 10px;
    border: 2px solid #add8e6; font-size: 1.2em; max-height: 400px; overflow-y: auto;
    white-space: pre-wrap; word-wrap: break-word; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
  }
  .notice { padding: 0.6em 1em; border-radius: 6px; margin: 0.4em 0; }
  .notice.info { background: #2b4c6f; }
  .notice.success { background: #2e6b3a; }
  .notice.warning { background: #7a6420; }
  .notice.error { background: #7a2626; }
</style>
</head>
"#;
