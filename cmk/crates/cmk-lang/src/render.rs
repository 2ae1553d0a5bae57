//! Rendering of lexed documents.
//!
//! Two outputs are supported: ANSI-colored text for terminals, styled by a
//! [`Theme`], and an HTML fragment using the editor's `cm-*` class names.

use cmk_lex::{Mode, StyleClass, Token};

use crate::document::Document;

/// SGR parameters per style class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Comment style
    pub comment: String,
    /// String style
    pub string: String,
    /// Keyword style
    pub keyword: String,
    /// Variable style
    pub variable: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            comment: "2;37".to_string(),
            string: "32".to_string(),
            keyword: "1;35".to_string(),
            variable: "36".to_string(),
        }
    }
}

impl Theme {
    /// SGR parameters for `class`.
    pub fn code(&self, class: StyleClass) -> &str {
        match class {
            StyleClass::Comment => &self.comment,
            StyleClass::String => &self.string,
            StyleClass::Keyword => &self.keyword,
            StyleClass::Variable => &self.variable,
        }
    }

    /// Replaces the SGR parameters for `class`.
    pub fn set(&mut self, class: StyleClass, code: impl Into<String>) {
        let slot = match class {
            StyleClass::Comment => &mut self.comment,
            StyleClass::String => &mut self.string,
            StyleClass::Keyword => &mut self.keyword,
            StyleClass::Variable => &mut self.variable,
        };
        *slot = code.into();
    }
}

/// Renders `document` with ANSI escapes, one output line per line.
///
/// ```
/// use cmk_lang::{render_ansi, Document, Theme};
/// use cmk_lex::Lexer;
///
/// let doc = Document::new(Lexer::with_builtin(), "set(X)");
/// assert_eq!(render_ansi(&doc, &Theme::default()), "\x1b[1;35mset\x1b[0m(X)");
/// ```
pub fn render_ansi<M: Mode>(document: &Document<M>, theme: &Theme) -> String {
    render_lines(document, |out, text, class| match class {
        Some(class) => out.push_str(&format!("\x1b[{}m{}\x1b[0m", theme.code(class), text)),
        None => out.push_str(text),
    })
}

/// Renders `document` as an HTML `<pre>` block.
///
/// ```
/// use cmk_lang::{render_html, Document};
/// use cmk_lex::Lexer;
///
/// let doc = Document::new(Lexer::with_builtin(), "set(X <y>)");
/// assert_eq!(
///     render_html(&doc),
///     "<pre class=\"cm-s-default\"><span class=\"cm-keyword\">set</span>(X &lt;y&gt;)</pre>\n"
/// );
/// ```
pub fn render_html<M: Mode>(document: &Document<M>) -> String {
    let body = render_lines(document, |out, text, class| match class {
        Some(class) => out.push_str(&format!(
            "<span class=\"cm-{}\">{}</span>",
            class,
            escape_html(text)
        )),
        None => out.push_str(&escape_html(text)),
    });
    format!("<pre class=\"cm-s-default\">{}</pre>\n", body)
}

/// Renders unstyled text: the document as it was given.
pub fn render_plain<M: Mode>(document: &Document<M>) -> String {
    render_lines(document, |out, text, _| out.push_str(text))
}

/// Walks every token, merging adjacent tokens of the same class.
fn render_lines<M, F>(document: &Document<M>, mut emit: F) -> String
where
    M: Mode,
    F: FnMut(&mut String, &str, Option<StyleClass>),
{
    let mut out = String::new();
    for (i, (line, tokens)) in document.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (class, text) in runs(line, tokens) {
            emit(&mut out, text, class);
        }
    }
    out
}

/// Groups consecutive tokens with the same class into one slice of `line`.
fn runs<'a>(line: &'a str, tokens: &[Token]) -> Vec<(Option<StyleClass>, &'a str)> {
    let mut runs: Vec<(Option<StyleClass>, usize, usize)> = Vec::new();
    for token in tokens {
        if let Some((class, _, end)) = runs.last_mut() {
            if *class == token.class && *end == token.span.start {
                *end = token.span.end;
                continue;
            }
        }
        runs.push((token.class, token.span.start, token.span.end));
    }
    runs.into_iter()
        .filter_map(|(class, start, end)| line.get(start..end).map(|text| (class, text)))
        .collect()
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
