//! Document sessions with incremental relexing.
//!
//! A [`Document`] keeps, for every line, the lexer state at the start of the
//! line and the tokens the line produced. After an edit only the edited line
//! is relexed, plus following lines for as long as the state flowing out of
//! a relexed line differs from the state previously stored for the next
//! line. Opening a bracket comment therefore relexes everything below it,
//! while editing a plain argument usually relexes a single line.
//!
//! # Example
//!
//! ```
//! use cmk_lang::Document;
//! use cmk_lex::{Lexer, StyleClass};
//!
//! let mut doc = Document::new(Lexer::with_builtin(), "set(A 1)\nset(B 2)\nset(C 3)");
//! assert_eq!(doc.line_count(), 3);
//!
//! // Editing inside an argument list touches one line.
//! assert_eq!(doc.replace_line(1, "set(B 20)").unwrap(), 1);
//!
//! // Opening a bracket comment changes every line below.
//! assert_eq!(doc.replace_line(0, "#[[").unwrap(), 3);
//! assert_eq!(doc.tokens(2).unwrap()[0].class, Some(StyleClass::Comment));
//! ```

use cmk_lex::{tokenize_line, Lexer, Mode, Token};
use cmk_util::{Diagnostic, Handler};

use crate::error::{LangError, LangResult};

/// One line with its cached lexing results.
#[derive(Clone, Debug)]
struct LineEntry<S> {
    text: String,
    start: S,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

/// A lexed document.
#[derive(Debug)]
pub struct Document<M: Mode = Lexer> {
    mode: M,
    lines: Vec<LineEntry<M::State>>,
    /// State after the last line.
    end_state: M::State,
}

impl<M: Mode> Document<M> {
    /// Splits `text` into lines and lexes all of them.
    ///
    /// Line terminators (`\n` or `\r\n`) are not part of the stored lines.
    /// A trailing terminator yields a final empty line, so [`Document::text`]
    /// reproduces the input up to `\r`.
    pub fn new(mode: M, text: &str) -> Self {
        let start = mode.start_state();
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| LineEntry {
                text: line.to_string(),
                start: start.clone(),
                tokens: Vec::new(),
                diagnostics: Vec::new(),
            })
            .collect();
        let mut doc = Self {
            mode,
            lines,
            end_state: start,
        };
        let lexed = doc.relex_all();
        log::debug!("lexed {} lines", lexed);
        doc
    }

    /// The highlighting mode.
    pub fn mode(&self) -> &M {
        &self.mode
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of line `index`.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.text.as_str())
    }

    /// Tokens of line `index`.
    pub fn tokens(&self, index: usize) -> Option<&[Token]> {
        self.lines.get(index).map(|l| l.tokens.as_slice())
    }

    /// State at the start of line `index`.
    pub fn start_state(&self, index: usize) -> Option<&M::State> {
        self.lines.get(index).map(|l| &l.start)
    }

    /// State after the last line.
    pub fn end_state(&self) -> &M::State {
        &self.end_state
    }

    /// `(text, tokens)` for each line in order.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &[Token])> {
        self.lines
            .iter()
            .map(|l| (l.text.as_str(), l.tokens.as_slice()))
    }

    /// Diagnostics from all lines, in line order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lines
            .iter()
            .flat_map(|l| l.diagnostics.iter().cloned())
            .collect()
    }

    /// The document text with `\n` line endings.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }

    /// Replaces line `index`, returning how many lines were relexed.
    pub fn replace_line(&mut self, index: usize, text: &str) -> LangResult<usize> {
        self.check_index(index, self.lines.len())?;
        self.lines[index].text = text.to_string();
        let start = self.lines[index].start.clone();
        Ok(self.relex_from(index, start))
    }

    /// Inserts a line before `index` (`index == line_count()` appends),
    /// returning how many lines were relexed.
    pub fn insert_line(&mut self, index: usize, text: &str) -> LangResult<usize> {
        self.check_index(index, self.lines.len() + 1)?;
        let start = match self.lines.get(index) {
            Some(next) => next.start.clone(),
            None => self.end_state.clone(),
        };
        self.lines.insert(
            index,
            LineEntry {
                text: text.to_string(),
                start: start.clone(),
                tokens: Vec::new(),
                diagnostics: Vec::new(),
            },
        );
        let relexed = self.relex_from(index, start);
        self.renumber_from(index + relexed);
        Ok(relexed)
    }

    /// Removes line `index`, returning how many lines were relexed.
    pub fn remove_line(&mut self, index: usize) -> LangResult<usize> {
        self.check_index(index, self.lines.len())?;
        let removed = self.lines.remove(index);
        if index == self.lines.len() {
            self.end_state = removed.start;
            return Ok(0);
        }
        let relexed = self.relex_from(index, removed.start);
        self.renumber_from(index + relexed);
        Ok(relexed)
    }

    /// Relexes every line, e.g. after the keyword table finished loading.
    pub fn relex_all(&mut self) -> usize {
        // Keyword changes can alter tokens on lines whose states did not
        // change, so the convergence check cannot be used here.
        let mut state = self.mode.start_state();
        for index in 0..self.lines.len() {
            self.lines[index].start = state.clone();
            self.lex_line(index, &mut state);
        }
        self.end_state = state;
        self.lines.len()
    }

    fn check_index(&self, index: usize, bound: usize) -> LangResult<()> {
        if index < bound {
            Ok(())
        } else {
            Err(LangError::LineOutOfRange {
                index,
                len: self.lines.len(),
            })
        }
    }

    /// Lexes line `index` from `state`, leaving its end state in `state`.
    fn lex_line(&mut self, index: usize, state: &mut M::State) {
        let handler = Handler::new();
        let entry = &mut self.lines[index];
        let number = index as u32 + 1;
        entry.tokens = tokenize_line(&self.mode, &entry.text, number, state, &handler);
        entry.diagnostics = handler.take();
    }

    /// Relexes from `index` until the outgoing state matches the stored
    /// start of the next line.
    fn relex_from(&mut self, index: usize, start: M::State) -> usize {
        let mut state = start;
        let mut relexed = 0;
        let mut i = index;
        while i < self.lines.len() {
            self.lines[i].start = state.clone();
            self.lex_line(i, &mut state);
            relexed += 1;
            i += 1;
            if self.lines.get(i).is_some_and(|next| next.start == state) {
                return relexed;
            }
        }
        self.end_state = state;
        relexed
    }

    /// Rewrites line numbers in cached spans from `index` on.
    fn renumber_from(&mut self, index: usize) {
        for (i, line) in self.lines.iter_mut().enumerate().skip(index) {
            let number = i as u32 + 1;
            for token in &mut line.tokens {
                token.span.line = number;
            }
            for diag in &mut line.diagnostics {
                diag.span.line = number;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmk_lex::{CommandRef, LexerState, StyleClass};
    use cmk_util::Symbol;
    use proptest::prelude::*;

    fn doc(text: &str) -> Document {
        Document::new(Lexer::with_builtin(), text)
    }

    /// Lexes `text` from scratch and returns each line's tokens.
    fn fresh_tokens(text: &str) -> Vec<Vec<Token>> {
        let d = doc(text);
        d.lines().map(|(_, t)| t.to_vec()).collect()
    }

    fn all_tokens(d: &Document) -> Vec<Vec<Token>> {
        d.lines().map(|(_, t)| t.to_vec()).collect()
    }

    #[test]
    fn test_start_states_chain() {
        let d = doc("if(A\n  AND B)\nset(X \"y\nz\")");
        assert_eq!(d.line_count(), 4);
        assert_eq!(d.start_state(0), Some(&LexerState::new()));
        assert_eq!(
            d.start_state(1)
                .and_then(|s| s.command())
                .and_then(|c| c.symbol())
                .map(|c| c.as_str()),
            Some("if")
        );
        assert!(d.start_state(3).is_some_and(|s| s.in_string()));
        assert_eq!(d.end_state(), &LexerState::new());
    }

    #[test]
    fn test_replace_line_converges() {
        let mut d = doc("set(A 1)\nset(B 2)\nset(C 3)\nset(D 4)");
        assert_eq!(d.replace_line(1, "set(B ${X})").unwrap(), 1);
        assert_eq!(d.tokens(1).unwrap()[4].class, Some(StyleClass::Variable));
    }

    #[test]
    fn test_unclosed_string_relexes_to_end() {
        let mut d = doc("set(A 1)\nset(B 2)\nset(C 3)");
        assert_eq!(d.replace_line(0, "set(A \"1)").unwrap(), 3);
        assert!(d.end_state().in_string());
        assert!(d.tokens(2).unwrap().iter().all(|t| t.class == Some(StyleClass::String)));

        assert_eq!(d.replace_line(0, "set(A 1)").unwrap(), 3);
        assert_eq!(all_tokens(&d), fresh_tokens(&d.text()));
    }

    #[test]
    fn test_insert_and_remove_match_fresh_lex() {
        let mut d = doc("project(x)\nmessage(STATUS hi)\nendif()");
        d.insert_line(1, "#[[").unwrap();
        assert_eq!(d.line_count(), 4);
        assert_eq!(all_tokens(&d), fresh_tokens(&d.text()));
        assert!(d.end_state().in_bracket_comment());

        d.insert_line(4, "]]").unwrap();
        assert_eq!(all_tokens(&d), fresh_tokens(&d.text()));
        assert!(d.end_state().is_normal());

        let relexed = d.remove_line(1).unwrap();
        assert_eq!(relexed, 3);
        assert_eq!(all_tokens(&d), fresh_tokens(&d.text()));
    }

    #[test]
    fn test_insert_renumbers_following_lines() {
        let mut d = doc("set(A)\nset(B)\nset(C)");
        assert_eq!(d.insert_line(0, "# header").unwrap(), 1);
        assert_eq!(d.tokens(3).unwrap()[0].span.line, 4);
        assert_eq!(all_tokens(&d), fresh_tokens(&d.text()));
    }

    #[test]
    fn test_remove_last_line() {
        let mut d = doc("set(A\n\"open");
        assert!(d.end_state().in_string());
        assert_eq!(d.remove_line(1).unwrap(), 0);
        assert_eq!(d.line_count(), 1);
        assert!(!d.end_state().in_string());
        assert_eq!(d.end_state().paren_balance(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut d = doc("a");
        assert_eq!(
            d.replace_line(1, "b"),
            Err(LangError::LineOutOfRange { index: 1, len: 1 })
        );
        assert!(d.insert_line(2, "b").is_err());
        assert!(d.insert_line(1, "b").is_ok());
        assert!(d.remove_line(5).is_err());
    }

    #[test]
    fn test_diagnostics_per_line() {
        let mut d = doc("a\\b\nok\nc\\d");
        let diags = d.diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].span.line, 1);
        assert_eq!(diags[1].span.line, 3);

        d.replace_line(0, "ab").unwrap();
        assert_eq!(d.diagnostics().len(), 1);
    }

    #[test]
    fn test_relex_all_picks_up_keywords() {
        let lexer = Lexer::with_builtin();
        let table = std::sync::Arc::clone(lexer.keywords());
        let mut d = Document::new(lexer, "install(\n  TARGETS app)");
        assert_eq!(d.tokens(1).unwrap()[1].class, None);

        table.merge_json(r#"{ "install": ["TARGETS"] }"#).unwrap();
        assert_eq!(d.relex_all(), 2);
        assert_eq!(d.tokens(1).unwrap()[1].class, Some(StyleClass::Keyword));
        assert_eq!(
            d.start_state(1).and_then(|s| s.command()),
            Some(CommandRef::Known(Symbol::intern("install")))
        );
    }

    #[test]
    fn test_text_roundtrip() {
        let d = doc("a\r\nb\n");
        assert_eq!(d.line_count(), 3);
        assert_eq!(d.line(2), Some(""));
        assert_eq!(d.text(), "a\nb\n");
        assert_eq!(doc("").line_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_edits_match_fresh_lex(
            lines in prop::collection::vec("[a-z (\"#\\[\\]=)]{0,12}", 1..8),
            edit in "[a-z (\"#\\[\\]=)]{0,12}",
            at in 0usize..8,
        ) {
            let mut d = doc(&lines.join("\n"));
            let index = at % d.line_count();
            d.replace_line(index, &edit).unwrap();
            prop_assert_eq!(all_tokens(&d), fresh_tokens(&d.text()));
        }
    }
}
