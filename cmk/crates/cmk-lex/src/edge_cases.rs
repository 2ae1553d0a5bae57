//! Edge case tests for cmk-lex
