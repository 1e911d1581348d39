//! Rule source parsing.
//!
//! This module turns rule text into [`RuleBlock`]s: a winnow tokenizer, a
//! [`TokenCursor`] over its output, the block parser and the value template
//! compiler. The AST it produces is what the engine executes.

pub mod ast;
mod cursor;
pub mod error;
mod file;
mod lexer;
mod template;
mod token;

pub use ast::*;
pub use cursor::TokenCursor;
pub use error::{LexError, ParseError, TemplateError};
pub use file::parse_blocks;
pub use lexer::tokenize;
pub use template::parse_template;
pub use token::{Literal, Token, TokenKind};
