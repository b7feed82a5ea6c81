//! Document tree for template attribute language (TAL) templates.
//!
//! A template is parsed into a [`NodeTree`] of [`Node`]s. Elements keep their attributes exactly as
//! written in the source, and resolve template attributes through the namespace aliases that were in
//! scope where the element appeared:
//!
//! ```rust
//! use taltree::{ParseOptions, Parser};
//!
//! let src = r#"<div xmlns:t="http://xml.zope.org/namespaces/tal" t:content="title">x</div>"#;
//! let tree = Parser::new(ParseOptions::default()).parse_str(src).unwrap();
//!
//! let div = tree.children()[0].as_element().unwrap();
//! assert_eq!(div.get_attribute("tal:content"), Some("title"));
//! assert!(div.has_real_content());
//! ```
#![warn(missing_docs)]

#[macro_use]
mod error;
pub use error::*;

mod location;
pub use location::*;

mod xmlns;
pub use xmlns::*;

pub mod node;
pub use node::*;

mod parser;
pub use parser::*;
