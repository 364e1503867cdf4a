//! Doxygen search data importer for apidex.
//!
//! A Doxygen HTML build writes its client-side search index to `html/search/` as a family
//! of JavaScript files, one per category (`classes_0.js`, `functions_8.js`, ...). This
//! crate reads those files without executing them: a small lexer and recursive-descent
//! parser cover the literal subset Doxygen emits, and each row is mapped to
//! [`Declaration`](apidex_index::Declaration) records for the index builder.
//!
//! # Example
//!
//! ```
//! use apidex_doxygen::{Category, parse_search_file};
//!
//! let decls = parse_search_file(
//!     "functions_8.js".as_ref(),
//!     "var searchData=[['init_1',['init',['../classpcpp_1_1_app_name.html#a0d',1,'pcpp::AppName::init()']]]];",
//!     Category::Functions,
//! )
//! .unwrap();
//! assert_eq!(decls[0].qualified_name, "pcpp::AppName::init");
//! assert_eq!(decls[0].signature, "()");
//! assert_eq!(decls[0].anchor, "a0d");
//! ```

#![warn(missing_docs)]

mod category;
mod entities;
mod error;
mod fingerprint;
mod import;
mod lexer;
mod parser;
mod rows;

pub use category::{Category, FileClass, SKIPPED_CATEGORIES, classify_file};
pub use entities::decode_entities;
pub use error::{ImportError, SyntaxError};
pub use fingerprint::Fingerprint;
pub use import::{Import, import_dir, import_source, parse_search_file};
pub use parser::{Literal, parse};
pub use rows::{PAGE_TOP_ANCHOR, split_url};
