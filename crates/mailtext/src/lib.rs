//! # mailtext
//!
//! Text normalization and escape utilities for webmail clients.
//!
//! ## Features
//!
//! - **Tag substitution**: Swap autocomplete tag delimiters with their
//!   display form and back
//! - **Address helpers**: Email normalization and plus-alias handling
//! - **Markup**: HTML escaping and a staged entity/escape unescape pipeline
//! - **Identifiers**: Random tokens for transient UI elements and contact
//!   records
//!
//! ## Quick Start
//!
//! ### Escaping and unescaping markup
//!
//! ```
//! use mailtext::markup;
//!
//! assert_eq!(markup::escape("<a>"), "&lt;a&gt;");
//! assert_eq!(markup::unescape("&lt;a&gt;"), "<a>");
//! ```
//!
//! ### Working with addresses
//!
//! ```
//! use mailtext::address;
//!
//! assert_eq!(
//!     address::remove_alias("john.doe+newsletter@example.com"),
//!     "johndoe@example.com"
//! );
//! assert_eq!(address::add_alias("a@b.com", "x"), "a+x@b.com");
//! ```
//!
//! All operations are total over arbitrary input strings: malformed
//! addresses, stray escape sequences and empty input degrade to unchanged
//! or empty output instead of failing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod address;
pub mod ident;
pub mod markup;
pub mod tags;
pub mod text;
