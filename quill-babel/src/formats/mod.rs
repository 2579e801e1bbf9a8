//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the source tree and text representations.

pub mod html;
pub mod icons;
pub mod markdown;
pub mod treeviz;

pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
