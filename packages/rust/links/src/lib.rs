//! Reference extraction and classification for traceboard.
//!
//! This crate provides:
//! - [`extract`] — candidate URL and tracker-key extraction from raw text
//! - [`parsers`] — provider URL parsers behind the [`RefParser`] trait
//! - [`ParserRegistry`] — the fixed-order classifier over the closed provider set

pub mod extract;
pub mod parsers;

pub use extract::{Candidates, extract_candidates, extract_keys, extract_urls};
pub use parsers::{
    ConfluencePageParser, FigmaDesignParser, GithubPullParser, ParserRegistry, RefParser,
};
