//! Remote media-search API
//!
//! Result model, request construction and transport. The widget core only
//! depends on the [`PageSource`] trait; [`GiphyClient`] is the live
//! implementation.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_BASE, GiphyClient, PageSource};
pub use error::FetchError;
pub use types::{
    Library, Page, PageQuery, Rendition, RenditionFileType, RenditionRef, ResultItem,
};
