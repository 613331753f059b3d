//! Wikipedia research backend.

mod client;
mod dto;

pub use client::WikipediaClient;
pub use dto::{
    WikipediaExtractQuery, WikipediaExtractResponse, WikipediaPage, WikipediaSearchHit,
    WikipediaSearchQuery, WikipediaSearchResponse,
};
