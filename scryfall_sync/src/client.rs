//! Scryfall API client
//!
//! Uses async reqwest, but every call is awaited before the next one is
//! issued: there is never more than one request in flight.

use crate::config::ClientConfig;
use crate::error::{Result, SyncError};
use mtg_common::{Card, List, Set, UriRef};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// GET + JSON decode against one Scryfall base URL
pub struct ScryfallClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ScryfallClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured reqwest client (proxies, timeouts, ...)
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch a single card by Scryfall id.
    ///
    /// Card details must carry an oracle id; a card without one is a decode
    /// error.
    pub async fn get_card(&self, id: &str) -> Result<Card> {
        let card: Card = self
            .get(&format!("/cards/{}", urlencoding::encode(id)))
            .await?;
        card.require_oracle_id()?;
        Ok(card)
    }

    /// Fetch a set by its three to six letter code
    pub async fn get_set(&self, code: &str) -> Result<Set> {
        self.get(&format!("/sets/{}", urlencoding::encode(code)))
            .await
    }

    /// First page of a full-text search
    pub async fn search_cards(&self, query: &str) -> Result<List> {
        log::debug!("Searching Scryfall: {}", query);
        self.get(&format!("/cards/search?q={}", urlencoding::encode(query)))
            .await
    }

    /// Every page of a full-text search
    pub async fn search_all_cards(&self, query: &str) -> Result<Vec<Card>> {
        let first = self.search_cards(query).await?;
        self.collect_pages(first).await
    }

    /// Exact-name search (`!"name"`)
    pub async fn search_cards_by_name(&self, name: &str) -> Result<List> {
        self.search_cards(&format!("!\"{}\"", name)).await
    }

    /// All printings behind a card's `prints_search_uri`.
    ///
    /// The URI is re-rooted onto the configured base URL, so only its path
    /// and query are used.
    pub async fn get_card_printings(&self, prints_search_uri: &UriRef) -> Result<Vec<Card>> {
        let first = self.get(&prints_search_uri.path_and_query()).await?;
        self.collect_pages(first).await
    }

    async fn collect_pages(&self, first: List) -> Result<Vec<Card>> {
        let mut cards = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut page = first;

        loop {
            if let Some(warnings) = &page.warnings {
                for warning in warnings {
                    log::warn!("Scryfall warning: {}", warning);
                }
            }

            let next = page.next().cloned();
            cards.extend(page.data);

            match next {
                Some(uri) => {
                    let endpoint = uri.path_and_query();
                    if !visited.insert(endpoint.clone()) {
                        return Err(SyncError::PageLoop {
                            url: uri.to_string(),
                        });
                    }
                    log::debug!("Following next page: {}", uri);
                    page = self.get(&endpoint).await?;
                }
                None => break,
            }
        }

        Ok(cards)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.config.api_url, endpoint);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, &self.config.accept)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SyncError::HttpStatus { status, url });
        }

        // Decode separately so a bad body is a decode error, not a network one
        let body = response.text().await?;
        Ok(mtg_common::decode(&body)?)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
