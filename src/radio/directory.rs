//! Directory operations. Each one builds the upstream parameters for its
//! endpoint, calls the forwarder once, and reshapes the result.

use crate::observability::metrics;
use crate::radio::models::{ClickOutcome, Country, Genre, Station};
use crate::radio::query::SearchQuery;
use crate::upstream::{Forwarder, UpstreamError};

/// Read-mostly view of the directory through one forwarder.
#[derive(Debug, Clone)]
pub struct RadioDirectory {
    forwarder: Forwarder,
}

impl RadioDirectory {
    pub fn new(forwarder: Forwarder) -> Self {
        Self { forwarder }
    }

    /// Stations matching every given filter, most clicked first.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Station>, UpstreamError> {
        let mut params = by_clicks(query.limit);
        params.push(("offset", query.offset.to_string()));

        let filters = [
            ("name", &query.name),
            ("country", &query.country),
            ("tag", &query.tag),
            ("language", &query.language),
        ];
        for (key, value) in filters {
            if let Some(value) = value {
                params.push((key, value.clone()));
            }
        }

        let stations = self
            .forwarder
            .get_json::<Vec<Station>>(&["json", "stations", "search"], &params)
            .await?;
        Ok(truncate(stations, query.limit))
    }

    /// The most clicked working stations.
    pub async fn popular(&self, limit: u32) -> Result<Vec<Station>, UpstreamError> {
        let stations = self
            .forwarder
            .get_json::<Vec<Station>>(&["json", "stations", "search"], &by_clicks(limit))
            .await?;
        Ok(truncate(stations, limit))
    }

    /// Countries that list at least one station.
    pub async fn countries(&self) -> Result<Vec<Country>, UpstreamError> {
        let countries = self
            .forwarder
            .get_json::<Vec<Country>>(&["json", "countries"], &[])
            .await?;
        Ok(countries.into_iter().filter(|c| c.stationcount > 0).collect())
    }

    /// Genres ordered by station count, largest first.
    pub async fn genres(&self, limit: u32) -> Result<Vec<Genre>, UpstreamError> {
        let params = [
            ("limit", limit.to_string()),
            ("order", "stationcount".to_string()),
            ("reverse", "true".to_string()),
        ];
        let genres = self
            .forwarder
            .get_json::<Vec<Genre>>(&["json", "tags"], &params)
            .await?;
        Ok(truncate(genres, limit))
    }

    /// A single station by uuid, `None` when the directory has no match.
    pub async fn station(&self, station_id: &str) -> Result<Option<Station>, UpstreamError> {
        let stations = self
            .forwarder
            .get_json::<Vec<Station>>(&["json", "stations", "byuuid", station_id], &[])
            .await?;
        Ok(stations.into_iter().next())
    }

    /// Count a listen for `station_id`. Never fails; the outcome says whether
    /// the directory accepted it.
    pub async fn click(&self, station_id: &str) -> ClickOutcome {
        let result = self
            .forwarder
            .get_json::<serde_json::Value>(&["json", "url", station_id], &[])
            .await;

        let outcome = match result {
            Ok(_) => ClickOutcome::Registered,
            Err(e) => {
                tracing::warn!(station_id = %station_id, error = %e, "Click registration failed");
                ClickOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        metrics::record_click(outcome.is_registered());
        outcome
    }
}

fn by_clicks(limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("limit", limit.to_string()),
        ("hidebroken", "true".to_string()),
        ("order", "clickcount".to_string()),
        ("reverse", "true".to_string()),
    ]
}

fn truncate<T>(mut items: Vec<T>, limit: u32) -> Vec<T> {
    items.truncate(limit as usize);
    items
}
