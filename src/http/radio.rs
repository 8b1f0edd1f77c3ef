//! Radio directory handlers.
//!
//! Each handler validates its query before touching the directory, so
//! out-of-range paging never reaches the upstream.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use crate::http::response::{ApiError, ClickReceipt};
use crate::http::server::AppState;
use crate::radio::{Country, Genre, LimitParams, SearchParams, Station};

pub async fn search_stations(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Station>>, ApiError> {
    let Query(params) = params?;
    let query = params.validate()?;

    let stations = state.directory.search(&query).await?;
    Ok(Json(stations))
}

pub async fn popular_stations(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Station>>, ApiError> {
    let Query(params) = params?;
    let limit = params.validate()?;

    Ok(Json(state.directory.popular(limit).await?))
}

pub async fn countries(State(state): State<AppState>) -> Result<Json<Vec<Country>>, ApiError> {
    Ok(Json(state.directory.countries().await?))
}

pub async fn genres(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Genre>>, ApiError> {
    let Query(params) = params?;
    let limit = params.validate()?;

    Ok(Json(state.directory.genres(limit).await?))
}

/// Answers 200 for any well-formed id; the body says whether the click counted.
pub async fn click_station(
    State(state): State<AppState>,
    station_id: Result<Path<String>, PathRejection>,
) -> Result<Json<ClickReceipt>, ApiError> {
    let Path(station_id) = station_id?;

    Ok(Json(state.directory.click(&station_id).await.into()))
}

pub async fn station_details(
    State(state): State<AppState>,
    station_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Station>, ApiError> {
    let Path(station_id) = station_id?;

    match state.directory.station(&station_id).await? {
        Some(station) => Ok(Json(station)),
        None => Err(ApiError::NotFound),
    }
}
