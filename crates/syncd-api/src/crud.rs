//! List, detail and delete handlers shared by every resource.

use axum::{
    Json,
    extract::rejection::{FormRejection, QueryRejection},
    extract::{Form, Query, State},
};
use serde::Serialize;
use tracing::debug;

use syncd_db::Page;
use syncd_types::api::{ApiResponse, DetailResponse, ListResponse};

use crate::error::AppError;
use crate::params::Params;
use crate::service::{CrudService, Resource};
use crate::state::AppState;

pub(crate) fn success<B: Serialize>(body: B) -> Result<Json<ApiResponse>, AppError> {
    Ok(Json(ApiResponse::ok(Some(serde_json::to_value(body)?))))
}

pub(crate) fn require_id(params: &Params) -> Result<i64, AppError> {
    let id = params.int("id");
    if id <= 0 {
        return Err(AppError::param("id can not be empty"));
    }
    Ok(id)
}

/// GET list: `offset`, `limit`, `keyword` plus whatever the resource's filter
/// reads. Answers `{ list, total }`.
pub async fn list<T: Resource>(
    State(state): State<AppState>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let params = Params::from_query(query);
    let filter = T::filter(&params);
    let page = Page::new(params.int("offset"), params.int("limit"));
    debug!("Listing {} with {} predicate(s), {:?}", T::LABEL, filter.len(), page);

    let service = CrudService::<T>::new(state);
    let rows = service
        .list(filter.clone(), page)
        .await
        .map_err(AppError::app(format!("get {} list data failed", T::LABEL)))?;
    let total = service
        .count(filter)
        .await
        .map_err(AppError::app(format!("get {} total count failed", T::LABEL)))?;

    let list: Vec<T::Dto> = rows.into_iter().map(Into::into).collect();
    success(ListResponse { list, total })
}

/// GET detail: `id`. Answers `{ detail }`.
pub async fn detail<T: Resource>(
    State(state): State<AppState>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let params = Params::from_query(query);
    let id = require_id(&params)?;

    let row = CrudService::<T>::new(state)
        .get(id)
        .await
        .map_err(AppError::app(format!("get {} detail data failed", T::LABEL)))?;

    success(DetailResponse {
        detail: T::Dto::from(row),
    })
}

/// POST delete: form field `id`.
pub async fn delete<T: Resource>(
    State(state): State<AppState>,
    form: Result<Form<Params>, FormRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let params = Params::from_form(form);
    let id = require_id(&params)?;

    CrudService::<T>::new(state)
        .remove(id)
        .await
        .map_err(AppError::app(format!("delete {} data failed", T::LABEL)))?;

    Ok(Json(ApiResponse::ok(None)))
}
