use axum::{
    Json,
    extract::rejection::FormRejection,
    extract::{Form, State},
};
use tracing::info;

use syncd_db::{QueryFilter, ServerGroupRow};
use syncd_types::api::ApiResponse;
use syncd_types::models::ServerGroup;

use crate::error::AppError;
use crate::filter::group_filter;
use crate::params::Params;
use crate::service::{CrudService, Resource};
use crate::state::AppState;

impl Resource for ServerGroupRow {
    type Dto = ServerGroup;
    const LABEL: &'static str = "server group";
    const FIELDS: &'static [&'static str] = &["id", "name"];

    fn filter(params: &Params) -> QueryFilter {
        group_filter(params.str("keyword"))
    }
}

/// POST update: form fields `id` (absent or 0 creates) and `name`.
///
/// Groups only get a name presence check, not the declarative validator.
pub async fn update(
    State(state): State<AppState>,
    form: Result<Form<Params>, FormRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let params = Params::from_form(form);
    let id = params.int("id");
    let name = params.str("name");
    if name.is_empty() {
        return Err(AppError::param("group name can not empty"));
    }

    let row = ServerGroupRow {
        id: 0,
        name: name.to_string(),
    };
    let stored = CrudService::<ServerGroupRow>::new(state)
        .upsert(id, row)
        .await
        .map_err(AppError::app("server group data update failed"))?;

    info!("Server group {} saved", stored);
    Ok(Json(ApiResponse::ok(None)))
}
