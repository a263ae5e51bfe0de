use axum::{
    Json,
    extract::rejection::{FormRejection, QueryRejection},
    extract::{Form, Query, State},
};
use serde_valid::Validate;
use serde_valid::validation;
use tracing::info;

use syncd_db::{QueryFilter, ServerRow};
use syncd_types::api::{ApiResponse, MultiResponse};
use syncd_types::models::Server;

use crate::crud::success;
use crate::error::AppError;
use crate::filter::{multi_filter, server_filter};
use crate::params::Params;
use crate::service::{CrudService, Resource};
use crate::state::AppState;
use crate::validate::{nonzero, validate};

impl Resource for ServerRow {
    type Dto = Server;
    const LABEL: &'static str = "server";
    const FIELDS: &'static [&'static str] = &["id", "group_id", "name", "ip", "ssh_port"];

    fn filter(params: &Params) -> QueryFilter {
        server_filter(params.str("keyword"), params.int("group_id"))
    }
}

// -- Payload --

fn group_id_required(value: &i64) -> Result<(), validation::Error> {
    nonzero(value, "server group cannot be empty")
}

fn ssh_port_required(value: &i64) -> Result<(), validation::Error> {
    nonzero(value, "ssh port cannot be empty")
}

/// Editable server fields as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ServerParams {
    #[validate(custom = group_id_required)]
    pub group_id: i64,
    #[validate(min_length = 1, message = "server name cannot be empty")]
    pub name: String,
    #[validate(min_length = 1, message = "server ip cannot be empty")]
    pub ip: String,
    #[validate(custom = ssh_port_required)]
    #[validate(minimum = 1, message = "ssh port must be between 1 and 65535")]
    #[validate(maximum = 65535, message = "ssh port must be between 1 and 65535")]
    pub ssh_port: i64,
}

impl ServerParams {
    pub fn from_params(params: &Params) -> Self {
        Self {
            group_id: params.int("group_id"),
            name: params.str("name").to_string(),
            ip: params.str("ip").to_string(),
            ssh_port: params.int("ssh_port"),
        }
    }
}

impl From<ServerParams> for ServerRow {
    fn from(p: ServerParams) -> Self {
        Self {
            id: 0,
            group_id: p.group_id,
            name: p.name,
            ip: p.ip,
            ssh_port: p.ssh_port,
        }
    }
}

// -- Handlers --

/// POST update: form fields `id` (absent or 0 creates), `group_id`, `name`,
/// `ip`, `ssh_port`.
pub async fn update(
    State(state): State<AppState>,
    form: Result<Form<Params>, FormRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let params = Params::from_form(form);
    let payload = ServerParams::from_params(&params);
    validate(&payload)?;

    let stored = CrudService::<ServerRow>::new(state)
        .upsert(params.int("id"), payload.into())
        .await
        .map_err(AppError::app("server data update failed"))?;

    info!("Server {} saved", stored);
    Ok(Json(ApiResponse::ok(None)))
}

/// GET multi: every server, optionally scoped by `group_id`. No paging, no
/// total.
pub async fn multi(
    State(state): State<AppState>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let params = Params::from_query(query);
    let rows = CrudService::<ServerRow>::new(state)
        .list_all(multi_filter(params.int("group_id")))
        .await
        .map_err(AppError::app("get server list data failed"))?;

    let list: Vec<Server> = rows.into_iter().map(Into::into).collect();
    success(MultiResponse { list })
}
