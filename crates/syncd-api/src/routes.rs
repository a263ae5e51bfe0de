use axum::{
    Router,
    routing::{MethodFilter, MethodRouter, on},
};

use syncd_db::{ServerGroupRow, ServerRow};

use crate::state::AppState;
use crate::{crud, group, server};

/// Every endpoint the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ServerGroupUpdate,
    ServerGroupList,
    ServerGroupDetail,
    ServerGroupDelete,
    ServerUpdate,
    ServerList,
    ServerDetail,
    ServerDelete,
    ServerMulti,
}

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::ServerGroupUpdate,
        Endpoint::ServerGroupList,
        Endpoint::ServerGroupDetail,
        Endpoint::ServerGroupDelete,
        Endpoint::ServerUpdate,
        Endpoint::ServerList,
        Endpoint::ServerDetail,
        Endpoint::ServerDelete,
        Endpoint::ServerMulti,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ServerGroupUpdate => "/api/server/group/update",
            Endpoint::ServerGroupList => "/api/server/group/list",
            Endpoint::ServerGroupDetail => "/api/server/group/detail",
            Endpoint::ServerGroupDelete => "/api/server/group/delete",
            Endpoint::ServerUpdate => "/api/server/update",
            Endpoint::ServerList => "/api/server/list",
            Endpoint::ServerDetail => "/api/server/detail",
            Endpoint::ServerDelete => "/api/server/delete",
            Endpoint::ServerMulti => "/api/server/multi",
        }
    }

    /// Writes take a form body, reads a query string.
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Endpoint::ServerGroupUpdate
                | Endpoint::ServerGroupDelete
                | Endpoint::ServerUpdate
                | Endpoint::ServerDelete
        )
    }

    fn method_filter(self) -> MethodFilter {
        if self.is_write() { MethodFilter::POST } else { MethodFilter::GET }
    }
}

fn handler(endpoint: Endpoint) -> MethodRouter<AppState> {
    let filter = endpoint.method_filter();
    match endpoint {
        Endpoint::ServerGroupUpdate => on(filter, group::update),
        Endpoint::ServerGroupList => on(filter, crud::list::<ServerGroupRow>),
        Endpoint::ServerGroupDetail => on(filter, crud::detail::<ServerGroupRow>),
        Endpoint::ServerGroupDelete => on(filter, crud::delete::<ServerGroupRow>),
        Endpoint::ServerUpdate => on(filter, server::update),
        Endpoint::ServerList => on(filter, crud::list::<ServerRow>),
        Endpoint::ServerDetail => on(filter, crud::detail::<ServerRow>),
        Endpoint::ServerDelete => on(filter, crud::delete::<ServerRow>),
        Endpoint::ServerMulti => on(filter, server::multi),
    }
}

/// The endpoint → handler table, built once at startup.
pub fn table() -> Vec<(Endpoint, MethodRouter<AppState>)> {
    Endpoint::ALL.into_iter().map(|e| (e, handler(e))).collect()
}

pub fn router(state: AppState) -> Router {
    table()
        .into_iter()
        .fold(Router::new(), |router, (endpoint, handler)| {
            router.route(endpoint.path(), handler)
        })
        .with_state(state)
}
