use std::marker::PhantomData;

use serde::Serialize;
use syncd_db::{Database, Entity, Order, Page, PersistenceError, QueryFilter, QueryParam};

use crate::params::Params;
use crate::state::AppState;

/// Per-resource strategy plugged into the generic CRUD handlers.
pub trait Resource: Entity + Sync {
    /// Wire shape of one record.
    type Dto: Serialize + From<Self> + Send;

    /// Human name used in client-facing failure messages, e.g. "server group".
    const LABEL: &'static str;

    /// Columns projected by list calls.
    const FIELDS: &'static [&'static str];

    /// Builds the list filter from the request.
    fn filter(params: &Params) -> QueryFilter;
}

/// Create-or-update, get, remove, list and count over one entity type.
///
/// Store calls are blocking and run on the blocking pool.
pub struct CrudService<T> {
    state: AppState,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Resource> CrudService<T> {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            _entity: PhantomData,
        }
    }

    async fn blocking<F, R>(&self, f: F) -> Result<R, PersistenceError>
    where
        F: FnOnce(&Database) -> Result<R, PersistenceError> + Send + 'static,
        R: Send + 'static,
    {
        let state = self.state.clone();
        tokio::task::spawn_blocking(move || f(&state.db))
            .await
            .map_err(|e| PersistenceError::Blocking(e.to_string()))?
    }

    /// Updates record `id` when positive, otherwise inserts. Returns the id
    /// of the stored record.
    pub async fn upsert(&self, id: i64, mut payload: T) -> Result<i64, PersistenceError> {
        self.blocking(move |db| {
            if id > 0 {
                db.update(id, &payload)?;
                Ok(id)
            } else {
                db.create(&mut payload)?;
                Ok(payload.id())
            }
        })
        .await
    }

    pub async fn get(&self, id: i64) -> Result<T, PersistenceError> {
        self.blocking(move |db| {
            db.get::<T>(id)?
                .ok_or(PersistenceError::NotFound { table: T::TABLE, id })
        })
        .await
    }

    /// Removing an id that matches nothing is `NotFound`.
    pub async fn remove(&self, id: i64) -> Result<(), PersistenceError> {
        self.blocking(move |db| match db.delete::<T>(id)? {
            0 => Err(PersistenceError::NotFound { table: T::TABLE, id }),
            _ => Ok(()),
        })
        .await
    }

    /// Matching rows, newest first, sliced by `page`.
    pub async fn list(&self, filter: QueryFilter, page: Page) -> Result<Vec<T>, PersistenceError> {
        let query = QueryParam {
            fields: T::FIELDS,
            page,
            order: Some(Order::desc("id")),
            filter,
        };
        self.blocking(move |db| db.list::<T>(&query)).await
    }

    pub async fn list_all(&self, filter: QueryFilter) -> Result<Vec<T>, PersistenceError> {
        self.list(filter, Page::unbounded()).await
    }

    /// Total matches ignoring pagination. Pass the same filter as the paired
    /// `list` call.
    pub async fn count(&self, filter: QueryFilter) -> Result<u64, PersistenceError> {
        self.blocking(move |db| db.total::<T>(&filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppStateInner;
    use syncd_db::ServerGroupRow;

    fn service() -> CrudService<ServerGroupRow> {
        CrudService::new(AppStateInner::new(Database::open_in_memory().unwrap()))
    }

    fn group(name: &str) -> ServerGroupRow {
        ServerGroupRow {
            id: 0,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let svc = service();
        let id = svc.upsert(0, group("alpha")).await.unwrap();
        assert!(id > 0);

        assert_eq!(svc.upsert(id, group("beta")).await.unwrap(), id);
        assert_eq!(svc.get(id).await.unwrap().name, "beta");
        assert_eq!(svc.count(QueryFilter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_of_unknown_id_fails() {
        let svc = service();
        let err = svc.upsert(99, group("ghost")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(svc.count(QueryFilter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let svc = service();
        assert!(svc.get(5).await.unwrap_err().is_not_found());
        assert!(svc.remove(5).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn remove_deletes_once() {
        let svc = service();
        let id = svc.upsert(0, group("tmp")).await.unwrap();
        svc.remove(id).await.unwrap();
        assert!(svc.remove(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let svc = service();
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            ids.push(svc.upsert(0, group(name)).await.unwrap());
        }

        let page = svc.list(QueryFilter::new(), Page::new(1, 2)).await.unwrap();
        let got: Vec<i64> = page.iter().map(|g| g.id).collect();
        assert_eq!(got, vec![ids[2], ids[1]]);

        let all = svc.list_all(QueryFilter::new()).await.unwrap();
        assert_eq!(all.len() as u64, svc.count(QueryFilter::new()).await.unwrap());
    }
}
