use std::collections::HashMap;

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query};
use serde::Deserialize;

/// Loosely typed request fields from a query string or url-encoded form.
///
/// Lookups never fail: a missing or malformed field reads as `0` or `""`,
/// and callers treat those as "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn from_query(query: Result<Query<Params>, QueryRejection>) -> Self {
        query.map(|Query(params)| params).unwrap_or_default()
    }

    pub fn from_form(form: Result<Form<Params>, FormRejection>) -> Self {
        form.map(|Form(params)| params).unwrap_or_default()
    }

    pub fn int(&self, key: &str) -> i64 {
        self.0.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
    }

    pub fn str(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
