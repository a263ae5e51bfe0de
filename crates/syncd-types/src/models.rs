use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerGroup {
    pub id: i64,
    pub name: String,
}

/// A deploy target host. `group_id` points at a `ServerGroup` but nothing
/// enforces that the group exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    pub ip: String,
    pub ssh_port: i64,
}
