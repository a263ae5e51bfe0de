use syncd_db::{QueryFilter, WhereParam};

use crate::keyword::{Keyword, classify};

/// Group search: an id, or a substring of the name. Address-shaped keywords
/// are plain text for groups.
pub fn group_filter(keyword: &str) -> QueryFilter {
    let mut filter = QueryFilter::new();
    match classify(keyword) {
        Some(Keyword::Id(id)) => filter.push(WhereParam::eq("id", id)),
        Some(Keyword::Ip(text)) | Some(Keyword::Text(text)) => filter.push(name_like(&text)),
        None => {}
    }
    filter
}

/// Server search: an id, an exact address, or a substring of the name, with
/// an independent optional group scope appended last.
pub fn server_filter(keyword: &str, group_id: i64) -> QueryFilter {
    let mut filter = QueryFilter::new();
    match classify(keyword) {
        Some(Keyword::Id(id)) => filter.push(WhereParam::eq("id", id)),
        Some(Keyword::Ip(ip)) => filter.push(WhereParam::eq("ip", ip)),
        Some(Keyword::Text(text)) => filter.push(name_like(&text)),
        None => {}
    }
    if group_id > 0 {
        filter.push(WhereParam::eq("group_id", group_id));
    }
    filter
}

/// Filter for the unpaginated server listing: group scope only.
pub fn multi_filter(group_id: i64) -> QueryFilter {
    server_filter("", group_id)
}

// `%` and `_` inside the keyword reach LIKE unescaped.
fn name_like(text: &str) -> WhereParam {
    WhereParam::like("name", format!("%{}%", text))
}
