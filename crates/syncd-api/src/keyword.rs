use std::net::IpAddr;

/// What a free-text search term turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    /// Positive integer, matched against the primary key.
    Id(i64),
    /// IPv4 or IPv6 address text.
    Ip(String),
    Text(String),
}

/// Classifies a search keyword by shape.
///
/// Integer-shaped input never falls through to the other variants: a value
/// that is zero, negative or out of `i64` range yields `None`, the same as an
/// empty keyword.
pub fn classify(keyword: &str) -> Option<Keyword> {
    if keyword.is_empty() {
        return None;
    }
    if is_integer(keyword) {
        return keyword
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Keyword::Id);
    }
    if keyword.parse::<IpAddr>().is_ok() {
        return Some(Keyword::Ip(keyword.to_string()));
    }
    Some(Keyword::Text(keyword.to_string()))
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
