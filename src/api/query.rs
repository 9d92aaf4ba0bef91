//! Query string construction for the row-level CRUD API.
//!
//! The backend follows PostgREST conventions: filters are query parameters
//! of the form `column=op.value`, ordering is `order=column.asc`, and
//! pagination uses `limit`/`offset`. Exact row counts come back in the
//! `Content-Range` header when the request carries `Prefer: count=exact`.

use std::fmt::Write;

/// Sort direction for an `order` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn suffix(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Builder for a single table query.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned columns (`select=` parameter).
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Exact-match filter: `column=eq.value`.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Null filter: `column=is.null`.
    pub fn is_null(mut self, column: &str) -> Self {
        self.params
            .push((column.to_string(), "is.null".to_string()));
        self
    }

    /// In-list filter: `column=in.(a,b,c)`. Used for batch updates.
    pub fn in_list<S: AsRef<str>>(mut self, column: &str, values: &[S]) -> Self {
        let list = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.params
            .push((column.to_string(), format!("in.({})", list)));
        self
    }

    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.params.push((
            "order".to_string(),
            format!("{}.{}", column, direction.suffix()),
        ));
        self
    }

    /// Range-based pagination: rows `[offset, offset + limit)`.
    pub fn range(mut self, offset: usize, limit: usize) -> Self {
        self.params
            .push(("offset".to_string(), offset.to_string()));
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    /// Render as a query string, without the leading `?`.
    pub fn build(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            // Values are column names, UUIDs, and enum-ish strings; spaces
            // are the only character that needs escaping in practice.
            let _ = write!(out, "{}={}", key, value.replace(' ', "%20"));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Parse the total row count out of a `Content-Range` header value,
/// e.g. `0-9/57` or `*/0`.
pub fn parse_content_range_total(header: &str) -> Option<usize> {
    let total = header.rsplit('/').next()?;
    if total == "*" {
        return None;
    }
    total.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_and_order() {
        let q = Query::new()
            .select("id,full_name")
            .eq("role", "representative")
            .order("full_name", Order::Asc);
        assert_eq!(
            q.build(),
            "select=id,full_name&role=eq.representative&order=full_name.asc"
        );
    }

    #[test]
    fn test_in_list_filter() {
        let q = Query::new().in_list("id", &["a1", "b2", "c3"]);
        assert_eq!(q.build(), "id=in.(a1,b2,c3)");
    }

    #[test]
    fn test_range_pagination() {
        let q = Query::new().order("building_number", Order::Asc).range(20, 10);
        assert_eq!(q.build(), "order=building_number.asc&offset=20&limit=10");
    }

    #[test]
    fn test_empty_query() {
        let q = Query::new();
        assert!(q.is_empty());
        assert_eq!(q.build(), "");
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range_total("0-9/57"), Some(57));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-0/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }
}
