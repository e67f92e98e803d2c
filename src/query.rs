//! Query-option translation for relational and document backends.
//!
//! A [`FindOption`] is built per list-style request from caller-supplied
//! query parameters and translated once into either a [`SqlQuery`] or a
//! [`DocumentQuery`]. Translation is a pure function of its input: no state,
//! no I/O, never fails — unknown or empty inputs degrade to the
//! no-predicate / default-sort / default-projection case.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Sort direction token for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the direction as its SQL keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Returns the direction as a document-store sort order (`1` / `-1`).
    pub fn document_order(&self) -> i64 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }

    /// Lenient parse of an `order` query parameter: `"desc"` (any case)
    /// sorts descending, anything else ascending.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied filter/sort/projection spec for list queries.
///
/// `search` keys are unique and iterate in one deterministic order, which
/// keeps the bound predicate list and the printed raw query consistent.
/// `sort` is an ordered list: multi-key sorts apply in insertion order on
/// the relational path (the document path keeps only the last entry, see
/// [`FindOption::to_document`]). An empty `select` means "all fields".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindOption {
    pub search: BTreeMap<String, String>,
    pub sort: Vec<(String, SortDirection)>,
    pub select: Vec<String>,
}

impl FindOption {
    /// Create an empty option: no predicates, default sort, default or full
    /// projection depending on the backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality match on `field`. Re-adding a field replaces its
    /// value.
    pub fn with_search(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.search.insert(field.into(), value.into());
        self
    }

    /// Append a sort key. Keys apply in insertion order on the relational
    /// path.
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }

    /// Set the projected fields, in order.
    pub fn with_select(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Translate into relational WHERE/ORDER/SELECT fragments.
    ///
    /// One `field = ?` predicate per search entry, ANDed, with `bindings`
    /// aligned 1:1; sort keys comma-joined in insertion order; `columns`
    /// verbatim from `select` (empty meaning all columns, rendered as `*`
    /// in the raw string). `table` only appears in the raw reconstruction.
    pub fn to_sql(&self, table: &str) -> SqlQuery {
        let mut predicates = Vec::with_capacity(self.search.len());
        let mut bindings = Vec::with_capacity(self.search.len());
        let mut printed = Vec::with_capacity(self.search.len());
        for (field, value) in &self.search {
            predicates.push(format!("{field} = ?"));
            bindings.push(value.clone());
            printed.push(format!("{field} = '{value}'"));
        }

        let order_by = self
            .sort
            .iter()
            .map(|(field, direction)| format!("{field} {direction}"))
            .collect::<Vec<_>>()
            .join(",");

        let columns = self.select.clone();
        let mut raw = format!(
            "SELECT {} FROM {}",
            if columns.is_empty() {
                "*".to_string()
            } else {
                columns.join(",")
            },
            table,
        );
        if !printed.is_empty() {
            raw.push_str(" WHERE ");
            raw.push_str(&printed.join(" AND "));
        }
        if !order_by.is_empty() {
            raw.push_str(" order by ");
            raw.push_str(&order_by);
        }

        SqlQuery {
            predicates,
            bindings,
            order_by,
            columns,
            raw,
        }
    }

    /// Translate into document-store filter/sort/projection documents.
    ///
    /// The filter always carries the soft-delete guard (`deleted_at: null`)
    /// ANDed with one equality clause per search entry. The backend sorts on
    /// a single key: when `sort` has entries the last one fully replaces the
    /// sort document, otherwise the default is `{created_at: -1}`. An empty
    /// `select` falls back to the fixed minimal projection of `id` and
    /// `title` — deliberately narrower than the relational "all columns"
    /// default; do not unify the two.
    pub fn to_document(&self, collection: &str) -> DocumentQuery {
        let mut filter = Map::new();
        filter.insert("deleted_at".to_string(), Value::Null);
        for (field, value) in &self.search {
            filter.insert(field.clone(), Value::String(value.clone()));
        }
        let filter = Value::Object(filter);

        let sort = match self.sort.last() {
            Some((field, direction)) => {
                let mut doc = Map::new();
                doc.insert(field.clone(), json!(direction.document_order()));
                Value::Object(doc)
            }
            None => DEFAULT_SORT.clone(),
        };

        let projection = if self.select.is_empty() {
            DEFAULT_PROJECTION.clone()
        } else {
            let mut doc = Map::new();
            for field in &self.select {
                doc.insert(field.clone(), json!(1));
            }
            Value::Object(doc)
        };

        let raw = format!(
            "{collection}.find({filter}, {{\"projection\": {projection}, \"sort\": {sort}}})"
        );

        DocumentQuery {
            filter,
            sort,
            projection,
            raw,
        }
    }
}

// Fixed minimal projection applied when no fields are selected.
static DEFAULT_PROJECTION: Lazy<Value> = Lazy::new(|| json!({"id": 1, "title": 1}));

static DEFAULT_SORT: Lazy<Value> = Lazy::new(|| json!({"created_at": -1}));

/// Relational translation of a [`FindOption`].
///
/// `raw` is a human-readable reconstruction with values inlined, used only
/// for audit logging — execute with `predicates` + `bindings`, never the raw
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlQuery {
    /// Parameterized `field = ?` clauses, ANDed.
    pub predicates: Vec<String>,
    /// Bound values, aligned 1:1 with `predicates`.
    pub bindings: Vec<String>,
    /// Comma-joined `field direction` fragment; empty when unsorted.
    pub order_by: String,
    /// Projected columns; empty means all.
    pub columns: Vec<String>,
    pub raw: String,
}

/// Document-store translation of a [`FindOption`].
///
/// `filter`, `sort` and `projection` are plain JSON documents a driver-side
/// adapter executes; `raw` is the audit rendering and is never re-parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentQuery {
    pub filter: Value,
    pub sort: Value,
    pub projection: Value,
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk_option() -> FindOption {
        FindOption::new()
            .with_search("title", "milk")
            .with_sort("title", SortDirection::Desc)
            .with_select(["id", "title"])
    }

    #[test]
    fn test_to_sql_milk() {
        let query = milk_option().to_sql("todos");

        assert_eq!(query.predicates, vec!["title = ?"]);
        assert_eq!(query.bindings, vec!["milk"]);
        assert_eq!(query.order_by, "title desc");
        assert_eq!(query.columns, vec!["id", "title"]);
        assert_eq!(
            query.raw,
            "SELECT id,title FROM todos WHERE title = 'milk' order by title desc"
        );
    }

    #[test]
    fn test_to_sql_empty_option() {
        let query = FindOption::new().to_sql("todos");

        assert!(query.predicates.is_empty());
        assert!(query.bindings.is_empty());
        assert_eq!(query.order_by, "");
        assert!(query.columns.is_empty());
        assert_eq!(query.raw, "SELECT * FROM todos");
    }

    #[test]
    fn test_to_sql_multi_key_sort_in_insertion_order() {
        let query = FindOption::new()
            .with_sort("title", SortDirection::Asc)
            .with_sort("created_at", SortDirection::Desc)
            .to_sql("todos");

        assert_eq!(query.order_by, "title asc,created_at desc");
    }

    #[test]
    fn test_to_sql_predicates_align_with_raw() {
        let query = FindOption::new()
            .with_search("done", "true")
            .with_search("title", "milk")
            .to_sql("todos");

        assert_eq!(query.predicates, vec!["done = ?", "title = ?"]);
        assert_eq!(query.bindings, vec!["true", "milk"]);
        assert_eq!(
            query.raw,
            "SELECT * FROM todos WHERE done = 'true' AND title = 'milk'"
        );
    }

    #[test]
    fn test_to_document_milk() {
        let query = milk_option().to_document("todos");

        assert_eq!(
            query.filter,
            json!({"deleted_at": null, "title": "milk"})
        );
        assert_eq!(query.sort, json!({"title": -1}));
        assert_eq!(query.projection, json!({"id": 1, "title": 1}));
    }

    #[test]
    fn test_to_document_defaults() {
        let query = FindOption::new().to_document("todos");

        assert_eq!(query.filter, json!({"deleted_at": null}));
        assert_eq!(query.sort, json!({"created_at": -1}));
        // Narrow default projection, not "all fields".
        assert_eq!(query.projection, json!({"id": 1, "title": 1}));
    }

    #[test]
    fn test_to_document_last_sort_key_wins() {
        let query = FindOption::new()
            .with_sort("title", SortDirection::Asc)
            .with_sort("created_at", SortDirection::Desc)
            .to_document("todos");

        assert_eq!(query.sort, json!({"created_at": -1}));
    }

    #[test]
    fn test_raw_document_rendering() {
        let query = milk_option().to_document("todos");
        assert_eq!(
            query.raw,
            r#"todos.find({"deleted_at":null,"title":"milk"}, {"projection": {"id":1,"title":1}, "sort": {"title":-1}})"#
        );
    }

    #[test]
    fn test_translation_is_pure() {
        let option = milk_option();
        assert_eq!(option.to_sql("todos"), option.to_sql("todos"));
        assert_eq!(option.to_document("todos"), option.to_document("todos"));
    }

    #[test]
    fn test_search_keys_are_unique() {
        let option = FindOption::new()
            .with_search("title", "milk")
            .with_search("title", "bread");

        assert_eq!(option.search.len(), 1);
        assert_eq!(option.to_sql("todos").bindings, vec!["bread"]);
    }

    #[test]
    fn test_sort_direction_from_token() {
        assert_eq!(SortDirection::from_token("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_token("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::from_token("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_token("sideways"), SortDirection::Asc);
    }
}
