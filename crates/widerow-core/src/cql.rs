//! CQL fragment and statement assembly.
//!
//! Everything here is metadata-free: filters come in, text and bound
//! parameters come out. Column names are trusted identifiers fixed at
//! configuration time; no escaping is performed.

use crate::value::Value;
use std::fmt::Write as _;

/// Page size hint applied to every scan statement.
pub const DEFAULT_PAGE_SIZE: i32 = 2000;

///
/// Filter
///
/// Column-name/value pair; the unit of both predicate construction
/// and write-value binding. Transient, built per operation.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

///
/// Separator
///
/// Joiner for `name = ?` fragments: `and` for predicates, the comma
/// for SET-style lists.
///

#[derive(Clone, Copy, Debug)]
pub enum Separator {
    And,
    Comma,
}

impl Separator {
    const fn as_str(self) -> &'static str {
        match self {
            Self::And => " and ",
            Self::Comma => ", ",
        }
    }
}

/// Join filters into a `name = ?` fragment plus the parallel bound
/// values, placeholder order matching exactly.
#[must_use]
pub fn predicate(filters: &[Filter], sep: Separator) -> (String, Vec<Value>) {
    let mut text = String::new();
    let mut values = Vec::with_capacity(filters.len());

    for (n, filter) in filters.iter().enumerate() {
        if n > 0 {
            text.push_str(sep.as_str());
        }
        text.push_str(&filter.column);
        text.push_str(" = ?");
        values.push(filter.value.clone());
    }

    (text, values)
}

///
/// Consistency
///
/// Consistency hint forwarded to the store collaborator untouched.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Consistency {
    One,
    LocalOne,
    #[default]
    LocalQuorum,
    Quorum,
    All,
}

///
/// Statement
///
/// A fully-assembled parameterized statement plus execution hints.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub text: String,
    pub params: Vec<Value>,
    pub page_size: Option<i32>,
    pub consistency: Consistency,
}

impl Statement {
    #[must_use]
    pub fn new(text: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            params,
            page_size: None,
            consistency: Consistency::default(),
        }
    }

    #[must_use]
    pub fn page_size(mut self, size: i32) -> Self {
        self.page_size = Some(size);
        self
    }

    #[must_use]
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }
}

///
/// RangeBound
///
/// Optional one- or two-sided numeric bound on a fixed ordering
/// column, ANDed into a partition predicate. Domain-specific range
/// scan, not general-purpose filtering.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RangeBound {
    /// Inclusive upper bound (`column <= at_most`).
    pub at_most: Option<u64>,
    /// Inclusive lower bound (`column >= at_least`).
    pub at_least: Option<u64>,
}

impl RangeBound {
    #[must_use]
    pub const fn at_most(bound: u64) -> Self {
        Self {
            at_most: Some(bound),
            at_least: None,
        }
    }

    #[must_use]
    pub const fn at_least(bound: u64) -> Self {
        Self {
            at_most: None,
            at_least: Some(bound),
        }
    }

    #[must_use]
    pub const fn between(at_least: u64, at_most: u64) -> Self {
        Self {
            at_most: Some(at_most),
            at_least: Some(at_least),
        }
    }
}

/// `select <cols> from <table> where <keys>`
#[must_use]
pub fn select(table: &str, cols: &[&str], keys: &[Filter]) -> Statement {
    let (pred, values) = predicate(keys, Separator::And);
    let text = format!("select {} from {table} where {pred}", cols.join(", "));
    Statement::new(text, values)
}

/// Keyed select with an optional row limit and range bound.
#[must_use]
pub fn select_scan(
    table: &str,
    cols: &[&str],
    keys: &[Filter],
    range_column: &str,
    range: RangeBound,
    limit: Option<usize>,
) -> Statement {
    let (pred, values) = predicate(keys, Separator::And);
    let mut text = format!("select {} from {table} where {pred}", cols.join(", "));

    if let Some(bound) = range.at_most {
        let _ = write!(text, " and {range_column}<={bound}");
    }
    if let Some(bound) = range.at_least {
        let _ = write!(text, " and {range_column}>={bound}");
    }
    if let Some(limit) = limit {
        let _ = write!(text, " limit {limit}");
    }

    Statement::new(text, values)
}

/// Unpredicated select over every row of the table.
#[must_use]
pub fn full_scan(table: &str, cols: &[&str]) -> Statement {
    Statement::new(format!("select {} from {table}", cols.join(", ")), vec![])
}

/// `insert into <table> (...) values (...)`; an upsert under the
/// store's semantics when the row already exists.
#[must_use]
pub fn insert(table: &str, fields: &[Filter], if_not_exists: bool) -> Statement {
    let cols: Vec<&str> = fields.iter().map(|f| f.column.as_str()).collect();
    let marks = vec!["?"; fields.len()].join(", ");
    let values: Vec<Value> = fields.iter().map(|f| f.value.clone()).collect();

    let mut text = format!(
        "insert into {table} ({}) values ({marks})",
        cols.join(", ")
    );
    if if_not_exists {
        text.push_str(" if not exists");
    }

    Statement::new(text, values)
}

/// `update <table> set <fields> where <keys>`, optionally guarded by
/// an `if <cond> = ?` clause evaluated against the stored row.
#[must_use]
pub fn update(
    table: &str,
    sets: &[Filter],
    keys: &[Filter],
    cond: Option<&Filter>,
) -> Statement {
    let (set_text, mut values) = predicate(sets, Separator::Comma);
    let (key_text, key_values) = predicate(keys, Separator::And);
    values.extend(key_values);

    let mut text = format!("update {table} set {set_text} where {key_text}");
    if let Some(cond) = cond {
        let _ = write!(text, " if {} = ?", cond.column);
        values.push(cond.value.clone());
    }

    Statement::new(text, values)
}

/// `delete from <table> where <keys>`
#[must_use]
pub fn delete(table: &str, keys: &[Filter]) -> Statement {
    let (pred, values) = predicate(keys, Separator::And);
    Statement::new(format!("delete from {table} where {pred}"), values)
}
