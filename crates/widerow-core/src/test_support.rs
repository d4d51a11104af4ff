//! Shared fixtures: a recording in-memory store and hand-expanded
//! record types mirroring what the derive macro generates.

use crate::{
    cql::Statement,
    error::Error,
    model::RawField,
    store::{RowCursor, Store},
    traits::{FieldValues, Record},
    value::{FieldValue, Timestamp, Value},
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

///
/// TestStore
///
/// Records every statement and replays canned row batches, one batch
/// per read, in order.
///

#[derive(Default)]
pub(crate) struct TestStore {
    pub writes: RefCell<Vec<Statement>>,
    pub reads: RefCell<Vec<Statement>>,
    pub batches: RefCell<VecDeque<Vec<Vec<Value>>>>,
    pub write_error: Cell<bool>,
    pub close_error: Cell<bool>,
}

impl TestStore {
    pub fn with_rows(rows: Vec<Vec<Value>>) -> Self {
        let store = Self::default();
        store.batches.borrow_mut().push_back(rows);
        store
    }
}

impl Store for TestStore {
    fn execute_write(&self, stmt: Statement) -> Result<(), Error> {
        self.writes.borrow_mut().push(stmt);
        if self.write_error.get() {
            return Err(Error::execution("write refused"));
        }
        Ok(())
    }

    fn execute_read(&self, stmt: Statement) -> Result<Box<dyn RowCursor>, Error> {
        self.reads.borrow_mut().push(stmt);
        let rows = self.batches.borrow_mut().pop_front().unwrap_or_default();
        Ok(Box::new(TestCursor {
            rows: rows.into(),
            close_error: self.close_error.get(),
        }))
    }
}

struct TestCursor {
    rows: VecDeque<Vec<Value>>,
    close_error: bool,
}

impl RowCursor for TestCursor {
    fn scan_next(&mut self, out: &mut [Value]) -> bool {
        let Some(row) = self.rows.pop_front() else {
            return false;
        };
        for (slot, value) in out.iter_mut().zip(row) {
            *slot = value;
        }
        true
    }

    fn close(self: Box<Self>) -> Result<(), Error> {
        if self.close_error {
            return Err(Error::execution("cursor failed"));
        }
        Ok(())
    }
}

///
/// HookLog
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct HookLog {
    pub pre_save: u32,
    pub post_save: u32,
    pub post_load: u32,
}

///
/// SimpleRec
///
/// Composite-key fixture: two partition keys, two clustering keys,
/// three ordinary columns. The `hooks` field carries no annotation
/// and is therefore not persisted.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SimpleRec {
    pub a_string: String,
    pub some_bytes: Vec<u8>,
    pub a_big_uint: u64,
    pub an_int: i64,
    pub a_time: Timestamp,
    pub a_big_int: i128,
    pub a_bool: bool,
    pub hooks: HookLog,
}

const SIMPLE_FIELDS: &[RawField] = &[
    RawField {
        name: "a_string",
        spec: "astring,key",
        embed: None,
    },
    RawField {
        name: "some_bytes",
        spec: "some_bytes,key",
        embed: None,
    },
    RawField {
        name: "a_big_uint",
        spec: "abigint,sort",
        embed: None,
    },
    RawField {
        name: "an_int",
        spec: "anint,sort",
        embed: None,
    },
    RawField {
        name: "a_time",
        spec: "some_date_time",
        embed: None,
    },
    RawField {
        name: "a_big_int",
        spec: "avarint",
        embed: None,
    },
    RawField {
        name: "a_bool",
        spec: "abool",
        embed: None,
    },
];

// Hand expansion of `#[derive(FieldValues)]`.
impl FieldValues for SimpleRec {
    fn raw_fields() -> &'static [RawField] {
        SIMPLE_FIELDS
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "a_string" => Some(FieldValue::to_value(&self.a_string)),
            "some_bytes" => Some(FieldValue::to_value(&self.some_bytes)),
            "a_big_uint" => Some(FieldValue::to_value(&self.a_big_uint)),
            "an_int" => Some(FieldValue::to_value(&self.an_int)),
            "a_time" => Some(FieldValue::to_value(&self.a_time)),
            "a_big_int" => Some(FieldValue::to_value(&self.a_big_int)),
            "a_bool" => Some(FieldValue::to_value(&self.a_bool)),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> bool {
        macro_rules! assign {
            ($target:expr) => {{
                match value {
                    Value::Null => $target = Default::default(),
                    other => {
                        if let Some(parsed) = FieldValue::from_value(other) {
                            $target = parsed;
                        }
                    }
                }
                true
            }};
        }

        match field {
            "a_string" => assign!(self.a_string),
            "some_bytes" => assign!(self.some_bytes),
            "a_big_uint" => assign!(self.a_big_uint),
            "an_int" => assign!(self.an_int),
            "a_time" => assign!(self.a_time),
            "a_big_int" => assign!(self.a_big_int),
            "a_bool" => assign!(self.a_bool),
            _ => false,
        }
    }
}

impl Record for SimpleRec {
    fn table_name(&self) -> &str {
        "simple_rec"
    }
    fn pre_save(&mut self) {
        self.hooks.pre_save += 1;
    }
    fn post_save(&mut self) {
        self.hooks.post_save += 1;
    }
    fn post_load(&mut self) {
        self.hooks.post_load += 1;
    }
}

pub(crate) fn simple_fixture() -> SimpleRec {
    SimpleRec {
        a_string: "foo".to_string(),
        some_bytes: vec![42, 101],
        a_big_uint: 123,
        an_int: 11,
        a_time: Timestamp::from_millis(42_000),
        a_big_int: 42,
        a_bool: true,
        hooks: HookLog::default(),
    }
}

///
/// Membership
///
/// Keys-only fixture: every persisted column is part of the row
/// identity.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Membership {
    pub group: String,
    pub member: String,
}

const MEMBERSHIP_FIELDS: &[RawField] = &[
    RawField {
        name: "group",
        spec: "group_id,key",
        embed: None,
    },
    RawField {
        name: "member",
        spec: "member_id,sort",
        embed: None,
    },
];

impl FieldValues for Membership {
    fn raw_fields() -> &'static [RawField] {
        MEMBERSHIP_FIELDS
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "group" => Some(FieldValue::to_value(&self.group)),
            "member" => Some(FieldValue::to_value(&self.member)),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> bool {
        macro_rules! assign {
            ($target:expr) => {{
                match value {
                    Value::Null => $target = Default::default(),
                    other => {
                        if let Some(parsed) = FieldValue::from_value(other) {
                            $target = parsed;
                        }
                    }
                }
                true
            }};
        }

        match field {
            "group" => assign!(self.group),
            "member" => assign!(self.member),
            _ => false,
        }
    }
}

impl Record for Membership {
    fn table_name(&self) -> &str {
        "memberships"
    }
}

///
/// Window / Reading
///
/// Traversal fixture: a reusable time-window sub-record spliced into
/// its parent's column sequence.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Window {
    pub start: u64,
    pub end: u64,
}

const WINDOW_FIELDS: &[RawField] = &[
    RawField {
        name: "start",
        spec: "win_start,sort",
        embed: None,
    },
    RawField {
        name: "end",
        spec: "win_end",
        embed: None,
    },
];

impl FieldValues for Window {
    fn raw_fields() -> &'static [RawField] {
        WINDOW_FIELDS
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "start" => Some(FieldValue::to_value(&self.start)),
            "end" => Some(FieldValue::to_value(&self.end)),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> bool {
        match field {
            "start" => {
                match value {
                    Value::Null => self.start = 0,
                    other => {
                        if let Some(parsed) = FieldValue::from_value(other) {
                            self.start = parsed;
                        }
                    }
                }
                true
            }
            "end" => {
                match value {
                    Value::Null => self.end = 0,
                    other => {
                        if let Some(parsed) = FieldValue::from_value(other) {
                            self.end = parsed;
                        }
                    }
                }
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Reading {
    pub sensor: String,
    pub window: Window,
    pub reading: f64,
}

const fn window_fields() -> &'static [RawField] {
    WINDOW_FIELDS
}

const READING_FIELDS: &[RawField] = &[
    RawField {
        name: "sensor",
        spec: "sensor,key",
        embed: None,
    },
    RawField {
        name: "window",
        spec: "window,traverse",
        embed: Some(window_fields),
    },
    RawField {
        name: "reading",
        spec: "reading",
        embed: None,
    },
];

impl FieldValues for Reading {
    fn raw_fields() -> &'static [RawField] {
        READING_FIELDS
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "sensor" => Some(FieldValue::to_value(&self.sensor)),
            "reading" => Some(FieldValue::to_value(&self.reading)),
            _ => self.window.get_value(field),
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> bool {
        match field {
            "sensor" => {
                match value {
                    Value::Null => self.sensor = String::new(),
                    other => {
                        if let Some(parsed) = FieldValue::from_value(other) {
                            self.sensor = parsed;
                        }
                    }
                }
                true
            }
            "reading" => {
                match value {
                    Value::Null => self.reading = 0.0,
                    other => {
                        if let Some(parsed) = FieldValue::from_value(other) {
                            self.reading = parsed;
                        }
                    }
                }
                true
            }
            _ => self.window.set_value(field, value),
        }
    }
}

impl Record for Reading {
    fn table_name(&self) -> &str {
        "readings"
    }
}
