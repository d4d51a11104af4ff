use crate::{cql::Statement, error::Error, value::Value};

///
/// Store
///
/// Execution boundary to the underlying wide-column store. The core
/// hands over fully-assembled statements and propagates whatever the
/// implementation signals; retries, timeouts, paging, and session
/// management all live behind this trait.
///

pub trait Store {
    fn execute_write(&self, stmt: Statement) -> Result<(), Error>;
    fn execute_read(&self, stmt: Statement) -> Result<Box<dyn RowCursor>, Error>;
}

///
/// RowCursor
///
/// Lazy, forward-only, single-consumer result sequence. `scan_next`
/// fills `out` slot-for-slot with the requested columns, `Value::Null`
/// standing in for absent columns; `false` means exhaustion OR a
/// terminal failure, which only `close` can tell apart.
///

pub trait RowCursor {
    fn scan_next(&mut self, out: &mut [Value]) -> bool;
    fn close(self: Box<Self>) -> Result<(), Error>;
}
