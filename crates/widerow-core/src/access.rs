//! The data-access façade: the operation catalog over classifier,
//! extractor, fragment builder, and the store collaborator.

use crate::{
    cql::{self, Consistency, Filter, RangeBound, Statement, DEFAULT_PAGE_SIZE},
    error::Error,
    extract,
    metadata::MetadataCache,
    model::RoleFilter,
    store::{RowCursor, Store},
    traits::Record,
    value::Value,
};
use log::debug;
use std::marker::PhantomData;

///
/// AccessConfig
///
/// Execution knobs applied uniformly to the operation catalog.
///

#[derive(Clone, Debug)]
pub struct AccessConfig {
    /// Page size hint forwarded on every scan statement.
    pub page_size: i32,
    /// Consistency for keyed reads and partition scans.
    pub read_consistency: Consistency,
    /// Consistency for writes and deletes.
    pub write_consistency: Consistency,
    /// Consistency for full-table scans.
    pub scan_consistency: Consistency,
    /// Fixed ordering column used by the bounded partition scans.
    pub range_column: &'static str,
    /// Whether `save_partial` runs the post-save hook. Whole saves
    /// always run it; by default partial saves do not.
    pub partial_save_post_save: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            read_consistency: Consistency::LocalQuorum,
            write_consistency: Consistency::LocalQuorum,
            scan_consistency: Consistency::LocalOne,
            range_column: "bheight",
            partial_save_post_save: false,
        }
    }
}

///
/// DataAccess
///
/// Maps annotated records onto rows. Field metadata is classified
/// once per type and cached; every operation derives its column
/// lists, predicates, and bindings from that cache. Safe for
/// concurrent use from multiple threads when the store is.
///

pub struct DataAccess<S> {
    store: S,
    cache: MetadataCache,
    config: AccessConfig,
}

impl<S: Store> DataAccess<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, AccessConfig::default())
    }

    #[must_use]
    pub fn with_config(store: S, config: AccessConfig) -> Self {
        Self {
            store,
            cache: MetadataCache::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AccessConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // -------------------------------------------------------------------
    // Filter and name helpers (public for callers building custom
    // predicates).
    // -------------------------------------------------------------------

    /// Role-filtered column/value pairs for the record, optionally
    /// restricted to the named fields.
    pub fn filters_of<R: Record>(
        &self,
        rec: &R,
        filter: RoleFilter,
        names: &[&str],
    ) -> Result<Vec<Filter>, Error> {
        let models = self.cache.get::<R>()?;
        Ok(extract::filters(&models, rec, filter, names))
    }

    /// All column/value pairs.
    pub fn fields<R: Record>(&self, rec: &R) -> Result<Vec<Filter>, Error> {
        self.filters_of(rec, RoleFilter::Any, &[])
    }

    /// Primary-key column/value pairs (partition plus clustering).
    pub fn keys<R: Record>(&self, rec: &R) -> Result<Vec<Filter>, Error> {
        self.filters_of(rec, RoleFilter::AnyKey, &[])
    }

    /// Partition-key column/value pairs only.
    pub fn partition_keys<R: Record>(&self, rec: &R) -> Result<Vec<Filter>, Error> {
        self.filters_of(rec, RoleFilter::PartitionKey, &[])
    }

    /// Role-filtered column names in declaration order.
    pub fn col_names_of<R: Record>(&self, filter: RoleFilter) -> Result<Vec<&'static str>, Error> {
        Ok(extract::col_names(&self.cache.get::<R>()?, filter))
    }

    /// Role-filtered field names in declaration order.
    pub fn field_names_of<R: Record>(
        &self,
        filter: RoleFilter,
    ) -> Result<Vec<&'static str>, Error> {
        Ok(extract::field_names(&self.cache.get::<R>()?, filter))
    }

    // -------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------

    /// Upsert the record using all of its column values.
    pub fn save<R: Record>(&self, rec: &mut R) -> Result<(), Error> {
        let table = rec.table_name().to_owned();
        self.save_table(&table, rec)
    }

    /// Same as [`Self::save`] with the table name overridden.
    pub fn save_table<R: Record>(&self, table: &str, rec: &mut R) -> Result<(), Error> {
        rec.pre_save();
        let fields = self.fields(rec)?;
        let res = if fields.is_empty() {
            // Zero-column types write nothing.
            Ok(())
        } else {
            self.write(cql::insert(table, &fields, false))
        };
        rec.post_save();
        res
    }

    /// Conditional upsert: writes only when no row exists under the
    /// record's keys. The pre-save hook runs; post-save does not,
    /// since the store gives no signal whether the write applied.
    pub fn save_if_not_exists<R: Record>(&self, rec: &mut R) -> Result<(), Error> {
        rec.pre_save();
        let table = rec.table_name().to_owned();
        let fields = self.fields(rec)?;
        if fields.is_empty() {
            return Ok(());
        }
        self.write(cql::insert(&table, &fields, true))
    }

    /// Upsert the key columns plus exactly the named ordinary fields.
    /// Keys are always included; no other ordinary column is written
    /// even when populated on the instance.
    pub fn save_partial<R: Record>(&self, rec: &mut R, fields: &[&str]) -> Result<(), Error> {
        rec.pre_save();
        let table = rec.table_name().to_owned();
        let mut params = self.keys(rec)?;
        params.extend(self.filters_of(rec, RoleFilter::Ordinary, fields)?);
        let res = if params.is_empty() {
            Ok(())
        } else {
            self.write(cql::insert(&table, &params, false))
        };
        if self.config.partial_save_post_save {
            rec.post_save();
        }
        res
    }

    /// Conditional update: set exactly the named ordinary fields on
    /// the row matching the record's keys, applied only when `cond`
    /// holds on the stored row. Like [`Self::save_partial`], the
    /// post-save hook is gated on
    /// [`AccessConfig::partial_save_post_save`].
    pub fn update_if<R: Record>(
        &self,
        rec: &mut R,
        fields: &[&str],
        cond: Filter,
    ) -> Result<(), Error> {
        rec.pre_save();
        let table = rec.table_name().to_owned();
        let sets = self.filters_of(rec, RoleFilter::Ordinary, fields)?;
        let keys = self.keys(rec)?;
        let res = if sets.is_empty() {
            Ok(())
        } else {
            self.write(cql::update(&table, &sets, &keys, Some(&cond)))
        };
        if self.config.partial_save_post_save {
            rec.post_save();
        }
        res
    }

    /// Delete the row matching the record's keys.
    pub fn delete<R: Record>(&self, rec: &R) -> Result<(), Error> {
        let keys = self.keys(rec)?;
        if keys.is_empty() {
            return Ok(());
        }
        self.write(cql::delete(rec.table_name(), &keys))
    }

    // -------------------------------------------------------------------
    // Keyed reads
    // -------------------------------------------------------------------

    /// Look up the row under the record's key fields and populate its
    /// ordinary fields in place. Zero rows is [`Error::NotFound`].
    pub fn get<R: Record>(&self, rec: &mut R) -> Result<(), Error> {
        let keys = self.keys(rec)?;
        self.get_by(keys, rec)
    }

    /// Same as [`Self::get`] with a caller-supplied key predicate.
    pub fn get_by<R: Record>(&self, keys: Vec<Filter>, rec: &mut R) -> Result<(), Error> {
        let table = rec.table_name().to_owned();
        self.get_by_table(&table, keys, rec)
    }

    /// Same as [`Self::get_by`] with the table name overridden.
    pub fn get_by_table<R: Record>(
        &self,
        table: &str,
        keys: Vec<Filter>,
        rec: &mut R,
    ) -> Result<(), Error> {
        let models = self.cache.get::<R>()?;
        let mut cols = extract::col_names(&models, RoleFilter::Ordinary);
        let mut names = extract::field_names(&models, RoleFilter::Ordinary);
        if cols.is_empty() {
            // Zero-column types have nothing to look up. Keys-only
            // types still get an existence check: select a key column
            // so zero rows surfaces as NotFound.
            let Some(first) = models.first() else {
                return Ok(());
            };
            cols = vec![first.column];
            names = Vec::new();
        }

        let stmt =
            cql::select(table, &cols, &keys).consistency(self.config.read_consistency);
        let mut cursor = self.read(stmt)?;

        let mut row = vec![Value::Null; cols.len()];
        let found = cursor.scan_next(&mut row);
        cursor.close()?;
        if !found {
            return Err(Error::NotFound);
        }

        extract::populate(rec, &names, row);
        rec.post_load();
        Ok(())
    }

    // -------------------------------------------------------------------
    // Scans
    // -------------------------------------------------------------------

    /// Cursor over every clustering row sharing the record's
    /// partition keys. Combine with [`RowIter::fetch_next`].
    pub fn partition_iter<R: Record>(&self, rec: &R) -> Result<RowIter<R>, Error> {
        self.scan_iter(rec, RangeBound::default(), None)
    }

    /// Partition scan capped at `limit` rows.
    pub fn partition_iter_limit<R: Record>(
        &self,
        rec: &R,
        limit: usize,
    ) -> Result<RowIter<R>, Error> {
        self.scan_iter(rec, RangeBound::default(), Some(limit))
    }

    /// Partition scan with a one- or two-sided bound on the
    /// configured ordering column.
    pub fn partition_iter_bounded<R: Record>(
        &self,
        rec: &R,
        limit: usize,
        range: RangeBound,
    ) -> Result<RowIter<R>, Error> {
        self.scan_iter(rec, range, Some(limit))
    }

    /// Cursor over the entire table, no predicate.
    pub fn full_iter<R: Record>(&self, rec: &R) -> Result<RowIter<R>, Error> {
        let models = self.cache.get::<R>()?;
        let cols = extract::col_names(&models, RoleFilter::Any);
        let names = extract::field_names(&models, RoleFilter::Any);
        if cols.is_empty() {
            return Ok(RowIter::exhausted());
        }

        let stmt = cql::full_scan(rec.table_name(), &cols)
            .page_size(self.config.page_size)
            .consistency(self.config.scan_consistency);
        let cursor = self.read(stmt)?;
        Ok(RowIter::new(cursor, names))
    }

    fn scan_iter<R: Record>(
        &self,
        rec: &R,
        range: RangeBound,
        limit: Option<usize>,
    ) -> Result<RowIter<R>, Error> {
        let models = self.cache.get::<R>()?;
        let mut cols = extract::col_names(&models, RoleFilter::Ordinary);
        cols.extend(extract::col_names(&models, RoleFilter::ClusteringKey));
        let mut names = extract::field_names(&models, RoleFilter::Ordinary);
        names.extend(extract::field_names(&models, RoleFilter::ClusteringKey));
        if cols.is_empty() {
            return Ok(RowIter::exhausted());
        }

        let keys = extract::filters(&models, rec, RoleFilter::PartitionKey, &[]);
        let stmt = cql::select_scan(
            rec.table_name(),
            &cols,
            &keys,
            self.config.range_column,
            range,
            limit,
        )
        .page_size(self.config.page_size)
        .consistency(self.config.read_consistency);

        let cursor = self.read(stmt)?;
        Ok(RowIter::new(cursor, names))
    }

    // -------------------------------------------------------------------
    // Store boundary
    // -------------------------------------------------------------------

    fn write(&self, stmt: Statement) -> Result<(), Error> {
        let stmt = stmt.consistency(self.config.write_consistency);
        debug!("write: {} ({} params)", stmt.text, stmt.params.len());
        self.store.execute_write(stmt)
    }

    fn read(&self, stmt: Statement) -> Result<Box<dyn RowCursor>, Error> {
        debug!("read: {} ({} params)", stmt.text, stmt.params.len());
        self.store.execute_read(stmt)
    }
}

///
/// RowIter
///
/// Lazy row cursor bound to one record type. The field list captured
/// at creation is exactly the column order of the underlying select,
/// so write-back alignment holds by construction. Owned by a single
/// caller; exhaustion and failure are told apart by [`Self::close`].
///

pub struct RowIter<R: Record> {
    cursor: Box<dyn RowCursor>,
    names: Vec<&'static str>,
    _record: PhantomData<fn(&mut R)>,
}

impl<R: Record> RowIter<R> {
    fn new(cursor: Box<dyn RowCursor>, names: Vec<&'static str>) -> Self {
        Self {
            cursor,
            names,
            _record: PhantomData,
        }
    }

    fn exhausted() -> Self {
        Self::new(Box::new(EmptyCursor), Vec::new())
    }

    /// Advance to the next row and populate the record, running its
    /// post-load hook. `false` signals exhaustion (or a deferred
    /// failure; call [`Self::close`] to tell which).
    pub fn fetch_next(&mut self, rec: &mut R) -> bool {
        let mut row = vec![Value::Null; self.names.len()];
        if !self.cursor.scan_next(&mut row) {
            return false;
        }
        extract::populate(rec, &self.names, row);
        rec.post_load();
        true
    }

    /// Release the cursor, surfacing any terminal error.
    pub fn close(self) -> Result<(), Error> {
        self.cursor.close()
    }
}

struct EmptyCursor;

impl RowCursor for EmptyCursor {
    fn scan_next(&mut self, _out: &mut [Value]) -> bool {
        false
    }
    fn close(self: Box<Self>) -> Result<(), Error> {
        Ok(())
    }
}
