/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL for table creation. All methods return
/// `&'static str` so statements are assembled with
/// [`const_format::concatcp!`] from fixed table and column names.
///
/// # Design
///
/// This trait contains no I/O operations; it purely describes table structure.
/// Bulk data operations are handled by [`Streamable`](super::Streamable).
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL, including any seed rows.
    fn creates() -> &'static str;
}

/// Tables loaded through a temporary staging table.
///
/// The stage is created per transaction and dropped on commit. Rows move
/// from the stage into the table with `ON CONFLICT DO NOTHING`, so loads
/// can be repeated without duplicating data.
pub trait Staged: Schema {
    /// Returns the `CREATE TEMP TABLE ... ON COMMIT DROP` statement.
    fn stages() -> &'static str;
    /// Returns the `COPY <stage> ... FROM STDIN` command for the default column order.
    fn copy() -> &'static str;
    /// Returns the `INSERT ... SELECT ... ON CONFLICT DO NOTHING` merge.
    fn merges() -> &'static str;
}
