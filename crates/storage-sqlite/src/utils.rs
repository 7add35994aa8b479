//! Utility functions for SQLite storage operations.

/// Maximum number of parameters bound into one `IN (...)` clause.
///
/// SQLite caps bound parameters per statement (999 on older builds), so id
/// lists are split into chunks of this size with room left for other filters.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}
