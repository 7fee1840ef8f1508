// Helper for generating UUIDv7 (timestamp-sortable UUIDs)
//
// SQLite has no native UUID generation, so all ids are produced app-side.
// Todos and token rows use UUIDv7 so that `ORDER BY id` is creation order;
// user ids, where ordering is irrelevant, stay on plain v4.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}

/// Generate a new random UUIDv4.
pub fn uuidv4() -> Uuid {
    Uuid::new_v4()
}
