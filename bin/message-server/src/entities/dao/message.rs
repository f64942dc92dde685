/// A row in the `message` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Generated by the database on insert; never changes afterwards.
    pub id: i64,
    /// Non-empty, at most 200 characters (enforced by the table).
    pub content: String,
}
