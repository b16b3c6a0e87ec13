use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use sqlx::{query::Query, sqlite::SqliteArguments, sqlite::SqliteRow, FromRow, Sqlite};
use validator::Validate;

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A list-type record kind (testimonials, FAQ, services, photo carousel,
/// specialties). Every kind carries an `is_active` visibility flag and an
/// integer `order` stored in the `sort_order` column.
pub trait OrderedRecord:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Validate + Send + Sync + Unpin + 'static
{
    /// Backing table.
    const TABLE: &'static str;
    /// URL segment used by both `/api/<path>` and `/api/admin/<path>`.
    const PATH: &'static str;
    /// Human readable name used in error messages.
    const LABEL: &'static str;
    /// Every column except `id` and the timestamps, in `bind_columns` order.
    const COLUMNS: &'static [&'static str];

    /// Create payload.
    type Form: DeserializeOwned + Send + 'static;
    /// Partial update payload; absent fields are left untouched.
    type Patch: DeserializeOwned + Send + 'static;

    fn from_form(form: Self::Form) -> Self;

    fn apply_patch(&mut self, patch: Self::Patch);

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;

    fn id(&self) -> i64;
}

/// Full ordered id list for an atomic reorder.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<i64>,
}

/// Target slot for a single dragged item.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub position: usize,
}

pub(crate) fn default_true() -> bool {
    true
}

/// Patch field that distinguishes an absent key (`None`) from an explicit
/// `null` (`Some(None)`). Use with `#[serde(default)]`.
pub(crate) fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// `null` and `""` both clear an optional text column.
pub(crate) fn clearable(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
