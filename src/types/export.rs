use serde::{Deserialize, Serialize};

use super::annotation::{Highlight, Note};

/// Client-side annotation export: the current filtered drawer view plus a
/// timestamp. Informal schema, not versioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    pub notes: Vec<Note>,
    pub highlights: Vec<Highlight>,
    /// UNIX timestamp at export time.
    pub export_date: i64,
}
