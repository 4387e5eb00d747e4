use serde::Deserialize;

/// Admin-settable user flags; omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUserFlags {
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    100
}
