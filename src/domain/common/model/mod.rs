//! Shared domain types (filtering, pagination)

/// Keep records whose name contains `name`. Empty keeps everything.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    pub name: String,
}

/// 1-based page of `limit` records. Non-positive values disable paging.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginateQuery {
    pub limit: i64,
    pub page: i64,
}

#[derive(Debug, Clone, Default)]
pub struct DataSelectQuery {
    pub filter: FilterQuery,
    pub paginate: PaginateQuery,
}

impl DataSelectQuery {
    pub fn new(filter_name: impl Into<String>, limit: i64, page: i64) -> Self {
        Self {
            filter: FilterQuery {
                name: filter_name.into(),
            },
            paginate: PaginateQuery { limit, page },
        }
    }
}
