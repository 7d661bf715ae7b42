/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Ordering applied to list endpoints; always by id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Raw `?search=&sort=` query string of list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Normalized listing request handed to the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: SortOrder,
    /// True when the caller supplied `search` or `sort`; an empty result is then a 404.
    pub filtered: bool,
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        let search = params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let sort_given = params.sort.as_deref().is_some_and(|s| !s.is_empty());
        let sort = match params.sort.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        Self {
            filtered: search.is_some() || sort_given,
            search,
            sort,
        }
    }
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match against the search term (always true without one)
    pub fn matches(&self, haystack: &str) -> bool {
        match &self.search {
            Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }

    /// Orders `items` by their id according to `sort`
    pub fn sort_by_id<T>(&self, items: &mut [T], id: impl Fn(&T) -> i64) {
        match self.sort {
            SortOrder::Asc => items.sort_by_key(|item| id(item)),
            SortOrder::Desc => items.sort_by_key(|item| std::cmp::Reverse(id(item))),
        }
    }

    /// `%term%` pattern for ILIKE, or `%` when there is no search term
    pub fn like_pattern(&self) -> String {
        match &self.search {
            Some(term) => format!("%{}%", term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")),
            None => "%".to_string(),
        }
    }

    pub fn order_sql(&self) -> &'static str {
        match self.sort {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Access tiers, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Member,
    Admin,
}

/// Role as resolved from its stored name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleKind {
    User,
    Admin,
    Custom(String),
}

impl RoleKind {
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        match normalized.as_str() {
            "user" => RoleKind::User,
            "admin" => RoleKind::Admin,
            _ => RoleKind::Custom(normalized),
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            RoleKind::Admin => Tier::Admin,
            RoleKind::User | RoleKind::Custom(_) => Tier::Member,
        }
    }

    pub fn satisfies(&self, required: Tier) -> bool {
        self.tier() >= required
    }
}
