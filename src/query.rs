//! List query coercion
//!
//! Turns the raw `page`, `limit`, `sort` and `populate` query-string values
//! into bounded, typed parameters. Nothing here rejects a request: values that
//! do not parse fall back to their defaults.

use crate::config::PaginationConfig;
use serde::Deserialize;

/// Raw query string of `GET /students`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub populate: Option<String>,
}

/// Raw query string of `GET /students/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopulateQuery {
    pub populate: Option<String>,
}

impl PopulateQuery {
    pub fn include(&self) -> Include {
        Include::parse(self.populate.as_deref())
    }
}

/// Columns a student list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    Name,
    Email,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    fn parse(field: &str) -> Option<Self> {
        match field {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    /// Column name in the `students` table
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering of a list query: `name` sorts ascending, `-name` descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        let (name, order) = match raw.strip_prefix('-') {
            Some(rest) => (rest, SortOrder::Desc),
            None => (raw, SortOrder::Asc),
        };

        match SortField::parse(name) {
            Some(field) => Self { field, order },
            None => Self::default(),
        }
    }
}

/// Associations to eager-load alongside students
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Include {
    pub courses: bool,
}

impl Include {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut include = Self::default();
        for token in raw.unwrap_or_default().split(',') {
            if token.trim() == "courses" {
                include.courses = true;
            }
        }
        include
    }
}

/// Resolved parameters handed to the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub sort: Sort,
    pub include: Include,
}

impl ListParams {
    /// Saturates instead of overflowing on absurd page numbers
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl ListQuery {
    pub fn resolve(&self, bounds: &PaginationConfig) -> ListParams {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let limit = self
            .limit
            .as_deref()
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(bounds.default_limit)
            .min(bounds.max_limit);

        ListParams {
            page,
            limit,
            sort: Sort::parse(self.sort.as_deref()),
            include: Include::parse(self.populate.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>, sort: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
            sort: sort.map(String::from),
            populate: None,
        }
    }

    #[test]
    fn test_defaults() {
        let params = ListQuery::default().resolve(&PaginationConfig::default());

        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.sort, Sort::default());
        assert_eq!(params.sort.field, SortField::CreatedAt);
        assert_eq!(params.sort.order, SortOrder::Asc);
        assert!(!params.include.courses);
    }

    #[test]
    fn test_page_and_limit_coercion() {
        let bounds = PaginationConfig::default();

        let params = query(Some("3"), Some("25"), None).resolve(&bounds);
        assert_eq!((params.page, params.limit, params.offset()), (3, 25, 50));

        let params = query(Some("abc"), Some("-4"), None).resolve(&bounds);
        assert_eq!((params.page, params.limit), (1, 10));

        let params = query(Some("0"), Some("0"), None).resolve(&bounds);
        assert_eq!((params.page, params.limit), (1, 10));
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let params = query(Some("9223372036854775807"), None, None)
            .resolve(&PaginationConfig::default());

        assert_eq!(params.page, i64::MAX);
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_limit_is_clamped() {
        let bounds = PaginationConfig {
            default_limit: 5,
            max_limit: 20,
        };
        let params = query(None, Some("500"), None).resolve(&bounds);
        assert_eq!(params.limit, 20);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(
            Sort::parse(Some("name")),
            Sort { field: SortField::Name, order: SortOrder::Asc }
        );
        assert_eq!(
            Sort::parse(Some("-createdAt")),
            Sort { field: SortField::CreatedAt, order: SortOrder::Desc }
        );
        assert_eq!(
            Sort::parse(Some("-updated_at")),
            Sort { field: SortField::UpdatedAt, order: SortOrder::Desc }
        );
        assert_eq!(Sort::parse(Some("password")), Sort::default());
        assert_eq!(Sort::parse(Some("-")), Sort::default());
        assert_eq!(Sort::parse(Some("  ")), Sort::default());
    }

    #[test]
    fn test_populate_tokens() {
        assert!(Include::parse(Some("courses")).courses);
        assert!(Include::parse(Some("teachers, courses")).courses);
        assert!(!Include::parse(Some("teachers")).courses);
        assert!(!Include::parse(None).courses);
    }
}
