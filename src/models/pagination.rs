//! Page request/response shapes shared by the list endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_order(&self) -> sea_orm::Order {
        match self {
            SortDirection::Asc => sea_orm::Order::Asc,
            SortDirection::Desc => sea_orm::Order::Desc,
        }
    }
}

/// A sortable field of some listing
pub trait SortKey: Sized + Copy {
    const ALLOWED: &'static str;

    fn parse(s: &str) -> Option<Self>;
    fn default_key() -> Self;
    fn default_direction() -> SortDirection {
        SortDirection::Desc
    }
}

/// Raw pagination query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index (default: 0)
    pub page: Option<u64>,
    /// Page size (default from config, capped by config)
    pub size: Option<u64>,
    /// Sort field name
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub direction: Option<String>,
}

/// Validated pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<S> {
    pub page: u64,
    pub size: u64,
    pub sort: S,
    pub direction: SortDirection,
}

impl<S: SortKey> PageRequest<S> {
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl PageQuery {
    pub fn validate<S: SortKey>(
        &self,
        default_size: u64,
        max_size: u64,
    ) -> Result<PageRequest<S>, String> {
        let size = self.size.unwrap_or(default_size);
        if size < 1 {
            return Err("size must be at least 1".to_string());
        }
        if size > max_size {
            return Err(format!("size cannot exceed {}", max_size));
        }

        let sort = match self.sort.as_deref() {
            None => S::default_key(),
            Some(s) => S::parse(s).ok_or_else(|| {
                format!("Invalid sort: '{}'. Must be one of: {}", s, S::ALLOWED)
            })?,
        };

        let direction = match self.direction.as_deref() {
            None => S::default_direction(),
            Some(d) => SortDirection::from_str(d)
                .ok_or_else(|| format!("Invalid direction: '{}'. Must be asc or desc", d))?,
        };

        // OFFSET is a bigint in Postgres
        let page = self.page.unwrap_or(0);
        match page.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => {}
            _ => return Err(format!("page {} is out of range for size {}", page, size)),
        }

        Ok(PageRequest {
            page,
            size,
            sort,
            direction,
        })
    }
}

/// One page of results plus total-count metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
