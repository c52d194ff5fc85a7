use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

// 分页响应信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            page,
            page_size,
            total,
            total_pages: total.div_ceil(page_size.max(1)),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// 规范化分页参数：页码至少为 1，页大小限制在 1..=100
pub fn normalize_page(page: u64, size: u64) -> (u64, u64) {
    (page.max(1), size.clamp(1, MAX_PAGE_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page(0, 0), (1, 1));
        assert_eq!(normalize_page(3, 500), (3, MAX_PAGE_SIZE));
        assert_eq!(normalize_page(2, DEFAULT_PAGE_SIZE), (2, 10));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationInfo::new(1, 10, 10).total_pages, 1);
        let info = PaginationInfo::new(1, 10, 11);
        assert_eq!(info.total_pages, 2);
        assert!(info.has_next());
    }
}
