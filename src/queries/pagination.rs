use serde::{Deserialize, Serialize};

/// 1-based page selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Normalizes the request: page 0 reads as page 1 and `per_page` is kept
    /// within `1..=max_per_page`.
    pub fn clamped(self, max_per_page: u64) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, max_per_page.max(1)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Slices one page out of `items`. Pages past the end are empty, not errors.
pub fn paginate<T>(items: Vec<T>, request: PageRequest, max_per_page: u64) -> Page<T> {
    let PageRequest { page, per_page } = request.clamped(max_per_page);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(per_page);

    let skip = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
    let take = usize::try_from(per_page).unwrap_or(usize::MAX);
    let items = items.into_iter().skip(skip).take(take).collect();

    Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}
