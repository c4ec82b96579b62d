/// Fixed page size for topic and post listings.
pub const PAGE_SIZE: usize = 20;

/// Number of pages needed to show `total` items, never less than 1.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if total == 0 {
        1
    } else {
        (total + per_page - 1) / per_page
    }
}

/// A resolved page of a listing. Out-of-range requests clamp into the valid
/// range instead of failing.
#[derive(Debug, PartialEq, Eq)]
pub struct Pager {
    /// 1-based page number after clamping.
    pub number: usize,
    pub pages: usize,
    pub offset: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl Pager {
    pub fn new(requested: Option<usize>, total: usize, per_page: usize) -> Self {
        let pages = page_count(total, per_page);
        let number = requested.unwrap_or(1).clamp(1, pages);
        Self {
            number,
            pages,
            offset: (number - 1) * per_page,
            prev: (number > 1).then(|| number - 1),
            next: (number < pages).then(|| number + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(40, 20), 2);
    }

    #[test]
    fn clamps_out_of_range_requests() {
        let pager = Pager::new(Some(99), 30, 20);
        assert_eq!(pager.number, 2);
        assert_eq!(pager.offset, 20);
        assert_eq!(pager.prev, Some(1));
        assert_eq!(pager.next, None);

        let pager = Pager::new(Some(0), 30, 20);
        assert_eq!(pager.number, 1);
        assert_eq!(pager.offset, 0);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let pager = Pager::new(Some(2), 50, 20);
        assert_eq!(pager.pages, 3);
        assert_eq!(pager.prev, Some(1));
        assert_eq!(pager.next, Some(3));
    }
}
