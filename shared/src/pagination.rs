//! Client-side pagination over the full, newest-first list of predictions.

/// Rows shown per page in the predictions table
pub const PAGE_SIZE: usize = 5;

/// The visible window of a list for a given page
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// 1-based page actually shown, after clamping
    pub page: usize,
    pub total_pages: usize,
}

impl<'a, T> PageSlice<'a, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed to show `len` items
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice `items` for the 1-based `page`.
///
/// Page `p` covers offsets `[page_size * (p - 1), page_size * p)`. Out of range
/// pages are clamped to the nearest valid page, so a page left dangling after
/// deletions falls back to the last one.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages.max(1));

    if total_pages == 0 {
        return PageSlice { items: &items[..0], page, total_pages };
    }

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    PageSlice {
        items: &items[start..end],
        page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(3, 0), 0);
    }

    #[test]
    fn test_full_pages_then_remainder() {
        let items: Vec<u32> = (0..12).collect();

        for page in 1..=2 {
            let slice = paginate(&items, page, PAGE_SIZE);
            assert_eq!(slice.items.len(), 5);
            assert_eq!(slice.items[0], (5 * (page - 1)) as u32);
        }

        let last = paginate(&items, 3, PAGE_SIZE);
        assert_eq!(last.items, &[10, 11]);
        assert_eq!(last.total_pages, 3);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn test_row_counts_for_every_length() {
        for n in 0..23usize {
            let items: Vec<usize> = (0..n).collect();
            let pages = total_pages(n, PAGE_SIZE);
            for page in 1..=pages {
                let slice = paginate(&items, page, PAGE_SIZE);
                let expected = PAGE_SIZE.min(n - PAGE_SIZE * (page - 1));
                assert_eq!(slice.items.len(), expected, "n={} page={}", n, page);
                assert_eq!(slice.items.first(), Some(&(PAGE_SIZE * (page - 1))));
            }
        }
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (0..7).collect();

        let beyond = paginate(&items, 9, PAGE_SIZE);
        assert_eq!(beyond.page, 2);
        assert_eq!(beyond.items, &[5, 6]);

        let zero = paginate(&items, 0, PAGE_SIZE);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items.len(), 5);
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<u32> = Vec::new();
        let slice = paginate(&items, 1, PAGE_SIZE);
        assert!(slice.items.is_empty());
        assert_eq!(slice.page, 1);
        assert_eq!(slice.total_pages, 0);
        assert!(!slice.has_previous());
        assert!(!slice.has_next());
    }
}
