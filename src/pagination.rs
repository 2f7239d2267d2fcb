//! This modules defines the common functionality for paging data.
//!
//! Two windowing policies are supported: discrete pages with a page-number
//! control, and an incremental window that grows as the caller asks for more
//! items. Both clamp against the current list length, so a list that shrank
//! after a delete never causes an out-of-bounds slice.

/// The default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page counts up to this size list every page without ellipses.
pub const MAX_LISTED_PAGES: usize = 7;

/// The number of consecutive pages listed next to the first or last page.
const EDGE_RUN: usize = 5;

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified.
    pub default_page: usize,
    /// The number of items per page and per incremental load.
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The number of pages needed for `total_items`, never less than one.
///
/// A `page_size` of zero is treated as one.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page number into `[1, page_count]`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// One page of items along with the metadata for rendering page controls.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    /// The items on the page.
    pub items: &'a [T],
    /// The 1-based page being shown, after clamping.
    pub page: usize,
    /// The total number of pages.
    pub page_count: usize,
    /// The length of the full list.
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    /// The target of the "previous" control, `None` on the first page.
    pub fn prev_page(&self) -> Option<usize> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// The target of the "next" control, `None` on the last page.
    pub fn next_page(&self) -> Option<usize> {
        (self.page < self.page_count).then(|| self.page + 1)
    }

    /// Whether page controls should be shown at all.
    pub fn shows_controls(&self) -> bool {
        self.page_count > 1
    }

    /// The page-number list for this page.
    pub fn indicators(&self) -> Vec<PaginationIndicator> {
        create_pagination_indicators(self.page, self.page_count)
    }
}

/// Get page `requested_page` (1-based) of `items`.
///
/// Out-of-range page numbers are clamped into range. The caller's page number
/// is not modified, so it can be restored once the list grows again.
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let page_count = page_count(items.len(), page_size);
    let page = clamp_page(requested_page, page_count);

    let start = ((page - 1) * page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        page_count,
        total_items: items.len(),
    }
}

/// An entry in the page-number list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(usize),
    /// The page currently shown.
    CurrPage(usize),
    /// A non-clickable gap between page numbers.
    Ellipsis,
}

/// Build the page-number list for `curr_page` of `page_count` pages.
///
/// Up to [MAX_LISTED_PAGES] pages are listed in full. Beyond that the first
/// and last pages are always listed, with at most two ellipses standing in for
/// the hidden ranges.
pub fn create_pagination_indicators(
    curr_page: usize,
    page_count: usize,
) -> Vec<PaginationIndicator> {
    let page_count = page_count.max(1);
    let curr_page = clamp_page(curr_page, page_count);

    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    if page_count <= MAX_LISTED_PAGES {
        return (1..=page_count).map(map_page).collect();
    }

    let mut indicators = Vec::with_capacity(MAX_LISTED_PAGES);

    if curr_page < EDGE_RUN {
        indicators.extend((1..=EDGE_RUN).map(map_page));
        indicators.push(PaginationIndicator::Ellipsis);
        indicators.push(map_page(page_count));
    } else if curr_page > page_count - (EDGE_RUN - 1) {
        indicators.push(map_page(1));
        indicators.push(PaginationIndicator::Ellipsis);
        indicators.extend((page_count - (EDGE_RUN - 1)..=page_count).map(map_page));
    } else {
        indicators.push(map_page(1));
        indicators.push(PaginationIndicator::Ellipsis);
        indicators.extend((curr_page - 1..=curr_page + 1).map(map_page));
        indicators.push(PaginationIndicator::Ellipsis);
        indicators.push(map_page(page_count));
    }

    indicators
}

/// A window that starts with one page of items and grows by a page each time
/// more are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncrementalWindow {
    page_size: usize,
    items_loaded: usize,
}

impl IncrementalWindow {
    /// Create a window showing the first `page_size` items.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);

        Self {
            page_size,
            items_loaded: page_size,
        }
    }

    /// The number of items the window currently covers.
    pub fn items_loaded(&self) -> usize {
        self.items_loaded
    }

    /// Grow the window by one page, capped at `total_items`.
    ///
    /// Calling this repeatedly at the end of the list has no further effect.
    pub fn load_more(&mut self, total_items: usize) -> usize {
        self.items_loaded = self
            .items_loaded
            .saturating_add(self.page_size)
            .min(total_items);
        self.items_loaded
    }

    /// Whether there are items beyond the window.
    pub fn has_more(&self, total_items: usize) -> bool {
        self.items_loaded < total_items
    }

    /// The visible prefix of `items`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.items_loaded.min(items.len())]
    }
}

impl Default for IncrementalWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// How the caller renders the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Discrete pages with page controls.
    Paged {
        /// The requested 1-based page.
        page: usize,
    },
    /// A growing window, e.g. infinite scroll on small screens.
    Incremental(IncrementalWindow),
}

/// The slice of `items` the caller should render in `mode`.
pub fn visible_window<'a, T>(items: &'a [T], mode: &DisplayMode, page_size: usize) -> &'a [T] {
    match mode {
        DisplayMode::Paged { page } => paginate(items, page_size, *page).items,
        DisplayMode::Incremental(window) => window.visible(items),
    }
}
