//! Paging bookkeeping for the product list.
//!
//! The controller holds the current [`Page`] and the last requested page/size. A fetch is a
//! two-step affair: [`PaginationController::request`] records the request and hands out a
//! [`PageTicket`], [`PaginationController::apply`] folds the result back in. Tickets carry
//! a monotonic sequence number and only the most recent outstanding ticket is applied, so
//! a late response to a superseded request can never overwrite newer state.
//! [`PaginationController::load`] does both around the API call.
//!
//! Only a successful fetch moves the current page and size. `next`/`previous` step from
//! the page that is shown; `reload` retries the last request, failed or not.
//!
//! The controller does not stop callers from starting a second fetch while one is in
//! flight; callers are expected to disable their triggers while [`is_loading`] is set.
//!
//! [`is_loading`]: PaginationController::is_loading

use tracing::{debug, info, warn};

use crate::clients::{ApiError, CatalogApi};
use crate::controller::{Notifier, PaginationError, StateEvent};
use crate::model::{Page, Product, ProductId};

/// Page-level message shown whenever a list fetch fails.
pub const LIST_LOAD_FAILED: &str = "Failed to load products. Please try again later.";

/// Handle for one outstanding page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub seq: u64,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug)]
pub struct PaginationController {
    page: Page<Product>,
    current_page: u32,
    page_size: u32,
    loading: bool,
    error: Option<String>,
    last_request: (u32, u32),
    next_seq: u64,
    outstanding: Option<u64>,
    notifier: Notifier,
}

impl PaginationController {
    pub fn new(page_size: u32, notifier: Notifier) -> Self {
        Self {
            page: Page::empty(page_size),
            current_page: 1,
            page_size,
            loading: false,
            error: None,
            last_request: (1, page_size),
            next_seq: 1,
            outstanding: None,
            notifier,
        }
    }

    /// Records a request for `page` of `size` and returns its ticket.
    ///
    /// Sets the loading flag and clears any previous error. The current page and size are
    /// left alone until the result is applied.
    pub fn request(&mut self, page: u32, size: u32) -> Result<PageTicket, PaginationError> {
        if page == 0 || size == 0 {
            return Err(PaginationError::InvalidRequest { page, size });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.outstanding = Some(seq);
        self.last_request = (page, size);
        self.loading = true;
        self.error = None;
        debug!(seq, page, size, "Page requested");
        self.notifier.notify(StateEvent::PageLoading { page, size });
        Ok(PageTicket { seq, page, size })
    }

    /// Applies the result of a fetch. Returns `false` when the ticket was superseded by a
    /// newer request and the result was dropped.
    pub fn apply(&mut self, ticket: PageTicket, result: Result<Page<Product>, ApiError>) -> bool {
        if self.outstanding != Some(ticket.seq) {
            debug!(seq = ticket.seq, latest = ?self.outstanding, "Stale page response discarded");
            self.notifier.notify(StateEvent::PageDiscarded { seq: ticket.seq });
            return false;
        }
        self.outstanding = None;
        self.loading = false;

        match result {
            Ok(page) => {
                if !page.is_consistent() {
                    warn!(
                        page = page.page,
                        total_pages = page.total_pages,
                        "Inconsistent paging metadata"
                    );
                }
                self.current_page = page.page;
                self.page_size = page.size;
                info!(
                    page = page.page,
                    total_pages = page.total_pages,
                    count = page.content.len(),
                    "Page loaded"
                );
                self.notifier.notify(StateEvent::PageLoaded {
                    page: page.page,
                    total_pages: page.total_pages,
                });
                self.page = page;
            }
            Err(e) => {
                warn!(error = %e, page = ticket.page, size = ticket.size, "Page load failed");
                self.notifier.notify(StateEvent::PageFailed {
                    message: LIST_LOAD_FAILED.to_string(),
                });
                self.error = Some(LIST_LOAD_FAILED.to_string());
            }
        }
        true
    }

    /// Fetches `page` of `size` and replaces the current page on success.
    ///
    /// A page beyond the last known one is requested as-is; whatever the server answers
    /// (clamped or empty) is accepted.
    pub async fn load<C>(&mut self, api: &C, page: u32, size: u32) -> Result<(), PaginationError>
    where
        C: CatalogApi + ?Sized,
    {
        let ticket = self.request(page, size)?;
        let result = api.list_products(page, size).await;
        let failure = result.as_ref().err().cloned();
        self.apply(ticket, result);
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Switches page size. Always goes back to page 1.
    pub async fn change_page_size<C>(&mut self, api: &C, size: u32) -> Result<(), PaginationError>
    where
        C: CatalogApi + ?Sized,
    {
        self.load(api, 1, size).await
    }

    /// Loads the following page. No-op on the last page.
    pub async fn next<C>(&mut self, api: &C) -> Result<(), PaginationError>
    where
        C: CatalogApi + ?Sized,
    {
        if self.page.last {
            debug!(page = self.current_page, "Already on last page");
            return Ok(());
        }
        self.load(api, self.current_page + 1, self.page_size).await
    }

    /// Loads the preceding page. No-op on the first page.
    pub async fn previous<C>(&mut self, api: &C) -> Result<(), PaginationError>
    where
        C: CatalogApi + ?Sized,
    {
        if self.page.first || self.current_page <= 1 {
            debug!(page = self.current_page, "Already on first page");
            return Ok(());
        }
        self.load(api, self.current_page - 1, self.page_size).await
    }

    /// Repeats the last request, which after a failure is the one that failed.
    pub async fn reload<C>(&mut self, api: &C) -> Result<(), PaginationError>
    where
        C: CatalogApi + ?Sized,
    {
        let (page, size) = self.last_request;
        self.load(api, page, size).await
    }

    // --- List mutations from successful submissions ---

    /// Adds a newly created product to the in-memory list. A product whose id is already
    /// listed is replaced instead, so it never appears twice.
    pub fn append_product(&mut self, product: Product) {
        if !self.replace_product(product.clone()) {
            self.page.content.push(product);
        }
    }

    /// Replaces the listed product with the same id, keeping its position. Returns
    /// `false` when no such product is listed.
    pub fn replace_product(&mut self, product: Product) -> bool {
        match self.page.content.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// Removes the listed product with this id. Returns `false` when it was not listed.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        let before = self.page.content.len();
        self.page.content.retain(|p| p.id != id);
        self.page.content.len() != before
    }

    // --- Accessors ---

    pub fn page(&self) -> &Page<Product> {
        &self.page
    }

    pub fn products(&self) -> &[Product] {
        &self.page.content
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.page.content.iter().find(|p| p.id == id)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.page.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.page.total_elements
    }

    pub fn is_first_page(&self) -> bool {
        self.page.first
    }

    pub fn is_last_page(&self) -> bool {
        self.page.last
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::{Call, MockCatalog};

    fn products(range: std::ops::RangeInclusive<u64>) -> Vec<Product> {
        range.map(|id| Product::new(id, format!("Item {id}"), 10.0)).collect()
    }

    fn controller() -> PaginationController {
        PaginationController::new(10, Notifier::default())
    }

    #[tokio::test]
    async fn test_last_page_makes_next_a_noop() {
        let mock = MockCatalog::new();
        mock.expect_list_products(2, 10)
            .return_ok(Page::new(products(11..=18), 2, 10, 18));

        let mut pagination = controller();
        pagination.load(&mock, 2, 10).await.unwrap();
        assert_eq!(pagination.products().len(), 8);
        assert!(pagination.is_last_page());
        assert!(!pagination.is_first_page());
        assert_eq!(pagination.total_elements(), 18);

        pagination.next(&mock).await.unwrap();
        assert_eq!(pagination.current_page(), 2);
        assert_eq!(mock.calls().len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_first_page_makes_previous_a_noop() {
        let mock = MockCatalog::new();
        mock.expect_list_products(1, 10)
            .return_ok(Page::new(products(1..=10), 1, 10, 18));
        mock.expect_list_products(2, 10)
            .return_ok(Page::new(products(11..=18), 2, 10, 18));
        mock.expect_list_products(1, 10)
            .return_ok(Page::new(products(1..=10), 1, 10, 18));

        let mut pagination = controller();
        pagination.load(&mock, 1, 10).await.unwrap();
        pagination.previous(&mock).await.unwrap();
        assert_eq!(mock.calls().len(), 1);

        pagination.next(&mock).await.unwrap();
        assert_eq!(pagination.current_page(), 2);
        pagination.previous(&mock).await.unwrap();
        assert_eq!(pagination.current_page(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_change_page_size_resets_to_first_page() {
        let mock = MockCatalog::new();
        mock.expect_list_products(2, 10)
            .return_ok(Page::new(products(11..=18), 2, 10, 18));
        mock.expect_list_products(1, 20)
            .return_ok(Page::new(products(1..=18), 1, 20, 18));

        let mut pagination = controller();
        pagination.load(&mock, 2, 10).await.unwrap();
        pagination.change_page_size(&mock, 20).await.unwrap();
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.page_size(), 20);
        assert!(pagination.is_first_page() && pagination.is_last_page());
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_load_sets_error_and_keeps_previous_page() {
        let mock = MockCatalog::new();
        mock.expect_list_products(1, 10)
            .return_ok(Page::new(products(1..=10), 1, 10, 18));
        mock.expect_list_products(2, 10)
            .return_err(ApiError::Transport("connection refused".into()));
        mock.expect_list_products(2, 10)
            .return_err(ApiError::Application { message: Some("Database unavailable".into()) });

        let mut pagination = controller();
        pagination.load(&mock, 1, 10).await.unwrap();

        let err = pagination.next(&mock).await.unwrap_err();
        assert!(matches!(err, PaginationError::Fetch(ApiError::Transport(_))));
        assert!(!pagination.is_loading());
        assert_eq!(pagination.error(), Some(LIST_LOAD_FAILED));
        assert_eq!(pagination.products().len(), 10);

        pagination.reload(&mock).await.unwrap_err();
        assert_eq!(pagination.error(), Some(LIST_LOAD_FAILED));
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_next_does_not_skip_a_page() {
        let mock = MockCatalog::new();
        mock.expect_list_products(1, 10)
            .return_ok(Page::new(products(1..=10), 1, 10, 30));
        mock.expect_list_products(2, 10)
            .return_err(ApiError::Transport("connection reset".into()));
        mock.expect_list_products(2, 10)
            .return_ok(Page::new(products(11..=20), 2, 10, 30));

        let mut pagination = controller();
        pagination.load(&mock, 1, 10).await.unwrap();
        pagination.next(&mock).await.unwrap_err();
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.page().page, 1);

        pagination.next(&mock).await.unwrap();
        assert_eq!(pagination.current_page(), 2);
        assert_eq!(pagination.error(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_page_size_change_keeps_previous_working() {
        let mock = MockCatalog::new();
        mock.expect_list_products(2, 10)
            .return_ok(Page::new(products(11..=20), 2, 10, 30));
        mock.expect_list_products(1, 20)
            .return_err(ApiError::Http { status: 503 });
        mock.expect_list_products(1, 10)
            .return_ok(Page::new(products(1..=10), 1, 10, 30));

        let mut pagination = controller();
        pagination.load(&mock, 2, 10).await.unwrap();
        pagination.change_page_size(&mock, 20).await.unwrap_err();
        assert_eq!(pagination.current_page(), 2);
        assert_eq!(pagination.page_size(), 10);
        assert!(!pagination.is_first_page());

        pagination.previous(&mock).await.unwrap();
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(
            mock.calls(),
            vec![
                Call::ListProducts { page: 2, size: 10 },
                Call::ListProducts { page: 1, size: 20 },
                Call::ListProducts { page: 1, size: 10 },
            ]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_reload_retries_the_failed_request() {
        let mock = MockCatalog::new();
        mock.expect_list_products(1, 10)
            .return_ok(Page::new(products(1..=10), 1, 10, 30));
        mock.expect_list_products(1, 20)
            .return_err(ApiError::Transport("timeout".into()));
        mock.expect_list_products(1, 20)
            .return_ok(Page::new(products(1..=20), 1, 20, 30));

        let mut pagination = controller();
        pagination.load(&mock, 1, 10).await.unwrap();
        pagination.change_page_size(&mock, 20).await.unwrap_err();
        assert_eq!(pagination.page_size(), 10);

        pagination.reload(&mock).await.unwrap();
        assert_eq!(pagination.page_size(), 20);
        assert_eq!(pagination.products().len(), 20);
        mock.verify();
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_not_clamped() {
        let mock = MockCatalog::new();
        let mut past_end = Page::new(Vec::new(), 5, 10, 18);
        past_end.last = false;
        mock.expect_list_products(5, 10).return_ok(past_end.clone());

        let mut pagination = controller();
        pagination.load(&mock, 5, 10).await.unwrap();
        assert_eq!(pagination.page(), &past_end);
        assert_eq!(mock.calls(), vec![Call::ListProducts { page: 5, size: 10 }]);
    }

    #[test]
    fn test_rejects_zero_page_or_size() {
        let mut pagination = controller();
        assert_eq!(
            pagination.request(0, 10),
            Err(PaginationError::InvalidRequest { page: 0, size: 10 })
        );
        assert!(pagination.request(1, 0).is_err());
        assert!(!pagination.is_loading());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut pagination = controller();
        let first = pagination.request(1, 10).unwrap();
        let second = pagination.request(2, 10).unwrap();
        assert!(second.seq > first.seq);

        let applied = pagination.apply(second, Ok(Page::new(products(11..=18), 2, 10, 18)));
        assert!(applied);
        let applied = pagination.apply(first, Ok(Page::new(products(1..=10), 1, 10, 18)));
        assert!(!applied);

        assert_eq!(pagination.current_page(), 2);
        assert_eq!(pagination.products()[0].id, 11);
        assert!(!pagination.is_loading());
    }

    #[test]
    fn test_list_mutations_keep_order_and_uniqueness() {
        let mut pagination = controller();
        let ticket = pagination.request(1, 10).unwrap();
        pagination.apply(ticket, Ok(Page::new(products(1..=3), 1, 10, 3)));

        pagination.append_product(Product::new(4, "New", 5.0));
        pagination.append_product(Product::new(4, "New again", 6.0));
        assert_eq!(pagination.products().iter().filter(|p| p.id == 4).count(), 1);
        assert_eq!(pagination.find(4).unwrap().title, "New again");

        assert!(pagination.replace_product(Product::new(2, "Renamed", 9.0)));
        let ids: Vec<_> = pagination.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(pagination.products()[1].title, "Renamed");

        assert!(!pagination.replace_product(Product::new(99, "Missing", 1.0)));
        assert!(pagination.remove_product(3));
        assert!(!pagination.remove_product(3));
        assert_eq!(pagination.products().len(), 3);
    }
}
