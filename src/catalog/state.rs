use crate::database::models::Product;

/// Ephemeral, per-client list state: search term, 1-based page, fixed
/// page size, plus the last fetched page and an error slot.
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
    pub products: Vec<Product>,
    pub total: u64,
    pub error: Option<String>,
}

impl CatalogState {
    pub fn new(page_size: u32) -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
            products: Vec::new(),
            total: 0,
            error: None,
        }
    }

    /// Changing the search term always resets to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Page navigation leaves the search term alone
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(self.page_size as u64) as u32
    }

    /// Page numbers for the pagination control, 1..=total_pages
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        1..=self.total_pages()
    }

    /// Replace the displayed set with a fresh page
    pub fn apply(&mut self, products: Vec<Product>, total: u64) {
        self.products = products;
        self.total = total;
        self.error = None;
    }

    /// A failed fetch shows the error and never keeps stale data
    pub fn fail(&mut self, message: impl Into<String>) {
        self.products.clear();
        self.total = 0;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: "desc".to_string(),
            price: 1.0,
            image: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn search_change_resets_to_first_page() {
        let mut state = CatalogState::new(6);
        state.set_page(3);
        state.set_search("shirt");
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "shirt");
    }

    #[test]
    fn page_change_preserves_search() {
        let mut state = CatalogState::new(6);
        state.set_search("shirt");
        state.set_page(2);
        assert_eq!(state.search, "shirt");
        assert_eq!(state.page, 2);
    }

    #[test]
    fn total_pages_rounds_up() {
        let mut state = CatalogState::new(6);
        state.apply(vec![], 0);
        assert_eq!(state.total_pages(), 0);
        state.apply(vec![], 6);
        assert_eq!(state.total_pages(), 1);
        state.apply(vec![], 10);
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.pages().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn failure_clears_the_displayed_set() {
        let mut state = CatalogState::new(6);
        state.apply(vec![product("Red Shirt")], 1);
        state.fail("Failed to fetch products");
        assert!(state.products.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch products"));
    }

    #[test]
    fn fresh_fetch_clears_a_previous_error() {
        let mut state = CatalogState::new(6);
        state.fail("boom");
        state.apply(vec![product("Red Shirt")], 1);
        assert!(state.error.is_none());
        assert_eq!(state.products.len(), 1);
    }
}
