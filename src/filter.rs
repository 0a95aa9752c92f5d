use std::collections::BTreeSet;

use anyhow::Result;

use crate::store::{ALL_CATEGORIES, QuoteStore};

/// The currently selected category. `"all"` means no filter.
pub struct FilterState<'a> {
    store: &'a QuoteStore,
    current: String,
}

impl<'a> FilterState<'a> {
    pub fn new(store: &'a QuoteStore) -> Self {
        FilterState {
            store,
            current: ALL_CATEGORIES.to_string(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Sets and persists the filter. Redisplay is the caller's job.
    pub fn select(&mut self, category: &str) -> Result<()> {
        self.current = category.to_string();
        self.store.set_last_filter(category)
    }

    /// Applies the persisted value only when it still names an existing
    /// category; a stale value falls back to the default silently.
    pub fn restore(&mut self, categories: &BTreeSet<String>) -> Result<()> {
        let Some(saved) = self.store.get_last_filter()? else {
            return Ok(());
        };
        if saved == ALL_CATEGORIES || categories.contains(&saved) {
            self.current = saved;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
