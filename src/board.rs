use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::filter::FilterState;
use crate::model::Quote;
use crate::present::Presenter;
use crate::store::{QuoteStore, pick_random};

/// Orchestration layer over the store: the operations the presentation
/// surface calls into.
#[derive(Clone)]
pub struct QuoteBoard {
    pub root: PathBuf,
    pub store: QuoteStore,
}

impl QuoteBoard {
    pub fn init(root: &Path, force: bool) -> Result<Self> {
        let store = QuoteStore::init(root, force)?;
        Ok(Self {
            root: root.to_path_buf(),
            store,
        })
    }

    /// Walks up from `start` until a board directory is found.
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            if QuoteStore::quip_dir(dir).is_dir() {
                let store = QuoteStore::open(dir)?;
                return Ok(Self {
                    root: dir.to_path_buf(),
                    store,
                });
            }
        }
        Err(anyhow!(
            "no quip board found at or above {} (run `quip init`)",
            start.display()
        ))
    }

    /// Validates and appends one quote, returning it for an outbound push.
    pub fn add_quote(&self, text: &str, category: &str) -> Result<Quote> {
        let quote = Quote::local(text, category);
        self.store.add_quote(quote.clone())?;
        Ok(quote)
    }

    /// Imports a JSON array of quotes verbatim. A file that fails to parse
    /// is reported before any mutation occurs.
    pub fn import_from_json_file(&self, path: &Path) -> Result<Vec<Quote>> {
        let bytes =
            fs::read(path).with_context(|| format!("read import file {}", path.display()))?;
        let imported: Vec<Quote> = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse import file {}", path.display()))?;
        self.store.import_many(imported.clone())?;
        Ok(imported)
    }

    pub fn export_to_json_file(&self, path: &Path) -> Result<usize> {
        let quotes = self.store.load_quotes()?;
        let bytes = serde_json::to_vec_pretty(&quotes).context("serialize quotes for export")?;
        fs::write(path, bytes).with_context(|| format!("write export file {}", path.display()))?;
        Ok(quotes.len())
    }

    /// Displays one uniformly random quote from the selected category and
    /// records it as the session's last-viewed quote.
    pub fn show_random(&self, presenter: &dyn Presenter, category: &str) -> Result<()> {
        let subset = self.store.list_by_category(category)?;
        match pick_random(&subset)? {
            Some(quote) => {
                presenter.render_quote(quote);
                self.store.record_last_viewed(quote)?;
            }
            None => presenter.render_no_quotes(category),
        }
        Ok(())
    }

    /// Repopulates the category options and refreshes the display, as after
    /// a mutation or a merge.
    pub fn refresh(&self, presenter: &dyn Presenter, category: &str) -> Result<()> {
        let categories = self.store.categories()?;
        presenter.render_categories(&categories);
        self.show_random(presenter, category)
    }

    /// Like `refresh`, but under the persisted filter (falling back to
    /// `"all"` when the saved value no longer names a category).
    pub fn refresh_saved(&self, presenter: &dyn Presenter) -> Result<()> {
        let categories = self.store.categories()?;
        let mut filter = FilterState::new(&self.store);
        filter.restore(&categories)?;
        presenter.render_categories(&categories);
        self.show_random(presenter, filter.current())
    }
}
