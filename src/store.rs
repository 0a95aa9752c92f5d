use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{BoardConfig, FailedSyncRecord, Quote, seed_quotes};

const STORE_DIR: &str = ".quip";

pub const ALL_CATEGORIES: &str = "all";

/// File-backed quote storage. Every mutating operation rewrites the
/// affected file immediately; nothing is batched.
#[derive(Clone)]
pub struct QuoteStore {
    root: PathBuf,
}

impl QuoteStore {
    pub fn quip_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn open(board_root: &Path) -> Result<Self> {
        let root = Self::quip_dir(board_root);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `quip init`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self { root })
    }

    pub fn init(board_root: &Path, force: bool) -> Result<Self> {
        let root = Self::quip_dir(board_root);
        if root.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                root.display()
            ));
        }

        fs::create_dir_all(root.join("session")).context("create session dir")?;

        let cfg = BoardConfig::default();
        let cfg_bytes = serde_json::to_vec_pretty(&cfg).context("serialize board config")?;
        write_atomic(&root.join("config.json"), &cfg_bytes).context("write config.json")?;

        Ok(Self { root })
    }

    pub fn read_config(&self) -> Result<BoardConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: BoardConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported board config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &BoardConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    /// Reads the persisted sequence, falling back to the built-in seed list
    /// when nothing has been saved yet. Persisted data is trusted: a file
    /// that no longer parses surfaces as an error here, not a silent reset.
    pub fn load_quotes(&self) -> Result<Vec<Quote>> {
        let path = self.root.join("quotes.json");
        if !path.exists() {
            return Ok(seed_quotes());
        }
        let bytes = fs::read(&path).context("read quotes.json")?;
        let quotes: Vec<Quote> = serde_json::from_slice(&bytes).context("parse quotes.json")?;
        Ok(quotes)
    }

    pub fn save_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(quotes).context("serialize quotes")?;
        write_atomic(&self.root.join("quotes.json"), &bytes).context("write quotes.json")?;
        Ok(())
    }

    /// Appends one quote. Empty text or category is rejected with no state
    /// change.
    pub fn add_quote(&self, quote: Quote) -> Result<()> {
        if quote.text.is_empty() {
            anyhow::bail!("quote text must not be empty");
        }
        if quote.category.is_empty() {
            anyhow::bail!("quote category must not be empty");
        }
        let mut quotes = self.load_quotes()?;
        quotes.push(quote);
        self.save_quotes(&quotes)
    }

    /// Appends externally supplied quotes verbatim, with no per-item
    /// validation. Returns how many were appended.
    pub fn import_many(&self, imported: Vec<Quote>) -> Result<usize> {
        let count = imported.len();
        let mut quotes = self.load_quotes()?;
        quotes.extend(imported);
        self.save_quotes(&quotes)?;
        Ok(count)
    }

    pub fn list_by_category(&self, category: &str) -> Result<Vec<Quote>> {
        let quotes = self.load_quotes()?;
        if category == ALL_CATEGORIES {
            return Ok(quotes);
        }
        Ok(quotes
            .into_iter()
            .filter(|q| q.category == category)
            .collect())
    }

    pub fn categories(&self) -> Result<BTreeSet<String>> {
        let quotes = self.load_quotes()?;
        Ok(quotes.into_iter().map(|q| q.category).collect())
    }

    fn last_filter_path(&self) -> PathBuf {
        self.root.join("last_filter")
    }

    pub fn get_last_filter(&self) -> Result<Option<String>> {
        let path = self.last_filter_path();
        if !path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&path)
            .with_context(|| format!("read last filter {}", path.display()))?;
        let s = s.trim().to_string();
        if s.is_empty() { Ok(None) } else { Ok(Some(s)) }
    }

    pub fn set_last_filter(&self, category: &str) -> Result<()> {
        write_atomic(&self.last_filter_path(), category.as_bytes()).context("write last filter")
    }

    pub fn read_failed_syncs(&self) -> Result<Vec<FailedSyncRecord>> {
        let path = self.root.join("failed_syncs.json");
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).context("read failed_syncs.json")?;
        let records: Vec<FailedSyncRecord> =
            serde_json::from_slice(&bytes).context("parse failed_syncs.json")?;
        Ok(records)
    }

    pub fn write_failed_syncs(&self, records: &[FailedSyncRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records).context("serialize failed syncs")?;
        write_atomic(&self.root.join("failed_syncs.json"), &bytes)
            .context("write failed_syncs.json")?;
        Ok(())
    }

    pub fn push_failed_sync(&self, record: FailedSyncRecord) -> Result<()> {
        let mut records = self.read_failed_syncs()?;
        records.push(record);
        self.write_failed_syncs(&records)
    }

    /// Session-scoped record of the quote most recently displayed. Written
    /// on every display, never read back by the core.
    pub fn record_last_viewed(&self, quote: &Quote) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(quote).context("serialize last viewed quote")?;
        write_atomic(&self.root.join("session/last_viewed.json"), &bytes)
            .context("write last viewed quote")?;
        Ok(())
    }
}

/// Uniform random choice from a subset. An empty subset yields `None`
/// ("no quotes available") rather than an error.
pub fn pick_random<'a>(subset: &'a [Quote]) -> Result<Option<&'a Quote>> {
    if subset.is_empty() {
        return Ok(None);
    }
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let idx = (u64::from_le_bytes(bytes) % subset.len() as u64) as usize;
    Ok(Some(&subset[idx]))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
