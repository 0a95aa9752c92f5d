use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) body: String,
}

pub(crate) fn load_posts_from_disk(data_dir: &Path) -> Result<Option<Vec<Post>>> {
    let path = data_dir.join("posts.json");
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let posts: Vec<Post> =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(posts))
}

pub(crate) fn persist_posts_to_disk(data_dir: &Path, posts: &[Post]) -> Result<()> {
    let path = data_dir.join("posts.json");
    let bytes = serde_json::to_vec_pretty(posts).context("serialize posts")?;
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, &bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, &path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

/// Canned collection in the jsonplaceholder shape, used when the data dir
/// holds nothing yet.
pub(crate) fn sample_posts() -> Vec<Post> {
    (1..=12)
        .map(|i| Post {
            id: i,
            title: format!("post {}", i),
            body: format!(
                "sample body {} - quia et suscipit recusandae consequuntur expedita et cum \
                 reprehenderit molestiae ut ut quas totam nostrum rerum est autem",
                i
            ),
        })
        .collect()
}
