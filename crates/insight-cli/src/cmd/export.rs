use crate::output::print_json;
use anyhow::Context;
use insight_core::config::Config;
use insight_core::io::atomic_write;
use insight_core::report::{to_downloadable_text, Report};
use insight_core::session;
use std::path::{Path, PathBuf};

/// Write the plain-text export of `report` into `dir` under the configured
/// file name.
pub fn write(root: &Path, dir: &Path, report: &Report) -> anyhow::Result<PathBuf> {
    let config = Config::load(root).context("failed to load config")?;
    let path = dir.join(&config.export.file_name);
    atomic_write(&path, to_downloadable_text(report).as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "report exported");
    Ok(path)
}

pub fn run(root: &Path, index: Option<usize>, out: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let record = super::history::select(super::history::load(root)?, index)?;
    let (_, report) = session::evaluate(record.tool_id, &record.response_state)
        .context("failed to render stored result")?;

    let dir = match out {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    let path = write(root, &dir, &report)?;

    if json {
        print_json(&serde_json::json!({ "path": path }))?;
    } else {
        println!("Exported: {}", path.display());
    }
    Ok(())
}
