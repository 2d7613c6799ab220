use crate::output::{print_json, print_table};
use anyhow::Context;
use insight_core::result::{self, CompletedResult};
use insight_core::session;
use insight_core::storage::FileStore;
use std::path::Path;

/// Pick a stored result by position, defaulting to the most recent one.
pub fn select(results: Vec<CompletedResult>, index: Option<usize>) -> anyhow::Result<CompletedResult> {
    if results.is_empty() {
        anyhow::bail!("no completed assessments yet: run 'insight assess roda-vida'");
    }
    let i = index.unwrap_or(results.len() - 1);
    let total = results.len();
    results
        .into_iter()
        .nth(i)
        .with_context(|| format!("no assessment #{i} (have {total})"))
}

pub fn load(root: &Path) -> anyhow::Result<Vec<CompletedResult>> {
    let store = FileStore::new(root);
    Ok(result::load_all_or_empty(&store))
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let results = load(root)?;

    if json {
        print_json(&results)?;
        return Ok(());
    }

    if results.is_empty() {
        println!("No completed assessments yet.");
        return Ok(());
    }

    let rows = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                i.to_string(),
                r.completed_at.format("%Y-%m-%d %H:%M").to_string(),
                r.tool_name.clone(),
                format!("{}/10", r.score_summary.average_display()),
                r.user_name.clone(),
            ]
        })
        .collect();
    print_table(&["#", "DATE", "TOOL", "AVERAGE", "USER"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// report
// ---------------------------------------------------------------------------

pub fn report(root: &Path, index: Option<usize>, json: bool) -> anyhow::Result<()> {
    let record = select(load(root)?, index)?;
    let (_, report) = session::evaluate(record.tool_id, &record.response_state)
        .context("failed to render stored result")?;

    if json {
        let value = serde_json::json!({
            "result": record,
            "report": report,
        });
        print_json(&value)?;
        return Ok(());
    }

    println!(
        "{} | {} <{}>",
        record.completed_at.to_rfc3339(),
        record.user_name,
        record.user_email
    );
    println!();
    print!("{report}");
    Ok(())
}
