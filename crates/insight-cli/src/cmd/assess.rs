use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use insight_core::app::AppState;
use insight_core::catalog::ToolKind;
use insight_core::response::parse_assignment;
use insight_core::storage::FileStore;
use std::path::Path;

pub fn run(
    root: &Path,
    tool: &str,
    ratings: &[String],
    export_dir: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let tool: ToolKind = tool.parse()?;
    let mut store = FileStore::new(root);
    let mut app = AppState::startup(&store).context("failed to load app state")?;
    app.open_tool(tool)?;

    let Some(session) = app.session_mut() else {
        if json {
            print_json(&serde_json::json!({ "tool": tool, "available": false }))?;
        } else {
            println!("{}", tool.name());
            println!("Ferramenta {} em breve.", tool.name());
        }
        return Ok(());
    };

    // Every rating is checked before anything is stored.
    for raw in ratings {
        let (key, value) = parse_assignment(raw).with_context(|| format!("invalid --rate '{raw}'"))?;
        session.set_rating(&key, value)?;
    }

    app.submit_assessment(&mut store, Utc::now())
        .context("failed to save result")?;
    let report = app
        .session()
        .and_then(|s| s.report())
        .context("assessment produced no report")?;

    let exported = match export_dir {
        Some(dir) => Some(super::export::write(root, dir, report)?),
        None => None,
    };

    if json {
        let value = serde_json::json!({
            "tool": tool,
            "report": report,
            "completed": app.completed_count(),
            "exported": exported,
        });
        print_json(&value)?;
        return Ok(());
    }

    print!("{report}");
    if let Some(path) = exported {
        println!();
        println!("Exported: {}", path.display());
    }
    Ok(())
}
