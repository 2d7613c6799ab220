use crate::output::{print_json, print_table};
use insight_core::catalog::ToolKind;

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        let tools: Vec<_> = ToolKind::all()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.as_str(),
                    "name": t.name(),
                    "description": t.description(),
                    "available": t.is_implemented(),
                })
            })
            .collect();
        print_json(&tools)?;
        return Ok(());
    }

    let rows = ToolKind::all()
        .iter()
        .map(|t| {
            vec![
                t.as_str().to_string(),
                t.name().to_string(),
                if t.is_implemented() { "ready" } else { "soon" }.to_string(),
                t.description().to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "DESCRIPTION"], rows);
    Ok(())
}
