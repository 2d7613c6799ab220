use crate::output::print_json;
use anyhow::Context;
use insight_core::app::AppState;
use insight_core::storage::FileStore;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = FileStore::new(root);
    let app = AppState::startup(&store).context("failed to load app state")?;
    let user = app.require_user()?;

    if json {
        let value = serde_json::json!({
            "name": user.name,
            "tools": app.tool_count(),
            "completed": app.completed_count(),
        });
        print_json(&value)?;
        return Ok(());
    }

    println!("Bem-vindo ao Insight+, {}!", user.first_name());
    println!();
    println!("  Ferramentas Disponíveis  {}", app.tool_count());
    println!("  Avaliações Concluídas    {}", app.completed_count());
    println!();
    println!("Run 'insight tools' to choose a tool.");
    Ok(())
}
