use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use insight_core::config::Config;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Set (or clear, when omitted) the login submission endpoint
    SetEndpoint {
        /// Endpoint URL
        url: Option<String>,
        /// Seconds to wait for the submission before exiting
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Set the file name used for exports
    SetExportName {
        /// File name, e.g. roda-da-vida.txt
        file_name: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::SetEndpoint { url, timeout } => set_endpoint(root, url, timeout),
        ConfigSubcommand::SetExportName { file_name } => set_export_name(root, file_name),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    if json {
        print_json(&config)?;
        return Ok(());
    }

    println!(
        "submission.endpoint:     {}",
        config.submission.endpoint.as_deref().unwrap_or("(none)")
    );
    println!("submission.timeout_secs: {}", config.submission.timeout_secs);
    println!("export.file_name:        {}", config.export.file_name);
    Ok(())
}

fn set_endpoint(root: &Path, url: Option<String>, timeout: Option<u64>) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to load config")?;
    if let Some(url) = &url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("endpoint must be an http(s) URL, got '{url}'");
        }
    }
    config.submission.endpoint = url;
    if let Some(t) = timeout {
        config.submission.timeout_secs = t;
    }
    config.save(root).context("failed to save config")?;
    match &config.submission.endpoint {
        Some(url) => println!("Submission endpoint set: {url}"),
        None => println!("Submission endpoint cleared."),
    }
    Ok(())
}

fn set_export_name(root: &Path, file_name: String) -> anyhow::Result<()> {
    if file_name.is_empty() || file_name.contains(['/', '\\']) {
        anyhow::bail!("export name must be a plain file name, got '{file_name}'");
    }
    let mut config = Config::load(root).context("failed to load config")?;
    config.export.file_name = file_name;
    config.save(root).context("failed to save config")?;
    println!("Export file name set: {}", config.export.file_name);
    Ok(())
}
