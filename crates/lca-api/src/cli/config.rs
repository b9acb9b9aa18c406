//! Effective configuration display.

use anyhow::Result;
use console::style;

use lca_core::responder::RuleTable;
use lca_infra::config::load_config_strict;

use crate::state::AppState;

/// Show the configuration the assistant is running with.
///
/// With `strict`, a config file that exists but cannot be read or parsed is
/// an error instead of a silent fallback to defaults. Custom rules are
/// validated either way.
pub async fn show_config(state: &AppState, strict: bool, json: bool) -> Result<()> {
    let config_exists = if strict {
        load_config_strict(&state.data_dir).await?.is_some()
    } else {
        tokio::fs::try_exists(&state.config_path).await.unwrap_or(false)
    };

    let config = &state.config;
    let rules = RuleTable::from_overrides(config.rules.clone())?;

    if json {
        let value = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "config_path": state.config_path.display().to_string(),
            "config_file_found": config_exists,
            "config": config,
            "active_rules": rules.len(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} v{}",
        style("*").cyan().bold(),
        style(&config.assistant_name).bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Files ──").dim());
    println!("  Data dir:   {}", state.data_dir.display());
    let found = if config_exists {
        style("found").green()
    } else {
        style("not found, using defaults").yellow()
    };
    println!("  Config:     {} ({})", state.config_path.display(), found);
    println!();

    println!("  {}", style("── Assistant ──").dim());
    println!("  Tagline:        {}", config.tagline);
    println!("  Guest quota:    {} questions", style(config.guest_quota).bold());
    println!("  Greeting delay: {} ms", config.greeting_delay_ms);
    println!("  Reply delay:    {} ms", config.reply_delay_ms);
    println!("  Listen timeout: {} ms", config.listen_timeout_ms);
    let source = if config.rules.is_empty() {
        "built-in"
    } else {
        "custom"
    };
    println!("  Rules:          {} ({})", rules.len(), source);
    println!();
    Ok(())
}
