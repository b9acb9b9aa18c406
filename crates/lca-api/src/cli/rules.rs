//! Rule table listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use lca_core::responder::Responder;

use crate::state::AppState;

/// Print the active rule table in evaluation order.
pub fn list_rules(state: &AppState, json: bool) -> Result<()> {
    let responder = Responder::from_config(&state.config)?;
    let rules: Vec<_> = responder.rules().iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    let source = if state.config.rules.is_empty() {
        "built-in catalog"
    } else {
        "config.toml"
    };

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Rule").fg(Color::White),
        Cell::new("Keywords").fg(Color::White),
        Cell::new("Guest reply").fg(Color::White),
    ]);

    for (index, rule) in rules.iter().enumerate() {
        let guest_cell = if rule.guest_text.is_some() {
            Cell::new("● own").fg(Color::Green)
        } else {
            Cell::new("○ shared").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&rule.name).fg(Color::Cyan),
            Cell::new(rule.keywords.join(", ")),
            guest_cell,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} rules from the {}. First match wins; unmatched input gets the default reply.",
        style(rules.len()).bold(),
        source
    );
    println!();
    Ok(())
}
