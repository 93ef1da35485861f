//! Show command for a single action.

use anyhow::{Result, bail};
use positionals::PositionalManager;

pub fn run(manager: &PositionalManager, id: u32, json: bool) -> Result<()> {
    let Some(action) = manager.positional_action(id) else {
        bail!("Action {} is not positional", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&action)?);
        return Ok(());
    }

    let position = action
        .position()
        .map(|p| p.to_string())
        .unwrap_or_else(|| format!("{} (unrecognized)", action.action_position));
    println!("{} [{}]", action.action_name, action.id);
    println!("Position: {}", position);
    for params in action.positionals.values() {
        let verdict = if params.is_hit { "HIT" } else { "MISS" };
        if params.comment.is_empty() {
            println!("  {:>3}%  {}", params.percent, verdict);
        } else {
            println!("  {:>3}%  {}  ({})", params.percent, verdict, params.comment);
        }
    }

    Ok(())
}
