//! Check command: one (action, percent) lookup.

use anyhow::Result;
use positionals::PositionalManager;

pub fn run(manager: &PositionalManager, id: u32, percent: u32) -> Result<()> {
    println!("{}", verdict(manager, id, percent));
    Ok(())
}

fn verdict(manager: &PositionalManager, id: u32, percent: u32) -> String {
    if !manager.is_positional(id) {
        return format!("Action {} is not positional", id);
    }

    match manager.positional_parameters(id, percent) {
        Some(params) => {
            let hit = if manager.is_positional_hit(id, percent) {
                "HIT"
            } else {
                "MISS"
            };
            if params.comment.is_empty() {
                format!("{} @ {}%: {}", id, percent, hit)
            } else {
                format!("{} @ {}%: {} ({})", id, percent, hit, params.comment)
            }
        }
        None => format!("{} @ {}%: no entry (MISS)", id, percent),
    }
}
