//! List command.

use anyhow::Result;
use positionals::PositionalManager;

pub fn run(manager: &PositionalManager, json: bool) -> Result<()> {
    let snapshot = manager.snapshot();

    if json {
        let actions: Vec<_> = snapshot.iter().collect();
        println!("{}", serde_json::to_string_pretty(&actions)?);
        return Ok(());
    }

    if snapshot.is_empty() {
        eprintln!("No positional data loaded");
        return Ok(());
    }

    println!("{:>6}  {:<24} {:<8} Percents", "Id", "Action", "Position");
    for action in snapshot.iter() {
        let percents: Vec<String> = action
            .positionals
            .values()
            .map(|p| format!("{}{}", p.percent, if p.is_hit { "+" } else { "-" }))
            .collect();
        println!(
            "{:>6}  {:<24} {:<8} {}",
            action.id,
            action.action_name,
            action.action_position,
            percents.join(" ")
        );
    }
    eprintln!(
        "{} actions, {} entries",
        snapshot.len(),
        snapshot.row_count()
    );

    Ok(())
}
