//! Sync command: refresh and summarize.

use anyhow::Result;
use positionals::{LoadOutcome, PositionalManager, RefreshReport, SyncOutcome};

pub fn run(manager: &PositionalManager, report: Option<RefreshReport>) -> Result<()> {
    let Some(report) = report else {
        println!("Offline: fetch skipped");
        return Ok(());
    };

    println!("{}", describe(&report, manager));
    Ok(())
}

fn describe(report: &RefreshReport, manager: &PositionalManager) -> String {
    let fetch = match report.sync {
        SyncOutcome::Updated => "remote table changed, cache updated",
        SyncOutcome::Unchanged => "remote table unchanged",
        SyncOutcome::Failed => "fetch failed, using local cache",
    };
    let load = match report.load {
        LoadOutcome::Loaded { actions, rows } => {
            format!("loaded {} actions ({} entries)", actions, rows)
        }
        LoadOutcome::Kept => format!(
            "load failed, keeping {} actions",
            manager.snapshot().len()
        ),
    };
    format!("Sync: {}; {}", fetch, load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use positionals::{ManagerConfig, MemorySink};
    use std::sync::Arc;

    #[test]
    fn test_describe_failed_fetch() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ManagerConfig::builder().cache_dir(dir.path()).build();
        let source = || -> positionals::Result<String> {
            Err(positionals::Error::TransportTimeout("10s".to_string()))
        };
        let manager = PositionalManager::unloaded(config, source, Arc::new(MemorySink::new()));

        let report = manager.refresh();
        assert_eq!(
            describe(&report, &manager),
            "Sync: fetch failed, using local cache; load failed, keeping 0 actions"
        );
    }
}
