//! Table command - dump the precomputed state table

use anyhow::Result;

use tennis_core::{StateId, StateTable};

/// One printed line of the dump
#[derive(Clone, Debug, PartialEq, Eq)]
struct TableRow {
    id: usize,
    state: String,
    server_wins: String,
    receiver_wins: String,
    mirror: String,
}

/// Print every reachable state with its two successors and its mirror
pub fn run() -> Result<()> {
    let table = StateTable::global()?;
    let rows = table_rows(table)?;

    tracing::info!(
        "State table: {} states ({} reachable)",
        table.len(),
        rows.len()
    );

    println!(
        "{:<4} {:<20} {:<20} {:<20} {:<20}",
        "id", "state", "server wins", "receiver wins", "mirror"
    );
    for row in &rows {
        println!(
            "{:<4} {:<20} {:<20} {:<20} {:<20}",
            row.id, row.state, row.server_wins, row.receiver_wins, row.mirror
        );
    }
    Ok(())
}

fn table_rows(table: &StateTable) -> Result<Vec<TableRow>> {
    table
        .reachable()
        .into_iter()
        .map(|id| -> Result<TableRow> {
            let (server_wins, receiver_wins) = match table.successors(id) {
                Some((s, r)) => (label(table, s), label(table, r)),
                None => ("-".to_string(), "-".to_string()),
            };
            Ok(TableRow {
                id: id.index(),
                state: label(table, id),
                server_wins,
                receiver_wins,
                mirror: label(table, table.mirror(id)?),
            })
        })
        .collect()
}

fn label(table: &StateTable, id: StateId) -> String {
    table.get(id).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_covers_every_state() {
        let table = StateTable::global().unwrap();
        let rows = table_rows(table).unwrap();
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0].state, "Love-All");
        assert_eq!(rows[0].server_wins, "Fifteen-Love");
        assert_eq!(rows[0].receiver_wins, "Love-Fifteen");

        let win = rows.iter().find(|r| r.state == "Win for server").unwrap();
        assert_eq!(win.server_wins, "-");
        assert_eq!(win.mirror, "Win for receiver");

        let adv = rows.iter().find(|r| r.state == "Advantage receiver").unwrap();
        assert_eq!(adv.server_wins, "Deuce");
        assert_eq!(adv.receiver_wins, "Win for receiver");
    }

    #[test]
    fn test_run_prints_table() {
        assert!(run().is_ok());
    }
}
