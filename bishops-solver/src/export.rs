//! SQLite export of an explorer snapshot.
//!
//! Tables:
//! - `states(id INTEGER PRIMARY KEY, hash TEXT UNIQUE, distance INTEGER NULL,
//!   solved_pieces, total_pieces, total_options, explored_options,
//!   connected_options)`
//! - `edges(from_id, to_id, move_label TEXT NULL)`, oriented from the
//!   shallower state

use bishops_core::Explorer;
use rusqlite::{params, Connection};

pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE states (
            id INTEGER PRIMARY KEY,
            hash TEXT NOT NULL UNIQUE,
            distance INTEGER,
            solved_pieces INTEGER NOT NULL,
            total_pieces INTEGER NOT NULL,
            total_options INTEGER NOT NULL,
            explored_options INTEGER NOT NULL,
            connected_options INTEGER NOT NULL
        );
        CREATE TABLE edges (
            from_id INTEGER NOT NULL REFERENCES states(id),
            to_id INTEGER NOT NULL REFERENCES states(id),
            move_label TEXT,
            PRIMARY KEY (from_id, to_id)
        );",
    )
}

/// Write every state and edge inside one transaction.
/// Returns `(states, edges)` inserted.
pub fn write_explorer(conn: &Connection, explorer: &Explorer) -> rusqlite::Result<(usize, usize)> {
    create_tables(conn)?;
    let tx = conn.unchecked_transaction()?;

    let mut states = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO states (id, hash, distance, solved_pieces, total_pieces,
                total_options, explored_options, connected_options)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for summary in explorer.summaries() {
            stmt.execute(params![
                summary.id.0,
                summary.hash.as_str(),
                summary.distance,
                summary.solved_pieces,
                summary.total_pieces,
                summary.options.total,
                summary.options.explored,
                summary.options.connected,
            ])?;
            states += 1;
        }
    }

    let mut edges = 0;
    {
        let mut stmt =
            tx.prepare("INSERT INTO edges (from_id, to_id, move_label) VALUES (?1, ?2, ?3)")?;
        for edge in explorer.connections() {
            stmt.execute(params![edge.from.0, edge.to.0, edge.label])?;
            edges += 1;
        }
    }

    tx.commit()?;
    Ok((states, edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bishops_core::GameSettings;

    #[test]
    fn test_export_in_memory() {
        let mut explorer = Explorer::new(GameSettings::default()).unwrap();
        let root = explorer.root();
        let moves = explorer.unexplored_moves(root).unwrap();
        explorer.expand(root, &moves).unwrap();

        let conn = Connection::open_in_memory().unwrap();
        let (states, edges) = write_explorer(&conn, &explorer).unwrap();
        assert_eq!(states, 9);
        assert_eq!(edges, 8);

        let at_one: i64 = conn
            .query_row("SELECT COUNT(*) FROM states WHERE distance = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(at_one, 8);

        let label: String = conn
            .query_row(
                "SELECT move_label FROM edges WHERE from_id = 0 ORDER BY to_id LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(label, "d5 → c4");
    }
}
