use rusqlite::Connection;
use std::path::Path;

const DB_FILE: &str = "seatd.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_active ON students(active, sort_order)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS seats(
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            row_no INTEGER NOT NULL,
            col_no INTEGER NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            UNIQUE(row_no, col_no)
        )",
        [],
    )?;

    // Early workspaces predate seat deactivation. Add and backfill if needed.
    ensure_seats_active(&conn)?;

    // Current-state table, not a history log: reassign replaces the whole
    // set. The UNIQUE constraints make the student->seat mapping injective
    // at the store level.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS assignments(
            id TEXT PRIMARY KEY,
            student_id TEXT NOT NULL UNIQUE,
            seat_id TEXT NOT NULL UNIQUE,
            assigned_at TEXT NOT NULL,
            FOREIGN KEY(student_id) REFERENCES students(id),
            FOREIGN KEY(seat_id) REFERENCES seats(id)
        )",
        [],
    )?;

    // Append-only ledger, bound to the physical seat so reviews accumulate
    // across reassignments.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS reviews(
            id TEXT PRIMARY KEY,
            seat_id TEXT NOT NULL,
            rating INTEGER NOT NULL,
            comment TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(seat_id) REFERENCES seats(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reviews_seat ON reviews(seat_id, created_at)",
        [],
    )?;

    Ok(conn)
}

fn ensure_seats_active(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "seats", "active")? {
        return Ok(());
    }
    conn.execute(
        "ALTER TABLE seats ADD COLUMN active INTEGER NOT NULL DEFAULT 1",
        [],
    )?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
