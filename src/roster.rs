//! Read-side access to the student and seat rosters and to the current
//! assignment set. Rosters themselves are maintained by the administrative
//! surface (`students.*` / `seats.*` IPC methods); everything here is a
//! plain query with no caching between calls.

use crate::error::CoreResult;
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone)]
pub struct Student {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Seat {
    pub id: String,
    pub code: String,
    pub row_no: i64,
    pub col_no: i64,
}

/// One row of the rendered seating chart: seat joined with the student
/// currently assigned to it.
#[derive(Debug, Clone)]
pub struct AssignmentView {
    pub seat_code: String,
    pub student_name: String,
    pub assigned_at: String,
}

pub fn list_active_students(conn: &Connection) -> CoreResult<Vec<Student>> {
    let mut stmt =
        conn.prepare("SELECT id, name FROM students WHERE active = 1 ORDER BY sort_order, name")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Student {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_active_seats(conn: &Connection) -> CoreResult<Vec<Seat>> {
    let mut stmt = conn.prepare(
        "SELECT id, code, row_no, col_no FROM seats WHERE active = 1 ORDER BY row_no, col_no",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Seat {
                id: row.get(0)?,
                code: row.get(1)?,
                row_no: row.get(2)?,
                col_no: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Looks a seat up by grid position. Deactivated seats still resolve here:
/// reviews target the physical seat, not its lottery eligibility.
pub fn seat_at_position(conn: &Connection, row_no: i64, col_no: i64) -> CoreResult<Option<Seat>> {
    let seat = conn
        .query_row(
            "SELECT id, code, row_no, col_no FROM seats WHERE row_no = ? AND col_no = ?",
            (row_no, col_no),
            |row| {
                Ok(Seat {
                    id: row.get(0)?,
                    code: row.get(1)?,
                    row_no: row.get(2)?,
                    col_no: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(seat)
}

/// Current seating chart in seat order (row, then column).
pub fn current_assignments(conn: &Connection) -> CoreResult<Vec<AssignmentView>> {
    let mut stmt = conn.prepare(
        "SELECT se.code, st.name, a.assigned_at
         FROM assignments a
         JOIN students st ON st.id = a.student_id
         JOIN seats se ON se.id = a.seat_id
         ORDER BY se.row_no, se.col_no",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AssignmentView {
                seat_code: row.get(0)?,
                student_name: row.get(1)?,
                assigned_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
