use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::roster;
use crate::seatcode;
use serde_json::json;
use uuid::Uuid;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match roster::list_active_students(conn) {
        Ok(students) => {
            let rows: Vec<_> = students
                .iter()
                .map(|s| json!({ "id": s.id, "name": s.name }))
                .collect();
            ok(&req.id, json!({ "students": rows }))
        }
        Err(e) => err(&req.id, "db_query_failed", e.to_string(), None),
    }
}

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return err(&req.id, "bad_params", "missing name", None),
    };
    if name.is_empty() {
        return err(&req.id, "bad_params", "name must not be empty", None);
    }

    let next_order: i64 = match conn.query_row(
        "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM students",
        [],
        |r| r.get(0),
    ) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };

    let student_id = Uuid::new_v4().to_string();
    if let Err(e) = conn.execute(
        "INSERT INTO students(id, name, active, sort_order) VALUES(?, ?, 1, ?)",
        (&student_id, &name, next_order),
    ) {
        return err(
            &req.id,
            "db_insert_failed",
            e.to_string(),
            Some(json!({ "table": "students" })),
        );
    }

    ok(&req.id, json!({ "studentId": student_id, "name": name }))
}

fn handle_students_set_active(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };
    let active = match req.params.get("active").and_then(|v| v.as_bool()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing active flag", None),
    };

    match conn.execute(
        "UPDATE students SET active = ? WHERE id = ?",
        (active as i64, &student_id),
    ) {
        Ok(0) => err(&req.id, "not_found", "student not found", None),
        Ok(_) => ok(&req.id, json!({ "studentId": student_id, "active": active })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string(), None),
    }
}

fn handle_seats_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match roster::list_active_seats(conn) {
        Ok(seats) => {
            let rows: Vec<_> = seats
                .iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "code": s.code,
                        "rowNo": s.row_no,
                        "colNo": s.col_no
                    })
                })
                .collect();
            ok(&req.id, json!({ "seats": rows }))
        }
        Err(e) => err(&req.id, "db_query_failed", e.to_string(), None),
    }
}

/// Creates any missing seats for a rows x cols grid, codes derived through
/// the seat code scheme. Existing seats are left untouched, so the call is
/// idempotent and safe to repeat after widening the grid.
fn handle_seats_ensure_grid(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let rows = req.params.get("rows").and_then(|v| v.as_i64()).unwrap_or(0);
    let cols = req.params.get("cols").and_then(|v| v.as_i64()).unwrap_or(0);
    if rows < 1 || cols < 1 {
        return err(&req.id, "bad_params", "rows and cols must be >= 1", None);
    }
    if rows > seatcode::MAX_ROW || cols > seatcode::MAX_COL {
        return err(
            &req.id,
            "bad_params",
            format!(
                "grid exceeds declared bounds ({} rows x {} cols)",
                seatcode::MAX_ROW,
                seatcode::MAX_COL
            ),
            None,
        );
    }

    let tx = match conn.unchecked_transaction() {
        Ok(t) => t,
        Err(e) => return err(&req.id, "db_tx_failed", e.to_string(), None),
    };

    let mut created: i64 = 0;
    for row_no in 1..=rows {
        for col_no in 1..=cols {
            let code = match seatcode::encode(row_no, col_no) {
                Ok(c) => c,
                Err(e) => {
                    let _ = tx.rollback();
                    return err(&req.id, "invalid_seat_code", e.to_string(), None);
                }
            };
            let res = tx.execute(
                "INSERT OR IGNORE INTO seats(id, code, row_no, col_no, active)
                 VALUES(?, ?, ?, ?, 1)",
                (Uuid::new_v4().to_string(), &code, row_no, col_no),
            );
            match res {
                Ok(n) => created += n as i64,
                Err(e) => {
                    let _ = tx.rollback();
                    return err(
                        &req.id,
                        "db_insert_failed",
                        e.to_string(),
                        Some(json!({ "table": "seats" })),
                    );
                }
            }
        }
    }

    if let Err(e) = tx.commit() {
        return err(&req.id, "db_tx_failed", e.to_string(), None);
    }

    ok(
        &req.id,
        json!({ "created": created, "rows": rows, "cols": cols }),
    )
}

fn handle_seats_set_active(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let code = match req.params.get("seatCode").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing seatCode", None),
    };
    let active = match req.params.get("active").and_then(|v| v.as_bool()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing active flag", None),
    };

    let (row_no, col_no) = match seatcode::decode(&code) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "invalid_seat_code", e.to_string(), None),
    };

    match conn.execute(
        "UPDATE seats SET active = ? WHERE row_no = ? AND col_no = ?",
        (active as i64, row_no, col_no),
    ) {
        Ok(0) => err(&req.id, "not_found", "seat not found", None),
        Ok(_) => ok(&req.id, json!({ "seatCode": code, "active": active })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.add" => Some(handle_students_add(state, req)),
        "students.setActive" => Some(handle_students_set_active(state, req)),
        "seats.list" => Some(handle_seats_list(state, req)),
        "seats.ensureGrid" => Some(handle_seats_ensure_grid(state, req)),
        "seats.setActive" => Some(handle_seats_set_active(state, req)),
        _ => None,
    }
}
