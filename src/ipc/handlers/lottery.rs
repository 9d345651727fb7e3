use crate::ipc::error::{core_err, err, ok};
use crate::ipc::types::{AppState, Request};
use crate::lottery;
use crate::roster::{self, AssignmentView};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};
use serde_json::json;

fn assignments_json(rows: &[AssignmentView]) -> serde_json::Value {
    let out: Vec<_> = rows
        .iter()
        .map(|a| {
            json!({
                "seatCode": a.seat_code,
                "studentName": a.student_name,
                "assignedAt": a.assigned_at
            })
        })
        .collect();
    json!(out)
}

fn handle_reassign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    // An explicit seed makes the draw reproducible for tests; production
    // callers omit it and get an entropy-seeded draw.
    let seed = req.params.get("seed").and_then(|v| v.as_u64());
    let drawn = match seed {
        Some(s) => lottery::reassign(conn, &mut StdRng::seed_from_u64(s)),
        None => lottery::reassign(conn, &mut thread_rng()),
    };

    match drawn {
        Ok(rows) => ok(
            &req.id,
            json!({
                "assignments": assignments_json(&rows),
                "assignedCount": rows.len()
            }),
        ),
        Err(e) => core_err(&req.id, &e),
    }
}

fn handle_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match roster::current_assignments(conn) {
        Ok(rows) => ok(
            &req.id,
            json!({
                "assignments": assignments_json(&rows),
                "assignedCount": rows.len()
            }),
        ),
        Err(e) => core_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "lottery.reassign" => Some(handle_reassign(state, req)),
        "lottery.current" => Some(handle_current(state, req)),
        _ => None,
    }
}
