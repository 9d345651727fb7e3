
use serde_json::json;
use test_support::{request_err, request_ok, seed_workspace, spawn_sidecar, temp_dir};

#[test]
fn ensure_grid_is_idempotent_and_codes_follow_the_scheme() {
    let workspace = temp_dir("seatd-grid");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = seed_workspace(&mut stdin, &mut reader, &workspace, 2, 3, &[]);

    let seats = request_ok(&mut stdin, &mut reader, "list-1", "seats.list", json!({}));
    let codes: Vec<&str> = seats
        .get("seats")
        .and_then(|v| v.as_array())
        .expect("seats")
        .iter()
        .map(|s| s.get("code").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert_eq!(codes, vec!["A1", "A2", "A3", "B1", "B2", "B3"]);

    // A repeat call creates nothing new; widening the grid only fills the gap.
    let again = request_ok(
        &mut stdin,
        &mut reader,
        "grid-2",
        "seats.ensureGrid",
        json!({ "rows": 2, "cols": 3 }),
    );
    assert_eq!(again.get("created").and_then(|v| v.as_i64()), Some(0));

    let wider = request_ok(
        &mut stdin,
        &mut reader,
        "grid-3",
        "seats.ensureGrid",
        json!({ "rows": 2, "cols": 4 }),
    );
    assert_eq!(wider.get("created").and_then(|v| v.as_i64()), Some(2));

    let code = request_err(
        &mut stdin,
        &mut reader,
        "grid-bad",
        "seats.ensureGrid",
        json!({ "rows": 27, "cols": 4 }),
    );
    assert_eq!(code, "bad_params");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn deactivated_students_and_seats_leave_the_lottery_pool() {
    let workspace = temp_dir("seatd-deactivate");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let student_ids = seed_workspace(
        &mut stdin,
        &mut reader,
        &workspace,
        1,
        3,
        &["Ana", "Ben", "Cho"],
    );

    // Benching one student and one seat still leaves 2 students for 2 seats.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "bench-student",
        "students.setActive",
        json!({ "studentId": student_ids[2], "active": false }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "bench-seat",
        "seats.setActive",
        json!({ "seatCode": "A2", "active": false }),
    );

    let students = request_ok(&mut stdin, &mut reader, "students", "students.list", json!({}));
    assert_eq!(
        students
            .get("students")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(2)
    );
    let seats = request_ok(&mut stdin, &mut reader, "seats", "seats.list", json!({}));
    assert_eq!(
        seats.get("seats").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(2)
    );

    let drawn = request_ok(
        &mut stdin,
        &mut reader,
        "draw",
        "lottery.reassign",
        json!({ "seed": 5 }),
    );
    assert_eq!(drawn.get("assignedCount").and_then(|v| v.as_i64()), Some(2));
    for a in drawn.get("assignments").and_then(|v| v.as_array()).unwrap() {
        assert_ne!(
            a.get("seatCode").and_then(|v| v.as_str()),
            Some("A2"),
            "inactive seat must stay out of the draw"
        );
        assert_ne!(
            a.get("studentName").and_then(|v| v.as_str()),
            Some("Cho"),
            "inactive student must stay out of the draw"
        );
    }

    // A review for the benched seat still resolves: the ledger targets the
    // physical seat, not its lottery eligibility.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "review-benched",
        "reviews.submit",
        json!({ "seatCode": "A2", "rating": 1, "comment": "broken desk" }),
    );

    // Unknown targets are reported as such.
    let code = request_err(
        &mut stdin,
        &mut reader,
        "bench-missing",
        "students.setActive",
        json!({ "studentId": "no-such-student", "active": false }),
    );
    assert_eq!(code, "not_found");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
