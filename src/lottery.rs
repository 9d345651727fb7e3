//! Random seat assignment. Each draw replaces the whole assignment set with
//! a fresh uniform-random injective mapping from active students to a
//! same-size random subset of the active seats.

use crate::error::{CoreError, CoreResult};
use crate::roster::{self, AssignmentView, Seat, Student};
use chrono::{SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::{Connection, TransactionBehavior};
use uuid::Uuid;

/// Shuffle-both-then-zip pairing. Shuffling the seat pool before truncation
/// makes the assigned subset itself random, not just the student order.
pub fn draw_pairs(
    students: &[Student],
    seats: &[Seat],
    rng: &mut impl Rng,
) -> Vec<(String, String)> {
    let mut student_ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
    let mut seat_ids: Vec<&str> = seats.iter().map(|s| s.id.as_str()).collect();
    student_ids.shuffle(rng);
    seat_ids.shuffle(rng);

    student_ids
        .into_iter()
        .zip(seat_ids)
        .map(|(student_id, seat_id)| (student_id.to_string(), seat_id.to_string()))
        .collect()
}

/// Draws a new lottery and commits it, replacing any prior mapping wholesale.
///
/// The capacity check runs before any write; on violation nothing is
/// mutated. Delete and insert happen inside one immediate transaction, so a
/// reader never observes a partially replaced chart and concurrent draws
/// serialize against each other at the store.
pub fn reassign(conn: &mut Connection, rng: &mut impl Rng) -> CoreResult<Vec<AssignmentView>> {
    let students = roster::list_active_students(conn)?;
    let seats = roster::list_active_seats(conn)?;

    if seats.len() < students.len() {
        return Err(CoreError::Capacity {
            students: students.len(),
            seats: seats.len(),
        });
    }

    let pairs = draw_pairs(&students, &seats, rng);
    let assigned_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute("DELETE FROM assignments", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO assignments(id, student_id, seat_id, assigned_at) VALUES(?, ?, ?, ?)",
        )?;
        for (student_id, seat_id) in &pairs {
            stmt.execute((
                Uuid::new_v4().to_string(),
                student_id,
                seat_id,
                &assigned_at,
            ))?;
        }
    }
    tx.commit()?;

    roster::current_assignments(conn)
}
