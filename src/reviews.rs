//! Seat review ledger and its derived statistics. Reviews are bound to the
//! physical seat, so they accumulate across any number of reassignments and
//! are never updated or deleted.

use crate::error::{CoreError, CoreResult};
use crate::roster::{self, Seat};
use crate::seatcode;
use chrono::{SecondsFormat, Utc};
use rusqlite::Connection;
use uuid::Uuid;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
pub const MAX_COMMENT_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct SeatStats {
    /// `None` when the seat has no reviews; absence of data is not a 0.0.
    pub mean_rating: Option<f64>,
    pub count: i64,
}

#[derive(Debug, Clone)]
pub struct ReviewEntry {
    pub rating: i64,
    pub comment: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct SeatRatingSummary {
    pub seat_code: String,
    pub mean_rating: Option<f64>,
    pub count: i64,
}

/// User-facing code to seat row, through the same scheme the seats were
/// persisted with. A well-formed code for a position with no seat is
/// `NotFound`; a malformed code is `InvalidCode`.
fn resolve_seat(conn: &Connection, code: &str) -> CoreResult<Seat> {
    let (row_no, col_no) = seatcode::decode(code)?;
    roster::seat_at_position(conn, row_no, col_no)?
        .ok_or_else(|| CoreError::NotFound(code.to_string()))
}

/// Appends one review for the seat behind `code` and returns the review id.
pub fn submit_review(
    conn: &Connection,
    code: &str,
    rating: i64,
    comment: &str,
) -> CoreResult<String> {
    let seat = resolve_seat(conn, code)?;

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(CoreError::Validation(
            "comment must not be empty".to_string(),
        ));
    }
    if comment.chars().count() > MAX_COMMENT_CHARS {
        return Err(CoreError::Validation(format!(
            "comment must be at most {} characters",
            MAX_COMMENT_CHARS
        )));
    }

    let review_id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    conn.execute(
        "INSERT INTO reviews(id, seat_id, rating, comment, created_at) VALUES(?, ?, ?, ?, ?)",
        (&review_id, &seat.id, rating, comment, &created_at),
    )?;
    Ok(review_id)
}

/// Mean rating and count over every review the seat has ever received.
pub fn seat_stats(conn: &Connection, code: &str) -> CoreResult<SeatStats> {
    let seat = resolve_seat(conn, code)?;
    let stats = conn.query_row(
        "SELECT AVG(rating), COUNT(*) FROM reviews WHERE seat_id = ?",
        [&seat.id],
        |row| {
            Ok(SeatStats {
                mean_rating: row.get(0)?,
                count: row.get(1)?,
            })
        },
    )?;
    Ok(stats)
}

/// Up to `limit` newest reviews for the seat, newest first. Equal timestamps
/// fall back to insertion order, later insert first, so the cut is
/// deterministic. Reading never affects the totals in [`seat_stats`].
pub fn recent_reviews(conn: &Connection, code: &str, limit: i64) -> CoreResult<Vec<ReviewEntry>> {
    let seat = resolve_seat(conn, code)?;
    let mut stmt = conn.prepare(
        "SELECT rating, comment, created_at
         FROM reviews
         WHERE seat_id = ?
         ORDER BY created_at DESC, rowid DESC
         LIMIT ?",
    )?;
    let rows = stmt
        .query_map((&seat.id, limit.max(0)), |row| {
            Ok(ReviewEntry {
                rating: row.get(0)?,
                comment: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Per-seat rating summary for the whole grid in one query, seats without
/// reviews included. Used to annotate the seat chart.
pub fn rating_map(conn: &Connection) -> CoreResult<Vec<SeatRatingSummary>> {
    let mut stmt = conn.prepare(
        "SELECT se.code, AVG(r.rating), COUNT(r.id)
         FROM seats se
         LEFT JOIN reviews r ON r.seat_id = se.id
         GROUP BY se.id
         ORDER BY se.row_no, se.col_no",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SeatRatingSummary {
                seat_code: row.get(0)?,
                mean_rating: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
