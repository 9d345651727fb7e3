use crate::ipc::error::{core_err, err, ok};
use crate::ipc::types::{AppState, Request};
use crate::reviews;
use serde_json::json;

const DEFAULT_RECENT_LIMIT: i64 = 3;

fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let code = match req.params.get("seatCode").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing seatCode", None),
    };
    let rating = match req.params.get("rating").and_then(|v| v.as_i64()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing rating", None),
    };
    let comment = match req.params.get("comment").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing comment", None),
    };

    match reviews::submit_review(conn, &code, rating, &comment) {
        Ok(review_id) => ok(&req.id, json!({ "reviewId": review_id, "seatCode": code })),
        Err(e) => core_err(&req.id, &e),
    }
}

fn handle_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let code = match req.params.get("seatCode").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing seatCode", None),
    };

    match reviews::seat_stats(conn, &code) {
        Ok(stats) => ok(
            &req.id,
            json!({
                "seatCode": code,
                "meanRating": stats.mean_rating,
                "count": stats.count
            }),
        ),
        Err(e) => core_err(&req.id, &e),
    }
}

fn handle_recent(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let code = match req.params.get("seatCode").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing seatCode", None),
    };
    let limit = req
        .params
        .get("limit")
        .and_then(|v| v.as_i64())
        .unwrap_or(DEFAULT_RECENT_LIMIT);

    match reviews::recent_reviews(conn, &code, limit) {
        Ok(entries) => {
            let rows: Vec<_> = entries
                .iter()
                .map(|r| {
                    json!({
                        "rating": r.rating,
                        "comment": r.comment,
                        "createdAt": r.created_at
                    })
                })
                .collect();
            ok(&req.id, json!({ "seatCode": code, "reviews": rows }))
        }
        Err(e) => core_err(&req.id, &e),
    }
}

fn handle_rating_map(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match reviews::rating_map(conn) {
        Ok(summaries) => {
            let rows: Vec<_> = summaries
                .iter()
                .map(|s| {
                    json!({
                        "seatCode": s.seat_code,
                        "meanRating": s.mean_rating,
                        "count": s.count
                    })
                })
                .collect();
            ok(&req.id, json!({ "seats": rows }))
        }
        Err(e) => core_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reviews.submit" => Some(handle_submit(state, req)),
        "reviews.stats" => Some(handle_stats(state, req)),
        "reviews.recent" => Some(handle_recent(state, req)),
        "reviews.ratingMap" => Some(handle_rating_map(state, req)),
        _ => None,
    }
}
