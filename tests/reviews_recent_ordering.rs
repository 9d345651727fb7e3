
use serde_json::json;
use test_support::{request_ok, seed_workspace, spawn_sidecar, temp_dir};

#[test]
fn recent_returns_the_newest_reviews_in_descending_order() {
    let workspace = temp_dir("seatd-review-ordering");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = seed_workspace(&mut stdin, &mut reader, &workspace, 1, 2, &[]);

    // Five reviews in sequence; the rating doubles as an insertion marker.
    for rating in 1..=5 {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            &format!("submit-{}", rating),
            "reviews.submit",
            json!({ "seatCode": "A1", "rating": rating, "comment": format!("review {}", rating) }),
        );
    }

    let recent = request_ok(
        &mut stdin,
        &mut reader,
        "recent",
        "reviews.recent",
        json!({ "seatCode": "A1", "limit": 3 }),
    );
    let reviews = recent
        .get("reviews")
        .and_then(|v| v.as_array())
        .cloned()
        .expect("reviews");

    let ratings: Vec<i64> = reviews
        .iter()
        .map(|r| r.get("rating").and_then(|v| v.as_i64()).unwrap())
        .collect();
    assert_eq!(ratings, vec![5, 4, 3], "three newest, newest first");

    let stamps: Vec<&str> = reviews
        .iter()
        .map(|r| r.get("createdAt").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert!(
        stamps.windows(2).all(|w| w[0] >= w[1]),
        "created_at descending"
    );

    // The projection does not shrink the ledger totals.
    let stats = request_ok(
        &mut stdin,
        &mut reader,
        "stats",
        "reviews.stats",
        json!({ "seatCode": "A1" }),
    );
    assert_eq!(stats.get("count").and_then(|v| v.as_i64()), Some(5));
    assert_eq!(stats.get("meanRating").and_then(|v| v.as_f64()), Some(3.0));

    // An oversized limit just returns everything; zero returns nothing.
    let all = request_ok(
        &mut stdin,
        &mut reader,
        "recent-all",
        "reviews.recent",
        json!({ "seatCode": "A1", "limit": 50 }),
    );
    assert_eq!(
        all.get("reviews").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(5)
    );
    let none = request_ok(
        &mut stdin,
        &mut reader,
        "recent-none",
        "reviews.recent",
        json!({ "seatCode": "A1", "limit": 0 }),
    );
    assert_eq!(
        none.get("reviews").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(0)
    );

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
