// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Saved alerts against incoming items.

use claimcheck::{match_alerts, Alert, GeoPoint};

use super::common::{approx, listing, make_record, now, project, CAMPUS, ORIGIN};

fn alert(id: &str, query: &str) -> Alert {
    Alert {
        id: id.to_string(),
        owner: "owner-1".to_string(),
        query_text: query.to_string(),
        tags: vec![],
        campus_id: None,
        origin: None,
        radius_km: None,
        active: true,
    }
}

#[test]
fn test_alert_scores_like_a_search() {
    let a = Alert {
        campus_id: Some(CAMPUS.to_string()),
        ..alert("a", "iphone")
    };
    let score = a.evaluate(&listing(0), now()).unwrap();
    assert!(approx(score, 16.0));
}

#[test]
fn test_radius_gate() {
    let inside = Alert {
        origin: Some(GeoPoint::new(-15.8000, -47.9500)),
        radius_km: Some(5.0),
        ..alert("inside", "iphone")
    };
    let outside = Alert {
        radius_km: Some(3.0),
        ..inside.clone()
    };
    // The origin is ~3.14 km from the listing
    assert!(inside.evaluate(&listing(0), now()).is_some());
    assert_eq!(outside.evaluate(&listing(0), now()), None);
}

#[test]
fn test_radius_without_origin_is_ignored() {
    let a = Alert {
        radius_km: Some(0.1),
        ..alert("a", "iphone")
    };
    assert!(a.evaluate(&listing(0), now()).is_some());
}

#[test]
fn test_radius_rejects_items_without_location() {
    let mut record = make_record("nowhere", "iPhone", &[], 0);
    record.geo = None;
    let item = project(record);
    let a = Alert {
        origin: Some(GeoPoint::new(ORIGIN.0, ORIGIN.1)),
        radius_km: Some(50.0),
        ..alert("a", "iphone")
    };
    assert_eq!(a.evaluate(&item, now()), None);
}

#[test]
fn test_match_alerts_orders_and_skips() {
    let alerts = vec![
        alert("generic", "celular"),
        alert("exact", "iphone 13 pro"),
        Alert {
            active: false,
            ..alert("paused", "iphone 13 pro")
        },
        alert("unrelated", "guarda-chuva"),
    ];
    let fired = match_alerts(&alerts, &listing(0), now());
    let ids: Vec<&str> = fired.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["exact", "generic"]);
}

#[test]
fn test_alert_ages_items_by_evaluation_time() {
    let a = alert("a", "iphone");
    let at_report = a.evaluate(&listing(0), now()).unwrap();
    let much_later = a
        .evaluate(&listing(0), now() + chrono::Duration::days(45))
        .unwrap();
    assert!(much_later < at_report);
}
