// Scalability smoke tests for the linear route scan.
//
// Front-end tables are small, but resolution runs on every navigation and
// every link render, so it must stay cheap even for a generous table.

use super::{MatchOptions, Route, RouteTable};
use std::time::Instant;

fn large_table(count: usize) -> RouteTable<String> {
    let routes = (0..count)
        .map(|i| Route::new(format!("/section{i}/items/:id"), format!("view_{i}")))
        .collect();
    RouteTable::new(routes, MatchOptions::default()).unwrap()
}

#[test]
fn test_resolution_with_many_routes() {
    let table = large_table(200);

    let start = Instant::now();
    for _ in 0..200 {
        let resolved = table.match_path("/section150/items/123");
        assert!(resolved.is_some());
    }
    let duration = start.elapsed();

    assert!(
        duration.as_millis() < 1000,
        "Resolution degraded: {}ms for 200 lookups with 200 routes",
        duration.as_millis()
    );
}

#[test]
fn test_first_route_short_circuits() {
    let table = large_table(200);
    let resolved = table.match_path("/section0/items/7").unwrap();
    assert_eq!(resolved.view, "view_0");
    assert_eq!(resolved.param("id"), Some("7"));
}

#[test]
fn test_unmatched_path_scans_whole_table() {
    let table = large_table(200);
    for i in 0..100 {
        assert!(table.match_path(&format!("/missing/{i}")).is_none());
    }
}
