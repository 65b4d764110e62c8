use keepsake_router::keepsake::{self, KeepsakeView};
use keepsake_router::{
    History, MatchOptions, MemoryHistory, NavigationKind, RouteError, Route, RouteTable, Router,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn keepsake_router() -> Router<KeepsakeView> {
    let table = keepsake::table(MatchOptions::default()).expect("keepsake table");
    Router::new(Arc::new(table), MemoryHistory::default()).expect("router")
}

fn assert_view<H: History>(router: &Router<KeepsakeView, H>, expected: KeepsakeView) {
    assert_eq!(
        router.current().view(),
        Some(&expected),
        "at {}",
        router.current().location()
    );
}

#[test]
fn test_initial_state_resolves_history_entry() {
    let router = keepsake_router();
    assert_view(&router, KeepsakeView::Landing);
    assert_eq!(router.current().path(), "/");
    assert!(!router.can_go_back());
}

#[test]
fn test_initial_unmatched_entry_is_not_an_error() {
    let table = keepsake::table(MatchOptions::default()).unwrap();
    let router = Router::new(
        Arc::new(table),
        MemoryHistory::with_initial_path("/gone"),
    )
    .unwrap();
    assert!(router.current().is_not_found());
}

#[test]
fn test_initial_invalid_entry_is_rejected() {
    let table = keepsake::table(MatchOptions::default()).unwrap();
    let result = Router::new(Arc::new(table), MemoryHistory::with_initial_path("listen"));
    assert!(matches!(result, Err(RouteError::InvalidPath { .. })));
}

#[test]
fn test_resolve_listen_id() {
    let router = keepsake_router();
    let resolved = router.resolve("/listen/42").unwrap();
    assert_eq!(resolved.view, KeepsakeView::Public);
    assert_eq!(resolved.param("id"), Some("42"));
    assert_eq!(resolved.params_map().get("id").map(String::as_str), Some("42"));
    assert_eq!(resolved.name.as_deref(), Some("listen"));
}

#[test]
fn test_resolve_unregistered_is_not_found() {
    let router = keepsake_router();
    assert_eq!(
        router.resolve("/unregistered"),
        Err(RouteError::NotFound {
            path: "/unregistered".to_string()
        })
    );
}

#[test]
fn test_resolve_ignores_query_and_fragment() {
    let router = keepsake_router();
    let resolved = router.resolve("/listen/abc?autoplay=1#t=3").unwrap();
    assert_eq!(resolved.param("id"), Some("abc"));
}

#[test]
fn test_resolve_is_idempotent_and_does_not_navigate() {
    let router = keepsake_router();
    let before = router.current().clone();
    let first = router.resolve("/record");
    for _ in 0..3 {
        assert_eq!(router.resolve("/record"), first);
    }
    assert_eq!(router.current(), &before);
    assert_eq!(router.history().len(), 1);
}

#[test]
fn test_first_match_wins() {
    let routes = vec![
        Route::new("/listen/:id", "public"),
        Route::new("/listen/preview", "preview"),
    ];
    let table = RouteTable::new(routes, MatchOptions::default()).unwrap();
    let router = Router::new(Arc::new(table), MemoryHistory::default()).unwrap();
    assert_eq!(router.resolve("/listen/preview").unwrap().view, "public");
}

#[test]
fn test_navigate_then_back_restores_previous_resolution() {
    let mut router = keepsake_router();
    router.navigate("/listen/7").unwrap();
    let previous = router.current().resolved().cloned();

    router.navigate("/listen/42").unwrap();
    assert_eq!(router.param("id"), Some("42"));

    assert!(router.back());
    assert_eq!(router.current().resolved().cloned(), previous);
    assert_eq!(router.param("id"), Some("7"));
}

#[test]
fn test_back_at_start_is_a_silent_noop() {
    let mut router = keepsake_router();
    let before = router.current().clone();
    assert!(!router.back());
    assert_eq!(router.current(), &before);
}

#[test]
fn test_forward_after_back() {
    let mut router = keepsake_router();
    router.navigate("/login").unwrap();
    router.navigate("/dashboard").unwrap();
    assert!(router.back());
    assert_view(&router, KeepsakeView::Login);
    assert!(router.can_go_forward());

    assert!(router.forward());
    assert_view(&router, KeepsakeView::Dashboard);
    assert!(!router.forward());
    assert_view(&router, KeepsakeView::Dashboard);
}

#[test]
fn test_navigate_after_back_discards_forward_entries() {
    let mut router = keepsake_router();
    router.navigate("/login").unwrap();
    router.navigate("/dashboard").unwrap();
    router.back();
    router.navigate("/record").unwrap();
    assert!(!router.can_go_forward());
    assert_eq!(router.history().entries(), vec!["/", "/login", "/record"]);
}

#[test]
fn test_replace_does_not_grow_history() {
    let mut router = keepsake_router();
    router.navigate("/login").unwrap();
    router.replace("/dashboard").unwrap();
    assert_view(&router, KeepsakeView::Dashboard);
    assert_eq!(router.history().len(), 2);

    router.back();
    assert_view(&router, KeepsakeView::Landing);
}

#[test]
fn test_go_clamps_and_reresolves() {
    let mut router = keepsake_router();
    router.navigate("/login").unwrap();
    router.navigate("/record").unwrap();

    assert_eq!(router.go(-10), -2);
    assert_view(&router, KeepsakeView::Landing);
    assert_eq!(router.go(1), 1);
    assert_view(&router, KeepsakeView::Login);
    assert_eq!(router.go(0), 0);
    assert_view(&router, KeepsakeView::Login);
}

#[test]
fn test_navigate_unmatched_still_pushes_entry() {
    let mut router = keepsake_router();
    let err = router.navigate("/nowhere?x=1").unwrap_err();
    assert_eq!(
        err,
        RouteError::NotFound {
            path: "/nowhere".to_string()
        }
    );
    assert!(router.current().is_not_found());
    assert_eq!(router.current().query("x"), Some("1"));
    assert_eq!(router.history().len(), 2);

    assert!(router.back());
    assert_view(&router, KeepsakeView::Landing);
}

#[test]
fn test_navigate_invalid_path_changes_nothing() {
    let mut router = keepsake_router();
    let err = router.navigate("listen/42").unwrap_err();
    assert!(matches!(err, RouteError::InvalidPath { .. }));
    assert_eq!(router.history().len(), 1);
    assert_view(&router, KeepsakeView::Landing);
}

#[test]
fn test_navigate_named() {
    let mut router = keepsake_router();
    router.navigate_named("listen", &[("id", "abc 1")]).unwrap();
    assert_eq!(router.current().path(), "/listen/abc%201");
    assert_eq!(router.param("id"), Some("abc 1"));

    let err = router.navigate_named("listen", &[]).unwrap_err();
    assert!(matches!(err, RouteError::MissingParam { .. }));
    let err = router.navigate_named("hero", &[]).unwrap_err();
    assert!(matches!(err, RouteError::UnknownRoute { .. }));
    assert_eq!(router.history().len(), 2);
}

#[test]
fn test_listeners_receive_every_navigation() {
    let mut router = keepsake_router();
    let seen: Rc<RefCell<Vec<(NavigationKind, String, Option<KeepsakeView>)>>> = Rc::default();
    let sink = Rc::clone(&seen);
    router.on_navigate(move |event| {
        sink.borrow_mut().push((
            event.kind,
            event.from.path().to_string(),
            event.to.view().copied(),
        ));
    });

    router.navigate("/record").unwrap();
    router.navigate("/nope").unwrap_err();
    router.back();
    router.back();
    router.back(); // boundary: no event

    let seen = seen.borrow();
    assert_eq!(
        *seen,
        vec![
            (NavigationKind::Push, "/".to_string(), Some(KeepsakeView::Record)),
            (NavigationKind::Push, "/record".to_string(), None),
            (
                NavigationKind::Traverse { delta: -1 },
                "/nope".to_string(),
                Some(KeepsakeView::Record)
            ),
            (
                NavigationKind::Traverse { delta: -1 },
                "/record".to_string(),
                Some(KeepsakeView::Landing)
            ),
        ]
    );
}

#[test]
fn test_catch_all_route_as_fallback() {
    let routes = vec![
        Route::new("/", "landing"),
        Route::new("/listen/:id", "public"),
        Route::new("/*path", "not_found"),
    ];
    let table = RouteTable::new(routes, MatchOptions::default()).unwrap();
    assert!(table.lint().is_empty());

    let mut router = Router::new(Arc::new(table), MemoryHistory::default()).unwrap();
    router.navigate("/some/old/link").unwrap();
    assert_eq!(router.current().view(), Some(&"not_found"));
    assert_eq!(router.param("path"), Some("some/old/link"));
}

#[test]
fn test_href_uses_history_base() {
    let table = keepsake::table(MatchOptions::default()).unwrap();
    let router = Router::new(Arc::new(table), MemoryHistory::default().with_base("/app")).unwrap();
    assert_eq!(router.href("/listen/42"), "/app/listen/42");

    let plain = keepsake_router();
    assert_eq!(plain.href("/listen/42"), "/listen/42");
}

#[test]
fn test_table_shared_between_routers() {
    let table = Arc::new(keepsake::table(MatchOptions::default()).unwrap());
    let mut a = Router::new(Arc::clone(&table), MemoryHistory::default()).unwrap();
    let b = Router::new(Arc::clone(&table), MemoryHistory::with_initial_path("/login")).unwrap();
    a.navigate("/record").unwrap();
    assert_view(&a, KeepsakeView::Record);
    assert_view(&b, KeepsakeView::Login);
}

/// A history whose entries are not validated, like a wrapper over a
/// browser history that other code can write to.
struct UncheckedHistory {
    entries: Vec<String>,
    position: usize,
}

impl UncheckedHistory {
    fn new(entries: &[&str], position: usize) -> Self {
        Self {
            entries: entries.iter().map(|e| e.to_string()).collect(),
            position,
        }
    }
}

impl History for UncheckedHistory {
    fn current(&self) -> String {
        self.entries[self.position].clone()
    }

    fn push(&mut self, location: String) {
        self.entries.truncate(self.position + 1);
        self.entries.push(location);
        self.position += 1;
    }

    fn replace(&mut self, location: String) {
        self.entries[self.position] = location;
    }

    fn go(&mut self, delta: isize) -> isize {
        let target = (self.position as isize + delta).clamp(0, self.entries.len() as isize - 1);
        let moved = target - self.position as isize;
        self.position = target as usize;
        moved
    }

    fn can_go_back(&self) -> bool {
        self.position > 0
    }

    fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[test]
fn test_traversal_to_invalid_entry_keeps_history_and_state_in_step() {
    let table = Arc::new(keepsake::table(MatchOptions::default()).unwrap());
    let mut router = Router::new(table, UncheckedHistory::new(&["relative", "/"], 1)).unwrap();
    let events = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&events);
    router.on_navigate(move |_| *sink.borrow_mut() += 1);

    router.navigate("/login").unwrap();
    assert!(router.back());
    assert_view(&router, KeepsakeView::Landing);

    assert!(!router.back());
    assert_eq!(router.history().current(), "/");
    assert_eq!(router.current().path(), "/");
    assert_view(&router, KeepsakeView::Landing);
    assert_eq!(router.go(-5), 0);
    assert_eq!(router.history().current(), "/");
    assert_eq!(*events.borrow(), 2);

    assert!(router.forward());
    assert_view(&router, KeepsakeView::Login);
}
