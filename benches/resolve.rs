use criterion::{criterion_group, criterion_main, Criterion};
use keepsake_router::keepsake;
use keepsake_router::{MatchOptions, MemoryHistory, Route, RouteTable, Router};
use std::hint::black_box;
use std::sync::Arc;

fn wide_table() -> RouteTable<String> {
    let mut routes = Vec::new();
    for i in 0..50 {
        routes.push(Route::new(format!("/section{i}"), format!("section{i}")));
        routes.push(Route::new(
            format!("/section{i}/items/:id"),
            format!("section{i}_item"),
        ));
        routes.push(Route::new(
            format!("/section{i}/items/:id/notes/:note_id"),
            format!("section{i}_note"),
        ));
    }
    routes.push(Route::new("/files/*path", "files".to_string()));
    RouteTable::new(routes, MatchOptions::default()).expect("wide table")
}

fn bench_keepsake_resolve(c: &mut Criterion) {
    let table = Arc::new(keepsake::table(MatchOptions::default()).expect("keepsake table"));
    let router = Router::new(table, MemoryHistory::default()).expect("router");
    c.bench_function("keepsake_resolve", |b| {
        let paths = ["/", "/dashboard", "/record", "/listen/42", "/unregistered"];
        b.iter(|| {
            for path in paths.iter() {
                let res = router.resolve(path);
                black_box(&res);
            }
        })
    });
}

fn bench_wide_table_match(c: &mut Criterion) {
    let table = wide_table();
    c.bench_function("wide_table_match", |b| {
        let paths = [
            "/section0",
            "/section25/items/123",
            "/section49/items/123/notes/9",
            "/files/a/b/c.txt",
            "/missing/route",
        ];
        b.iter(|| {
            for path in paths.iter() {
                let res = table.match_path(path);
                black_box(&res);
            }
        })
    });
}

fn bench_navigate_back(c: &mut Criterion) {
    let table = Arc::new(keepsake::table(MatchOptions::default()).expect("keepsake table"));
    let history = MemoryHistory::default().with_limit(64);
    let mut router = Router::new(table, history).expect("router");
    c.bench_function("navigate_back", |b| {
        b.iter(|| {
            black_box(router.navigate("/listen/42").is_ok());
            black_box(router.back());
        })
    });
}

criterion_group!(
    benches,
    bench_keepsake_resolve,
    bench_wide_table_match,
    bench_navigate_back
);
criterion_main!(benches);
