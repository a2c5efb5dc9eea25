use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use webserv::http::request::Request;
use webserv::server::{Registration, Router};

fn text(s: &str) -> Bytes {
    Bytes::copy_from_slice(s.as_bytes())
}

fn hello_world(_req: &Request) -> Bytes {
    text("Hello, world!")
}

fn cat(_req: &Request) -> Option<Bytes> {
    Some(text("Cat"))
}

fn puppy(_req: &Request) -> Option<Bytes> {
    Some(text("Puppy!"))
}

fn method(req: &Request) -> Option<Bytes> {
    Some(text(&req.method))
}

fn num(_req: &Request) -> Option<Bytes> {
    Some(text("7"))
}

fn declines(_req: &Request) -> Option<Bytes> {
    None
}

fn req(method: &str, path: &str) -> Request {
    Request::new(method, path, "B")
}

#[test]
fn test_new_router_is_empty() {
    let router = Router::new(5, hello_world);

    assert_eq!(router.capacity(), 5);
    assert_eq!(router.len(), 0);
    assert!(router.is_empty());
}

#[test]
fn test_fallback_only() {
    let router = Router::new(0, hello_world);

    assert_eq!(router.dispatch(req("A", "C")), text("Hello, world!"));
}

#[test]
fn test_register_one() {
    let mut router = Router::new(1, hello_world);
    assert_eq!(router.register("cat", cat), Registration::Inserted);

    assert_eq!(router.dispatch(req("A", "C")), text("Hello, world!"));
    assert_eq!(router.dispatch(req("A", "cat")), text("Cat"));
}

#[test]
fn test_register_several() {
    let mut router = Router::new(3, hello_world);
    router.register("cat", cat);
    router.register("method", method);
    router.register("num/seven", num);

    let cases = [
        (req("A", "C"), "Hello, world!"),
        (req("A", "cat"), "Cat"),
        (req("A", "method"), "A"),
        (req("GET", "method"), "GET"),
        (req("GET", "num/seven"), "7"),
    ];
    for (request, expected) in cases {
        assert_eq!(router.dispatch(request), text(expected));
    }
}

#[test]
fn test_match_is_exact() {
    let mut router = Router::new(1, hello_world);
    router.register("/cat", cat);

    assert_eq!(router.dispatch(req("A", "/cat/")), text("Hello, world!"));
    assert_eq!(router.dispatch(req("A", "/Cat")), text("Hello, world!"));
    assert_eq!(router.dispatch(req("A", "/ca")), text("Hello, world!"));
}

#[test]
fn test_register_replace() {
    let mut router = Router::new(1, hello_world);
    router.register("best_animal", cat);
    assert_eq!(router.register("best_animal", puppy), Registration::Replaced);

    assert_eq!(router.dispatch(req("A", "best_animal")), text("Puppy!"));
    assert_eq!(router.len(), 1);
}

#[test]
fn test_register_beyond_capacity_is_dropped() {
    let mut router = Router::new(0, hello_world);
    assert_eq!(router.register("foo", cat), Registration::Dropped);

    assert_eq!(router.dispatch(req("A", "foo")), text("Hello, world!"));
    assert!(router.is_empty());
}

#[test]
fn test_replace_succeeds_when_full() {
    let mut router = Router::new(2, hello_world);
    router.register("a", cat);
    router.register("b", num);
    assert_eq!(router.register("c", puppy), Registration::Dropped);
    assert_eq!(router.register("a", puppy), Registration::Replaced);

    assert_eq!(router.dispatch(req("A", "a")), text("Puppy!"));
    assert_eq!(router.dispatch(req("A", "b")), text("7"));
    assert_eq!(router.dispatch(req("A", "c")), text("Hello, world!"));
    assert_eq!(router.len(), 2);
}

#[test]
fn test_declining_handler_falls_back() {
    let mut router = Router::new(1, hello_world);
    router.register("/maybe", declines);

    assert_eq!(router.dispatch(req("GET", "/maybe")), text("Hello, world!"));
}

#[test]
fn test_fallback_sees_the_request() {
    let router = Router::new(0, |req: &Request| text(&format!("no route for {}", req.path)));

    assert_eq!(router.dispatch(req("GET", "/missing")), text("no route for /missing"));
}

#[test]
fn test_closure_handlers_keep_state() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    let mut router = Router::new(1, hello_world);
    router.register("/count", move |_req: &Request| {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Some(text(&n.to_string()))
    });

    assert_eq!(router.dispatch(req("GET", "/count")), text("1"));
    assert_eq!(router.dispatch(req("GET", "/count")), text("2"));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
