//! End-to-end tests against a running engine.

use std::time::Duration;

use axum::response::Response;
use trie_router::http::{handlers, response};
use trie_router::{Engine, EngineConfig, RequestContext};

mod common;

async fn checkout(ctx: RequestContext) -> Response {
    response::ok_text(format!("checkout via {}", ctx.method))
}

async fn slow(_ctx: RequestContext) -> Response {
    tokio::time::sleep(Duration::from_millis(300)).await;
    response::ok_text("slow")
}

fn demo_engine(config: EngineConfig) -> Engine {
    let mut engine = Engine::new(config);
    handlers::register(&mut engine).unwrap();
    engine
        .post("/user/*", checkout)
        .unwrap()
        .get("/slow", slow)
        .unwrap();
    engine
}

#[tokio::test]
async fn test_demo_routes() {
    let running = common::spawn_engine(demo_engine(EngineConfig::default())).await;
    let client = common::client();

    let res = client
        .get(running.url("/user-agent"))
        .header("User-Agent", "integration-test")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "User-Agent=integration-test\n");

    let res = client.get(running.url("/ip")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "IP=127.0.0.1\n");

    let res = client.get(running.url("/blog/3333")).send().await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["blogId"], "3333");

    let res = client.post(running.url("/user/checkout")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "checkout via POST");

    running.shutdown.trigger();
    running.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_not_found_responses() {
    let running = common::spawn_engine(demo_engine(EngineConfig::default())).await;
    let client = common::client();

    let res = client.get(running.url("/blog")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Not Found Method: GET Path: /blog");

    // Wrong method for a registered path collapses to 404 as well.
    let res = client.post(running.url("/headers")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let res = client.head(running.url("/headers")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    running.shutdown.trigger();
    running.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_request_timeout() {
    async fn sleepy(_ctx: RequestContext) -> Response {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        response::ok_text("too late")
    }

    let mut config = EngineConfig::default();
    config.timeouts.request_secs = 1;
    let mut engine = demo_engine(config);
    engine.get("/sleepy", sleepy).unwrap();
    let running = common::spawn_engine(engine).await;
    let client = common::client();

    let res = client.get(running.url("/slow")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let res = client.get(running.url("/sleepy")).send().await.unwrap();
    assert_eq!(res.status(), 408);

    running.shutdown.trigger();
    running.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_graceful_shutdown_drains_in_flight() {
    let running = common::spawn_engine(demo_engine(EngineConfig::default())).await;
    let client = common::client();

    let url = running.url("/slow");
    let in_flight = tokio::spawn(async move { client.get(url).send().await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    running.shutdown.trigger();
    let res = in_flight.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "slow");

    running.task.await.unwrap().unwrap();
}
