//! End-to-end fetches against the live mock server.
//!
//! # Design
//! Each test starts the mock server on an ephemeral port and drives a real
//! `Fetcher` over `ReqwestTransport`, so URL composition, transport, timeout
//! and classification are all exercised together.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fetch_core::{Context, ErrorKind, FetchError, Fetcher, Record, ReqwestTransport};

async fn fetcher_for(path: &str, timeout: Duration) -> Fetcher {
    let addr = mock_server::spawn().await.unwrap();
    let transport = Arc::new(ReqwestTransport::new(reqwest::Client::new()));
    Fetcher::new(&format!("http://{addr}{path}"), transport, timeout)
}

fn expected_records(id: i64) -> Vec<Record> {
    mock_server::fixtures()
        .into_iter()
        .filter(|p| p.id == id)
        .map(|p| Record {
            user_id: p.user_id,
            id: p.id,
            title: p.title,
            body: p.body,
        })
        .collect()
}

#[tokio::test]
async fn fetch_returns_matching_records() {
    let fetcher = fetcher_for("/posts", Duration::from_secs(1)).await;

    let records = fetcher.fetch(&Context::background(), "1").await.unwrap();

    assert_eq!(records, expected_records(1));
    assert!(records[0].body.contains('\n'));
}

#[tokio::test]
async fn fetch_unknown_id_returns_empty() {
    let fetcher = fetcher_for("/posts", Duration::from_secs(1)).await;

    let records = fetcher.fetch(&Context::background(), "999").await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_bad_request_is_sentinel() {
    let fetcher = fetcher_for("/posts", Duration::from_secs(1)).await;

    let err = fetcher.fetch(&Context::background(), "dfslg").await.unwrap_err();

    assert!(err.is_bad_request());
    assert!(matches!(err, FetchError::BadRequest));
    assert_eq!(err.to_string(), "Bad Request");
}

#[tokio::test]
async fn fetch_object_body_is_decode_error() {
    let fetcher = fetcher_for("/malformed", Duration::from_secs(1)).await;

    let err = fetcher.fetch(&Context::background(), "1").await.unwrap_err();

    assert_eq!(err.to_string(), "Bad Request");
    assert!(!err.is_bad_request());
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn fetch_array_of_strings_is_decode_error() {
    let fetcher = fetcher_for("/strings", Duration::from_secs(1)).await;

    let err = fetcher.fetch(&Context::background(), "1").await.unwrap_err();

    assert_eq!(err.to_string(), "Bad Request");
    assert!(!err.is_bad_request());
}

#[tokio::test]
async fn fetch_not_found_path_is_decode_error() {
    let fetcher = fetcher_for("/postsss", Duration::from_secs(1)).await;

    let err = fetcher.fetch(&Context::background(), "1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn fetch_unreachable_host_is_transport_error() {
    // Bind and drop a listener so the port is known to be closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let transport = Arc::new(ReqwestTransport::new(reqwest::Client::new()));
    let fetcher = Fetcher::new(&format!("http://{addr}/posts"), transport, Duration::from_secs(1));

    let err = fetcher.fetch(&Context::background(), "1").await.unwrap_err();

    assert_eq!(err.to_string(), "Internal Server Error");
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn fetch_with_expired_context_is_transport_error() {
    let fetcher = fetcher_for("/posts", Duration::from_secs(1)).await;
    let ctx = Context::background().with_deadline(tokio::time::Instant::now());

    let err = fetcher.fetch(&ctx, "1").await.unwrap_err();

    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn fetch_with_cancelled_context_is_transport_error() {
    let fetcher = fetcher_for("/posts", Duration::from_secs(1)).await;
    let ctx = Context::background();
    ctx.cancel();

    let err = fetcher.fetch(&ctx, "1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn fetch_times_out_before_slow_response() {
    let timeout = Duration::from_millis(200);
    let fetcher = fetcher_for("/slow", timeout).await;

    let started = Instant::now();
    let err = fetcher.fetch(&Context::background(), "1").await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err.to_string(), "Internal Server Error");
    assert!(elapsed >= timeout);
    assert!(elapsed < mock_server::SLOW_DELAY, "took {elapsed:?}");
}

#[tokio::test]
async fn caller_cancellation_aborts_in_flight_fetch() {
    let fetcher = fetcher_for("/slow", Duration::from_secs(30)).await;
    let ctx = Context::background();

    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let err = fetcher.fetch(&ctx, "1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(started.elapsed() < mock_server::SLOW_DELAY);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_fetches_do_not_interfere() {
    let fetcher = Arc::new(fetcher_for("/echo", Duration::from_secs(2)).await);

    let handles: Vec<_> = (0..16)
        .map(|n| {
            let fetcher = Arc::clone(&fetcher);
            tokio::spawn(async move {
                let id = format!("{n}");
                let records = fetcher.fetch(&Context::background(), &id).await.unwrap();
                (id, records)
            })
        })
        .collect();

    for handle in handles {
        let (id, records) = handle.await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, id);
    }
}
