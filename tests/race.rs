//! Race behaviour against real HTTP sites.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use site_race::search::{FetchError, Fetcher, RaceCoordinator, RaceResult, SearchRequest};

mod common;

fn coordinator(fetch_timeout_secs: u64) -> RaceCoordinator {
    RaceCoordinator::from_config(&common::test_config(fetch_timeout_secs)).unwrap()
}

fn fetcher(fetch_timeout_secs: u64) -> Fetcher {
    Fetcher::new(&common::test_config(fetch_timeout_secs).fetch).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_full_body() {
    let content = "<html><body> The Site aaaa </body></html>";
    let (url, _) = common::start_mock_site(content, Duration::from_millis(100)).await;

    let body = fetcher(5).fetch(&url).await.unwrap();
    assert_eq!(body, content);
}

#[tokio::test]
async fn test_fetch_non_200_is_status_error() {
    let (url, _) =
        common::start_mock_site_with_status(404, "<html><body>Not found</body></html>", Duration::ZERO)
            .await;

    let err = fetcher(5).fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status, .. } if status == 404));

    let (url, _) = common::start_mock_site_with_status(201, "Created", Duration::ZERO).await;
    let err = fetcher(5).fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status, .. } if status == 201));
}

#[tokio::test]
async fn test_fetch_hangup_is_transport_error() {
    let url = common::start_hangup_site().await;
    let err = fetcher(5).fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_garbage_reply_is_transport_error() {
    let url = common::start_garbage_site().await;
    let err = fetcher(5).fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_timeout() {
    let (url, _) = common::start_mock_site("Present", Duration::from_secs(3)).await;

    let start = Instant::now();
    let err = fetcher(1).fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "got {:?}", err);
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_fetch_unlisted_status_is_status_error() {
    let (url, _) = common::start_mock_site_with_status(418, "Present", Duration::ZERO).await;

    let err = fetcher(5).fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status, .. } if status == 418), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_truncated_body_is_empty() {
    let url = common::start_truncated_site(Duration::ZERO).await;

    let body = fetcher(5).fetch(&url).await.unwrap();
    assert_eq!(body, "");
}

#[tokio::test]
async fn test_fetch_stalled_body_is_timeout() {
    let url = common::start_truncated_site(Duration::from_secs(5)).await;

    let start = Instant::now();
    let err = fetcher(1).fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "got {:?}", err);
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_stalled_body_never_wins() {
    let url = common::start_truncated_site(Duration::from_secs(5)).await;

    let result = coordinator(1).race(SearchRequest::new([url], "")).await;

    assert_eq!(result, RaceResult::NotFound);
}

#[tokio::test]
async fn test_truncated_body_is_no_match_without_aborting_race() {
    let truncated = common::start_truncated_site(Duration::ZERO).await;

    let result = coordinator(5)
        .race(SearchRequest::new([truncated.clone()], "Present"))
        .await;
    assert_eq!(result, RaceResult::NotFound);

    let (good, _) = common::start_mock_site("Present", Duration::from_millis(200)).await;
    let result = coordinator(5)
        .race(SearchRequest::new([truncated, good.clone()], "Present"))
        .await;
    assert_eq!(result, RaceResult::Found(good));
}

#[tokio::test]
async fn test_fetch_uses_request_path() {
    let url = common::start_programmable_site(|path| async move {
        let content = match path.as_str() {
            "/first" => "<html><body>First</body></html>",
            "/second" => "<html><body>Second</body></html>",
            _ => "<html><body>Default</body></html>",
        };
        (200, content.to_string())
    })
    .await;

    let result = coordinator(5)
        .race(SearchRequest::new([format!("{}/first", url)], "First"))
        .await;
    assert_eq!(result, RaceResult::Found(format!("{}/first", url)));

    let result = coordinator(5)
        .race(SearchRequest::new([format!("{}/second", url)], "First"))
        .await;
    assert_eq!(result, RaceResult::NotFound);
}

#[tokio::test]
async fn test_both_do_not_contain() {
    let (a, a_visited) = common::start_mock_site("No contents - 1", Duration::ZERO).await;
    let (b, b_visited) = common::start_mock_site("No contents - 2", Duration::ZERO).await;

    let result = coordinator(5)
        .race(SearchRequest::new([a, b], "Present"))
        .await;

    assert_eq!(result, RaceResult::NotFound);
    assert!(a_visited.load(Ordering::SeqCst), "First site should be visited");
    assert!(b_visited.load(Ordering::SeqCst), "Second site should be visited");
}

#[tokio::test]
async fn test_only_first_contains() {
    let (a, a_visited) = common::start_mock_site("Present", Duration::ZERO).await;
    let (b, _) = common::start_mock_site("No contents - 2", Duration::ZERO).await;

    let result = coordinator(5)
        .race(SearchRequest::new([a.clone(), b], "Present"))
        .await;

    assert_eq!(result, RaceResult::Found(a));
    assert!(a_visited.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_both_contain() {
    let (a, _) = common::start_mock_site("Present", Duration::ZERO).await;
    let (b, _) = common::start_mock_site("Present", Duration::ZERO).await;

    let result = coordinator(5)
        .race(SearchRequest::new([a.clone(), b.clone()], "Present"))
        .await;

    let winner = result.found_at().expect("a match should be found");
    assert!(winner == a || winner == b, "unexpected winner {}", winner);
}

#[tokio::test]
async fn test_slow_sites_time_out_as_no_match() {
    let (a, a_visited) = common::start_mock_site("Present", Duration::from_secs(2)).await;
    let (b, b_visited) = common::start_mock_site("Present", Duration::from_secs(2)).await;

    let result = coordinator(1)
        .race(SearchRequest::new([a, b], "Present"))
        .await;

    assert_eq!(result, RaceResult::NotFound);
    assert!(a_visited.load(Ordering::SeqCst));
    assert!(b_visited.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_slow_site_does_not_stall_match() {
    let (slow, _) = common::start_mock_site("No contents", Duration::from_secs(4)).await;
    let (fast, _) = common::start_mock_site("Present", Duration::ZERO).await;

    let start = Instant::now();
    let result = coordinator(10)
        .race(SearchRequest::new([slow, fast.clone()], "Present"))
        .await;

    assert_eq!(result, RaceResult::Found(fast));
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_single_404_is_not_found() {
    let (a, a_visited) =
        common::start_mock_site_with_status(404, "Present", Duration::ZERO).await;

    let result = coordinator(5).race(SearchRequest::new([a], "Present")).await;

    assert_eq!(result, RaceResult::NotFound);
    assert!(a_visited.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_failures_do_not_abort_race() {
    let broken = common::start_hangup_site().await;
    let garbage = common::start_garbage_site().await;
    let (missing, _) = common::start_mock_site_with_status(500, "Present", Duration::ZERO).await;
    let (good, _) = common::start_mock_site("Present", Duration::from_millis(200)).await;

    let result = coordinator(5)
        .race(SearchRequest::new(
            [broken, "not a url".to_string(), garbage, missing, good.clone()],
            "Present",
        ))
        .await;

    assert_eq!(result, RaceResult::Found(good));
}

#[tokio::test]
async fn test_empty_site_list() {
    let start = Instant::now();
    let result = coordinator(5)
        .race(SearchRequest::new(Vec::<String>::new(), "Present"))
        .await;

    assert_eq!(result, RaceResult::NotFound);
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn test_empty_search_text_matches_any_reachable_site() {
    let (a, _) = common::start_mock_site("", Duration::ZERO).await;
    let result = coordinator(5).race(SearchRequest::new([a.clone()], "")).await;
    assert_eq!(result, RaceResult::Found(a));
}
