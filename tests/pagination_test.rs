use anyhow::Result;
use hazard_map::{FetchSummary, HazardMapError, PaginatedFetcher};
use httpmock::prelude::*;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, serde::Deserialize)]
struct Building {
    id: u32,
}

fn page(ids: [u32; 2], current: u64, total: u64, next: Option<String>) -> serde_json::Value {
    serde_json::json!({
        "data": ids.iter().map(|id| serde_json::json!({"id": id})).collect::<Vec<_>>(),
        "meta": {
            "pagination": {
                "current_page": current,
                "total_pages": total,
                "links": match next {
                    Some(next) => serde_json::json!({"next": next}),
                    None => serde_json::json!([]),
                }
            }
        }
    })
}

#[tokio::test]
async fn test_three_pages_delivered_in_order() -> Result<()> {
    let server = MockServer::start();

    let page1 = server.mock(|when, then| {
        when.method(GET)
            .path("/buildings")
            .query_param("page", "1")
            .query_param("limit", "1000");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(page([1, 2], 1, 3, Some(server.url("/buildings?page=2"))));
    });
    let page2 = server.mock(|when, then| {
        when.method(GET)
            .path("/buildings")
            .query_param("page", "2")
            .query_param("limit", "1000");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(page([3, 4], 2, 3, Some(server.url("/buildings?page=3"))));
    });
    let page3 = server.mock(|when, then| {
        when.method(GET)
            .path("/buildings")
            .query_param("page", "3")
            .query_param("limit", "1000");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(page([5, 6], 3, 3, None));
    });

    let fetcher = PaginatedFetcher::new(1000, Duration::from_secs(5))?;
    let mut seen = Vec::new();
    let summary = fetcher
        .fetch_all_pages(
            &server.url("/buildings?page=1"),
            |b: Building| seen.push(b.id),
            &CancellationToken::new(),
        )
        .await?;

    page1.assert();
    page2.assert();
    page3.assert();
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(summary, FetchSummary { pages: 3, items: 6 });

    Ok(())
}

#[tokio::test]
async fn test_server_error_on_page_two_aborts_walk() -> Result<()> {
    let server = MockServer::start();

    let page1 = server.mock(|when, then| {
        when.method(GET).path("/buildings").query_param("page", "1");
        then.status(200)
            .json_body(page([1, 2], 1, 3, Some(server.url("/buildings?page=2"))));
    });
    let page2 = server.mock(|when, then| {
        when.method(GET).path("/buildings").query_param("page", "2");
        then.status(500);
    });
    let page3 = server.mock(|when, then| {
        when.method(GET).path("/buildings").query_param("page", "3");
        then.status(200).json_body(page([5, 6], 3, 3, None));
    });

    let fetcher = PaginatedFetcher::new(1000, Duration::from_secs(5))?;
    let mut seen = Vec::new();
    let result = fetcher
        .fetch_all_pages(
            &server.url("/buildings?page=1"),
            |b: Building| seen.push(b.id),
            &CancellationToken::new(),
        )
        .await;

    page1.assert();
    page2.assert();
    page3.assert_hits(0);
    assert_eq!(seen, vec![1, 2]);

    match result {
        Err(HazardMapError::Transport { url, source }) => {
            assert!(url.contains("page=2"));
            assert_eq!(source.status().map(|s| s.as_u16()), Some(500));
        }
        other => panic!("expected transport failure, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_undecodable_body_is_malformed_page() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stations");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("<html>maintenance</html>");
    });

    let fetcher = PaginatedFetcher::new(1000, Duration::from_secs(5))?;
    let result = fetcher
        .fetch_all::<Building>(&server.url("/stations"), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(HazardMapError::MalformedPage { .. })));
    Ok(())
}
