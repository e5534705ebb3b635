//! HTTP endpoint tests
//!
//! These tests use wiremock to stand in for remote workers.

use arbor_core::{ChunkSource, HashingAlgorithm, MemoryChunkSource, MerkleTree, Sha256Algorithm};
use arbor_distributed::{ComputeEndpoint, DistributedError, HttpEndpoint, Orchestrator, WorkRequest};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn request() -> WorkRequest {
    WorkRequest {
        source: "input.bin".to_string(),
        chunk_size: 8,
        skip: 0,
        take: 4,
        target_height: 3,
    }
}

#[tokio::test]
async fn test_posts_json_and_parses_hash() {
    let server = MockServer::start().await;
    let hash = Sha256Algorithm.hash(b"sub-root");

    Mock::given(method("POST"))
        .and(path("/compute"))
        .and(body_json(serde_json::json!({
            "fileName": "input.bin",
            "chunkSize": 8,
            "skip": 0,
            "take": 4,
            "targetHeight": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(hash.to_hex()))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = HttpEndpoint::new(format!("{}/compute", server.uri()));
    assert_eq!(endpoint.compute(&request()).await.unwrap(), hash);
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let endpoint = HttpEndpoint::new(server.uri());
    match endpoint.compute(&request()).await {
        Err(DistributedError::RemoteStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected RemoteStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_garbage_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .mount(&server)
        .await;

    let endpoint = HttpEndpoint::new(server.uri());
    assert!(matches!(
        endpoint.compute(&request()).await,
        Err(DistributedError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let endpoint = HttpEndpoint::new(uri);
    assert!(matches!(
        endpoint.compute(&request()).await,
        Err(DistributedError::Http(_))
    ));
}

/// Mock worker that computes real sub-roots from the posted request
struct WorkerResponder {
    source: Arc<MemoryChunkSource>,
}

impl Respond for WorkerResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let work: WorkRequest = match serde_json::from_slice(&request.body) {
            Ok(work) => work,
            Err(e) => return ResponseTemplate::new(400).set_body_string(e.to_string()),
        };
        match arbor_distributed::compute_partial_root(
            &Sha256Algorithm,
            &arbor_core::BuildStrategy::Sequential,
            self.source.as_ref(),
            &work,
        ) {
            Ok(hash) => ResponseTemplate::new(200).set_body_string(hash.to_hex()),
            Err(e) => ResponseTemplate::new(500).set_body_string(e.to_string()),
        }
    }
}

#[tokio::test]
async fn test_orchestrator_over_http() {
    let chunks: Vec<Vec<u8>> = (0..24u64).map(|i| i.to_le_bytes().to_vec()).collect();
    let source = Arc::new(MemoryChunkSource::from_chunks(chunks));
    let expected = MerkleTree::from_chunks(&Sha256Algorithm, &source.read(0, 24).unwrap())
        .unwrap()
        .root();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compute"))
        .respond_with(WorkerResponder {
            source: Arc::clone(&source),
        })
        .expect(3)
        .mount(&server)
        .await;

    let endpoint = Arc::new(HttpEndpoint::new(format!("{}/compute", server.uri())));
    let orchestrator = Orchestrator::new(endpoint, Sha256Algorithm, "memory", 8);
    let report = orchestrator.compute_distributed_root(24, 8, 2).await.unwrap();

    assert_eq!(report.units, 3);
    assert_eq!(report.root, expected);
}
