//! Benchmarks for the response path
//!
//! This benchmark measures:
//! - SSE decoding of a streamed chat completion
//! - Error classification of non-2xx bodies

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use neuredge_sdk::transport::classify_response;
use neuredge_sdk::transport::sse::decode_sse_bytes;

/// Sample SSE frames (OpenAI format)
const SSE_FRAMES: &[&str] = &[
    r#"data: {"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"@cf/meta/llama-3.1-8b-instruct","choices":[{"index":0,"delta":{"role":"assistant","content":""},"finish_reason":null}]}"#,
    r#"data: {"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"@cf/meta/llama-3.1-8b-instruct","choices":[{"index":0,"delta":{"content":"Hello"},"finish_reason":null}]}"#,
    r#"data: {"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"@cf/meta/llama-3.1-8b-instruct","choices":[{"index":0,"delta":{"content":" there"},"finish_reason":null}]}"#,
    r#"data: {"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"@cf/meta/llama-3.1-8b-instruct","choices":[]}"#,
    r#"data: {"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"@cf/meta/llama-3.1-8b-instruct","choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#,
    "data: [DONE]",
];

fn bench_sse_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("sse_decoding");
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let body: String = SSE_FRAMES.iter().map(|f| format!("{f}\n\n")).collect();
    let body = Bytes::from(body);
    group.throughput(Throughput::Bytes(body.len() as u64));

    group.bench_function("decode_chat_stream", |b| {
        b.to_async(&rt).iter(|| async {
            let frames = decode_sse_bytes(black_box(body.clone())).await.unwrap();
            assert_eq!(frames.len(), 5);
        })
    });

    // Long stream: many small deltas in one buffer.
    let long: String = (0..500)
        .map(|i| {
            format!(
                "data: {{\"id\":\"c\",\"choices\":[{{\"index\":0,\"delta\":{{\"content\":\"tok{i}\"}}}}]}}\n\n"
            )
        })
        .collect();
    let long = Bytes::from(long);
    group.throughput(Throughput::Bytes(long.len() as u64));

    group.bench_function("decode_500_deltas", |b| {
        b.to_async(&rt).iter(|| async {
            decode_sse_bytes(black_box(long.clone())).await.unwrap();
        })
    });

    group.finish();
}

fn bench_error_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_classification");

    let structured = br#"{"error":{"type":"quota_exceeded","message":"Monthly quota used","details":{"limit":1000,"used":1000}}}"#;
    let html = b"<html><body><h1>502 Bad Gateway</h1></body></html>";

    group.bench_function("structured_body", |b| {
        b.iter(|| classify_response(black_box(429), black_box(structured)))
    });

    group.bench_function("unstructured_body", |b| {
        b.iter(|| classify_response(black_box(502), black_box(html)))
    });

    group.bench_function("unauthorized", |b| {
        b.iter(|| classify_response(black_box(401), black_box(b"")))
    });

    group.finish();
}

criterion_group!(benches, bench_sse_decoding, bench_error_classification);
criterion_main!(benches);
