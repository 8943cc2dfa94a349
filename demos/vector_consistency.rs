//! Vector Store Consistency Example
//!
//! Creates an index, inserts vectors with consistency polling, then searches
//! with a small retry budget so freshly written vectors are found.
//!
//!   cargo run --example vector_consistency

use neuredge_sdk::vector::{
    AddVectorsOptions, SearchOptions, Vector, VectorIndex, VectorMetric,
};
use neuredge_sdk::{ConsistencyPolicy, NeuredgeClient};

const INDEX: &str = "demo-consistency";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("neuredge_sdk=debug")
        .init();

    let client = NeuredgeClient::builder().build()?;
    let vectors = client.vector();

    // Start clean; deleting a missing index succeeds.
    vectors.delete_index(INDEX).await?;
    vectors
        .create_index(&VectorIndex::new(INDEX, 3, VectorMetric::Cosine))
        .await?;

    // Creation is not immediately visible; wait until the index can be read.
    let mut visible = false;
    for _ in 0..10 {
        if vectors.get_index(INDEX).await?.is_some() {
            visible = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }
    if !visible {
        println!("Index {INDEX} not visible yet, continuing anyway");
    }

    let result = vectors
        .add_vectors(
            INDEX,
            &[
                Vector::new("doc-1", vec![0.1, 0.2, 0.3]),
                Vector::new("doc-2", vec![0.3, 0.1, 0.2]),
            ],
            AddVectorsOptions::consistent(),
        )
        .await?;
    println!("Inserted {} vectors: {:?}", result.inserted, result.ids);
    if let Some(report) = result.consistency {
        println!(
            "Consistency: converged={} after {} probe(s), observed {:?}/{}",
            report.converged, report.attempts, report.observed_count, report.expected_count
        );
    }

    let options = SearchOptions::default().with_top_k(2).with_consistency(
        ConsistencyPolicy::read()
            .with_max_retries(3)
            .with_retry_delay_ms(1000),
    );
    for m in vectors.search_vector(INDEX, &[0.1, 0.2, 0.3], options).await? {
        println!("  {} -> {:.4}", m.id, m.score);
    }

    vectors.delete_index(INDEX).await?;
    client.close();
    Ok(())
}
