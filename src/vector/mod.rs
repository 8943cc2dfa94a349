//! 向量存储能力：索引生命周期、向量写入/删除与相似度检索。
//!
//! Vector store capability (`/v1/indexes/...`).
//!
//! Writes and searches can opt into consistency polling through
//! [`AddVectorsOptions`] and [`SearchOptions`]; see [`crate::consistency`].

mod client;
mod types;

pub use client::VectorStoreCapabilities;
pub use types::{
    AddVectorsOptions, AddVectorsResult, ConsistencyReport, SearchMatch, SearchOptions, Vector,
    VectorId, VectorIndex, VectorMetric, DEFAULT_TOP_K,
};
