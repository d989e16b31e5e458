//! Response body helpers.

use axum::body::{Body, to_bytes};
use axum::response::Response;
use bytes::Bytes;

pub async fn bytes(resp: Response<Body>) -> Bytes {
    to_bytes(resp.into_body(), usize::MAX).await.unwrap()
}

pub async fn json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&bytes(resp).await).unwrap()
}

pub async fn text(resp: Response<Body>) -> String {
    String::from_utf8(bytes(resp).await.to_vec()).unwrap()
}
