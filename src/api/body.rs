//! JSON body extractor for the resource handlers.
//!
//! The handlers own every error response, so the body never rejects a
//! request: an empty, undecodable or non-JSON body yields `T::default()`,
//! which the handler then reports as missing fields.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug)]
pub struct RequestBody<T>(pub T);

impl<S, T> FromRequest<S> for RequestBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("unreadable request body: {}", e);
                return Ok(Self(T::default()));
            }
        };
        Ok(Self(decode(&bytes)))
    }
}

fn decode<T: DeserializeOwned + Default>(bytes: &[u8]) -> T {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        debug!("ignoring undecodable request body: {}", e);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseRequest;
    use axum::body::Body;

    async fn extract(content_type: Option<&str>, body: &'static str) -> CourseRequest {
        let mut builder = Request::builder().method("POST").uri("/api/course");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        let RequestBody(parsed) = RequestBody::<CourseRequest>::from_request(req, &())
            .await
            .unwrap();
        parsed
    }

    #[tokio::test]
    async fn decodes_json_without_content_type() {
        let req = extract(None, r#"{"course_name": "Algebra"}"#).await;
        assert_eq!(req.course_name.as_deref(), Some("Algebra"));
        assert_eq!(req.course_code, None);
    }

    #[tokio::test]
    async fn empty_or_malformed_body_is_all_missing() {
        let req = extract(Some("application/json"), "").await;
        assert!(req.course_name.is_none() && req.course_code.is_none());

        let req = extract(Some("application/json"), "{not json").await;
        assert!(req.course_name.is_none() && req.course_code.is_none());

        let req = extract(Some("text/plain"), "[1, 2]").await;
        assert!(req.course_name.is_none());
    }
}
