//! Inference backends and the router that chooses between them.
//!
//! All backends implement the `jarvis_core::Provider` trait. The
//! [`InferenceRouter`] decides per request whether the fast or the capable
//! backend answers, paces calls, and falls back on failure.

pub mod openai_compat;
pub mod rate_limit;
pub mod router;
pub mod routing;
pub mod text_stream;

#[cfg(test)]
mod test_helpers;

pub use openai_compat::OpenAiCompatProvider;
pub use rate_limit::RateLimiter;
pub use router::{APOLOGY, GenerateRequest, Generation, InferenceRouter, build_from_config};
pub use routing::{BackendKind, RouteReason, RoutingPolicy};
pub use text_stream::TextStream;
