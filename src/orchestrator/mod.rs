//! Retry, timeout and provider fallback for a single classification.
//!
//! # State Machine
//!
//! ```text
//! Pending -> Attempting(provider 0, retry 0)
//! Attempting(p, r) --success--> done
//! Attempting(p, r) --failure, r < max--> Attempting(p, r + 1)
//! Attempting(p, r) --failure, r = max--> Attempting(p + 1, 0) | Exhausted
//! ```
//!
//! Every attempt is appended to the resolution's attempt log and recorded
//! in the shared [`UsageTracker`](crate::usage::UsageTracker), including
//! attempts on providers that were later abandoned.

pub mod error;
pub mod fallback;
pub mod rate_limit;


pub use error::{ConfigurationError, ResolveError};
pub use fallback::{FallbackOrchestrator, ResolveState, Resolution, RetryPolicy};
pub use rate_limit::RateLimiter;
