//! Utility modules supporting the converter.
//!
//! - [`HttpClient`]: shared reqwest client with timeouts and a user agent
//! - [`leading_int`]: integer prefix of free-text values (headers, months)
//! - [`Pacer`]: delay between registry requests, with [`SleepPacer`] for real
//!   runs and [`RecordingPacer`] for tests
//!
//! # Pacing
//!
//! ```rust
//! use bib2wos::utils::{Pacer, RecordingPacer};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let pacer = RecordingPacer::new();
//! pacer.pause(Duration::from_millis(20)).await;
//! assert_eq!(pacer.delays(), vec![Duration::from_millis(20)]);
//! # }
//! ```

mod http;
mod number;
mod pacer;

pub use http::{default_user_agent, HttpClient, DEFAULT_TIMEOUT_SECS};
pub use number::leading_int;
pub use pacer::{Pacer, RecordingPacer, SleepPacer};
