//! Skeleton prefetch cache for Foreshadow.
//!
//! A process-wide keyed store mapping a resolved URL to its fetched
//! skeleton markup, with a pending-waiters list for requests that arrive
//! before the fetch resolves.
//!
//! # Architecture
//!
//! - **Store** ([`SkeletonCache`]): a synchronous state machine over cache
//!   entries. `absent → pending → (loaded | failed)`, monotonic, never
//!   backward. At most one fetch is ever issued per URL.
//! - **Fetcher** ([`SkeletonFetcher`]): the async seam to the network. One
//!   concrete implementation over HTTP ([`HttpFetcher`]) and a scripted
//!   mock for deterministic interleaving tests.
//!
//! The store never performs I/O itself: the caller asks `begin_fetch`
//! whether it should issue a fetch, runs the fetcher, and feeds the outcome
//! back through `complete_fetch`, which drains the waiters in registration
//! order. Keeping the store synchronous keeps every cache transition a
//! single step on the caller's turn.

mod error;
mod fetcher;
mod store;

pub use error::{FetchError, FetchResult};
pub use fetcher::{mock, HttpFetcher, SkeletonFetcher};
pub use store::{SkeletonCache, SkeletonState};
