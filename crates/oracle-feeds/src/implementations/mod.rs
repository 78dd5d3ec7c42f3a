//! Concrete fetcher implementations, one per upstream provider shape.

pub mod chainlink;
pub mod pyth;

pub use chainlink::ChainlinkFetcher;
pub use pyth::PythFetcher;
