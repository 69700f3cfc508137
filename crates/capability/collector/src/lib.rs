//! # 采集引擎
//!
//! 每次抓取请求触发一次完整采集，没有后台轮询：
//!
//! ```text
//! GET /metrics
//!     │
//!     ▼
//! MetricsRegistry::render
//!     │
//!     ▼
//! CollectionEngine::collect ── open → get(all_ids) → decode/transform → close
//!     │
//!     ▼
//! 每次抓取独立的 prometheus::Registry → TextEncoder
//! ```

mod engine;
mod registry;

pub use engine::{CollectionEngine, ScrapeError, ScrapeReport};
pub use registry::{MetricsRegistry, RegistryError, SCRAPE_DURATION_METRIC, SCRAPE_SUCCESS_METRIC};
