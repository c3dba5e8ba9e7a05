//! External tools used by the research pipeline
//!
//! # Module Structure
//!
//! - [`search`](crate::tools::search) - Web search provider abstraction, the Tavily
//!   client and the product-specific review / price / comparison searches
//!
//! # Example
//!
//! ```ignore
//! let provider = Arc::new(TavilyClient::from_config(&config.search)?);
//! let tools = ProductSearchTools::new(provider, &config.search);
//! let hits = tools.search_product_reviews("noise cancelling headphones").await?;
//! for hit in hits {
//!     println!("{}: {}", hit.title, hit.url);
//! }
//! ```

/// Web search via Tavily and product query templates.
pub mod search;

pub use search::{ProductSearchTools, SearchDepth, SearchHit, SearchProvider, SearchRequest, TavilyClient};
