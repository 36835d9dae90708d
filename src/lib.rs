//! Deploy-configuration store over a hierarchical key-value backend.
//!
//! Maps a site name to an ordered list of (bucket, branch) deploy
//! targets used by a static-site deployment pipeline. Pick a backend
//! (ShardMap, `RwLock<HashMap>`, DashMap, or your own remote store) and
//! the store handles site-key lookup, bucket-name escaping, and the
//! deploy-list merge rules.
//!
//! ```rust,no_run
//! use deploy_store::{DefaultBackend, DeployTarget, Deploys};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), deploy_store::Error> {
//! let deploys = Deploys::new(DefaultBackend::default());
//! deploys
//!     .set("mysite", "site-key", &[DeployTarget::new("mysite", "master")])
//!     .await?;
//! let config = deploys.get("mysite", Some("site-key")).await?;
//! println!("{:?}", config.deploys);
//! # Ok(())
//! # }
//! ```
//!
//! **Last write wins.** There is no compare-and-swap at the store
//! boundary: two concurrent upserts against the same site can read the
//! same list and each write their own merge. Serialize writers per site
//! if that matters.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod deploy;
pub mod error;
pub mod paths;
pub mod store;

pub use backend::StoreBackend;
pub use deploy::{DeployList, DeployTarget, SiteConfig};
pub use error::{Error, Result};
pub use store::{Deploys, DeploysBuilder, DEFAULT_BRANCH};

/// Default backend: ShardMap keyed by full store path.
pub type DefaultBackend = shardmap::ShardMap<String, serde_json::Value>;
