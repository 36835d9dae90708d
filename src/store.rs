//! Core deploy-configuration store and its builder.

use crate::backend::StoreBackend;
use crate::deploy::{self, DeployList, DeployTarget, SiteConfig};
use crate::error::{Error, Result};
use crate::paths::{deploys_path, escape_for_path, site_key_path};
use serde_json::Value;
use tracing::{debug, warn};

/// Branch deployed when nothing else is configured.
pub const DEFAULT_BRANCH: &str = "master";

/// Deploy-configuration store over a hierarchical key-value backend.
///
/// Generic over the backend `S`. Construct with [`new`](Self::new) for
/// the stock `master` default branch or [`builder`](Self::builder) to
/// override it.
///
/// ```rust,no_run
/// use deploy_store::{DefaultBackend, DeployTarget, Deploys};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), deploy_store::Error> {
/// let deploys = Deploys::new(DefaultBackend::default());
/// deploys
///     .set("mysite", "site-key", &[DeployTarget::new("mysite", "master")])
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Every operation is a single request/response exchange against the
/// backend — no locking, no retries, last write wins. Two concurrent
/// [`set_bucket`](Self::set_bucket) calls against the same site can read
/// the same list and each write their own merge; serialize writers per
/// site if that matters.
pub struct Deploys<S> {
    store: S,
    default_branch: String,
}

impl<S: StoreBackend> Deploys<S> {
    /// Store with the stock `master` default branch.
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Start configuring a store. Call [`.build()`](DeploysBuilder::build)
    /// when ready.
    pub fn builder(store: S) -> DeploysBuilder<S> {
        DeploysBuilder::new(store)
    }

    // ---- accessors ----

    /// The injected backend. Useful for seeding site keys or inspecting
    /// raw values in tests.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Branch used when building default configurations.
    #[must_use]
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    // ---- operations ----

    /// Resolve the per-site key stored under `management/sites/<site>/key`.
    ///
    /// A store failure, an absent path, or a value that is not a
    /// non-empty string all mean the site cannot be addressed.
    pub async fn site_key(&self, site_name: &str) -> Result<String> {
        require_non_empty("siteName", site_name)?;

        let value = self
            .store
            .read(&site_key_path(site_name))
            .await
            .map_err(|err| site_not_found(site_name, Some(&err)))?;

        match value.as_ref().and_then(Value::as_str) {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(site_not_found(site_name, None)),
        }
    }

    /// Deploy configuration for a site, looking up the site key when the
    /// caller does not supply one.
    ///
    /// A missing stored list — or one that fails validation — yields
    /// [`default_configuration`](Self::default_configuration) instead of
    /// an error.
    pub async fn get(&self, site_name: &str, key: Option<&str>) -> Result<SiteConfig> {
        require_non_empty("siteName", site_name)?;

        let key = match key {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => self.site_key(site_name).await?,
        };
        let deploys = self.deploys_for(site_name, &key).await?;
        Ok(SiteConfig {
            site_name: site_name.to_string(),
            key,
            deploys,
        })
    }

    /// Validate and write a full deploy list, escaping bucket names into
    /// path-safe form. Returns the configuration as persisted.
    pub async fn set(&self, site_name: &str, key: &str, deploys: &[DeployTarget]) -> Result<SiteConfig> {
        require_non_empty("siteName", site_name)?;
        require_non_empty("key", key)?;
        if !deploy::is_valid_deploy_list(deploys) {
            return Err(Error::Validation(
                "deploys: every target requires a non-empty bucket and branch".to_string(),
            ));
        }

        let escaped = deploy::escape_buckets(deploys);
        self.store
            .write(&deploys_path(site_name, key), serde_json::to_value(&escaped)?)
            .await?;
        debug!(site = site_name, targets = escaped.len(), "deploy list written");

        Ok(SiteConfig {
            site_name: site_name.to_string(),
            key: key.to_string(),
            deploys: escaped,
        })
    }

    /// Upsert a single target into a site's deploy list, keyed by escaped
    /// bucket name.
    ///
    /// Exactly one entry with a matching bucket is overwritten in place;
    /// zero or several matches append the target at the end instead (a
    /// duplicated bucket is ambiguous, and appending preserves the
    /// existing entries rather than guessing which one to replace).
    pub async fn set_bucket(&self, site_name: &str, key: &str, deploy: DeployTarget) -> Result<SiteConfig> {
        require_non_empty("siteName", site_name)?;
        require_non_empty("key", key)?;
        if !deploy.is_valid() {
            return Err(Error::Validation(
                "deploy: requires a non-empty bucket and branch".to_string(),
            ));
        }

        let current = self.deploys_for(site_name, key).await?;
        let merged = deploy::upsert_target(&current, deploy);
        self.set(site_name, key, &merged).await
    }

    /// Remove the single entry for `bucket` from a site's stored deploy
    /// list.
    ///
    /// Fails with [`Error::NoConfiguration`] when nothing list-shaped is
    /// stored, and with [`Error::RemovalFailed`] unless exactly one entry
    /// matches — an absent bucket and a duplicated one are both refused.
    pub async fn remove_bucket(&self, site_name: &str, key: &str, bucket: &str) -> Result<SiteConfig> {
        require_non_empty("siteName", site_name)?;
        require_non_empty("key", key)?;
        require_non_empty("bucket", bucket)?;

        let path = deploys_path(site_name, key);
        let raw = match self.store.read(&path).await? {
            Some(value @ Value::Array(_)) => value,
            _ => {
                return Err(Error::NoConfiguration(format!(
                    "no deploy list stored for site '{site_name}'"
                )))
            }
        };
        let deploys: DeployList = serde_json::from_value(raw).map_err(|_| {
            Error::RemovalFailed(format!(
                "stored deploy list for site '{site_name}' is not interpretable as targets"
            ))
        })?;

        let kept = deploy::remove_target(&deploys, bucket).ok_or_else(|| {
            Error::RemovalFailed(format!(
                "bucket '{bucket}' does not match exactly one entry in the deploy list"
            ))
        })?;

        // Written back as-is, not through `set`: surviving entries keep
        // whatever shape they had in the store.
        self.store.write(&path, serde_json::to_value(&kept)?).await?;
        debug!(site = site_name, bucket, "bucket removed from deploy list");

        Ok(SiteConfig {
            site_name: site_name.to_string(),
            key: key.to_string(),
            deploys: kept,
        })
    }

    /// Overwrite a site's deploy list with the default configuration,
    /// discarding whatever was stored.
    pub async fn set_default(&self, site_name: &str, key: &str) -> Result<SiteConfig> {
        require_non_empty("siteName", site_name)?;
        require_non_empty("key", key)?;

        let deploys = self.default_configuration(site_name);
        self.store
            .write(&deploys_path(site_name, key), serde_json::to_value(&deploys)?)
            .await?;
        debug!(site = site_name, "deploy list reset to default");

        Ok(SiteConfig {
            site_name: site_name.to_string(),
            key: key.to_string(),
            deploys,
        })
    }

    /// Default deploy list for a site: one target publishing the default
    /// branch to a bucket named after the (escaped) site.
    #[must_use]
    pub fn default_configuration(&self, site_name: &str) -> DeployList {
        vec![DeployTarget {
            bucket: escape_for_path(site_name),
            branch: self.default_branch.clone(),
        }]
    }

    // ---- internal ----

    /// The validated-or-default read shared by `get` and `set_bucket`.
    async fn deploys_for(&self, site_name: &str, key: &str) -> Result<DeployList> {
        let value = self
            .store
            .read(&deploys_path(site_name, key))
            .await
            .map_err(|err| site_not_found(site_name, Some(&err)))?;

        match value {
            None => {
                debug!(site = site_name, "no deploy list stored, using default");
                Ok(self.default_configuration(site_name))
            }
            Some(raw) => match deploy::parse_deploy_list(raw) {
                Some(deploys) => Ok(deploys),
                None => {
                    warn!(
                        site = site_name,
                        "stored deploy list failed validation, substituting default"
                    );
                    Ok(self.default_configuration(site_name))
                }
            },
        }
    }
}

impl<S> std::fmt::Debug for Deploys<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deploys")
            .field("default_branch", &self.default_branch)
            .finish_non_exhaustive()
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Validation(format!(
            "{field}: was not a non-empty string"
        )));
    }
    Ok(())
}

fn site_not_found(site_name: &str, cause: Option<&Error>) -> Error {
    match cause {
        Some(err) => Error::SiteNotFound(format!(
            "site '{site_name}' does not exist in the store: {err}"
        )),
        None => Error::SiteNotFound(format!("site '{site_name}' does not exist in the store")),
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and assembles a [`Deploys`] store.
///
/// ```rust,no_run
/// use deploy_store::{DefaultBackend, Deploys};
///
/// # fn main() -> Result<(), deploy_store::Error> {
/// let deploys = Deploys::builder(DefaultBackend::default())
///     .default_branch("main")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct DeploysBuilder<S> {
    store: S,
    default_branch: String,
}

impl<S: StoreBackend> DeploysBuilder<S> {
    fn new(store: S) -> Self {
        Self {
            store,
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Branch used by default configurations (default: `master`).
    pub fn default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }

    /// Validate the configuration and assemble the store.
    pub fn build(self) -> Result<Deploys<S>> {
        require_non_empty("defaultBranch", &self.default_branch)?;
        Ok(Deploys {
            store: self.store,
            default_branch: self.default_branch,
        })
    }
}

impl<S> std::fmt::Debug for DeploysBuilder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploysBuilder")
            .field("default_branch", &self.default_branch)
            .finish_non_exhaustive()
    }
}
