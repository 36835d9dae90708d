//! Deploy targets and the list merge rules applied before anything is
//! written back to the store.

use crate::paths::escape_for_path;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One (storage bucket, source branch) pairing describing where a built
/// site variant is published.
///
/// Fields default to empty strings when deserialized from raw store
/// values, so an entry with a missing field parses and then fails
/// [`is_valid`](Self::is_valid) instead of aborting the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTarget {
    /// Storage bucket the built site is published to. Human-readable form
    /// with literal `.`; escaped at the store boundary.
    #[serde(default)]
    pub bucket: String,
    /// Source branch the deploy is built from.
    #[serde(default)]
    pub branch: String,
}

impl DeployTarget {
    /// Build a target from a bucket and branch.
    pub fn new(bucket: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            branch: branch.into(),
        }
    }

    /// `true` when both fields are non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.bucket.is_empty() && !self.branch.is_empty()
    }

    /// Copy of this target with the bucket in escaped (path-safe) form.
    #[must_use]
    pub fn escaped(&self) -> DeployTarget {
        DeployTarget {
            bucket: escape_for_path(&self.bucket),
            branch: self.branch.clone(),
        }
    }
}

/// Ordered list of deploy targets for one site. Uniqueness key is the
/// escaped bucket name; insertion order is preserved for unmatched
/// entries.
pub type DeployList = Vec<DeployTarget>;

/// A site's deploy configuration as returned by every store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Human-readable site name.
    pub site_name: String,
    /// Per-site secret gating access to the stored configuration.
    pub key: String,
    /// The site's deploy targets, buckets in escaped form.
    pub deploys: DeployList,
}

/// `true` iff every entry has a non-empty bucket and branch. An empty
/// list is valid.
#[must_use]
pub fn is_valid_deploy_list(deploys: &[DeployTarget]) -> bool {
    deploys.iter().all(DeployTarget::is_valid)
}

/// Deserialize a raw store value into a deploy list, returning `None`
/// for non-lists, malformed entries, or entries failing the validity
/// check.
#[must_use]
pub fn parse_deploy_list(value: Value) -> Option<DeployList> {
    let deploys: DeployList = serde_json::from_value(value).ok()?;
    is_valid_deploy_list(&deploys).then_some(deploys)
}

/// Raw-JSON form of [`is_valid_deploy_list`] for values fresh off the
/// store.
#[must_use]
pub fn is_valid_raw_deploys(value: &Value) -> bool {
    parse_deploy_list(value.clone()).is_some()
}

/// The list as persisted: every bucket passed through
/// [`escape_for_path`].
#[must_use]
pub fn escape_buckets(deploys: &[DeployTarget]) -> DeployList {
    deploys.iter().map(DeployTarget::escaped).collect()
}

/// Upsert `deploy` into `deploys`, keyed by escaped bucket name.
///
/// Exactly one existing entry with the same escaped bucket is
/// overwritten in place. Zero matches appends at the end; several
/// matches are ambiguous, so the new entry is appended too, preserving
/// the existing entries rather than guessing which one to replace.
#[must_use]
pub fn upsert_target(deploys: &[DeployTarget], deploy: DeployTarget) -> DeployList {
    let escaped = escape_for_path(&deploy.bucket);
    let matches: Vec<usize> = deploys
        .iter()
        .enumerate()
        .filter(|(_, d)| escape_for_path(&d.bucket) == escaped)
        .map(|(index, _)| index)
        .collect();

    let mut merged = deploys.to_vec();
    match matches.as_slice() {
        [index] => merged[*index] = deploy,
        _ => merged.push(deploy),
    }
    merged
}

/// Remove the single entry whose escaped bucket equals `bucket`'s
/// escaped form. Returns `None` unless exactly one entry was removed.
#[must_use]
pub fn remove_target(deploys: &[DeployTarget], bucket: &str) -> Option<DeployList> {
    let escaped = escape_for_path(bucket);
    let kept: DeployList = deploys
        .iter()
        .filter(|d| escape_for_path(&d.bucket) != escaped)
        .cloned()
        .collect();
    (kept.len() + 1 == deploys.len()).then_some(kept)
}
