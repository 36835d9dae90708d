//! Name escaping and the store paths this crate reads and writes.
//!
//! The hierarchical store forbids `.` inside a path segment, so site and
//! bucket names are stored with every `.` replaced by the two-character
//! sentinel `,1`. The substitution is lossy if a name legitimately
//! contains a literal `,1` — nothing guards against that.

/// Replace every `.` with the `,1` sentinel, making a site or bucket name
/// legal as a path segment.
#[must_use]
pub fn escape_for_path(name: &str) -> String {
    name.replace('.', ",1")
}

/// Replace every `,1` with `.`. Inverse of [`escape_for_path`].
#[must_use]
pub fn unescape_from_path(name: &str) -> String {
    name.replace(",1", ".")
}

/// Join `segment` onto `base` with a `/`.
#[must_use]
pub fn child_path(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}/{segment}")
    }
}

/// `<site>_<branch>` with every `/` in the branch flattened to `-`, so a
/// feature branch like `feature/x` stays a single path component.
#[must_use]
pub fn slug_for_site_branch(site: &str, branch: &str) -> String {
    format!("{site}_{}", branch.replace('/', "-"))
}

/// Archive file name for a built site variant: the site/branch slug plus
/// a `.zip` extension.
#[must_use]
pub fn archive_file_name(site: &str, branch: &str) -> String {
    format!("{}.zip", slug_for_site_branch(site, branch))
}

/// Path of the per-site secret key.
#[must_use]
pub fn site_key_path(site_name: &str) -> String {
    format!("management/sites/{}/key", escape_for_path(site_name))
}

/// Path of a site's deploy list.
#[must_use]
pub fn deploys_path(site_name: &str, key: &str) -> String {
    format!("buckets/{}/{key}/dev/deploys", escape_for_path(site_name))
}
