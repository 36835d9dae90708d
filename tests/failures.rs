use async_trait::async_trait;
use deploy_store::{paths, DefaultBackend, DeployTarget, Deploys, Error, Result, StoreBackend};
use serde_json::{json, Value};

/// Backend that refuses every request, the way an unreachable or
/// unauthorized remote store would.
struct FailingBackend;

#[async_trait]
impl StoreBackend for FailingBackend {
    async fn read(&self, _path: &str) -> Result<Option<Value>> {
        Err(Error::Store("connection refused".to_string()))
    }

    async fn write(&self, _path: &str, _value: Value) -> Result<()> {
        Err(Error::Store("connection refused".to_string()))
    }
}

/// Backend that serves reads from an in-memory map but refuses writes.
struct ReadOnlyBackend(DefaultBackend);

#[async_trait]
impl StoreBackend for ReadOnlyBackend {
    async fn read(&self, path: &str) -> Result<Option<Value>> {
        self.0.read(path).await
    }

    async fn write(&self, _path: &str, _value: Value) -> Result<()> {
        Err(Error::Store("permission denied".to_string()))
    }
}

// ---- store failures coalesce into domain errors ------------------------------

#[tokio::test]
async fn site_key_store_failure_is_site_not_found() {
    let deploys = Deploys::new(FailingBackend);

    let err = deploys.site_key("mysite").await.unwrap_err();
    assert!(matches!(err, Error::SiteNotFound(_)));
}

#[tokio::test]
async fn get_store_failure_is_site_not_found() {
    let deploys = Deploys::new(FailingBackend);

    let err = deploys.get("mysite", Some("key")).await.unwrap_err();
    assert!(matches!(err, Error::SiteNotFound(_)));
}

#[tokio::test]
async fn set_bucket_read_failure_is_site_not_found() {
    let deploys = Deploys::new(FailingBackend);

    let err = deploys
        .set_bucket("mysite", "key", DeployTarget::new("bucket", "master"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SiteNotFound(_)));
}

// ---- write failures surface as store errors ----------------------------------

#[tokio::test]
async fn set_write_failure_propagates_store_error() {
    let deploys = Deploys::new(FailingBackend);

    let err = deploys
        .set("mysite", "key", &[DeployTarget::new("bucket", "master")])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn remove_bucket_read_failure_propagates_store_error() {
    let deploys = Deploys::new(FailingBackend);

    let err = deploys
        .remove_bucket("mysite", "key", "bucket")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn remove_bucket_write_failure_propagates_store_error() {
    let inner = DefaultBackend::default();
    inner
        .write(
            &paths::deploys_path("mysite", "key"),
            json!([{ "bucket": "bucket", "branch": "master" }]),
        )
        .await
        .unwrap();
    let deploys = Deploys::new(ReadOnlyBackend(inner));

    let err = deploys
        .remove_bucket("mysite", "key", "bucket")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn set_default_write_failure_propagates_store_error() {
    let deploys = Deploys::new(FailingBackend);

    let err = deploys.set_default("mysite", "key").await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

// ---- validation happens before any I/O ---------------------------------------

#[tokio::test]
async fn validation_errors_name_the_field() {
    let deploys = Deploys::new(FailingBackend);

    match deploys.get("", None).await.unwrap_err() {
        Error::Validation(msg) => assert!(msg.contains("siteName")),
        other => panic!("expected validation error, got {other:?}"),
    }
    match deploys.set("mysite", "", &[]).await.unwrap_err() {
        Error::Validation(msg) => assert!(msg.contains("key")),
        other => panic!("expected validation error, got {other:?}"),
    }
    match deploys.remove_bucket("mysite", "key", "").await.unwrap_err() {
        Error::Validation(msg) => assert!(msg.contains("bucket")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_deploy_list_is_rejected_before_io() {
    // a failing backend would turn any attempted write into Error::Store,
    // so getting Validation back proves nothing was sent
    let deploys = Deploys::new(FailingBackend);

    let err = deploys
        .set("mysite", "key", &[DeployTarget::new("", "master")])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

// ---- malformed stored values -------------------------------------------------

#[tokio::test]
async fn site_key_non_string_value_is_site_not_found() {
    let deploys = Deploys::new(DefaultBackend::default());
    deploys
        .store()
        .write(&paths::site_key_path("mysite"), json!(42))
        .await
        .unwrap();

    let err = deploys.site_key("mysite").await.unwrap_err();
    assert!(matches!(err, Error::SiteNotFound(_)));
}

#[tokio::test]
async fn site_key_empty_string_is_site_not_found() {
    let deploys = Deploys::new(DefaultBackend::default());
    deploys
        .store()
        .write(&paths::site_key_path("mysite"), json!(""))
        .await
        .unwrap();

    let err = deploys.site_key("mysite").await.unwrap_err();
    assert!(matches!(err, Error::SiteNotFound(_)));
}

#[tokio::test]
async fn remove_bucket_uninterpretable_list_fails() {
    let deploys = Deploys::new(DefaultBackend::default());
    deploys
        .store()
        .write(&paths::deploys_path("mysite", "key"), json!([42, 43]))
        .await
        .unwrap();

    let err = deploys
        .remove_bucket("mysite", "key", "bucket")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RemovalFailed(_)));
}

// ---- error formatting --------------------------------------------------------

#[test]
fn errors_display_their_kind() {
    let cases = [
        (
            Error::Validation("siteName: was not a non-empty string".to_string()),
            "validation error",
        ),
        (Error::SiteNotFound("gone".to_string()), "site not found"),
        (
            Error::NoConfiguration("nothing stored".to_string()),
            "no configuration",
        ),
        (Error::RemovalFailed("two matches".to_string()), "removal failed"),
        (Error::Store("offline".to_string()), "store error"),
    ];
    for (err, prefix) in cases {
        assert!(err.to_string().starts_with(prefix), "{err}");
    }
}
