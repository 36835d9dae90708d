use deploy_store::{paths, DefaultBackend, DeployTarget, Deploys, StoreBackend};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), deploy_store::Error> {
    let deploys = Deploys::new(DefaultBackend::default());

    // seed the per-site key the way a management layer would
    deploys
        .store()
        .write(&paths::site_key_path("mysite"), json!("site-key"))
        .await?;

    // a fresh site reads as the default configuration
    let config = deploys.get("mysite", None).await?;
    println!("default  = {:?}", config.deploys);

    // publish a second bucket from the develop branch
    let config = deploys
        .set_bucket("mysite", "site-key", DeployTarget::new("dev.mysite", "develop"))
        .await?;
    println!("upserted = {:?}", config.deploys);

    // point the same bucket at another branch
    let config = deploys
        .set_bucket("mysite", "site-key", DeployTarget::new("dev.mysite", "staging"))
        .await?;
    println!("updated  = {:?}", config.deploys);

    // and remove it again
    let config = deploys
        .remove_bucket("mysite", "site-key", "dev.mysite")
        .await?;
    println!("removed  = {:?}", config.deploys);

    Ok(())
}
