use dashmap::DashMap;
use deploy_store::{paths, DeployTarget, Deploys, StoreBackend};
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), deploy_store::Error> {
    let deploys = Deploys::new(DashMap::<String, Value>::new());

    deploys
        .store()
        .write(&paths::site_key_path("shop"), json!("shop-key"))
        .await?;

    let targets = [
        ("shop", "master"),
        ("dev.shop", "develop"),
        ("preview.shop", "feature/checkout"),
    ];
    for (bucket, branch) in targets {
        deploys
            .set_bucket("shop", "shop-key", DeployTarget::new(bucket, branch))
            .await?;
    }

    let config = deploys.get("shop", None).await?;
    println!("deploys = {:#?}", config.deploys);

    for target in &config.deploys {
        println!(
            "archive: {}",
            paths::archive_file_name(
                &paths::unescape_from_path(&target.bucket),
                &target.branch
            )
        );
    }

    Ok(())
}
