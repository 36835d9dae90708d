use deploy_store::{paths, DefaultBackend, Deploys, StoreBackend};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), deploy_store::Error> {
    // default configurations publish `main` instead of `master`
    let deploys = Deploys::builder(DefaultBackend::default())
        .default_branch("main")
        .build()?;

    deploys
        .store()
        .write(&paths::site_key_path("docs.example.com"), json!("docs-key"))
        .await?;

    let config = deploys.get("docs.example.com", None).await?;
    println!("default deploys = {:?}", config.deploys);

    let reset = deploys.set_default("docs.example.com", "docs-key").await?;
    println!("after reset     = {:?}", reset.deploys);

    // archive name a pipeline would upload for the default target
    let target = &config.deploys[0];
    println!(
        "archive         = {}",
        paths::archive_file_name(&paths::unescape_from_path(&target.bucket), &target.branch)
    );

    println!("\nDebug output: {deploys:?}");

    Ok(())
}
