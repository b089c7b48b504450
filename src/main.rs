#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = jsondash_rust::run().await {
        eprintln!("jsondash fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
