use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    menufit_server::main_entry().await
}
