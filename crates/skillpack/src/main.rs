use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    skillpack_lib::main().await
}
