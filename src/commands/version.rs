use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("vtv version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
