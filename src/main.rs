mod cmd;
pub mod conf;
pub mod pkg;
mod prelude;

use crate::prelude::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    cmd::run()?;
    Ok(())
}
