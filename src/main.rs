use clap::Parser;
use flexi_logger::{FileSpec, Logger, WriteMode};
use lib_ewn::prelude::*;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let options = AgentOptions::parse();

    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or_else(|| "info".into()).as_str())?
        .log_to_file(FileSpec::default().basename(format!("ewn-{}", options.variant_name)))
        .write_mode(WriteMode::BufferAndFlush)
        .start()?;

    let config = options.search_config();
    let mut agent_loop = AgentLoop::new(std::io::stdin(), std::io::stdout(), config, options.seed);

    if let Err(e) = agent_loop.run() {
        log::error!("fatal error: {e}");
        return Err(e);
    }
    Ok(())
}
