use crate::reports;
use clap::Args;
use keyclimb::corpus;
use keyclimb::error::KfResult;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// UTF-8 text files; each one is a separate document
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: &IngestArgs, model_path: &str) -> KfResult<()> {
    let model = corpus::ingest_files(&args.files)?;
    model.save_to_file(model_path)?;
    info!("💾 Model written to {}", model_path);

    reports::print_key_usage(&model.key_usage(), model.total());
    Ok(())
}
