use crate::{
    BuildArgs,
    build::{Builder, Layout},
};

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let (mut config, base_path) = super::load_config(args.config_file.as_deref())?;

    // The command line input directory is relative to where we were started,
    // not to the config file
    if let Some(input_dir) = &args.input_dir {
        config.input_dir = if input_dir.is_relative() {
            std::env::current_dir()?.join(input_dir)
        } else {
            input_dir.clone()
        };
    }

    let layout = Layout::resolve(&config, &base_path);
    let builder = Builder::new(config, layout);

    // Every stage blocks on an external process, so run the whole build on a
    // blocking worker
    let result = tokio::task::spawn_blocking(move || builder.build()).await??;

    println!(
        "Built site archive {} ({} documents, {} asset files, {} archived files)",
        result.archive_path.display(),
        result.documents,
        result.assets,
        result.archive_entries
    );
    tracing::debug!("output directory: {}", result.output_dir.display());

    Ok(())
}
