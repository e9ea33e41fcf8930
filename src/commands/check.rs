use std::io;

use tokio::process::Command;

use crate::CheckArgs;

pub async fn run(args: &CheckArgs) -> Result<(), anyhow::Error> {
    let (config, _base_path) = super::load_config(args.config_file.as_deref())?;

    let tools = [
        ("converter", &config.converter.program, &config.converter.args),
        ("generator", &config.generator.program, &config.generator.args),
    ];

    let mut missing = 0;
    for (role, program, launcher_args) in tools {
        match tool_version(program, launcher_args).await {
            Ok(version) => println!("{role}: {program} ({version})"),
            Err(e) => {
                tracing::warn!("{role} '{program}' is not usable: {e}");
                println!("{role}: {program} (unavailable)");
                missing += 1;
            }
        }
    }

    if missing > 0 {
        anyhow::bail!("{missing} tool(s) could not be run");
    }
    Ok(())
}

/// Run `<program> <args> --version` and return the first line it prints.
async fn tool_version(program: &str, args: &[String]) -> Result<String, io::Error> {
    let output = Command::new(program)
        .args(args)
        .arg("--version")
        .output()
        .await?;

    if !output.status.success() {
        return Err(io::Error::other(format!(
            "'{program} --version' exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or("unknown version").trim().to_string())
}
