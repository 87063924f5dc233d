use anyhow::{anyhow, bail, Result};
use clap::Parser;

mod cli;
mod models;
mod services;

use cli::CommandArgs;
use models::RecorderConfig;
use services::{process_exists, resolve_target_pid, write_samples, Sampler};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandArgs::parse();
    let config = build_config(args)?;
    config.validate()?;

    if !process_exists(config.pid) {
        bail!("no running process with PID {}", config.pid);
    }

    print_banner(&config);

    let mut sampler = Sampler::new();
    let samples = sampler.run(&config)?;

    write_samples(&config.output_file, config.format, &samples)?;
    log::info!(
        "✅ Recorded {} samples to {}",
        samples.len(),
        config.output_file.display()
    );

    Ok(())
}

fn build_config(args: CommandArgs) -> Result<RecorderConfig> {
    let pid = match (args.pid, args.match_pattern) {
        (Some(pid), _) => pid,
        (None, Some(pattern)) => {
            log::info!("🔍 Resolving target process matching '{}'", pattern);
            let pid = resolve_target_pid(&pattern)
                .ok_or_else(|| anyhow!("no running process matches '{}'", pattern))?;
            log::info!("✅ Resolved '{}' to PID {}", pattern, pid);
            pid
        }
        (None, None) => bail!("either a PID or --match <PATTERN> is required"),
    };

    Ok(RecorderConfig {
        pid,
        duration_seconds: args.duration,
        sample_frequency_hz: args.frequency,
        output_file: args.output_file,
        format: args.format,
    })
}

fn print_banner(config: &RecorderConfig) {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║      Process Recorder v0.1.0                              ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!("🎯 Target PID:   {}", config.pid);
    println!("⏱  Duration:     {}s", config.duration_seconds);
    println!(
        "📈 Frequency:    {} Hz ({} samples)",
        config.sample_frequency_hz,
        config.total_samples()
    );
    println!("💾 Output:       {}", config.output_file.display());
    println!("═══════════════════════════════════════════════════════════");
}
