use std::path::PathBuf;

use clap::Parser;

use crate::models::OutputFormat;

/// Process Recorder - 单进程资源采样记录工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// 目标进程 PID
    #[arg(value_name = "PID", required_unless_present = "match_pattern")]
    pub pid: Option<u32>,

    /// 按命令行正则匹配目标进程（代替 PID）
    #[arg(
        short = 'm',
        long = "match",
        value_name = "PATTERN",
        conflicts_with = "pid"
    )]
    pub match_pattern: Option<String>,

    /// 采样时长（秒）
    #[arg(short, long, env = "RECORDER_DURATION", default_value_t = 30)]
    pub duration: u64,

    /// 采样频率（Hz）
    #[arg(short, long, env = "RECORDER_FREQUENCY", default_value_t = 10)]
    pub frequency: u32,

    /// 输出文件路径
    #[arg(
        short,
        long,
        env = "RECORDER_OUTPUT_FILE",
        default_value = "process_metrics.csv"
    )]
    pub output_file: PathBuf,

    /// 输出格式
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
}
