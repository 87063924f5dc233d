use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::ValueEnum;

/// 输出文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// 单次运行的采样配置（运行期间不可变）
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// 目标进程 PID
    pub pid: u32,

    /// 采样时长（秒）
    pub duration_seconds: u64,

    /// 采样频率（Hz）
    pub sample_frequency_hz: u32,

    /// 输出文件路径
    pub output_file: PathBuf,

    /// 输出格式
    pub format: OutputFormat,
}

impl RecorderConfig {
    /// 启动前校验，任何失败都在采样开始前终止运行
    pub fn validate(&self) -> Result<()> {
        if self.sample_frequency_hz == 0 {
            bail!("sample frequency must be greater than 0 Hz");
        }
        if self.pid == 0 {
            bail!("PID 0 is not a monitorable process");
        }
        Ok(())
    }

    /// 单个采样周期
    pub fn sample_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.sample_frequency_hz as f64)
    }

    /// 整个运行期产生的采样条数
    pub fn total_samples(&self) -> u64 {
        self.duration_seconds * self.sample_frequency_hz as u64
    }
}
