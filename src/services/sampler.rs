use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use sysinfo::{Pid, ProcessesToUpdate, System, MINIMUM_CPU_UPDATE_INTERVAL};

use crate::models::{bytes_to_mb, RecorderConfig, Sample};

/// 采样器：按固定频率读取目标进程的 CPU / 内存指标
///
/// 系统总内存在构造时读取一次，之后每个周期只刷新目标进程本身。
pub struct Sampler {
    system: System,
    total_memory: u64,
}

impl Sampler {
    pub fn new() -> Self {
        let system = System::new_all();
        let total_memory = system.total_memory();
        Self { system, total_memory }
    }

    /// 运行完整的采样循环，返回按时间顺序排列的全部记录
    ///
    /// 目标进程在任何一个周期内消失都会使整次运行失败，
    /// 已采集的记录随之丢弃。
    pub fn run(&mut self, config: &RecorderConfig) -> Result<Vec<Sample>> {
        let sample_period = config.sample_period();
        let total_samples = config.total_samples();
        let pid = Pid::from_u32(config.pid);

        if sample_period < MINIMUM_CPU_UPDATE_INTERVAL {
            log::warn!(
                "⚠️  Sample period {:?} is below sysinfo's minimum CPU update interval {:?}, CPU readings may be coarse",
                sample_period,
                MINIMUM_CPU_UPDATE_INTERVAL
            );
        }

        log::info!(
            "💾 System context: {:.1} MB physical memory, {:.1} MB swap",
            bytes_to_mb(self.total_memory),
            bytes_to_mb(self.system.total_swap())
        );
        log::info!(
            "📊 Sampling PID {} for {}s at {} Hz ({} samples)",
            config.pid,
            config.duration_seconds,
            config.sample_frequency_hz,
            total_samples
        );

        let mut samples = Vec::with_capacity(total_samples as usize);

        for tick in 0..total_samples {
            let tick_start = Instant::now();

            let sample = self
                .collect_tick(pid, sample_period)
                .with_context(|| format!("sampling tick {}/{} failed", tick + 1, total_samples))?;
            samples.push(sample);

            // CPU 测量本身已占用一个周期，这里只补偿其余开销
            let elapsed = tick_start.elapsed();
            if elapsed < sample_period {
                thread::sleep(sample_period - elapsed);
            }
        }

        Ok(samples)
    }

    /// 以 interval 为测量窗口采集一条记录
    ///
    /// CPU 使用率取两次进程刷新之间的差值，即整个 interval 内的平均值；
    /// 时间戳在窗口结束后打点。
    fn collect_tick(&mut self, pid: Pid, interval: Duration) -> Result<Sample> {
        // 每个周期重新刷新进程表项，进程退出立刻暴露
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        if self.system.process(pid).is_none() {
            bail!("process {} no longer exists", pid);
        }

        thread::sleep(interval);

        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = match self.system.process(pid) {
            Some(process) => process,
            None => bail!("process {} exited during CPU measurement", pid),
        };

        let cpu_percent = process.cpu_usage();
        let rss_bytes = process.memory();
        let virt_bytes = process.virtual_memory();
        let memory_percent = if self.total_memory > 0 {
            (rss_bytes as f32 / self.total_memory as f32) * 100.0
        } else {
            0.0
        };

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the Unix epoch")?
            .as_secs_f64();

        Ok(Sample {
            timestamp,
            pid: pid.as_u32(),
            cpu_percent,
            memory_percent,
            rss_mb: bytes_to_mb(rss_bytes),
            virt_mb: bytes_to_mb(virt_bytes),
        })
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputFormat;
    use std::path::PathBuf;
    use std::process;

    fn config(pid: u32, duration_seconds: u64, sample_frequency_hz: u32) -> RecorderConfig {
        RecorderConfig {
            pid,
            duration_seconds,
            sample_frequency_hz,
            output_file: PathBuf::from("process_metrics.csv"),
            format: OutputFormat::Csv,
        }
    }

    #[test]
    fn test_records_expected_sample_count_for_live_process() {
        let cfg = config(process::id(), 1, 5);
        let samples = Sampler::new().run(&cfg).unwrap();

        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| s.pid == cfg.pid));
        assert!(samples.iter().all(|s| s.rss_mb > 0.0));
        assert!(samples
            .iter()
            .all(|s| s.timestamp.is_finite() && s.cpu_percent.is_finite()));
    }

    #[test]
    fn test_timestamps_are_monotonic_and_paced() {
        let cfg = config(process::id(), 1, 5);
        let start = Instant::now();
        let samples = Sampler::new().run(&cfg).unwrap();
        let elapsed = start.elapsed();

        assert!(samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        // 相邻时间戳间隔约等于一个采样周期 (200ms)，放宽容差
        for w in samples.windows(2) {
            let gap = w[1].timestamp - w[0].timestamp;
            assert!((0.15..0.6).contains(&gap), "inter-sample gap was {}s", gap);
        }
        assert!(elapsed >= Duration::from_millis(900), "run took {:?}", elapsed);
    }

    #[test]
    fn test_zero_duration_run_yields_no_samples() {
        let cfg = config(process::id(), 0, 10);
        let samples = Sampler::new().run(&cfg).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_dead_process_aborts_run() {
        let mut child = process::Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();
        child.kill().unwrap();
        child.wait().unwrap();

        let cfg = config(pid, 1, 5);
        assert!(Sampler::new().run(&cfg).is_err());
    }
}
