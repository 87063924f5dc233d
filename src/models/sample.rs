use serde::Serialize;

const BYTES_PER_MB: f64 = (1024 * 1024) as f64;

/// 字节转二进制兆字节 (MB)
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// 一次采样记录
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    /// Unix 时间戳（秒，含小数，取自采样区间结束时刻）
    pub timestamp: f64,

    /// 目标进程 PID
    pub pid: u32,

    /// CPU 使用率（百分比，多核进程可超过 100）
    pub cpu_percent: f32,

    /// 常驻内存占物理内存比例（百分比，0-100）
    pub memory_percent: f32,

    /// 常驻内存 (MB)
    pub rss_mb: f64,

    /// 虚拟内存 (MB)
    pub virt_mb: f64,
}

impl Sample {
    pub const CSV_HEADER: &'static str = "Timestamp,PID,CPU%,Memory%,RSS,VIRT";

    /// 按 CSV_HEADER 的字段顺序编码一行
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.timestamp, self.pid, self.cpu_percent, self.memory_percent, self.rss_mb, self.virt_mb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sample {
        Sample {
            timestamp: 1700000000.25,
            pid: 4242,
            cpu_percent: 12.5,
            memory_percent: 3.2,
            rss_mb: 100.0,
            virt_mb: 512.5,
        }
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(104857600), 100.0);
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
    }

    #[test]
    fn test_csv_row_field_order() {
        let row = sample().to_csv_row();
        assert_eq!(row, "1700000000.25,4242,12.5,3.2,100,512.5");
        assert_eq!(row.split(',').count(), Sample::CSV_HEADER.split(',').count());
    }

    #[test]
    fn test_serializes_to_json_object() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["pid"], 4242);
        assert_eq!(value["rss_mb"], 100.0);
    }
}
