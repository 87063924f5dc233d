use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{OutputFormat, Sample};

/// 将全部采样记录一次性写入输出文件
///
/// 只在采样循环完整成功后调用，覆盖已存在的文件。
pub fn write_samples(path: &Path, format: OutputFormat, samples: &[Sample]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => write_csv(&mut writer, samples)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?,
        OutputFormat::Json => serde_json::to_writer_pretty(&mut writer, samples)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?,
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

fn write_csv<W: Write>(writer: &mut W, samples: &[Sample]) -> io::Result<()> {
    writeln!(writer, "{}", Sample::CSV_HEADER)?;
    for sample in samples {
        writeln!(writer, "{}", sample.to_csv_row())?;
    }
    Ok(())
}
