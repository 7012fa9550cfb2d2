//! Raw accelerometer recordings.
//!
//! Files hold one `time,accel_x,accel_y,accel_z` row per reading. Lines
//! starting with `#` carry the header and any other commentary.

use anyhow::{Context, Result};
use resonance_core::Sample;
use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

/// Header line written in front of generated recordings.
pub const HEADER: &str = "#time,accel_x,accel_y,accel_z";

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open samples {}", path.display()))?;
    let samples =
        read(file).with_context(|| format!("failed to read samples {}", path.display()))?;
    tracing::debug!(path = %path.display(), samples = samples.len(), "loaded recording");
    Ok(samples)
}

pub fn read<R: Read>(input: R) -> Result<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(input);

    reader
        .deserialize::<(f64, f64, f64, f64)>()
        .enumerate()
        .map(|(row, result)| {
            let (time, x, y, z) = result.with_context(|| format!("malformed sample row {row}"))?;
            Ok(Sample::new(time, x, y, z))
        })
        .collect()
}

pub fn write<W: Write>(mut out: W, samples: &[Sample]) -> Result<()> {
    writeln!(out, "{HEADER}")?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    for s in samples {
        writer.write_record([s.time, s.x, s.y, s.z].map(|v| format!("{v:.6}")))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a recording to `path`, creating parent directories as needed.
pub fn save(path: impl AsRef<Path>, samples: &[Sample]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write(std::io::BufWriter::new(file), samples)
        .with_context(|| format!("failed to write {}", path.display()))
}
