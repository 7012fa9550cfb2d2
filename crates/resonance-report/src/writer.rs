use crate::{BASE_COLUMNS, ReportError, format::format_sci};
use resonance_core::{CalibrationData, FitResult, fit::MAX_FREQ};
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

/// Number of report rows: bins strictly below [`MAX_FREQ`], ending early
/// where the shortest response curve ends.
fn row_count(data: &CalibrationData, fits: &[FitResult]) -> usize {
    let below_limit = data.freq_bins.iter().take_while(|&&f| f < MAX_FREQ).count();
    fits.iter()
        .map(|fit| fit.response.len())
        .fold(below_limit, usize::min)
}

/// Writes the report table for `data` and the fitted shapers to `out`.
pub fn write_report<W: Write>(
    out: W,
    data: &CalibrationData,
    fits: &[FitResult],
) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    let shaper_columns = fits
        .iter()
        .map(|fit| format!("{}({:.1})", fit.name(), fit.frequency));
    let header: Vec<String> = BASE_COLUMNS
        .into_iter()
        .map(str::to_string)
        .chain(shaper_columns)
        .collect();
    writer.write_record(&header)?;

    let mut record = Vec::with_capacity(header.len());
    for i in 0..row_count(data, fits) {
        record.clear();
        record.push(format!("{:.1}", data.freq_bins[i]));
        for psd in [&data.psd_x, &data.psd_y, &data.psd_z, &data.psd_sum] {
            record.push(format_sci(psd[i], 3));
        }
        record.extend(fits.iter().map(|fit| format!("{:.3}", fit.response[i])));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders the report into a string.
pub fn format_report(data: &CalibrationData, fits: &[FitResult]) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, data, fits)?;
    // only ASCII is ever written
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes the report to `path`, creating parent directories as needed.
pub fn save(
    path: impl AsRef<Path>,
    data: &CalibrationData,
    fits: &[FitResult],
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let file_error = |source| ReportError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_error)?;
    }
    let file = fs::File::create(path).map_err(file_error)?;
    write_report(BufWriter::new(file), data, fits).map_err(|err| match err {
        ReportError::Write(source) => file_error(source),
        ReportError::Csv(err) => file_error(err.into()),
        other => other,
    })
}
