use crate::{BASE_COLUMNS, ReportError};
use serde::Serialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub freq_bins: Vec<f64>,
    pub psd_x: Vec<f64>,
    pub psd_y: Vec<f64>,
    pub psd_z: Vec<f64>,
    pub psd_sum: Vec<f64>,
    pub shapers: Vec<ShaperColumn>,
}

/// One `name(freq)` column of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShaperColumn {
    pub name: String,
    pub frequency: f64,
    pub response: Vec<f64>,
}

impl ShaperColumn {
    fn parse_header(raw: &str) -> Result<Self, ReportError> {
        let invalid = || ReportError::InvalidShaperColumn {
            raw: raw.to_string(),
        };
        let (name, rest) = raw.split_once('(').ok_or_else(invalid)?;
        let freq = rest.strip_suffix(')').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }
        let frequency = freq.trim().parse().map_err(|_| invalid())?;
        Ok(Self {
            name: name.to_string(),
            frequency,
            response: Vec::new(),
        })
    }
}

/// Parse a report from its text form.
pub fn parse(input: &str) -> Result<Report, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());
    let mut records = reader.records();

    let header = records.next().ok_or(ReportError::MissingHeader)??;
    for (index, expected) in BASE_COLUMNS.into_iter().enumerate() {
        match header.get(index) {
            Some(found) if found == expected => {}
            found => {
                return Err(ReportError::UnexpectedColumn {
                    index,
                    found: found.unwrap_or_default().to_string(),
                    expected,
                });
            }
        }
    }
    let mut report = Report {
        shapers: header
            .iter()
            .skip(BASE_COLUMNS.len())
            .map(ShaperColumn::parse_header)
            .collect::<Result<_, _>>()?,
        ..Report::default()
    };
    let width = header.len();

    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != width {
            return Err(ReportError::FieldCount {
                line,
                expected: width,
                found: record.len(),
            });
        }
        let mut values = record.iter().enumerate().map(|(idx, raw)| {
            raw.parse::<f64>().map_err(|source| ReportError::InvalidNumber {
                line,
                column: idx + 1,
                raw: raw.to_string(),
                source,
            })
        });
        for column in [
            &mut report.freq_bins,
            &mut report.psd_x,
            &mut report.psd_y,
            &mut report.psd_z,
            &mut report.psd_sum,
        ] {
            if let Some(value) = values.next() {
                column.push(value?);
            }
        }
        for shaper in &mut report.shapers {
            if let Some(value) = values.next() {
                shaper.response.push(value?);
            }
        }
    }
    Ok(report)
}

/// Read and parse a report file.
pub fn load(path: impl AsRef<Path>) -> Result<Report, ReportError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| ReportError::File {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&input)
}
