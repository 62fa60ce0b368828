use energy_domain::{EnergyRecord, Period};
use time::Date;

/// Which commodity columns the caller asked for.
#[derive(Debug, Clone, Copy)]
pub struct ExportSelection {
    pub gas: bool,
    pub power: bool,
    /// When set, only records in this period are exported; records whose
    /// date cannot be classified are omitted.
    pub period: Option<Period>,
}

impl Default for ExportSelection {
    fn default() -> Self {
        Self {
            gas: true,
            power: true,
            period: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("export buffer error: {0}")]
    Buffer(String),
}

/// Render records as the dashboard's download format: semicolon-delimited,
/// decimal comma, header `Data;Gas;Power` (commodity columns per
/// selection). This is the inverse locale convention of the ingested
/// sheet, by design: it targets Italian spreadsheet software.
pub fn write_csv(
    records: &[EnergyRecord],
    sel: &ExportSelection,
    today: Date,
) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    let mut header = vec!["Data"];
    if sel.gas {
        header.push("Gas");
    }
    if sel.power {
        header.push("Power");
    }
    wtr.write_record(&header)?;

    for record in records {
        if let Some(period) = sel.period {
            if record.period(today) != Some(period) {
                continue;
            }
        }

        let mut row = vec![record.date.clone()];
        if sel.gas {
            row.push(decimal_comma(record.gas));
        }
        if sel.power {
            row.push(decimal_comma(record.power));
        }
        wtr.write_record(&row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

fn decimal_comma(v: f64) -> String {
    v.to_string().replace('.', ",")
}
