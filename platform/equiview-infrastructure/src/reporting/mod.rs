use equiview_domain::services::charts::{DrawdownPoint, HistogramBin, MergedPoint};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<(), String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|err| format!("failed to serialize {}: {}", path.display(), err))?;
    let mut file = fs::File::create(path)
        .map_err(|err| format!("failed to create {}: {}", path.display(), err))?;
    file.write_all(json.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|err| format!("failed to write {}: {}", path.display(), err))
}

pub fn write_merged_csv(path: &Path, symbols: &[&str], rows: &[MergedPoint]) -> Result<(), String> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create merged csv {}: {}", path.display(), err))?;

    let mut header = Vec::with_capacity(symbols.len() + 1);
    header.push("timestamp");
    header.extend_from_slice(symbols);
    wtr.write_record(&header)
        .map_err(|err| format!("failed to write merged csv header: {}", err))?;

    for row in rows {
        let mut record = Vec::with_capacity(symbols.len() + 1);
        record.push(row.timestamp.clone());
        for symbol in symbols {
            record.push(row.get(symbol).map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&record)
            .map_err(|err| format!("failed to write merged row: {}", err))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush merged csv: {}", err))
}

pub fn write_drawdown_csv(path: &Path, points: &[DrawdownPoint]) -> Result<(), String> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create drawdown csv {}: {}", path.display(), err))?;
    wtr.write_record(["timestamp", "drawdown", "equity"])
        .map_err(|err| format!("failed to write drawdown csv header: {}", err))?;

    for point in points {
        wtr.write_record([
            point.timestamp.clone(),
            point.drawdown.to_string(),
            point.equity.to_string(),
        ])
        .map_err(|err| format!("failed to write drawdown row: {}", err))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush drawdown csv: {}", err))
}

pub fn write_distribution_csv(path: &Path, bins: &[HistogramBin]) -> Result<(), String> {
    let mut wtr = csv::Writer::from_path(path).map_err(|err| {
        format!("failed to create distribution csv {}: {}", path.display(), err)
    })?;
    wtr.write_record(["range", "count", "percentage"])
        .map_err(|err| format!("failed to write distribution csv header: {}", err))?;

    for bin in bins {
        wtr.write_record([
            bin.range.clone(),
            bin.count.to_string(),
            bin.percentage.to_string(),
        ])
        .map_err(|err| format!("failed to write distribution row: {}", err))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush distribution csv: {}", err))
}
