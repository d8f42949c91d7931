use anyhow::{anyhow, bail, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::PriceObservation;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Field formats of the Yahoo Finance daily history export.
pub mod yahoo_format {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;
    use std::str::FromStr;

    // Parses dates like "2015-01-02"
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| anyhow!("Failed to parse date '{}': {}", s, e))
    }

    // Missing quotes are exported as "null" (or left empty); those yield None,
    // as do NaN and infinities.
    pub fn parse_number(s: &str) -> Result<Option<f64>> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            return Ok(None);
        }
        f64::from_str(trimmed)
            .map(|v| v.is_finite().then_some(v))
            .map_err(|e| anyhow!("Failed to parse number '{}': {}", s, e))
    }

}

pub struct YahooCsvParser;

impl YahooCsvParser {
    // CSV Header: Date,Open,High,Low,Close,Adj Close,Volume
    // Example Row: 2015-01-02,529.549988,530.070007,524.429993,527.879990,527.879990,1324000
    pub fn load_observations_from_csv(file_path: &Path) -> Result<Vec<PriceObservation>> {
        let file = File::open(file_path).map_err(|e| anyhow!("Failed to open CSV file '{}': {}", file_path.display(), e))?;
        Self::parse_observations(BufReader::new(file))
    }

    /// Rows with a missing quote are skipped. A missing "Adj Close" column
    /// falls back to "Close".
    pub fn parse_observations<R: Read>(reader: R) -> Result<Vec<PriceObservation>> {
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut observations = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let date_str = Self::get_field(&record, &headers, "Date").ok_or_else(|| anyhow!("Missing 'Date' field in CSV record at line {}", line))?;
            let date = yahoo_format::parse_date(date_str).map_err(|e| anyhow!("Error parsing 'Date' at line {}: {}", line, e))?;

            let number = |name: &str| -> Result<Option<f64>> {
                let raw = Self::get_field(&record, &headers, name)
                    .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))?;
                yahoo_format::parse_number(raw).map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", name, line, e))
            };
            let open = number("Open")?;
            let high = number("High")?;
            let low = number("Low")?;
            let close = number("Close")?;
            let volume = number("Volume")?;
            let adjusted_close = if headers.iter().any(|h| h == "Adj Close") { number("Adj Close")? } else { close };

            let (Some(open), Some(high), Some(low), Some(close), Some(adjusted_close), Some(volume)) =
                (open, high, low, close, adjusted_close, volume)
            else {
                tracing::warn!(line, date = %date, "Skipping CSV row with missing or non-finite values");
                continue;
            };
            if volume < 0.0 {
                bail!("Negative 'Volume' at line {}: {}", line, volume);
            }

            observations.push(PriceObservation { date, open, high, low, close, adjusted_close, volume });
        }
        Ok(observations)
    }

    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers.iter().position(|header| header == name).and_then(|pos| record.get(pos))
    }
}
