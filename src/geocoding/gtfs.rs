//! Loader for GTFS `stops.txt` files.

use std::path::Path;
use tracing::{debug, warn};

use super::TransitStop;

#[derive(Debug, thiserror::Error)]
pub enum GtfsError {
    #[error("Failed to read stops file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stops file is empty")]
    Empty,

    #[error("Stops file has no '{0}' column")]
    MissingColumn(&'static str),
}

/// Load stops from a GTFS `stops.txt`.
///
/// Columns are located through the header row, so extra columns and any
/// column order are accepted. Rows whose coordinates do not parse are
/// skipped with a warning.
pub fn load_gtfs_stops<P: AsRef<Path>>(path: P) -> Result<Vec<TransitStop>, GtfsError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let stops = parse_gtfs_stops(&content)?;
    debug!(path = %path.as_ref().display(), count = stops.len(), "Loaded GTFS stops");
    Ok(stops)
}

/// Parse the contents of a GTFS `stops.txt`.
pub fn parse_gtfs_stops(content: &str) -> Result<Vec<TransitStop>, GtfsError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut records = csv_records(content).into_iter();

    let (_, header) = records.next().ok_or(GtfsError::Empty)?;
    let column = |name: &'static str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(GtfsError::MissingColumn(name))
    };

    let id_col = column("stop_id")?;
    let name_col = column("stop_name")?;
    let lat_col = column("stop_lat")?;
    let lon_col = column("stop_lon")?;

    let mut stops = Vec::new();
    for (line, fields) in records {
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or("");

        let lat = field(lat_col).parse::<f64>();
        let lon = field(lon_col).parse::<f64>();
        let (lat, lon) = match (lat, lon) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => {
                warn!(line, "Skipping stop with invalid coordinates");
                continue;
            }
        };

        // Quoted names may span lines
        let name = field(name_col).split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            warn!(line, "Skipping stop without a name");
            continue;
        }

        stops.push(TransitStop::new(field(id_col), name, lat, lon));
    }

    Ok(stops)
}

/// Split CSV text into records, each tagged with its 1-based starting line.
///
/// Honors double-quoted fields, `""` escapes and line breaks inside quotes.
/// Blank lines are skipped.
fn csv_records(content: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' => {}
            '\n' if in_quotes => {
                current.push('\n');
                line += 1;
            }
            '\n' => {
                fields.push(std::mem::take(&mut current));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            other => current.push(other),
        }
    }
    fields.push(current);
    push_record(&mut records, record_line, fields);
    records
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    if fields.iter().any(|f| !f.trim().is_empty()) {
        records.push((line, fields));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_quoted() {
        let records = csv_records(r#"12,"Raml Station, Courniche",31.2,29.8"#);
        assert_eq!(records[0].1, vec!["12", "Raml Station, Courniche", "31.2", "29.8"]);

        let records = csv_records(r#"1,"The ""Walk""",1,2"#);
        assert_eq!(records[0].1[1], r#"The "Walk""#);
    }

    #[test]
    fn test_records_track_lines() {
        let records = csv_records("a,b\r\n\r\n1,\"x\ny\"\n2,z");
        let lines: Vec<usize> = records.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![1, 3, 5]);
        assert_eq!(records[1].1, vec!["1", "x\ny"]);
    }

    #[test]
    fn test_quoted_newline_in_name() {
        let content = "stop_id,stop_name,stop_lat,stop_lon\n\
                       7,\"Sidi Gaber\nStation\",31.218117,29.941997\n\
                       8,Smouha,31.2156,29.9553\n";

        let stops = parse_gtfs_stops(content).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_id, "7");
        assert_eq!(stops[0].name, "Sidi Gaber Station");
        assert!((stops[0].lat - 31.218117).abs() < 1e-9);
        assert_eq!(stops[1].name, "Smouha");
    }

    #[test]
    fn test_parse_with_bom_and_reordered_columns() {
        let content = "\u{feff}stop_name,stop_lat,stop_lon,stop_id,zone_id\r\n\
                       Victoria Station,31.248845,29.980624,261,\r\n\
                       \"Raml Station, Courniche\",31.201157,29.898789,192,A\r\n";

        let stops = parse_gtfs_stops(content).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_id, "261");
        assert_eq!(stops[0].name, "Victoria Station");
        assert_eq!(stops[1].name, "Raml Station, Courniche");
        assert!((stops[1].lon - 29.898789).abs() < 1e-9);
        assert!(!stops[0].aliases.is_empty());
    }

    #[test]
    fn test_skips_bad_coordinates() {
        let content = "stop_id,stop_name,stop_lat,stop_lon\n\
                       1,Good,31.2,29.9\n\
                       2,Bad,north,29.9\n\
                       3,,31.0,29.0\n";

        let stops = parse_gtfs_stops(content).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "Good");
    }

    #[test]
    fn test_missing_column() {
        let err = parse_gtfs_stops("stop_id,stop_name,stop_lat\n1,A,31\n").unwrap_err();
        assert!(matches!(err, GtfsError::MissingColumn("stop_lon")));

        assert!(matches!(parse_gtfs_stops(""), Err(GtfsError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stops.txt");
        std::fs::write(&path, "stop_id,stop_name,stop_lat,stop_lon\n9,Gleem,31.23,29.95\n").unwrap();

        let stops = load_gtfs_stops(&path).unwrap();
        assert_eq!(stops[0].name, "Gleem");
    }
}
