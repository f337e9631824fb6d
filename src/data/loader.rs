use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

use super::model::{normalize_key, Dataset, Record};

/// Outcome of one load, as sent back by the worker thread.
pub type LoadResult = Result<Dataset, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server answered with HTTP {0}")]
    Status(StatusCode),

    #[error("malformed CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Download a published sheet and parse it.
///
/// One GET, no retries. A non-success status is an error even when the
/// server sends a body along with it.
pub fn load(url: &str, timeout: Duration) -> LoadResult {
    let client = Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status));
    }

    let body = response.bytes()?;
    log::debug!("Fetched {} bytes from {url}", body.len());
    parse_csv(&body[..])
}

/// Parse a CSV export saved on disk.
pub fn load_file(path: &Path) -> LoadResult {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

/// Run [`load`] on a worker thread.
///
/// The result arrives on the returned channel; `on_done` fires right after
/// it is sent so the UI can wake up and poll. Dropping the receiver before
/// the worker finishes simply discards the result.
pub fn spawn_load<F>(url: String, timeout: Duration, on_done: F) -> Receiver<LoadResult>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load(&url, timeout);
        let _ = tx.send(result);
        on_done();
    });
    rx
}

// ---------------------------------------------------------------------------
// CSV parsing / normalization
// ---------------------------------------------------------------------------

/// CSV layout: header row with field names, one product per row.
/// Rows may be shorter or longer than the header.
///
/// Cells are decoded lossily, so a stray non-UTF-8 byte only affects its own
/// cell. `LoadError::Parse` is reserved for structural CSV failures.
pub fn parse_csv<R: Read>(reader: R) -> LoadResult {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| normalize_key(String::from_utf8_lossy(h).trim_start_matches('\u{feff}')))
        .collect();

    let mut records = Vec::new();
    let mut row = csv::ByteRecord::new();
    while reader.read_byte_record(&mut row)? {
        records.push(normalize_row(
            &headers,
            row.iter().map(String::from_utf8_lossy),
        ));
    }

    Ok(Dataset::new(headers, records))
}

/// Pair header names with cells and normalize both.
///
/// Missing trailing cells produce no field; extra cells and blank header
/// names are dropped. Never fails.
pub fn normalize_row<I, S>(headers: &[String], cells: I) -> Record
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    headers
        .iter()
        .zip(cells)
        .filter(|(key, _)| !key.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_rows() {
        let csv = " Model ,Opening-Speed , Technical-Datasheet\n\
                   Door-X , 1.2m/s ,https://example.com/x.pdf\n\
                   RD-200,0.8m/s,\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.columns, vec!["model", "opening-speed", "technical-datasheet"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].model(), Some("Door-X"));
        assert_eq!(ds.records[0].get("opening-speed"), Some("1.2m/s"));
        assert_eq!(ds.records[1].get("technical-datasheet"), Some(""));
    }

    #[test]
    fn short_row_yields_no_field_for_missing_columns() {
        let csv = "model,speed,width\nA,1\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        let r = &ds.records[0];
        assert_eq!(r.get("speed"), Some("1"));
        assert_eq!(r.get("width"), None);
        assert_eq!(r.fields().count(), 2);
    }

    #[test]
    fn extra_cells_and_blank_headers_are_dropped() {
        let csv = "model,,speed\nA,ignored,2,overflow\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        let keys: Vec<&str> = ds.records[0].fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["model", "speed"]);
    }

    #[test]
    fn rows_without_model_are_kept_in_dataset() {
        let csv = "model,speed\n,1\nB,2\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.displayable(), 1);
    }

    #[test]
    fn header_only_sheet_is_empty_dataset() {
        let ds = parse_csv("model,speed\n".as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns.len(), 2);
    }

    #[test]
    fn invalid_utf8_cell_keeps_every_row() {
        let bytes: &[u8] = b"model,notes\nGood-1,fine\nGood-2,caf\xe9\nGood-3,ok\n";
        let ds = parse_csv(bytes).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[1].model(), Some("Good-2"));
        assert_eq!(ds.records[1].get("notes"), Some("caf\u{FFFD}"));
        assert_eq!(ds.records[2].get("notes"), Some("ok"));
    }

    #[test]
    fn blank_lines_and_bom_are_skipped() {
        let bytes: &[u8] = b"\xef\xbb\xbfModel,Speed\n\nA,1\n\n\nB,2\n";
        let ds = parse_csv(bytes).unwrap();
        assert_eq!(ds.columns, vec!["model", "speed"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].model(), Some("B"));
    }

    /// Answer exactly one request with a canned response; returns its URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use std::io::Write;
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/sheet.csv")
    }

    #[test]
    fn successful_response_is_parsed() {
        let url = serve_once("200 OK", "Model,Speed\nRD-200, 1.2m/s\n");
        let ds = load(&url, Duration::from_secs(10)).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].get("speed"), Some("1.2m/s"));
    }

    #[test]
    fn error_status_is_reported_even_with_body() {
        let url = serve_once("404 Not Found", "model\nShould-Not-Load\n");
        let err = load(&url, Duration::from_secs(10)).unwrap_err();
        assert!(
            matches!(err, LoadError::Status(code) if code == StatusCode::NOT_FOUND),
            "{err}"
        );
    }

    #[test]
    fn unreachable_host_is_network_error() {
        let err = load("http://127.0.0.1:1/sheet.csv", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }

    #[test]
    fn worker_reports_failure_and_wakes_caller() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let woke = Arc::new(AtomicBool::new(false));
        let flag = woke.clone();
        let rx = spawn_load(
            "http://127.0.0.1:1/sheet.csv".into(),
            Duration::from_secs(5),
            move || flag.store(true, Ordering::SeqCst),
        );
        let result = rx.recv_timeout(Duration::from_secs(30)).unwrap();
        assert!(result.is_err());
        // on_done runs after the send; give it a moment.
        for _ in 0..100 {
            if woke.load(Ordering::SeqCst) {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(woke.load(Ordering::SeqCst));
    }
}
