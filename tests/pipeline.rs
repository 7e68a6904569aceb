//! End-to-end: serve a CSV over loopback HTTP, then load, split, size and explore it.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use tabular_eda::{
    conduct_eda_with, load_dataset, power_analysis, split_data, EdaOptions, FigureCollector,
    LoaderError, SplitOptions,
};

/// Serve one HTTP response on a loopback port; returns the base URL.
fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{}", addr)
}

/// 100 rows of [f1, f2, f3, label], label a deterministic function of the features.
fn hundred_row_csv() -> String {
    let mut csv = String::from("f1,f2,f3,label\n");
    for i in 0..100 {
        let f1 = i as f64 * 0.5;
        let f2 = ((i * 7) % 13) as f64;
        let f3 = (i as f64 / 10.0).cos();
        let label = 2.0 * f1 - f2 + 3.0 * f3;
        csv.push_str(&format!("{},{},{},{}\n", f1, f2, f3, label));
    }
    csv
}

#[test]
fn load_split_and_explore() {
    let base = serve_once("200 OK", hundred_row_csv());
    let dataset = load_dataset(&format!("{}/dataset.csv", base)).unwrap();

    assert_eq!(dataset.shape(), (100, 4));
    assert_eq!(dataset.column_names(), vec!["f1", "f2", "f3", "label"]);

    let split = split_data(&dataset, SplitOptions::default()).unwrap();
    assert_eq!(split.train_features.shape(), (70, 3));
    assert_eq!(split.test_features.shape(), (30, 3));
    assert_eq!(split.train_labels.len(), 70);
    assert_eq!(split.test_labels.len(), 30);

    let again = split_data(&dataset, SplitOptions::default()).unwrap();
    assert_eq!(split.test_indices, again.test_indices);

    let (train_x, test_x, train_y, test_y) = split.into_parts();
    assert_eq!(train_x.height() + test_x.height(), 100);
    assert_eq!(train_y.name().as_str(), "label");
    assert_eq!(test_y.name().as_str(), "label");

    let mut sink = FigureCollector::new();
    let report = conduct_eda_with(&dataset, &EdaOptions::default(), &mut sink).unwrap();
    assert_eq!(report.missing_values, 0);
    assert_eq!(report.summary.columns.len(), 4);
    assert_eq!(sink.figures.len(), 2);
    assert!(sink.figures.iter().all(|f| f.svg.contains("<svg")));
}

#[test]
fn power_analysis_for_seven_predictors() {
    let sample_size = power_analysis(0.15, 0.05, 0.8, 7).unwrap();

    assert!(sample_size.is_finite());
    assert!(sample_size > 0.0);
    // Standard tables give N = 103 for this configuration
    assert!((sample_size - 103.0).abs() < 2.0, "got {}", sample_size);
}

#[test]
fn not_found_is_an_error() {
    let base = serve_once("404 Not Found", "missing".to_string());
    let err = load_dataset(&format!("{}/missing.csv", base)).unwrap_err();

    assert!(matches!(err, LoaderError::Status(status) if status.as_u16() == 404));
    assert!(err.to_string().starts_with("Error loading dataset"));
}

#[test]
fn empty_body_is_an_error() {
    let base = serve_once("200 OK", String::new());
    assert!(load_dataset(&format!("{}/empty.csv", base)).is_err());
}

#[test]
fn ragged_csv_is_an_error() {
    let base = serve_once("200 OK", "f1,f2,label\n1,2,3\n4,5,6,7\n".to_string());
    let err = load_dataset(&format!("{}/ragged.csv", base)).unwrap_err();

    assert!(matches!(err, LoaderError::Csv(_)));
    assert!(err.to_string().starts_with("Error loading dataset"));
}
