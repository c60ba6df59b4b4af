#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use uptime_charts::models::{FetchResult, LocationSeries, Measurement};

/// Serve `requests` identical responses on an ephemeral local port; returns the URL.
pub fn serve(status: u16, body: &str, requests: usize) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let body = body.to_string();
    std::thread::spawn(move || {
        for _ in 0..requests {
            let Ok(req) = server.recv() else { return };
            let resp = tiny_http::Response::from_string(body.clone()).with_status_code(status);
            let _ = req.respond(resp);
        }
    });
    format!("http://{addr}/api/isitup")
}

/// One series per location, `days` daily samples ending at `now`.
pub fn fetch_result(locs: &[&str], days: i64, now: DateTime<Utc>) -> FetchResult {
    FetchResult {
        data: locs
            .iter()
            .enumerate()
            .map(|(k, loc)| LocationSeries {
                loc: loc.to_string(),
                data: (0..days)
                    .map(|i| Measurement {
                        time: now - Duration::days(i),
                        transfer: 1000.0 + (k as f64) * 100.0 + i as f64,
                        connect: 50.0 + (k as f64) * 10.0 + i as f64,
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub fn to_json(result: &FetchResult) -> String {
    serde_json::to_string(result).unwrap()
}
