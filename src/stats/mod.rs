use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::PipelineReport;

#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub capture_failures: usize,
    pub bytes_downloaded: usize,
    pub status_codes: HashMap<u16, usize>,
    pub average_response_time: f64, // in milliseconds
    pub sources: HashMap<String, usize>,
    pub candidates: usize,
    pub duplicates: usize,
    pub skip_reasons: HashMap<String, usize>,
    pub emitted: usize,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<RunStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(RunStats {
                start_time: Utc::now(),
                end_time: None,
                total_requests: 0,
                successful_requests: 0,
                failed_requests: 0,
                capture_failures: 0,
                bytes_downloaded: 0,
                status_codes: HashMap::new(),
                average_response_time: 0.0,
                sources: HashMap::new(),
                candidates: 0,
                duplicates: 0,
                skip_reasons: HashMap::new(),
                emitted: 0,
            })),
        }
    }

    pub fn record_request(&self, status: u16, size: usize, duration: Duration) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;

        if status < 400 {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }

        *stats.status_codes.entry(status).or_insert(0) += 1;
        stats.bytes_downloaded += size;

        let current_total = stats.average_response_time * (stats.total_requests - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_response_time = (current_total + new_duration) / stats.total_requests as f64;
    }

    /// A fetch that failed, returned an error status or an unreadable body.
    pub fn record_capture_failure(&self) {
        self.stats.write().capture_failures += 1;
    }

    pub fn record_source(&self, kind: &str) {
        *self.stats.write().sources.entry(kind.to_string()).or_insert(0) += 1;
    }

    pub fn record_report(&self, report: &PipelineReport) {
        let mut stats = self.stats.write();
        stats.candidates += report.candidates;
        stats.duplicates += report.duplicates;
        stats.emitted += report.records.len();
        for skipped in &report.skipped {
            *stats
                .skip_reasons
                .entry(skipped.reason.to_string())
                .or_insert(0) += 1;
        }
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> RunStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nExtraction Statistics:");
        println!("======================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Total Requests: {}", stats.total_requests);
        println!("Successful Requests: {}", stats.successful_requests);
        println!("Failed Requests: {}", stats.failed_requests);
        println!("Capture Failures: {}", stats.capture_failures);
        println!(
            "Data Downloaded: {:.2} MB",
            stats.bytes_downloaded as f64 / 1_000_000.0
        );
        println!(
            "Average Response Time: {:.2}ms",
            stats.average_response_time
        );

        println!("\nSources:");
        for (kind, count) in &stats.sources {
            println!("  {}: {}", kind, count);
        }

        println!("\nCandidates: {}", stats.candidates);
        println!("Duplicates: {}", stats.duplicates);
        println!("Emitted Records: {}", stats.emitted);

        if !stats.skip_reasons.is_empty() {
            println!("\nSkip Reasons:");
            for (reason, count) in &stats.skip_reasons {
                println!("  {}: {}", reason, count);
            }
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
