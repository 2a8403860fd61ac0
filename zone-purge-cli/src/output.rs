//! Terminal rendering of batch events.

use zone_purge_core::{BatchEvent, BatchReport};

/// Routes human-readable output.
///
/// With `--json`, stdout is reserved for the final report and everything
/// else goes to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn note(&self, line: &str) {
        if self.json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    pub fn error(&self, line: &str) {
        eprintln!("{line}");
    }

    pub fn event(&self, event: &BatchEvent) {
        if let Some(line) = render_event(event) {
            self.note(&line);
        }
    }
}

/// Text for one event; `None` for events already covered by log lines.
pub fn render_event(event: &BatchEvent) -> Option<String> {
    match event {
        BatchEvent::Log(line) => Some(line.to_string()),
        BatchEvent::Progress(snapshot) => Some(format!("    {snapshot}")),
        BatchEvent::Outcome(_) => None,
        BatchEvent::Finished(report) => Some(render_summary(report)),
    }
}

fn render_summary(report: &BatchReport) -> String {
    let mut out = format!("Summary: {}", report.summary());
    for item in report.items.iter().filter(|i| i.outcome.is_failure()) {
        out.push_str(&format!("\n  {}: {}", item.domain, item.outcome));
    }
    out
}
