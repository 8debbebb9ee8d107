//! Report rendering.
//!
//! The reporter writes to any `io::Write`; the binary hands it stdout.

use crate::audit::AuditReport;
use crate::core::config::OutputFormat;
use crate::enumeration::SkippedKind;
use crate::validation::finding::Finding;
use serde::Serialize;
use std::io::{self, Write};

/// Renders an [`AuditReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    discovered_resources: usize,
    scanned_objects: usize,
    scanned_owner_refs: usize,
    findings: &'a [Finding],
    skipped_kinds: &'a [SkippedKind],
    ok: bool,
}

impl Reporter {
    /// Create a reporter for the given format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write the report.
    pub fn write<W: Write>(&self, report: &AuditReport, out: &mut W) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(report, out),
            OutputFormat::Json => self.write_json(report, out),
        }
    }

    /// Render the report to a string.
    pub fn render(&self, report: &AuditReport) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write(report, &mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_text<W: Write>(&self, report: &AuditReport, out: &mut W) -> io::Result<()> {
        let result = &report.result;
        writeln!(out, "Discovered {} resources", report.discovered_resources)?;
        for finding in &result.findings {
            writeln!(out, "{}", finding)?;
        }
        writeln!(out, "Scanned {} objects", result.scanned_objects)?;
        writeln!(out, "Checked {} owner references", result.scanned_owner_refs)?;
        if !report.skipped.is_empty() {
            writeln!(
                out,
                "Skipped {} resource kind(s) that could not be listed",
                report.skipped.len()
            )?;
        }

        if result.has_errors() {
            writeln!(out, "=== ERRORS FOUND ===")
        } else {
            writeln!(out, "All OK!")
        }
    }

    fn write_json<W: Write>(&self, report: &AuditReport, out: &mut W) -> io::Result<()> {
        let result = &report.result;
        let document = JsonReport {
            discovered_resources: report.discovered_resources,
            scanned_objects: result.scanned_objects,
            scanned_owner_refs: result.scanned_owner_refs,
            findings: &result.findings,
            skipped_kinds: &report.skipped,
            ok: !result.has_errors(),
        };
        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Uid;
    use crate::core::object::ObjectDescriptor;
    use crate::validation::finding::{FindingKind, ValidationResult};

    fn subject() -> ObjectDescriptor {
        ObjectDescriptor {
            api_version: "rbac.authorization.k8s.io/v1".to_string(),
            kind: "ClusterRole".to_string(),
            name: "reader".to_string(),
            namespace: String::new(),
            uid: Uid::from("cr"),
            is_namespaced: false,
            owner_references: Vec::new(),
        }
    }

    fn report_with(kind: Option<FindingKind>) -> AuditReport {
        let mut result = ValidationResult {
            scanned_objects: 2,
            scanned_owner_refs: 1,
            ..ValidationResult::default()
        };
        if let Some(kind) = kind {
            result.add_finding(Finding::new(kind, &subject(), &Uid::from("rs"), None, "problem"));
        }
        AuditReport {
            discovered_resources: 2,
            skipped: Vec::new(),
            result,
        }
    }

    #[test]
    fn test_text_clean() {
        let text = Reporter::new(OutputFormat::Text).render(&report_with(None)).unwrap();
        assert_eq!(
            text,
            "Discovered 2 resources\nScanned 2 objects\nChecked 1 owner references\nAll OK!\n"
        );
    }

    #[test]
    fn test_text_with_error() {
        let report = report_with(Some(FindingKind::CrossScopeOwnership));
        let text = Reporter::default().render(&report).unwrap();
        assert!(text.contains("ERROR: problem\n"));
        assert!(text.ends_with("=== ERRORS FOUND ===\n"));
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_text_info_only_is_ok() {
        let report = report_with(Some(FindingKind::DanglingOwner));
        let text = Reporter::default().render(&report).unwrap();
        assert!(text.contains("INFO: problem\n"));
        assert!(text.ends_with("All OK!\n"));
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_text_mentions_skipped_kinds() {
        let mut report = report_with(None);
        report.skipped.push(SkippedKind {
            gvk: "v1, Kind=Secret".to_string(),
            error: "forbidden".to_string(),
        });
        let text = Reporter::default().render(&report).unwrap();
        assert!(text.contains("Skipped 1 resource kind(s)"));
    }

    #[test]
    fn test_json() {
        let report = report_with(Some(FindingKind::StaleOwnerMetadata));
        let text = Reporter::new(OutputFormat::Json).render(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["ok"], false);
        assert_eq!(value["discovered_resources"], 2);
        assert_eq!(value["findings"][0]["category"], "StaleOwnerMetadata");
        assert_eq!(value["findings"][0]["severity"], "error");
        assert_eq!(value["findings"][0]["subject"]["kind"], "ClusterRole");
        assert!(value["findings"][0].get("owner").is_none());
    }
}
