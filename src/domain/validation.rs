// ==========================================
// EA Portal Data Core - data quality reporting
// ==========================================
// Scope: per-row diagnostics collected by the transformers
// ==========================================
// Policy: business-level malformation degrades, never aborts the
// batch; everything degraded shows up here instead.
// ==========================================

use serde::{Deserialize, Serialize};

/// Severity of one data quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueLevel {
    /// Row could not be normalized and was skipped.
    Error,
    /// Row was kept but a field is suspect.
    Warning,
    /// Row was kept; noting incompleteness only.
    Info,
}

/// One finding against one source row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 1-based data row number (header row excluded).
    pub row_number: usize,
    pub level: IssueLevel,
    pub field: String,
    pub message: String,
}

/// Batch-level summary returned next to the normalized records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub accepted: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            accepted: 0,
            issues: Vec::new(),
        }
    }

    pub fn push(&mut self, row_number: usize, level: IssueLevel, field: &str, message: String) {
        self.issues.push(ValidationIssue {
            row_number,
            level,
            field: field.to_string(),
            message,
        });
    }

    pub fn error_count(&self) -> usize {
        self.count(IssueLevel::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(IssueLevel::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(IssueLevel::Info)
    }

    fn count(&self, level: IssueLevel) -> usize {
        self.issues.iter().filter(|i| i.level == level).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_by_level() {
        let mut report = ValidationReport::new(3);
        report.push(1, IssueLevel::Error, "submission_date", "missing".to_string());
        report.push(2, IssueLevel::Info, "product", "empty".to_string());
        report.push(3, IssueLevel::Info, "version", "empty".to_string());

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.info_count(), 2);
    }
}
