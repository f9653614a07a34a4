//! Registro de veredicto emitido por la CLI (id + timestamp + reporte).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskgate_core::ValidationReport;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub id: Uuid,
    pub ts: DateTime<Utc>, // metadato (no entra en el fingerprint)
    pub run: String,
    pub accepted: bool,
    pub report: ValidationReport,
}

impl VerdictRecord {
    pub fn new(run: impl Into<String>, report: ValidationReport) -> Self {
        Self { id: Uuid::new_v4(),
               ts: Utc::now(),
               run: run.into(),
               accepted: report.accepted(),
               report }
    }
}

impl fmt::Display for VerdictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.accepted { "accepted" } else { "rejected" };
        write!(f,
               "{status}: task={} run={} api_fields={} fingerprint={}",
               self.report.task, self.run, self.report.api_fields, self.report.fingerprint)?;
        for line in self.report.rejections() {
            write!(f, "\n  - {line}")?;
        }
        Ok(())
    }
}
