//! Clickwork Audit - Analytics over the append-only economy log
//!
//! The engine records every balance-affecting event as an
//! [`EconomyEntry`](clickwork_core::EconomyEntry); this crate is the read
//! side:
//!
//! - **Auditor**: aggregate reports and filtered queries over log entries
//! - **Exporter**: render the log as RON, CSV, text, or JSON (behind the
//!   `serde_json` feature)
//!
//! # Example
//!
//! ```rust,ignore
//! use clickwork_audit::{Auditor, LedgerQuery};
//! use clickwork_core::EntryKind;
//!
//! let entries = store.all_logs()?;
//! let auditor = Auditor::new(&entries);
//! println!("{}", auditor.report());
//!
//! let passive = auditor.query(&LedgerQuery::new().by_kind(EntryKind::PassiveIncome));
//! ```

mod auditor;
mod error;
mod exporter;

pub use auditor::{Auditor, LedgerQuery, LedgerReport, PlayerFlow};
pub use error::{Error, Result};
pub use exporter::{ExportFormat, Exporter};
