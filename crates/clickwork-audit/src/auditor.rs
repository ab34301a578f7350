//! Auditing and analytics over the economy log

use chrono::{DateTime, Utc};
use clickwork_core::{EconomyEntry, EntryKind, PlayerId};
use std::collections::HashMap;

/// Auditor for querying and analyzing economy-log entries
pub struct Auditor<'a> {
    entries: &'a [EconomyEntry],
}

impl<'a> Auditor<'a> {
    /// Create a new auditor over a slice of log entries
    pub fn new(entries: &'a [EconomyEntry]) -> Self {
        Self { entries }
    }

    /// Generate a comprehensive ledger report
    pub fn report(&self) -> LedgerReport {
        let mut totals_by_kind: HashMap<String, i64> = HashMap::new();
        let mut counts_by_kind: HashMap<String, u64> = HashMap::new();
        let mut per_player: HashMap<i64, PlayerFlow> = HashMap::new();
        let mut income_total = 0;
        let mut spend_total = 0;
        let mut passive_total = 0;
        let mut passive_count = 0u64;
        let mut first_at = None;
        let mut last_at = None;

        for entry in self.entries {
            let tag = entry.kind.as_str().to_string();
            *totals_by_kind.entry(tag.clone()).or_insert(0) += entry.amount;
            *counts_by_kind.entry(tag).or_insert(0) += 1;

            let flow = per_player.entry(entry.player.raw()).or_default();
            if entry.amount >= 0 {
                income_total += entry.amount;
                flow.income += entry.amount;
            } else {
                spend_total += -entry.amount;
                flow.spend += -entry.amount;
            }

            if entry.kind == EntryKind::PassiveIncome {
                passive_total += entry.amount;
                passive_count += 1;
            }

            if first_at.map_or(true, |t| entry.at < t) {
                first_at = Some(entry.at);
            }
            if last_at.map_or(true, |t| entry.at > t) {
                last_at = Some(entry.at);
            }
        }

        let average_passive_accrual = if passive_count > 0 {
            passive_total as f64 / passive_count as f64
        } else {
            0.0
        };

        LedgerReport {
            total_entries: self.entries.len(),
            income_total,
            spend_total,
            net: income_total - spend_total,
            average_passive_accrual,
            totals_by_kind,
            counts_by_kind,
            per_player,
            first_at,
            last_at,
        }
    }

    /// Query entries matching specific criteria
    pub fn query(&self, query: &LedgerQuery) -> Vec<&EconomyEntry> {
        self.entries
            .iter()
            .filter(|entry| query.matches(entry))
            .collect()
    }

    /// Sum of amounts for one entry kind
    pub fn total_for_kind(&self, kind: EntryKind) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.amount)
            .sum()
    }

    /// Net flow (income minus spend) for one player
    pub fn net_for_player(&self, player: PlayerId) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.player == player)
            .map(|e| e.amount)
            .sum()
    }
}

/// Income and spend for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerFlow {
    /// Credits received
    pub income: i64,
    /// Amount spent on purchases (positive number)
    pub spend: i64,
}

impl PlayerFlow {
    /// Net flow
    pub fn net(&self) -> i64 {
        self.income - self.spend
    }
}

/// A comprehensive ledger report
#[derive(Debug, Clone)]
pub struct LedgerReport {
    /// Total number of log entries
    pub total_entries: usize,
    /// Sum of all credits
    pub income_total: i64,
    /// Sum of all debits (as a positive number)
    pub spend_total: i64,
    /// Income minus spend
    pub net: i64,
    /// Average amount of a passive-income accrual
    pub average_passive_accrual: f64,
    /// Signed totals per entry kind
    pub totals_by_kind: HashMap<String, i64>,
    /// Entry counts per kind
    pub counts_by_kind: HashMap<String, u64>,
    /// Flow per player
    pub per_player: HashMap<i64, PlayerFlow>,
    /// Earliest entry timestamp
    pub first_at: Option<DateTime<Utc>>,
    /// Latest entry timestamp
    pub last_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for LedgerReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Ledger Report ===")?;
        writeln!(f, "Total entries: {}", self.total_entries)?;
        writeln!(f, "Income: {}", self.income_total)?;
        writeln!(f, "Spend: {}", self.spend_total)?;
        writeln!(f, "Net: {}", self.net)?;
        writeln!(f, "Average passive accrual: {:.1}", self.average_passive_accrual)?;

        if let (Some(first), Some(last)) = (self.first_at, self.last_at) {
            writeln!(f, "Time range: {} - {}", first, last)?;
        }

        if !self.totals_by_kind.is_empty() {
            writeln!(f, "\nTotals by kind:")?;
            let mut sorted: Vec<_> = self.totals_by_kind.iter().collect();
            sorted.sort_by_key(|(kind, _)| kind.as_str());
            for (kind, total) in sorted {
                let count = self.counts_by_kind.get(kind).copied().unwrap_or(0);
                writeln!(f, "  {}: {} ({} entries)", kind, total, count)?;
            }
        }

        if !self.per_player.is_empty() {
            writeln!(f, "\nFlow by player:")?;
            let mut sorted: Vec<_> = self.per_player.iter().collect();
            sorted.sort_by_key(|(id, _)| **id);
            for (id, flow) in sorted {
                writeln!(
                    f,
                    "  Player {}: +{} -{} (net {})",
                    id,
                    flow.income,
                    flow.spend,
                    flow.net()
                )?;
            }
        }

        Ok(())
    }
}

/// Query criteria for filtering log entries
#[derive(Debug, Clone, Default)]
pub struct LedgerQuery {
    /// Filter by player
    pub player: Option<PlayerId>,
    /// Filter by entry kind
    pub kind: Option<EntryKind>,
    /// Earliest timestamp (inclusive)
    pub since: Option<DateTime<Utc>>,
    /// Latest timestamp (inclusive)
    pub until: Option<DateTime<Utc>>,
    /// Keep only credits
    pub income_only: bool,
}

impl LedgerQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by player
    pub fn by_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Filter by entry kind
    pub fn by_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by time range (inclusive)
    pub fn in_range(mut self, since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self.until = Some(until);
        self
    }

    /// Keep only credits
    pub fn income_only(mut self) -> Self {
        self.income_only = true;
        self
    }

    fn matches(&self, entry: &EconomyEntry) -> bool {
        if let Some(player) = self.player {
            if entry.player != player {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(since) = self.since {
            if entry.at < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if entry.at > until {
                return false;
            }
        }
        if self.income_only && !entry.is_income() {
            return false;
        }
        true
    }
}
