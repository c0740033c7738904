use std::collections::BTreeMap;
use std::fmt;

/// Cumulative number of extracted objects per label.
///
/// Backed by an ordered map so the printed report is label-sorted no matter
/// what order frames were processed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCounts {
    counts: BTreeMap<String, u64>,
}

impl LabelCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &str) {
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(label, &n)| (label.as_str(), n))
    }
}

impl fmt::Display for LabelCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, n) in self.iter() {
            writeln!(f, "{}: {}", label, n)?;
        }
        Ok(())
    }
}

/// Outcome of one full extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_processed: usize,
    pub frames_skipped: usize,
    pub write_failures: usize,
    pub labels: LabelCounts,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of objects found:")?;
        write!(f, "{}", self.labels)?;
        if self.frames_skipped > 0 {
            writeln!(f, "{} frames skipped", self.frames_skipped)?;
        }
        if self.write_failures > 0 {
            writeln!(f, "{} crops failed to write", self.write_failures)?;
        }
        Ok(())
    }
}
