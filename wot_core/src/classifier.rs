//! WOT interval classification.
//!
//! Two states: not at WOT, and at WOT since some onset time. A row enters WOT
//! when its throttle signal is at or above the threshold and leaves it as soon
//! as the signal drops below. Within an excursion, rows younger than the
//! enrichment settling time (measured from the onset row) are dropped.

use wot_config::LogRecord;

use crate::config::ClassifierCfg;
use crate::error::TunerError;
use crate::sample::{ColumnMap, LogSample};

/// How a single row was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Throttle below the WOT threshold.
    Idle,
    /// At WOT, but still inside the enrichment transient.
    Settling,
    /// At WOT and settled; usable for averaging.
    Eligible,
}

#[derive(Debug, Clone)]
pub struct WotClassifier {
    cfg: ClassifierCfg,
    onset_s: Option<f64>,
}

impl WotClassifier {
    pub fn new(cfg: ClassifierCfg) -> Self {
        Self { cfg, onset_s: None }
    }

    /// Advance the state machine by one row.
    pub fn classify(&mut self, time_s: f64, throttle_v: f64) -> Verdict {
        let at_wot = throttle_v >= self.cfg.wot_volt;
        if !at_wot {
            if let Some(onset) = self.onset_s.take() {
                tracing::debug!(onset_s = onset, end_s = time_s, "WOT excursion ended");
            }
            return Verdict::Idle;
        }

        let onset = *self.onset_s.get_or_insert_with(|| {
            tracing::debug!(onset_s = time_s, "WOT onset");
            time_s
        });
        if time_s - onset >= self.cfg.accel_enrich_s {
            Verdict::Eligible
        } else {
            Verdict::Settling
        }
    }

    /// True when `sample` should be accumulated.
    pub fn admit(&mut self, sample: &LogSample) -> bool {
        self.classify(sample.time_s, sample.throttle_v) == Verdict::Eligible
    }

    pub fn is_wot(&self) -> bool {
        self.onset_s.is_some()
    }

    /// Onset time of the current excursion, if at WOT.
    pub fn onset(&self) -> Option<f64> {
        self.onset_s
    }
}

/// Counters collected while classifying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyStats {
    pub rows: usize,
    pub wot_rows: usize,
    pub settling_dropped: usize,
    pub emitted: usize,
    pub excursions: usize,
}

/// Lazy adapter turning raw log records into eligible samples.
///
/// Yields `Err` once on the first row that cannot be parsed and then stops.
pub struct WotSamples<'c, I> {
    records: I,
    columns: &'c ColumnMap,
    classifier: WotClassifier,
    stats: ClassifyStats,
    failed: bool,
}

impl<'c, I> WotSamples<'c, I> {
    pub fn new(records: I, columns: &'c ColumnMap, cfg: ClassifierCfg) -> Self {
        Self {
            records,
            columns,
            classifier: WotClassifier::new(cfg),
            stats: ClassifyStats::default(),
            failed: false,
        }
    }

    pub fn stats(&self) -> ClassifyStats {
        self.stats
    }
}

impl<'c, 'r, I> Iterator for WotSamples<'c, I>
where
    I: Iterator<Item = &'r LogRecord>,
{
    type Item = Result<LogSample, TunerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for record in self.records.by_ref() {
            let sample = match self.columns.parse(record) {
                Ok(s) => s,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.stats.rows += 1;
            let was_wot = self.classifier.is_wot();
            let verdict = self.classifier.classify(sample.time_s, sample.throttle_v);
            if verdict != Verdict::Idle {
                self.stats.wot_rows += 1;
                if !was_wot {
                    self.stats.excursions += 1;
                }
            }
            match verdict {
                Verdict::Idle => {}
                Verdict::Settling => self.stats.settling_dropped += 1,
                Verdict::Eligible => {
                    self.stats.emitted += 1;
                    return Some(Ok(sample));
                }
            }
        }
        None
    }
}

/// Classify `records` lazily using `columns` to parse each row.
pub fn wot_samples<'c, 'r, I>(
    records: I,
    columns: &'c ColumnMap,
    cfg: ClassifierCfg,
) -> WotSamples<'c, I::IntoIter>
where
    I: IntoIterator<Item = &'r LogRecord>,
{
    WotSamples::new(records.into_iter(), columns, cfg)
}
