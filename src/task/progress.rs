/// Highest value reported while the install is still running.
pub const RUNNING_CEILING: u8 = 95;
pub const COMPLETE: u8 = 100;

/// Scores one line of install output. `brew` has no machine-readable
/// progress, so any scorer is an estimate.
pub trait ProgressScorer {
    fn score(&self, line: &str) -> u8;
}

/// Keyword heuristic: downloads, pours and installs move the bar more than
/// other chatter. Matching is case-insensitive and the first rule wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordScorer;

impl ProgressScorer for KeywordScorer {
    fn score(&self, line: &str) -> u8 {
        let line = line.to_lowercase();
        if line.contains("downloading") {
            8
        } else if line.contains("pouring") || line.contains("installing") {
            12
        } else if line.contains("fetch") {
            6
        } else {
            2
        }
    }
}

impl<F> ProgressScorer for F
where
    F: Fn(&str) -> u8,
{
    fn score(&self, line: &str) -> u8 {
        self(line)
    }
}

/// Accumulates scores into a percentage that only moves forward.
#[derive(Debug)]
pub struct ProgressMeter<S> {
    scorer: S,
    value: u8,
}

impl<S: ProgressScorer> ProgressMeter<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer, value: 0 }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn observe(&mut self, line: &str) -> u8 {
        let step = self.scorer.score(line);
        self.value = self.value.saturating_add(step).min(RUNNING_CEILING);
        self.value
    }

    pub fn complete(&mut self) -> u8 {
        self.value = COMPLETE;
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_weights() {
        let scorer = KeywordScorer;
        assert_eq!(scorer.score("==> Downloading https://ghcr.io/v2/wget"), 8);
        assert_eq!(scorer.score("==> Pouring wget--1.24.5.arm64_sonoma.bottle.tar.gz"), 12);
        assert_eq!(scorer.score("==> Installing dependencies for wget"), 12);
        assert_eq!(scorer.score("==> Fetching wget"), 6);
        assert_eq!(scorer.score("/opt/homebrew/Cellar/wget/1.24.5: 92 files"), 2);
    }

    #[test]
    fn matching_ignores_case_and_first_rule_wins() {
        let scorer = KeywordScorer;
        assert_eq!(scorer.score("DOWNLOADING and installing"), 8);
        assert_eq!(scorer.score("fetched, then Installing"), 12);
    }

    #[test]
    fn meter_is_monotonic_and_capped_until_complete() {
        let mut meter = ProgressMeter::new(KeywordScorer);
        let mut last = meter.value();
        for _ in 0..40 {
            let next = meter.observe("==> Pouring bottle");
            assert!(next >= last);
            assert!(next <= RUNNING_CEILING);
            last = next;
        }
        assert_eq!(last, RUNNING_CEILING);
        assert_eq!(meter.complete(), COMPLETE);
    }

    #[test]
    fn closures_can_stand_in_for_the_heuristic() {
        let mut meter = ProgressMeter::new(|line: &str| if line.starts_with("==>") { 50 } else { 0 });
        assert_eq!(meter.observe("noise"), 0);
        assert_eq!(meter.observe("==> step"), 50);
        assert_eq!(meter.observe("==> step"), RUNNING_CEILING);
    }
}
