use crate::classify::config::ClassifierConfig;
use crate::core::alignment::AlignmentHit;

/// The two best hits seen so far at one end of a query, ranked by `matches`.
///
/// A candidate that beats the best takes its place and demotes it to second; one that
/// beats only the second replaces it. Ties keep the earlier candidate. While only one
/// slot is filled, any non-winning candidate becomes the second.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopTwo<'a> {
    best: Option<&'a AlignmentHit>,
    second: Option<&'a AlignmentHit>,
}

impl<'a> TopTwo<'a> {
    pub fn offer(&mut self, hit: &'a AlignmentHit) {
        match self.best {
            None => self.best = Some(hit),
            Some(best) if hit.matches > best.matches => {
                self.second = self.best.replace(hit);
            }
            Some(_) => match self.second {
                Some(second) if hit.matches <= second.matches => {}
                _ => self.second = Some(hit),
            },
        }
    }

    pub fn best(&self) -> Option<&'a AlignmentHit> {
        self.best
    }

    pub fn second(&self) -> Option<&'a AlignmentHit> {
        self.second
    }

    pub fn len(&self) -> usize {
        usize::from(self.best.is_some()) + usize::from(self.second.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }
}

/// One pass over the hits of a single query against a single reference
#[derive(Debug, Clone, Default)]
pub struct ChimeraScan<'a> {
    linear: bool,
    five_end: TopTwo<'a>,
    three_end: TopTwo<'a>,
}

impl<'a> ChimeraScan<'a> {
    pub fn scan<I>(hits: I, config: &ClassifierConfig) -> Self
    where
        I: IntoIterator<Item = &'a AlignmentHit>,
    {
        let mut scan = Self::default();

        for hit in hits {
            let at_five = hit.five_prime_offset() < config.end_tolerance;
            let at_three = hit.three_prime_offset() < config.end_tolerance;

            if at_five && at_three {
                scan.linear = true;
            }
            if at_five {
                scan.five_end.offer(hit);
            }
            if at_three {
                scan.three_end.offer(hit);
            }
        }

        scan
    }

    /// Some hit spans (nearly) the whole query
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    pub fn five_end(&self) -> &TopTwo<'a> {
        &self.five_end
    }

    pub fn three_end(&self) -> &TopTwo<'a> {
        &self.three_end
    }

    /// Two confident partial hits at opposite ends and no full-length one
    #[must_use]
    pub fn is_chimeric(&self, config: &ClassifierConfig) -> bool {
        !self.linear && config.check(&self.five_end) && config.check(&self.three_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alignment::test_support::hit;

    fn matches(top: &TopTwo<'_>) -> (Option<u64>, Option<u64>) {
        (
            top.best().map(|h| h.matches),
            top.second().map(|h| h.matches),
        )
    }

    #[test]
    fn test_top_two_ordering() {
        let hits = [
            hit("q", 40, 0, 50, 200),
            hit("q", 60, 0, 70, 200),
            hit("q", 50, 0, 60, 200),
            hit("q", 45, 0, 55, 200),
        ];

        let mut top = TopTwo::default();
        for h in &hits {
            top.offer(h);
        }

        assert_eq!(matches(&top), (Some(60), Some(50)));
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_top_two_lower_second_fills_empty_slot() {
        let (a, b) = (hit("q", 60, 0, 70, 200), hit("q", 10, 0, 20, 200));
        let mut top = TopTwo::default();
        top.offer(&a);
        top.offer(&b);
        assert_eq!(matches(&top), (Some(60), Some(10)));
    }

    #[test]
    fn test_top_two_ties_keep_earlier() {
        let first = hit("first", 50, 0, 60, 200);
        let tie = hit("tie", 50, 0, 60, 200);
        let runner = hit("runner", 40, 0, 60, 200);
        let runner_tie = hit("runner_tie", 40, 0, 60, 200);

        let mut top = TopTwo::default();
        top.offer(&first);
        top.offer(&runner);
        top.offer(&tie);
        top.offer(&runner_tie);

        assert_eq!(top.best().unwrap().q_name, "first");
        // The tie with best beats the runner-up, so it becomes second
        assert_eq!(top.second().unwrap().q_name, "tie");
    }

    #[test]
    fn test_empty_scan_is_not_chimeric() {
        let config = ClassifierConfig::default();
        let scan = ChimeraScan::scan(std::iter::empty(), &config);

        assert!(!scan.is_linear());
        assert!(scan.five_end().is_empty());
        assert!(scan.three_end().is_empty());
        assert!(!scan.is_chimeric(&config));
    }

    #[test]
    fn test_two_ends_make_chimera() {
        let config = ClassifierConfig::default();
        let hits = [hit("q", 95, 2, 100, 200), hit("q", 96, 101, 198, 200)];
        let scan = ChimeraScan::scan(&hits, &config);

        assert!(!scan.is_linear());
        assert_eq!(scan.five_end().len(), 1);
        assert_eq!(scan.three_end().len(), 1);
        assert!(scan.is_chimeric(&config));
    }

    #[test]
    fn test_full_length_hit_suppresses_chimera() {
        let config = ClassifierConfig::default();
        let hits = [
            hit("q", 95, 2, 100, 200),
            hit("q", 96, 101, 198, 200),
            hit("q", 40, 5, 195, 200),
        ];
        let scan = ChimeraScan::scan(&hits, &config);

        assert!(scan.is_linear());
        assert!(!scan.is_chimeric(&config));
    }

    #[test]
    fn test_end_tolerance_is_strict() {
        let config = ClassifierConfig::default();
        // 10 bases unaligned at the 5' end is too many
        let hits = [hit("q", 90, 10, 100, 200), hit("q", 96, 101, 198, 200)];
        let scan = ChimeraScan::scan(&hits, &config);

        assert!(scan.five_end().is_empty());
        assert!(!scan.is_chimeric(&config));
    }

    #[test]
    fn test_ambiguous_end_is_not_chimeric() {
        let config = ClassifierConfig::default();
        let hits = [
            hit("q", 95, 2, 100, 200),
            hit("q", 94, 0, 99, 200),
            hit("q", 96, 101, 198, 200),
        ];
        let scan = ChimeraScan::scan(&hits, &config);

        assert!(!config.check(scan.five_end()));
        assert!(!scan.is_chimeric(&config));
    }
}
