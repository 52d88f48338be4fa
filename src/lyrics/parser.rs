//! Tolerant LRC parsing.
//!
//! Real-world transcripts are full of metadata tags (`[ti:..]`, `[ar:..]`),
//! blank filler lines, and out-of-order timestamps. Anything that does not
//! look like `[mm:ss.sss]text` with non-empty text is skipped; a transcript
//! with zero usable lines parses into an empty track, not an error.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub time_ms: u64,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct LyricTrack {
    lines: Vec<LyricLine>,
}

impl LyricTrack {
    pub fn parse(raw: &str) -> Self {
        let mut lines: Vec<LyricLine> = raw.lines().filter_map(parse_line).collect();
        // Stable sort: equal timestamps keep transcript order.
        lines.sort_by_key(|l| l.time_ms);
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, idx: usize) -> Option<&LyricLine> {
        self.lines.get(idx)
    }

    /// Index of the last line whose timestamp is at or before `elapsed_ms`,
    /// or `None` when playback has not reached the first line yet.
    pub fn current_line(&self, elapsed_ms: u64) -> Option<usize> {
        let mut current = None;
        for (i, line) in self.lines.iter().enumerate() {
            if line.time_ms <= elapsed_ms {
                current = Some(i);
            } else {
                break;
            }
        }
        current
    }
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let rest = line.trim().strip_prefix('[')?;
    let close = rest.find(']')?;
    let time_ms = parse_timestamp(&rest[..close])?;
    let text = rest[close + 1..].trim();
    if text.is_empty() {
        return None;
    }
    Some(LyricLine {
        time_ms,
        text: text.to_string(),
    })
}

/// `mm:ss` with optional fractional seconds, e.g. `03:21.540`.
fn parse_timestamp(s: &str) -> Option<u64> {
    let (min, sec) = s.split_once(':')?;
    let min: u64 = min.trim().parse().ok()?;
    let sec: f64 = sec.trim().parse().ok()?;
    if !sec.is_finite() || !(0.0..60.0).contains(&sec) {
        return None;
    }
    Some(min * 60_000 + (sec * 1000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_sorts_ascending() {
        let raw = "[00:30.00]second\n[00:10.50]first\n[01:00]third";
        let track = LyricTrack::parse(raw);
        assert_eq!(track.len(), 3);
        assert_eq!(track.get(0).unwrap().text, "first");
        assert_eq!(track.get(0).unwrap().time_ms, 10_500);
        assert_eq!(track.get(1).unwrap().text, "second");
        assert_eq!(track.get(2).unwrap().time_ms, 60_000);
    }

    #[test]
    fn skips_metadata_and_malformed_lines() {
        let raw = "[ti:Some Title]\n[ar:Some Artist]\nnot a lyric\n[99]broken\n[00:05.00]real";
        let track = LyricTrack::parse(raw);
        assert_eq!(track.len(), 1);
        assert_eq!(track.get(0).unwrap().text, "real");
    }

    #[test]
    fn drops_empty_text_lines() {
        let raw = "[00:01.00]\n[00:02.00]   \n[00:03.00]kept";
        let track = LyricTrack::parse(raw);
        assert_eq!(track.len(), 1);
        assert_eq!(track.get(0).unwrap().time_ms, 3_000);
    }

    #[test]
    fn zero_valid_lines_yields_empty_track() {
        let track = LyricTrack::parse("instrumental, no lyrics at all");
        assert!(track.is_empty());
        assert_eq!(track.current_line(999_999), None);
    }

    #[test]
    fn equal_timestamps_keep_transcript_order() {
        let raw = "[00:10.00]one\n[00:10.00]two";
        let track = LyricTrack::parse(raw);
        assert_eq!(track.get(0).unwrap().text, "one");
        assert_eq!(track.get(1).unwrap().text, "two");
    }

    #[test]
    fn current_line_is_last_at_or_before() {
        let track = LyricTrack::parse("[00:10.00]a\n[00:20.00]b\n[00:30.00]c");
        assert_eq!(track.current_line(0), None);
        assert_eq!(track.current_line(9_999), None);
        assert_eq!(track.current_line(10_000), Some(0));
        assert_eq!(track.current_line(19_999), Some(0));
        assert_eq!(track.current_line(20_000), Some(1));
        assert_eq!(track.current_line(500_000), Some(2));
    }
}
