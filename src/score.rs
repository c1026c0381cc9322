use std::fmt;
use std::time::Duration;

/// Characters per "word" in the WPM convention.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub typed: usize,
    pub elapsed: Duration,
}

impl Score {
    pub fn new(typed: usize, elapsed: Duration) -> Self {
        Self { typed, elapsed }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Words per minute, or 0.0 when no time has passed.
    pub fn wpm(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs <= 0.0 {
            return 0.0;
        }
        (self.typed as f64 / CHARS_PER_WORD) / (secs / 60.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time: {:.1}", self.elapsed_secs())?;
        writeln!(f, "Letters: {}", self.typed)?;
        writeln!(f, "WPM: {:.1}", self.wpm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_chars_in_a_minute_is_ten_wpm() {
        let score = Score::new(50, Duration::from_secs(60));
        assert_eq!(score.wpm(), 10.0);
    }

    #[test]
    fn wpm_scales_with_time() {
        let score = Score::new(7, Duration::from_secs(3));
        assert!((score.wpm() - (7.0 / 5.0) / (3.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_elapsed_is_zero_wpm() {
        assert_eq!(Score::new(10, Duration::ZERO).wpm(), 0.0);
    }

    #[test]
    fn report_uses_one_decimal() {
        let score = Score::new(50, Duration::from_millis(60_040));
        assert_eq!(score.to_string(), "Time: 60.0\nLetters: 50\nWPM: 10.0\n");
    }
}
