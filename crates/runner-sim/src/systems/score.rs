//! Run score: a counter driven by a fixed-period clock while the run is active.

use runner_core::constants::SCORE_TICK_SECS;
use runner_core::state::ScoreView;

#[derive(Debug, Clone, Default)]
pub struct ScoreClock {
    pub elapsed_secs: f64,
    pub score: u64,
}

impl ScoreClock {
    pub fn advance(&mut self, dt: f64) {
        self.elapsed_secs += dt.max(0.0);
        // Small slack so exact multiples of the period are not lost to rounding.
        self.score = ((self.elapsed_secs + 1e-9) / SCORE_TICK_SECS).floor() as u64;
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            elapsed_display: format_elapsed(self.elapsed_secs),
        }
    }
}

/// `h:m:s:d`: hours, minutes, seconds and tenths.
pub fn format_elapsed(secs: f64) -> String {
    let total_ms = (secs.max(0.0) * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1000) % 60;
    let tenths = (total_ms % 1000) / 100;
    format!("{hours}:{minutes}:{seconds}:{tenths}")
}
