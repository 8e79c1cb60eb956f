//! Scorecard
//!
//! Per-frame history of a game: how many pins each throw took and what the
//! frame was worth. The cumulative total is always the sum of its frames.

use serde::{Deserialize, Serialize};

use crate::consts::PIN_COUNT;

/// One completed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// 1-based frame number
    pub frame: u32,
    /// Pins taken by each throw (one entry for a strike, two otherwise)
    pub throws: Vec<u8>,
    /// Pins down when the frame closed
    pub score: u8,
}

impl FrameRecord {
    pub fn is_strike(&self) -> bool {
        self.throws.len() == 1 && self.score as usize == PIN_COUNT
    }

    pub fn is_spare(&self) -> bool {
        self.throws.len() == 2 && self.score as usize == PIN_COUNT
    }
}

/// Frame history for one game
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scorecard {
    pub frames: Vec<FrameRecord>,
    /// Throws of the frame in progress
    #[serde(default)]
    pub open: Vec<u8>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Note the pins a throw took in the current frame
    pub fn record_throw(&mut self, pins: u8) {
        self.open.push(pins);
    }

    /// Close the current frame. Returns the stored record.
    pub fn close_frame(&mut self, score: u8) -> &FrameRecord {
        let record = FrameRecord {
            frame: self.frames.len() as u32 + 1,
            throws: std::mem::take(&mut self.open),
            score,
        };
        self.frames.push(record);
        &self.frames[self.frames.len() - 1]
    }

    /// Forget the throws of the frame in progress (manual reset)
    pub fn abandon_frame(&mut self) {
        self.open.clear();
    }

    pub fn total(&self) -> u32 {
        self.frames.iter().map(|f| f.score as u32).sum()
    }

    pub fn strikes(&self) -> usize {
        self.frames.iter().filter(|f| f.is_strike()).count()
    }

    pub fn spares(&self) -> usize {
        self.frames.iter().filter(|f| f.is_spare()).count()
    }

    /// Best frame so far (earliest wins ties)
    pub fn best_frame(&self) -> Option<&FrameRecord> {
        self.frames
            .iter()
            .rev()
            .max_by_key(|f| f.score)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// One line per frame, e.g. `3: 7 2 = 9`
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for f in &self.frames {
            let throws: Vec<String> = f.throws.iter().map(|t| t.to_string()).collect();
            let mark = if f.is_strike() {
                " X"
            } else if f.is_spare() {
                " /"
            } else {
                ""
            };
            out.push_str(&format!("{:>2}: {} = {}{}\n", f.frame, throws.join(" "), f.score, mark));
        }
        out.push_str(&format!("Total: {}", self.total()));
        out
    }
}
