//! Identifier generation.
//!
//! Prompt ids are integers derived from the wall clock, but strictly
//! increasing: two prompts created in the same millisecond (or an import
//! carrying ids from the future) never share an id. Callers pass the set
//! of ids already in use, so a sequence pushed to `i64::MAX` by imported
//! data still yields unused ids.

use chrono::Utc;

/// Strictly monotonic id source for prompts and folders.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator that has not observed any ids yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id that already exists so it is never handed out again.
    pub fn observe(&mut self, id: i64) {
        if id > self.last {
            self.last = id;
        }
    }

    /// Highest id observed or generated so far.
    pub fn last(&self) -> i64 {
        self.last
    }

    /// Next prompt id not rejected by `taken`: the current millisecond, or
    /// one past the last id if the clock has not moved ahead of it.
    ///
    /// Once the sequence reaches `i64::MAX` it cannot advance any further, so
    /// the search walks down from the current millisecond to a free id.
    pub fn next_prompt_id(&mut self, taken: impl Fn(i64) -> bool) -> i64 {
        let now = Utc::now().timestamp_millis();
        let Some(next) = self.last.checked_add(1) else {
            return free_id_below(now, &taken);
        };

        let mut candidate = now.max(next);
        while taken(candidate) {
            match candidate.checked_add(1) {
                Some(c) => candidate = c,
                None => return free_id_below(now, &taken),
            }
        }
        self.last = candidate;
        candidate
    }

    /// Next folder id (`folder-<millis>-<hex>`) not rejected by `taken`.
    pub fn next_folder_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        let millis = Utc::now().timestamp_millis();
        let mut suffix = [0u8; 4];
        if let Err(e) = getrandom::getrandom(&mut suffix) {
            tracing::warn!("Random source unavailable for folder id: {}", e);
        }

        let base = format!("folder-{}-{}", millis, hex::encode(suffix));
        let mut candidate = base.clone();
        let mut attempt = 1;
        while taken(&candidate) {
            candidate = format!("{}-{}", base, attempt);
            attempt += 1;
        }
        candidate
    }
}

fn free_id_below(start: i64, taken: &impl Fn(i64) -> bool) -> i64 {
    let mut candidate = start;
    while taken(candidate) {
        candidate = candidate.wrapping_sub(1);
    }
    tracing::debug!("Prompt id sequence exhausted, using free id {}", candidate);
    candidate
}
