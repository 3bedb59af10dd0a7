//! Hide/show timing of the message card and the typewriter reveal.

use std::collections::VecDeque;

/// Default pause between hiding a message and showing the next one.
pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 300;

const ENTER_MS: u64 = 600;
const LEAVE_MS: u64 = 300;

const TYPEWRITER_STEPS: u64 = 40;
const TYPEWRITER_MS: u64 = 3500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessagePhase {
    #[default]
    Hidden,
    Visible,
}

/// Timer driving the message card.
///
/// Every tap hides the card and schedules one advance after the delay.
/// Taps during a pending transition queue further advances.
#[derive(Debug, Clone)]
pub struct MessageTransition {
    phase: MessagePhase,
    shown: bool,
    delay_ms: u64,
    pending: VecDeque<u64>,
    changed_at_ms: u64,
}

impl Default for MessageTransition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_DELAY_MS)
    }
}

impl MessageTransition {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            phase: MessagePhase::Hidden,
            shown: false,
            delay_ms,
            pending: VecDeque::new(),
            changed_at_ms: 0,
        }
    }

    /// Hide the card and schedule the next message.
    pub fn request(&mut self, now_ms: u64) {
        if self.phase == MessagePhase::Visible {
            self.changed_at_ms = now_ms;
        }
        self.phase = MessagePhase::Hidden;
        self.pending.push_back(now_ms.saturating_add(self.delay_ms));
    }

    /// Number of scheduled advances that are due at `now_ms`.
    ///
    /// When at least one fired the card becomes visible.
    pub fn poll(&mut self, now_ms: u64) -> usize {
        let mut fired = 0;
        while self.pending.front().is_some_and(|&due| due <= now_ms) {
            self.pending.pop_front();
            fired += 1;
        }
        if fired > 0 {
            self.phase = MessagePhase::Visible;
            self.shown = true;
            self.changed_at_ms = now_ms;
        }
        fired
    }

    /// Drop every pending advance.
    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    pub fn phase(&self) -> MessagePhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether any message has been shown yet.
    pub fn has_shown(&self) -> bool {
        self.shown
    }

    /// Milliseconds since the card last changed phase.
    pub fn phase_elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.changed_at_ms)
    }

    /// Card visibility in `0.0..=1.0`, easing in over 600 ms and out over 300 ms.
    pub fn reveal(&self, now_ms: u64) -> f32 {
        let elapsed = self.phase_elapsed_ms(now_ms);
        match self.phase {
            MessagePhase::Visible => (elapsed as f32 / ENTER_MS as f32).min(1.0),
            MessagePhase::Hidden if self.shown => {
                1.0 - (elapsed as f32 / LEAVE_MS as f32).min(1.0)
            }
            MessagePhase::Hidden => 0.0,
        }
    }
}

/// Prefix of `text` shown `elapsed_ms` after the message appeared.
///
/// Reveals in 40 discrete steps over 3.5 s, counted in characters.
pub fn typewriter_prefix(text: &str, elapsed_ms: u64) -> &str {
    let step = (elapsed_ms * TYPEWRITER_STEPS / TYPEWRITER_MS).min(TYPEWRITER_STEPS);
    let total = text.chars().count() as u64;
    let visible = (total * step / TYPEWRITER_STEPS) as usize;
    match text.char_indices().nth(visible) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay_only() {
        let mut t = MessageTransition::new(300);
        t.request(1000);
        assert_eq!(t.phase(), MessagePhase::Hidden);
        assert_eq!(t.poll(1299), 0);
        assert!(!t.has_shown());
        assert_eq!(t.poll(1300), 1);
        assert_eq!(t.phase(), MessagePhase::Visible);
        assert!(t.has_shown());
        assert!(!t.is_pending());
    }

    #[test]
    fn test_huge_delay_saturates() {
        let mut t = MessageTransition::new(u64::MAX);
        t.request(1000);
        assert_eq!(t.poll(1000), 0);
        assert_eq!(t.poll(u64::MAX - 1), 0);
        assert!(t.is_pending());
        assert_eq!(t.poll(u64::MAX), 1);
    }

    #[test]
    fn test_rapid_taps_queue_advances() {
        let mut t = MessageTransition::new(300);
        t.request(0);
        t.request(100);
        assert_eq!(t.poll(350), 1);
        assert_eq!(t.poll(400), 1);
        assert_eq!(t.poll(5000), 0);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut t = MessageTransition::new(300);
        t.request(0);
        t.cancel();
        assert_eq!(t.poll(10_000), 0);
        assert_eq!(t.phase(), MessagePhase::Hidden);
    }

    #[test]
    fn test_reveal_eases() {
        let mut t = MessageTransition::new(300);
        assert_eq!(t.reveal(0), 0.0);
        t.request(0);
        t.poll(300);
        assert_eq!(t.reveal(300), 0.0);
        assert!((t.reveal(600) - 0.5).abs() < 1e-6);
        assert_eq!(t.reveal(2000), 1.0);

        t.request(2000);
        assert_eq!(t.reveal(2000), 1.0);
        assert_eq!(t.reveal(2300), 0.0);
    }

    #[test]
    fn test_typewriter_grows_to_full_text() {
        let text = "Como la lluvia que cae suavemente";
        let mut last = 0;
        for ms in (0..=4000).step_by(50) {
            let prefix = typewriter_prefix(text, ms);
            assert!(text.starts_with(prefix));
            let len = prefix.chars().count();
            assert!(len >= last);
            last = len;
        }
        assert_eq!(typewriter_prefix(text, 0), "");
        assert_eq!(typewriter_prefix(text, 3500), text);
    }

    #[test]
    fn test_typewriter_respects_char_boundaries() {
        let text = "atardeceres, conociéndonos, más";
        for ms in (0..=3500).step_by(10) {
            // Slicing would panic on a non-boundary.
            let _ = typewriter_prefix(text, ms);
        }
        assert_eq!(typewriter_prefix("", 1000), "");
    }
}
