//! Cosmetic progress text
//!
//! The backend reports no progress; the panel cycles through fixed status
//! strings while the process call is in flight.

/// Cycles through status strings, wrapping around
#[derive(Debug, Clone)]
pub struct ProgressTicker {
    messages: &'static [&'static str],
    index: usize,
}

impl ProgressTicker {
    pub fn new(messages: &'static [&'static str]) -> Self {
        Self { messages, index: 0 }
    }

    /// Next string to display, or `None` when there are no strings at all
    pub fn advance(&mut self) -> Option<&'static str> {
        let message = self.messages.get(self.index).copied()?;
        self.index = (self.index + 1) % self.messages.len();
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{Locale, Messages};

    #[test]
    fn test_cycles_through_all_six_messages() {
        let messages = Messages::for_locale(Locale::Tr);
        let mut ticker = ProgressTicker::new(&messages.progress);

        let first_round: Vec<_> = (0..6).map(|_| ticker.advance().unwrap()).collect();
        assert_eq!(first_round, messages.progress.to_vec());
        assert_eq!(ticker.advance(), Some(messages.progress[0]));
    }

    #[test]
    fn test_empty_ticker() {
        let mut ticker = ProgressTicker::new(&[]);
        assert_eq!(ticker.advance(), None);
    }
}
