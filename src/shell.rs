use tracing::debug;

/// A search carried from the shell to the home page. The token is unique for
/// the life of the process so the receiver can consume each handoff once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHandoff {
    pub token: u64,
    pub query: String,
}

/// The global search bar. Its buffer is independent of any page's state.
#[derive(Debug, Default)]
pub struct NavShell {
    buffer: String,
    next_token: u64,
}

impl NavShell {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Hand the buffered query off and clear the buffer. Blank input yields
    /// nothing and leaves the buffer untouched.
    pub fn submit(&mut self) -> Option<SearchHandoff> {
        let query = self.buffer.trim();
        if query.is_empty() {
            debug!("Ignoring blank search submission");
            return None;
        }
        self.next_token += 1;
        let handoff = SearchHandoff {
            token: self.next_token,
            query: query.to_string(),
        };
        self.buffer.clear();
        Some(handoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn typed(text: &str) -> NavShell {
        let mut shell = NavShell::default();
        for c in text.chars() {
            shell.push(c);
        }
        shell
    }

    #[test]
    fn test_submit_hands_off_and_clears() {
        let mut shell = typed("  mountains ");
        let handoff = shell.submit().unwrap();
        assert_eq!(handoff.query, "mountains");
        assert_eq!(shell.buffer(), "");
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut shell = typed("a");
        let first = shell.submit().unwrap();
        shell.push('a');
        let second = shell.submit().unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(first.query, second.query);
    }

    #[test]
    fn test_editing() {
        let mut shell = typed("cats");
        shell.pop();
        assert_eq!(shell.buffer(), "cat");
        shell.clear();
        assert!(shell.submit().is_none());
    }

    proptest! {
        #[test]
        fn test_blank_submissions_never_hand_off(blank in "[ \t\n]{0,12}") {
            let mut shell = typed(&blank);
            prop_assert!(shell.submit().is_none());
            prop_assert_eq!(shell.buffer(), blank.as_str());
        }
    }
}
