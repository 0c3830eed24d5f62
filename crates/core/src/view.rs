//! Request-scoped view state.
//!
//! Each screen owns one `ViewState` per fetched data set: it starts out
//! `Loading`, then resolves to `Ready` or `Failed`. The tagged union replaces
//! the loading/error boolean pairs of the original screens and enforces the
//! error-banner rule: at most one error per view, cleared by the next
//! successful fetch.

/// State of one view's data fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState<T> {
    /// Fetch in flight; nothing to render yet.
    Loading,
    /// Data arrived and is ready to render.
    Ready(T),
    /// The last operation failed; the message is shown as the view's banner.
    Failed(String),
}

impl<T> ViewState<T> {
    /// Resolve the in-flight fetch with its result.
    ///
    /// A success replaces whatever was there before, including a previous
    /// error. A failure replaces previous data too: the failure happened
    /// before any state update for this cycle, so nothing stale survives.
    pub fn resolve<E: std::fmt::Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(data) => ViewState::Ready(data),
            Err(error) => ViewState::Failed(error.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// The ready data, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// The error banner text, if the last operation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_and_resolves_to_ready() {
        let mut state = ViewState::<u32>::default();
        assert!(state.is_loading());

        state.resolve::<String>(Ok(7));
        assert_eq!(state.ready(), Some(&7));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failure_sets_the_banner() {
        let mut state = ViewState::<u32>::default();
        state.resolve(Err("network unreachable"));
        assert_eq!(state.error(), Some("network unreachable"));
        assert_eq!(state.ready(), None);
    }

    #[test]
    fn successful_refetch_clears_a_prior_error() {
        let mut state = ViewState::<u32>::default();
        state.resolve(Err("boom"));
        state.resolve::<String>(Ok(1));
        assert_eq!(state.error(), None);
        assert_eq!(state.ready(), Some(&1));
    }
}
