//! Navigation stack abstraction and its in-memory implementation.

use super::route::Route;

/// Stack navigation operations the screens depend on.
pub trait Navigator {
    /// Pushes `route` on top of the stack.
    fn navigate(&mut self, route: Route);

    /// Pops one level. Returns `false` when already at the bottom.
    fn go_back(&mut self) -> bool;

    /// Discards the whole stack and starts over from `route`.
    fn reset(&mut self, route: Route);

    /// The screen currently on top, if any.
    fn current(&self) -> Option<&Route>;
}

/// A navigation command emitted by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    Navigate(Route),
    GoBack,
    Reset(Route),
}

impl NavigationCommand {
    /// Performs the command against `navigator`.
    pub fn apply(self, navigator: &mut dyn Navigator) {
        match self {
            Self::Navigate(route) => navigator.navigate(route),
            Self::GoBack => {
                navigator.go_back();
            }
            Self::Reset(route) => navigator.reset(route),
        }
    }
}

/// `Vec`-backed navigator. The bottom route is never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackNavigator {
    stack: Vec<Route>,
}

impl Default for StackNavigator {
    fn default() -> Self {
        Self::new(Route::root())
    }
}

impl StackNavigator {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.stack
    }
}

impl Navigator for StackNavigator {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(route = route.name(), depth = self.stack.len() + 1, "navigate");
        self.stack.push(route);
    }

    fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            tracing::debug!("go_back at bottom of stack ignored");
            return false;
        }
        let popped = self.stack.pop();
        tracing::debug!(
            popped = popped.as_ref().map(Route::name),
            depth = self.stack.len(),
            "go_back"
        );
        true
    }

    fn reset(&mut self, route: Route) {
        tracing::debug!(route = route.name(), discarded = self.stack.len(), "reset stack");
        self.stack.clear();
        self.stack.push(route);
    }

    fn current(&self) -> Option<&Route> {
        self.stack.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_root() {
        let nav = StackNavigator::default();
        assert_eq!(nav.current(), Some(&Route::Tab));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn go_back_never_empties_the_stack() {
        let mut nav = StackNavigator::default();
        nav.navigate(Route::Camera);

        assert!(nav.go_back());
        assert!(!nav.go_back());
        assert_eq!(nav.current(), Some(&Route::Tab));
    }

    #[test]
    fn reset_discards_intermediate_screens() {
        let mut nav = StackNavigator::default();
        nav.navigate(Route::Home);
        nav.navigate(Route::Camera);
        nav.navigate(Route::Play {
            video_uri: "/tmp/practice.mp4".to_string(),
        });

        NavigationCommand::Reset(Route::Tab).apply(&mut nav);
        assert_eq!(nav.routes(), &[Route::Tab]);
    }
}
