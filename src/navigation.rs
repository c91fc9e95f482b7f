//! Sequential keyboard/tap navigation through the catalog.

/// Which item the cycle last landed on and which item the overlay shows.
///
/// Handlers take the state by value and hand back the next one, so the app
/// owns the only copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    cycle: Option<usize>,
    open: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    /// Enter key or a tap on the touch hint.
    Advance,
    /// Click or tap on the card at this index.
    Open(usize),
    /// Close control or backdrop click.
    Close,
    /// Escape key.
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    /// Show the overlay for `index`. `focus_card` asks the field to focus and
    /// pulse the card first (the overlay was closed when advancing).
    Open { index: usize, focus_card: bool },
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: NavigationState,
    pub effect: Option<NavEffect>,
}

impl NavigationState {
    pub fn cycle_index(&self) -> Option<usize> {
        self.cycle
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Applies `input` for a catalog of `len` items.
    pub fn apply(self, input: NavInput, len: usize) -> Transition {
        match input {
            NavInput::Advance => self.advance(len),
            NavInput::Open(index) if index < len => Self::opened(index, false),
            NavInput::Open(_) => self.unchanged(),
            NavInput::Close => self.close(),
            NavInput::Escape => {
                let effect = self.open.map(|_| NavEffect::Close);
                Transition {
                    state: Self::default(),
                    effect,
                }
            }
        }
    }

    fn advance(self, len: usize) -> Transition {
        if len == 0 {
            return self.unchanged();
        }
        let next = self.cycle.map_or(0, |index| (index + 1) % len);
        Self::opened(next, !self.is_open())
    }

    fn close(self) -> Transition {
        if !self.is_open() {
            return self.unchanged();
        }
        Transition {
            state: Self {
                cycle: self.cycle,
                open: None,
            },
            effect: Some(NavEffect::Close),
        }
    }

    fn opened(index: usize, focus_card: bool) -> Transition {
        Transition {
            state: Self {
                cycle: Some(index),
                open: Some(index),
            },
            effect: Some(NavEffect::Open { index, focus_card }),
        }
    }

    fn unchanged(self) -> Transition {
        Transition {
            state: self,
            effect: None,
        }
    }
}
