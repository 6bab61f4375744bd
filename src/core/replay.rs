//! Two-sided consent for playing another round on the same connection.
//!
//! Each side records its own answer and the peer's. A new round starts only
//! once both agreed; there is no timeout, an unanswered request stays open.

/// One side's answer to "play again?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayChoice {
    #[default]
    Undecided,
    Agreed,
    Declined,
}

/// What the driver should do after a consent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    /// Still waiting for the other side.
    Pending,
    /// Both agreed; set up the next round.
    Ready,
    /// The local player declined; tear the connection down.
    Declined,
}

#[derive(Debug, Default)]
pub struct ReplayCoordinator {
    local: ReplayChoice,
    remote: ReplayChoice,
}

impl ReplayCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local(&self) -> ReplayChoice {
        self.local
    }

    pub fn remote(&self) -> ReplayChoice {
        self.remote
    }

    /// The local player answered.
    pub fn decide_local(&mut self, agree: bool) -> ReplayStep {
        if agree {
            self.local = ReplayChoice::Agreed;
            self.resolve()
        } else {
            self.local = ReplayChoice::Declined;
            self.remote = ReplayChoice::Undecided;
            ReplayStep::Declined
        }
    }

    /// The peer sent its consent.
    pub fn remote_agreed(&mut self) -> ReplayStep {
        self.remote = ReplayChoice::Agreed;
        self.resolve()
    }

    /// Forget both answers.
    pub fn reset(&mut self) {
        self.local = ReplayChoice::Undecided;
        self.remote = ReplayChoice::Undecided;
    }

    fn resolve(&mut self) -> ReplayStep {
        if self.local == ReplayChoice::Agreed && self.remote == ReplayChoice::Agreed {
            // both answers are consumed by the round they start
            self.reset();
            ReplayStep::Ready
        } else {
            ReplayStep::Pending
        }
    }
}
