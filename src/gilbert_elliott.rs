//! Gilbert-Elliott two-state Markov loss model.
//!
//! A link alternates between a good and a bad state, each with its own loss
//! probability. Loss in the bad state is usually high, which yields bursts of
//! consecutive drops instead of independent ones.

use rand::Rng;

use crate::error::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Model {
    /// Probability to transition to bad state.
    to_bad: f64,
    /// Probability to transition to good state.
    to_good: f64,
    /// Probability to lose a packet in bad state.
    bad_loss: f64,
    /// Probability to lose a packet in good state.
    good_loss: f64,
}

impl Model {
    /// Construct the model from the mean number of packets spent in each
    /// state. Sojourn lengths are geometric, so leaving a state of mean
    /// length `len` happens with probability `1 / len`.
    ///
    /// Arguments:
    ///     - good_len: Mean length of good state, at least 1
    ///     - bad_len: Mean length of bad state, at least 1
    ///     - good_loss: Probability to lose a packet in good state
    ///     - bad_loss: Probability to lose a packet in bad state
    pub fn from_mean_lengths(
        good_len: f64,
        bad_len: f64,
        good_loss: f64,
        bad_loss: f64,
    ) -> Result<Self, Error> {
        check_length("good state length", good_len)?;
        check_length("bad state length", bad_len)?;
        check_probability("good state loss", good_loss)?;
        check_probability("bad state loss", bad_loss)?;
        Ok(Self {
            to_bad: 1. / good_len,
            to_good: 1. / bad_len,
            bad_loss,
            good_loss,
        })
    }

    /// Long-run fraction of packets lost.
    pub fn mean_loss(&self) -> f64 {
        let bad_share = self.to_bad / (self.to_bad + self.to_good);
        bad_share * self.bad_loss + (1. - bad_share) * self.good_loss
    }
}

fn check_length(name: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value >= 1. {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), Error> {
    if (0. ..=1.).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Good,
    Bad,
}

/// One running instance of the model. Starts in the good state.
#[derive(Clone, Debug)]
pub struct Chain {
    model: Model,
    state: State,
}

impl Chain {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            state: State::Good,
        }
    }

    /// Advance the markov chain.
    /// Returns:
    ///     - true: Packet is received
    ///     - false: Packet is lost
    pub fn next<R: Rng>(&mut self, rng: &mut R) -> bool {
        match self.state {
            State::Good => {
                let received = rng.random_bool(1. - self.model.good_loss);
                if rng.random_bool(self.model.to_bad) {
                    self.state = State::Bad;
                }
                received
            }
            State::Bad => {
                let received = rng.random_bool(1. - self.model.bad_loss);
                if rng.random_bool(self.model.to_good) {
                    self.state = State::Good;
                }
                received
            }
        }
    }
}
