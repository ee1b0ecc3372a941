//! Operations for model-based testing.
//!
//! Operations represent every action an operator can take against the guard.
//! They are generated randomly by proptest (or the fuzzer) and applied to both
//! the model and the real implementation.

use arbitrary::Arbitrary;
use turnstile_core::DEMO_ACCOUNTS;

/// Username drawn from a small pool so sequences collide often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Arbitrary)]
pub enum ModelUser {
    /// Demo account `admin`.
    Admin,
    /// Demo account `user`.
    User,
    /// Demo account `test`.
    Test,
    /// A name with no account.
    Stranger,
}

impl ModelUser {
    /// Every user in the pool.
    pub const ALL: [Self; 4] = [Self::Admin, Self::User, Self::Test, Self::Stranger];

    /// Username as typed.
    pub fn name(self) -> &'static str {
        match self {
            Self::Admin => DEMO_ACCOUNTS[0].0,
            Self::User => DEMO_ACCOUNTS[1].0,
            Self::Test => DEMO_ACCOUNTS[2].0,
            Self::Stranger => "mallory",
        }
    }

    /// The account's secret, if it has one.
    pub fn secret(self) -> Option<&'static str> {
        match self {
            Self::Admin => Some(DEMO_ACCOUNTS[0].1),
            Self::User => Some(DEMO_ACCOUNTS[1].1),
            Self::Test => Some(DEMO_ACCOUNTS[2].1),
            Self::Stranger => None,
        }
    }
}

/// Which secret to present with a username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum SecretChoice {
    /// The account's own secret.
    Correct,
    /// A secret belonging to a different account.
    Borrowed,
    /// Something no account uses.
    Wrong,
    /// The empty string.
    Empty,
}

impl SecretChoice {
    /// Concrete secret presented for `user`.
    pub fn resolve(self, user: ModelUser) -> &'static str {
        match self {
            Self::Correct => user.secret().unwrap_or("guess"),
            Self::Borrowed => match user {
                ModelUser::Admin => DEMO_ACCOUNTS[1].1,
                _ => DEMO_ACCOUNTS[0].1,
            },
            Self::Wrong => "wrong",
            Self::Empty => "",
        }
    }
}

/// Operations that can be applied to the system.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Present credentials.
    Authenticate {
        /// Username presented.
        user: ModelUser,
        /// Secret presented.
        secret: SecretChoice,
    },

    /// Operator lifts a lockout.
    Unblock {
        /// Username to unblock.
        user: ModelUser,
    },

    /// Advance simulation time.
    ///
    /// Lockouts never expire, so this must not change any state.
    AdvanceTime {
        /// Seconds to advance.
        secs: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_secret_is_never_the_own_one() {
        for user in ModelUser::ALL {
            assert_ne!(user.secret(), Some(SecretChoice::Borrowed.resolve(user)));
        }
    }

    #[test]
    fn stranger_has_no_secret() {
        assert_eq!(ModelUser::Stranger.secret(), None);
        assert_eq!(SecretChoice::Correct.resolve(ModelUser::Stranger), "guess");
    }
}
