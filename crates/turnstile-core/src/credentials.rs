//! Credential table.
//!
//! The table is fixed when the guard is built and read-only afterwards.
//!
//! Secrets are stored and compared as plain text. This mirrors a teaching
//! login simulator and is not a template for real authentication, which needs
//! a salted password hash and a constant-time comparison.

use std::collections::BTreeMap;

/// Demo accounts seeded when no credential table is configured.
pub const DEMO_ACCOUNTS: [(&str, &str); 3] =
    [("admin", "password123"), ("user", "userpass"), ("test", "test123")];

/// Read-only mapping from username to expected secret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialStore {
    entries: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Build a table from `(username, secret)` pairs. Later duplicates win.
    pub fn new<I, U, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, S)>,
        U: Into<String>,
        S: Into<String>,
    {
        Self { entries: entries.into_iter().map(|(u, s)| (u.into(), s.into())).collect() }
    }

    /// The three demo accounts (`admin`, `user`, `test`).
    pub fn demo() -> Self {
        Self::new(DEMO_ACCOUNTS)
    }

    /// Whether `username` matches a stored account with exactly `secret`.
    ///
    /// Unknown usernames and wrong secrets both return `false`.
    pub fn verify(&self, username: &str, secret: &str) -> bool {
        self.entries.get(username).is_some_and(|expected| expected == secret)
    }

    /// Whether an account named `username` exists.
    pub fn contains(&self, username: &str) -> bool {
        self.entries.contains_key(username)
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no accounts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Usernames in lexicographic order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(username, secret)` pairs in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(u, s)| (u.as_str(), s.as_str()))
    }
}

impl From<BTreeMap<String, String>> for CredentialStore {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_table_accepts_seeded_accounts() {
        let store = CredentialStore::demo();

        assert_eq!(store.len(), 3);
        assert!(store.verify("admin", "password123"));
        assert!(store.verify("user", "userpass"));
        assert!(store.verify("test", "test123"));
    }

    #[test]
    fn wrong_secret_and_unknown_user_look_the_same() {
        let store = CredentialStore::demo();

        assert!(!store.verify("admin", "wrongpassword"));
        assert!(!store.verify("nobody", "password123"));
    }

    #[test]
    fn comparison_is_exact() {
        let store = CredentialStore::demo();

        assert!(!store.verify("admin", "password123 "));
        assert!(!store.verify("Admin", "password123"));
        assert!(!store.verify("admin", ""));
    }

    #[test]
    fn usernames_are_sorted() {
        let store = CredentialStore::new([("zed", "1"), ("amy", "2"), ("kim", "3")]);
        assert_eq!(store.usernames().collect::<Vec<_>>(), ["amy", "kim", "zed"]);
    }
}
