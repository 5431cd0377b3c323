use std::collections::HashMap;

/// Relationship kinds the directory knows how to list.
pub const CONTACT_KINDS: &[&str] = &["friends", "coworkers"];

/// Kind assumed for contact specs without a `kind:` prefix.
pub const DEFAULT_CONTACT_KIND: &str = "friends";

/// A directory record. The email is its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    email: String,
    name: String,
    contacts: HashMap<String, Vec<String>>,
}

impl Profile {
    /// Builds a profile from `"kind:email"` contact specs. A spec without a
    /// colon is filed under [`DEFAULT_CONTACT_KIND`].
    pub fn new<I, S>(email: impl Into<String>, name: impl Into<String>, contacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_kind: HashMap<String, Vec<String>> = HashMap::new();
        for spec in contacts {
            let (kind, contact) = match spec.as_ref().split_once(':') {
                Some((kind, contact)) => (kind, contact),
                None => (DEFAULT_CONTACT_KIND, spec.as_ref()),
            };
            by_kind
                .entry(kind.to_string())
                .or_default()
                .push(contact.to_string());
        }

        Self {
            email: email.into(),
            name: name.into(),
            contacts: by_kind,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contacts of one kind in declaration order; empty for unknown kinds.
    pub fn contacts(&self, kind: &str) -> &[String] {
        self.contacts.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }
}
