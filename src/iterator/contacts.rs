use std::rc::Rc;

use super::directory::Directory;
use super::profile::Profile;

/// One step of a contact traversal. `profile` is `None` when the directory
/// has no record for `email`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub email: String,
    pub profile: Option<Rc<Profile>>,
}

#[derive(Debug, Clone)]
enum Slot {
    Pending,
    Known(Rc<Profile>),
    Unknown,
}

impl Slot {
    fn profile(&self) -> Option<Rc<Profile>> {
        match self {
            Slot::Known(profile) => Some(profile.clone()),
            Slot::Pending | Slot::Unknown => None,
        }
    }
}

/// Lazy, memoizing walk over a subject's contacts of one kind.
///
/// The contact list is fetched on the first `has_next`/`next`, and each
/// profile the first time its position is reached. Nothing is fetched twice
/// for the lifetime of the iterator, including across `reset`.
pub struct ContactIterator<'a, D: Directory + ?Sized> {
    directory: &'a D,
    subject: String,
    kind: String,
    position: usize,
    emails: Option<Vec<String>>,
    resolved: Vec<Slot>,
}

impl<'a, D: Directory + ?Sized> ContactIterator<'a, D> {
    pub fn new(directory: &'a D, subject: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            directory,
            subject: subject.into(),
            kind: kind.into(),
            position: 0,
            emails: None,
            resolved: Vec::new(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    fn lazy_load(&mut self) -> &[String] {
        if self.emails.is_none() {
            let emails = self.directory.fetch_contacts(&self.subject, &self.kind);
            self.resolved = vec![Slot::Pending; emails.len()];
            self.emails = Some(emails);
        }
        self.emails.as_deref().unwrap_or(&[])
    }

    pub fn has_next(&mut self) -> bool {
        let position = self.position;
        position < self.lazy_load().len()
    }

    /// Rewinds to the first contact, keeping everything already fetched.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    fn resolve(&mut self, position: usize, email: &str) -> Option<Rc<Profile>> {
        if let Slot::Pending = self.resolved[position] {
            let earlier = self
                .emails
                .iter()
                .flatten()
                .zip(&self.resolved)
                .find(|(seen, slot)| seen.as_str() == email && !matches!(slot, Slot::Pending))
                .map(|(_, slot)| slot.clone());

            self.resolved[position] = match earlier {
                Some(slot) => slot,
                None => match self.directory.fetch_profile(email) {
                    Some(profile) => Slot::Known(profile),
                    None => Slot::Unknown,
                },
            };
        }
        self.resolved[position].profile()
    }
}

impl<D: Directory + ?Sized> Iterator for ContactIterator<'_, D> {
    type Item = Contact;

    fn next(&mut self) -> Option<Contact> {
        if !self.has_next() {
            return None;
        }

        let position = self.position;
        let email = self.emails.as_ref()?[position].clone();
        let profile = self.resolve(position, &email);
        self.position += 1;
        Some(Contact { email, profile })
    }
}
