use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use super::contacts::ContactIterator;
use super::profile::Profile;
use crate::transcript::Transcript;

/// Authoritative profile store, reached through blocking calls.
pub trait Directory {
    /// Emails of `subject`'s contacts of `kind`, in stored order. Unknown
    /// subjects have no contacts.
    fn fetch_contacts(&self, subject: &str, kind: &str) -> Vec<String>;

    /// The profile for `email`, or `None` when the directory has no record.
    fn fetch_profile(&self, email: &str) -> Option<Rc<Profile>>;

    fn contacts_iter(&self, subject: &str, kind: &str) -> ContactIterator<'_, Self>
    where
        Self: Sized,
    {
        ContactIterator::new(self, subject, kind)
    }

    fn friends_iter(&self, subject: &str) -> ContactIterator<'_, Self>
    where
        Self: Sized,
    {
        self.contacts_iter(subject, "friends")
    }

    fn coworkers_iter(&self, subject: &str) -> ContactIterator<'_, Self>
    where
        Self: Sized,
    {
        self.contacts_iter(subject, "coworkers")
    }
}

/// A social network simulated in memory. Every call sleeps for `latency`
/// and is counted, so callers can see exactly how often they went "remote".
pub struct SocialNetwork {
    name: String,
    profiles: HashMap<String, Rc<Profile>>,
    latency: Duration,
    transcript: Transcript,
    contact_fetches: Cell<usize>,
    profile_fetches: RefCell<HashMap<String, usize>>,
}

impl SocialNetwork {
    /// Indexes `profiles` by email. When two share an email the first wins.
    pub fn new(name: impl Into<String>, profiles: Vec<Profile>, latency: Duration) -> Self {
        let mut index = HashMap::new();
        for profile in profiles {
            if index.contains_key(profile.email()) {
                warn!(email = profile.email(), "duplicate profile ignored");
                continue;
            }
            index.insert(profile.email().to_string(), Rc::new(profile));
        }

        Self {
            name: name.into(),
            profiles: index,
            latency,
            transcript: Transcript::new(),
            contact_fetches: Cell::new(0),
            profile_fetches: RefCell::new(HashMap::new()),
        }
    }

    /// Records the network's console output into `transcript`.
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn contact_fetches(&self) -> usize {
        self.contact_fetches.get()
    }

    pub fn profile_fetches(&self) -> usize {
        self.profile_fetches.borrow().values().sum()
    }

    pub fn profile_fetches_for(&self, email: &str) -> usize {
        self.profile_fetches.borrow().get(email).copied().unwrap_or(0)
    }

    fn simulate_network_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }
}

impl Directory for SocialNetwork {
    fn fetch_contacts(&self, subject: &str, kind: &str) -> Vec<String> {
        self.simulate_network_latency();
        self.contact_fetches.set(self.contact_fetches.get() + 1);
        info!(network = %self.name, subject, kind, "fetching contact list");
        self.transcript.record(format!(
            "{}: Loading '{}' list of '{}' over the network...",
            self.name, kind, subject
        ));

        self.profiles
            .get(subject)
            .map(|profile| profile.contacts(kind).to_vec())
            .unwrap_or_default()
    }

    fn fetch_profile(&self, email: &str) -> Option<Rc<Profile>> {
        self.simulate_network_latency();
        *self
            .profile_fetches
            .borrow_mut()
            .entry(email.to_string())
            .or_insert(0) += 1;
        info!(network = %self.name, email, "fetching profile");
        self.transcript.record(format!(
            "{}: Loading profile '{}' over the network...",
            self.name, email
        ));

        self.profiles.get(email).cloned()
    }
}

/// The sample network used by the driver scenarios.
pub fn sample_profiles() -> Vec<Profile> {
    vec![
        Profile::new(
            "anna.smith@bing.com",
            "Anna Smith",
            ["friends:mad_max@ya.com", "friends:catwoman@yahoo.com", "coworkers:sam@amazon.com"],
        ),
        Profile::new(
            "mad_max@ya.com",
            "Maximilian",
            ["friends:anna.smith@bing.com", "coworkers:sam@amazon.com"],
        ),
        Profile::new("bill@microsoft.eu", "Billie", ["coworkers:avanger@ukr.net"]),
        Profile::new("avanger@ukr.net", "John Day", ["coworkers:bill@microsoft.eu"]),
        Profile::new(
            "sam@amazon.com",
            "Sam Kitting",
            [
                "coworkers:anna.smith@bing.com",
                "coworkers:mad_max@ya.com",
                "friends:catwoman@yahoo.com",
            ],
        ),
        Profile::new(
            "catwoman@yahoo.com",
            "Liza",
            ["friends:anna.smith@bing.com", "friends:sam@amazon.com"],
        ),
    ]
}
