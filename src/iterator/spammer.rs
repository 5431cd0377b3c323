use super::directory::Directory;
use crate::transcript::Transcript;

/// Client of the contact iterators: "messages" everyone in a contact list.
pub struct SocialSpammer<'a, D: Directory> {
    network: &'a D,
    transcript: Transcript,
}

impl<'a, D: Directory> SocialSpammer<'a, D> {
    pub fn new(network: &'a D, transcript: Transcript) -> Self {
        Self {
            network,
            transcript,
        }
    }

    pub fn send_to_friends(&self, subject: &str, message: &str) -> usize {
        self.send_to(subject, "friends", message)
    }

    pub fn send_to_coworkers(&self, subject: &str, message: &str) -> usize {
        self.send_to(subject, "coworkers", message)
    }

    /// Returns how many messages went out. Contacts the network cannot
    /// resolve are skipped.
    pub fn send_to(&self, subject: &str, kind: &str, message: &str) -> usize {
        self.transcript.record(format!("Iterating over {kind}..."));

        let mut sent = 0;
        for contact in self.network.contacts_iter(subject, kind) {
            match contact.profile {
                Some(profile) => {
                    self.send_message(profile.email(), message);
                    sent += 1;
                }
                None => self
                    .transcript
                    .record(format!("Skipped unknown contact '{}'", contact.email)),
            }
        }
        sent
    }

    fn send_message(&self, email: &str, message: &str) {
        self.transcript.record(format!(
            "Sent message to: '{email}'. Message body: '{message}'"
        ));
    }
}
