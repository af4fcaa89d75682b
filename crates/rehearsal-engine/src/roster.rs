//! The participant list being assembled in the booking form.

use crate::model::{Participant, UserId};
use crate::validation::BookingPolicy;

/// Participants in the order they were picked, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantRoster {
    members: Vec<Participant>,
}

impl ParticipantRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `participant` unless someone with the same id is already listed.
    /// Returns whether the roster changed.
    pub fn add(&mut self, participant: Participant) -> bool {
        if self.contains(&participant.id) {
            return false;
        }
        self.members.push(participant);
        true
    }

    pub fn remove(&mut self, id: &UserId) -> Option<Participant> {
        let pos = self.members.iter().position(|p| p.id == *id)?;
        Some(self.members.remove(pos))
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.members.iter().any(|p| p.id == *id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.members.iter()
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.members.iter().map(|p| p.id.clone()).collect()
    }

    /// How many more participants `policy` needs before submission.
    pub fn shortfall(&self, policy: &BookingPolicy) -> usize {
        policy
            .min_participants
            .map_or(0, |required| required.saturating_sub(self.len()))
    }
}

impl FromIterator<Participant> for ParticipantRoster {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        let mut roster = Self::new();
        for participant in iter {
            roster.add(participant);
        }
        roster
    }
}
