//! The messages table.
//!
//! [`ChatTable`] is the ordered collection of [`Message`]s produced by one
//! parse. It is never mutated after construction: filtering by date range or
//! sender produces a new table.
//!
//! # Example
//!
//! ```
//! use chatlens::parser::preprocess;
//!
//! let table = preprocess(
//!     "01/01/24, 10:00 - Alice: Hello there\n\
//!      01/01/24, 10:01 - Bob: Hi\n\
//!      01/01/24, 10:02 - Alice joined using this group's invite link",
//! );
//!
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.users(), vec!["Alice", "Bob"]);
//! assert_eq!(table.selectable_users(), vec!["overall", "Alice", "Bob"]);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::filter::{OVERALL, Selection};

/// Ordered, immutable sequence of parsed messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatTable {
    messages: Vec<Message>,
}

impl ChatTable {
    /// Wraps messages in source order.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Distinct real senders, sorted, without group notifications.
    pub fn users(&self) -> Vec<&str> {
        let mut users: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| !m.is_notification())
            .map(|m| m.sender.as_str())
            .collect();
        users.sort_unstable();
        users.dedup();
        users
    }

    /// Options for the sender selection: `"overall"` then every user.
    pub fn selectable_users(&self) -> Vec<&str> {
        let mut options = vec![OVERALL];
        options.extend(self.users());
        options
    }

    /// Earliest and latest message date, or `None` for an empty table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.messages.iter().map(Message::only_date).min()?;
        let max = self.messages.iter().map(Message::only_date).max()?;
        Some((min, max))
    }

    /// Returns a new table keeping only messages that match `predicate`.
    pub fn filtered<P>(&self, mut predicate: P) -> ChatTable
    where
        P: FnMut(&Message) -> bool,
    {
        ChatTable::new(
            self.messages
                .iter()
                .filter(|m| predicate(m))
                .cloned()
                .collect(),
        )
    }

    /// Returns the view for a sender selection.
    ///
    /// [`Selection::Overall`] keeps every row, group notifications included.
    pub fn for_selection(&self, selection: &Selection) -> ChatTable {
        match selection {
            Selection::Overall => self.clone(),
            Selection::User(name) => self.filtered(|m| m.sender == *name),
        }
    }
}

impl From<Vec<Message>> for ChatTable {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}

impl FromIterator<Message> for ChatTable {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ChatTable {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
