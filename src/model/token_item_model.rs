//! Ordered list of token rows plus the change notifications views react to.
//!
//! Views never hold on to rows. They keep a [`ModelIndex`] or, across frames,
//! the row hash, and re-resolve it against the model when they need data.
//! Mutations queue [`TokenModelEvent`]s which the UI drains once per frame,
//! so notifications always reach views on the UI thread.

use crate::model::token::{TokenItem, TokenRole};
use std::collections::HashMap;

/// Position of a row at the time it was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenModelEvent {
    /// Rows move while events wait in the queue, so the changed row is
    /// named by hash and resolved when the event is handled.
    DataChanged { hash: String },
    /// `total` is the row count right after the insertion.
    RowsInserted {
        first: usize,
        last: usize,
        total: usize,
    },
    /// `total` is the row count right after the removal.
    RowsRemoved {
        first: usize,
        last: usize,
        total: usize,
    },
}

#[derive(Debug, Default)]
pub struct TokenItemModel {
    rows: Vec<TokenItem>,
    events: Vec<TokenModelEvent>,
}

impl TokenItemModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of `row`, or `None` when the row does not exist.
    pub fn index(&self, row: usize) -> Option<ModelIndex> {
        (row < self.rows.len()).then_some(ModelIndex { row })
    }

    pub fn index_of_hash(&self, hash: &str) -> Option<ModelIndex> {
        self.rows
            .iter()
            .position(|item| item.hash == hash)
            .map(|row| ModelIndex { row })
    }

    pub fn item(&self, index: ModelIndex) -> Option<&TokenItem> {
        self.rows.get(index.row)
    }

    pub fn data(&self, index: ModelIndex, role: TokenRole) -> Option<String> {
        self.item(index).map(|item| item.data(role))
    }

    pub fn items(&self) -> impl Iterator<Item = (ModelIndex, &TokenItem)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, item)| (ModelIndex { row }, item))
    }

    /// Take all notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TokenModelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Replace the contents with `tokens`, keeping the order of rows that
    /// survive and appending new ones.
    ///
    /// Removed rows are dropped first, then changed rows are updated in place,
    /// then new rows are appended. Each step queues the matching event.
    pub fn set_tokens(&mut self, tokens: Vec<TokenItem>) {
        let mut incoming: HashMap<String, TokenItem> = HashMap::with_capacity(tokens.len());
        let mut incoming_order = Vec::with_capacity(tokens.len());
        for token in tokens {
            if !incoming.contains_key(&token.hash) {
                incoming_order.push(token.hash.clone());
            }
            incoming.insert(token.hash.clone(), token);
        }

        // Walk backwards so earlier row numbers stay valid while removing
        let mut row = self.rows.len();
        while row > 0 {
            row -= 1;
            if !incoming.contains_key(&self.rows[row].hash) {
                self.rows.remove(row);
                self.events.push(TokenModelEvent::RowsRemoved {
                    first: row,
                    last: row,
                    total: self.rows.len(),
                });
            }
        }

        for row in 0..self.rows.len() {
            if let Some(token) = incoming.remove(&self.rows[row].hash) {
                if token != self.rows[row] {
                    let hash = token.hash.clone();
                    self.rows[row] = token;
                    self.events.push(TokenModelEvent::DataChanged { hash });
                }
            }
        }

        let first = self.rows.len();
        for hash in incoming_order {
            if let Some(token) = incoming.remove(&hash) {
                self.rows.push(token);
            }
        }
        if self.rows.len() > first {
            self.events.push(TokenModelEvent::RowsInserted {
                first,
                last: self.rows.len() - 1,
                total: self.rows.len(),
            });
        }
    }

    /// Append one row; returns `false` when a row with the same hash exists.
    pub fn insert_token(&mut self, token: TokenItem) -> bool {
        if self.index_of_hash(&token.hash).is_some() {
            return false;
        }
        self.rows.push(token);
        let row = self.rows.len() - 1;
        self.events.push(TokenModelEvent::RowsInserted {
            first: row,
            last: row,
            total: self.rows.len(),
        });
        true
    }

    pub fn remove_token(&mut self, hash: &str) -> bool {
        let Some(index) = self.index_of_hash(hash) else {
            return false;
        };
        self.rows.remove(index.row);
        self.events.push(TokenModelEvent::RowsRemoved {
            first: index.row,
            last: index.row,
            total: self.rows.len(),
        });
        true
    }

    /// Set the raw balance of one row; only an actual change is notified.
    pub fn update_balance(&mut self, hash: &str, raw_balance: &str) -> bool {
        let Some(index) = self.index_of_hash(hash) else {
            return false;
        };
        let item = &mut self.rows[index.row];
        if item.raw_balance == raw_balance {
            return false;
        }
        item.raw_balance = raw_balance.to_string();
        self.events.push(TokenModelEvent::DataChanged {
            hash: hash.to_string(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::token::test_fixtures::*;

    const CONTRACT_C: &str = "b27d7bf95b03e02b55d5eb63d3f1692762101bf9";

    fn model_with(tokens: Vec<TokenItem>) -> TokenItemModel {
        let mut model = TokenItemModel::new();
        model.set_tokens(tokens);
        model.drain_events();
        model
    }

    #[test]
    fn index_is_none_out_of_range() {
        let model = model_with(vec![token(CONTRACT_A, "AAA", "1")]);
        assert!(model.index(0).is_some());
        assert!(model.index(1).is_none());
        assert_eq!(
            model.data(model.index(0).unwrap(), TokenRole::Symbol),
            Some("AAA".to_string())
        );
    }

    #[test]
    fn first_fill_reports_one_insertion() {
        let mut model = TokenItemModel::new();
        model.set_tokens(vec![token(CONTRACT_A, "AAA", "1"), token(CONTRACT_B, "BBB", "2")]);
        assert_eq!(
            model.drain_events(),
            vec![TokenModelEvent::RowsInserted {
                first: 0,
                last: 1,
                total: 2
            }]
        );
        assert!(!model.has_pending_events());
    }

    #[test]
    fn changed_row_reports_data_changed_in_place() {
        let mut model = model_with(vec![token(CONTRACT_A, "AAA", "1"), token(CONTRACT_B, "BBB", "2")]);
        model.set_tokens(vec![token(CONTRACT_A, "AAA", "1"), token(CONTRACT_B, "BBB", "5")]);

        let index = model.index(1).unwrap();
        assert_eq!(
            model.drain_events(),
            vec![TokenModelEvent::DataChanged {
                hash: model.item(index).unwrap().hash.clone()
            }]
        );
        assert_eq!(model.item(index).unwrap().raw_balance, "5");
    }

    #[test]
    fn unchanged_refresh_is_silent() {
        let tokens = vec![token(CONTRACT_A, "AAA", "1")];
        let mut model = model_with(tokens.clone());
        model.set_tokens(tokens);
        assert!(model.drain_events().is_empty());
    }

    #[test]
    fn removal_and_append_keep_surviving_order() {
        let mut model = model_with(vec![
            token(CONTRACT_A, "AAA", "1"),
            token(CONTRACT_B, "BBB", "2"),
        ]);
        model.set_tokens(vec![token(CONTRACT_C, "CCC", "3"), token(CONTRACT_B, "BBB", "2")]);

        assert_eq!(
            model.drain_events(),
            vec![
                TokenModelEvent::RowsRemoved {
                    first: 0,
                    last: 0,
                    total: 1
                },
                TokenModelEvent::RowsInserted {
                    first: 1,
                    last: 1,
                    total: 2
                },
            ]
        );
        let symbols: Vec<_> = model.items().map(|(_, item)| item.symbol.clone()).collect();
        assert_eq!(symbols, vec!["BBB", "CCC"]);
    }

    #[test]
    fn insert_rejects_duplicate_hash() {
        let mut model = TokenItemModel::new();
        assert!(model.insert_token(token(CONTRACT_A, "AAA", "1")));
        assert!(!model.insert_token(token(CONTRACT_A, "AAA", "9")));
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.drain_events().len(), 1);
    }

    #[test]
    fn update_balance_only_notifies_real_changes() {
        let item = token(CONTRACT_A, "AAA", "1");
        let hash = item.hash.clone();
        let mut model = model_with(vec![item]);

        assert!(!model.update_balance(&hash, "1"));
        assert!(model.update_balance(&hash, "2"));
        assert!(!model.update_balance("missing", "2"));
        assert_eq!(model.drain_events().len(), 1);
    }

    #[test]
    fn queued_data_change_names_its_token_after_rows_shift() {
        let first = token(CONTRACT_A, "AAA", "1");
        let second = token(CONTRACT_B, "BBB", "2");
        let mut model = model_with(vec![first.clone(), second.clone()]);

        assert!(model.update_balance(&second.hash, "7"));
        assert!(model.remove_token(&first.hash));

        let events = model.drain_events();
        assert_eq!(
            events[0],
            TokenModelEvent::DataChanged {
                hash: second.hash.clone()
            }
        );
        let TokenModelEvent::DataChanged { hash } = &events[0] else {
            unreachable!()
        };
        let index = model.index_of_hash(hash).unwrap();
        assert_eq!(model.data(index, TokenRole::RawBalance), Some("7".to_string()));
        assert_eq!(model.index(0), Some(index));
    }

    #[test]
    fn remove_token_by_hash() {
        let item = token(CONTRACT_A, "AAA", "1");
        let hash = item.hash.clone();
        let mut model = model_with(vec![item]);

        assert!(model.remove_token(&hash));
        assert!(!model.remove_token(&hash));
        assert!(model.is_empty());
        assert_eq!(
            model.drain_events(),
            vec![TokenModelEvent::RowsRemoved {
                first: 0,
                last: 0,
                total: 0
            }]
        );
    }
}
