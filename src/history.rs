use rustc_hash::FxHashMap;

use crate::{board::Board, state::State};

/// Snapshot stack of a game, with the occurrence count of every board on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    current: State,
    past: Vec<State>,
    occurrences: FxHashMap<Board, u8>,
}
impl History {
    pub fn new(initial: State) -> Self {
        let mut history = History {
            current: initial,
            past: Vec::new(),
            occurrences: FxHashMap::default(),
        };
        history.record(history.current.board);
        history
    }
    fn record(&mut self, board: Board) {
        let count = self.occurrences.entry(board).or_default();
        *count = count.saturating_add(1);
    }
    fn forget(&mut self, board: Board) {
        if let Some(count) = self.occurrences.get_mut(&board) {
            *count -= 1;
            if *count == 0 {
                self.occurrences.remove(&board);
            }
        }
    }
    pub fn current(&self) -> &State {
        &self.current
    }
    /// Number of snapshots, the initial one included.
    pub fn len(&self) -> usize {
        self.past.len() + 1
    }
    /// Snapshots from the oldest to the current one.
    pub fn snapshots(&self) -> impl Iterator<Item = &State> {
        self.past.iter().chain([&self.current])
    }
    /// How many snapshots on the stack have this board.
    pub fn occurrences(&self, board: &Board) -> u8 {
        self.occurrences.get(board).copied().unwrap_or_default()
    }
    /// Pushes a new snapshot.
    pub fn commit(&mut self, state: State) {
        self.record(state.board);
        let previous = std::mem::replace(&mut self.current, state);
        self.past.push(previous);
    }
    /// Replaces the current snapshot without adding an entry.
    pub fn amend(&mut self, state: State) {
        if state.board != self.current.board {
            self.forget(self.current.board);
            self.record(state.board);
        }
        self.current = state;
    }
    /// Drops the current snapshot. The initial snapshot is never dropped.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.forget(undone.board);
        true
    }
}
#[cfg(test)]
mod test {
    use crate::{coord, history::History, modifier::Modifier, state::State};

    #[test]
    fn commit_and_undo_restore_counts() {
        let initial = State::starting_position();
        let mut history = History::new(initial.clone());
        assert_eq!(history.occurrences(&initial.board), 1);

        let mut next = initial.clone();
        next.board[coord!("e4")].modifier = Some(Modifier::Portal);
        history.commit(next.clone());
        history.commit(initial.clone());
        assert_eq!(history.len(), 3);
        assert_eq!(history.occurrences(&initial.board), 2);
        assert_eq!(history.occurrences(&next.board), 1);

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.current(), &initial);
        assert_eq!(history.occurrences(&initial.board), 1);
        assert_eq!(history.occurrences(&next.board), 0);
        assert!(!history.undo());
    }
    #[test]
    fn amend_keeps_the_length() {
        let initial = State::starting_position();
        let mut history = History::new(initial.clone());
        let mut drafted = initial.clone();
        drafted.white_counter = 0;
        history.amend(drafted.clone());
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &drafted);
        assert_eq!(history.occurrences(&initial.board), 1);

        let mut edited = drafted.clone();
        edited.board[coord!("e2")].occupant = None;
        history.amend(edited.clone());
        assert_eq!(history.occurrences(&initial.board), 0);
        assert_eq!(history.occurrences(&edited.board), 1);
    }
}
