//! Staged mutation: a confirmed snapshot plus an editable draft
//!
//! Both the availability store and the extra event editor mutate a draft and
//! publish it in a single step. Persisting the draft is the caller's job;
//! [`Staged::commit`] only promotes it once the write succeeded.

/// Snapshot and draft of the same value.
#[derive(Debug, Clone)]
pub struct Staged<T> {
    snapshot: T,
    draft: T,
}

impl<T: Clone + PartialEq> Staged<T> {
    /// Start with `snapshot` as both the confirmed value and the draft.
    pub fn new(snapshot: T) -> Self {
        let draft = snapshot.clone();
        Self { snapshot, draft }
    }

    /// Last confirmed value.
    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    /// True whenever the draft differs from the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.snapshot
    }

    /// Promote the draft to the snapshot.
    pub fn commit(&mut self) {
        self.snapshot = self.draft.clone();
    }

    /// Throw the draft away.
    pub fn discard(&mut self) {
        self.draft = self.snapshot.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_tracks_content_not_writes() {
        let mut staged = Staged::new(vec![1, 2]);
        assert!(!staged.is_dirty());

        staged.draft_mut().push(3);
        assert!(staged.is_dirty());

        staged.draft_mut().pop();
        assert!(!staged.is_dirty(), "reverting the edit clears the dirty flag");
    }

    #[test]
    fn test_commit_and_discard() {
        let mut staged = Staged::new(String::from("a"));
        staged.draft_mut().push('b');
        staged.commit();
        assert_eq!(staged.snapshot(), "ab");

        staged.draft_mut().push('c');
        staged.discard();
        assert_eq!(staged.draft(), "ab");
        assert!(!staged.is_dirty());
    }
}
