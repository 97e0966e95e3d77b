use serde::{Deserialize, Serialize};

use crate::user::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: UserId,
    pub books: u32,
}

/// Rank `(user, count)` rows by count descending, ties by user id.
pub fn rank(mut rows: Vec<(UserId, u32)>) -> Vec<LeaderboardEntry> {
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.into_iter()
        .enumerate()
        .map(|(i, (user_id, books))| LeaderboardEntry {
            rank: i + 1,
            user_id,
            books,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_user_id() {
        let ranked = rank(vec![
            (UserId::new("b"), 3),
            (UserId::new("a"), 3),
            (UserId::new("c"), 7),
        ]);
        let order: Vec<&str> = ranked.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        assert_eq!(ranked[2].rank, 3);
    }
}
