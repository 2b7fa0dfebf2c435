//! Static reward catalog: which rewards exist, how many watches they
//! need, and how long their cooldown lock runs.

use crate::models::{RewardCategory, RewardDefinition};

/// Cooldown applied to every rank claim (5 days)
pub const RANK_LOCK_SECS: i64 = 5 * 24 * 60 * 60;
/// Cooldown applied to most crate claims (24 hours)
pub const CRATE_LOCK_SECS: i64 = 24 * 60 * 60;

fn def(
    category: RewardCategory,
    id: &str,
    label: &str,
    emoji: &str,
    required_watches: u32,
    lock_secs: i64,
) -> RewardDefinition {
    RewardDefinition {
        category,
        id: id.to_string(),
        label: label.to_string(),
        emoji: emoji.to_string(),
        required_watches,
        lock_secs,
    }
}

/// The full reward catalog; one instance per process
#[derive(Debug, Clone)]
pub struct Catalog {
    ranks: Vec<RewardDefinition>,
    crates: Vec<RewardDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        use RewardCategory::{Crate, Rank};
        Self {
            ranks: vec![
                def(Rank, "pro", "PRO", "🟨", 40, RANK_LOCK_SECS),
                def(Rank, "elite", "ELITE", "🟦", 70, RANK_LOCK_SECS),
                def(Rank, "eliteplus", "ELITE+", "🟪", 90, RANK_LOCK_SECS),
                def(Rank, "legend", "LEGEND", "💎", 100, RANK_LOCK_SECS),
                def(Rank, "god", "GOD", "🔱", 120, RANK_LOCK_SECS),
            ],
            crates: vec![
                def(Crate, "stone", "Stone Crate", "🪨", 2, 10),
                def(Crate, "iron", "Iron Crate", "⛓️", 30, CRATE_LOCK_SECS),
                def(Crate, "diamond", "Diamond Crate", "💎", 40, CRATE_LOCK_SECS),
                def(Crate, "hexa", "Hexa Crate", "🌌", 50, CRATE_LOCK_SECS),
                def(Crate, "godcrate", "God Crate", "🔱", 60, CRATE_LOCK_SECS),
            ],
        }
    }
}

impl Catalog {
    /// All definitions in one category
    pub fn in_category(&self, category: RewardCategory) -> &[RewardDefinition] {
        match category {
            RewardCategory::Rank => &self.ranks,
            RewardCategory::Crate => &self.crates,
        }
    }

    /// Look up a single reward
    pub fn find(&self, category: RewardCategory, id: &str) -> Option<&RewardDefinition> {
        self.in_category(category).iter().find(|d| d.id == id)
    }

    /// Iterate every reward, ranks first
    pub fn iter(&self) -> impl Iterator<Item = &RewardDefinition> + '_ {
        self.ranks.iter().chain(self.crates.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let catalog = Catalog::default();
        assert_eq!(catalog.in_category(RewardCategory::Rank).len(), 5);
        assert_eq!(catalog.in_category(RewardCategory::Crate).len(), 5);
        assert_eq!(catalog.iter().count(), 10);

        let stone = catalog.find(RewardCategory::Crate, "stone").unwrap();
        assert_eq!(stone.required_watches, 2);
        assert_eq!(stone.lock_secs, 10);

        let god = catalog.find(RewardCategory::Rank, "god").unwrap();
        assert_eq!(god.required_watches, 120);
        assert_eq!(god.lock_secs, RANK_LOCK_SECS);
    }

    #[test]
    fn test_unknown_reward_not_found() {
        let catalog = Catalog::default();
        assert!(catalog.find(RewardCategory::Rank, "stone").is_none());
        assert!(catalog.find(RewardCategory::Crate, "wooden").is_none());
    }

    #[test]
    fn test_all_required_watches_positive() {
        let catalog = Catalog::default();
        assert!(catalog.iter().all(|d| d.required_watches > 0));
        assert!(catalog.iter().all(|d| d.lock_secs >= 0));
    }
}
