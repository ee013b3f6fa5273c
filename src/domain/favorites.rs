//! 로컬 즐겨찾기 집합.

use std::collections::BTreeSet;

/// 볼륨 번호 집합. 삽입 시 중복을 제거하고 오름차순을 유지한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    volumes: BTreeSet<u32>,
}

impl Favorites {
    pub fn new(volumes: BTreeSet<u32>) -> Self {
        Self { volumes }
    }

    /// 새로 추가되면 `true`, 이미 있으면 `false`.
    pub fn insert(&mut self, volume: u32) -> bool {
        self.volumes.insert(volume)
    }

    pub fn contains(&self, volume: u32) -> bool {
        self.volumes.contains(&volume)
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.volumes.iter().copied()
    }

    pub fn as_set(&self) -> &BTreeSet<u32> {
        &self.volumes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent_and_sorted() {
        let mut favorites = Favorites::default();
        assert!(favorites.insert(9));
        assert!(favorites.insert(2));
        assert!(!favorites.insert(9));

        assert_eq!(favorites.iter().collect::<Vec<_>>(), vec![2, 9]);
        assert_eq!(favorites.len(), 2);
    }
}
