// Connected groups of block cells and the result handed to presentation code

use crate::grid::cell::Coordinate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier assigned to a group the first time it is computed. Ids count up from 0
/// and restart after the finder's cache is invalidated.
pub type GroupId = usize;

/// A maximal 4-connected set of block cells, in the order the fill reached them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub cells: Arc<[Coordinate]>,
}

impl Group {
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Top-left and bottom-right corners of the group
    pub fn bounding_box(&self) -> Option<(Coordinate, Coordinate)> {
        let first = *self.cells.first()?;
        let (min, max) = self.cells.iter().fold((first, first), |(min, max), c| {
            (
                Coordinate::new(min.x.min(c.x), min.y.min(c.y)),
                Coordinate::new(max.x.max(c.x), max.y.max(c.y)),
            )
        });
        Some((min, max))
    }
}

/// Answer to a single hover query.
///
/// `cells` is shared with the finder's cache, so handing out a cached group
/// does not copy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResult {
    /// `None` when the queried cell is background
    pub group_id: Option<GroupId>,
    pub cells: Arc<[Coordinate]>,
    pub count: usize,
}

impl GroupResult {
    pub fn empty() -> Self {
        Self {
            group_id: None,
            cells: Arc::from(Vec::new()),
            count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }
}

impl From<&Group> for GroupResult {
    fn from(group: &Group) -> Self {
        Self {
            group_id: Some(group.id),
            cells: Arc::clone(&group.cells),
            count: group.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let group = Group {
            id: 0,
            cells: Arc::from(vec![
                Coordinate::new(2, 1),
                Coordinate::new(1, 1),
                Coordinate::new(1, 3),
            ]),
        };
        assert_eq!(
            group.bounding_box(),
            Some((Coordinate::new(1, 1), Coordinate::new(2, 3)))
        );
        assert_eq!(group.size(), 3);
    }

    #[test]
    fn test_result_shares_cells_with_group() {
        let group = Group {
            id: 4,
            cells: Arc::from(vec![Coordinate::new(0, 0)]),
        };
        let result = GroupResult::from(&group);
        assert_eq!(result.group_id, Some(4));
        assert_eq!(result.count, 1);
        assert!(Arc::ptr_eq(&result.cells, &group.cells));
        assert!(GroupResult::empty().is_empty());
    }
}
