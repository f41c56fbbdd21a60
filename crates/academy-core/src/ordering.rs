//! Local list ordering shared by track and quiz editing.
//!
//! Reordering only ever swaps adjacent elements. After every swap the whole
//! list is renumbered with 1-based sequence positions, and the caller pushes
//! the complete ordered list to the server on save.

use serde::{Deserialize, Serialize};

/// Direction of an adjacent swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Items that carry a 1-based display position.
pub trait Sequenced {
    fn set_sequence_order(&mut self, order: u32);
}

/// Swaps `items[index]` with its neighbour in `direction`.
///
/// Returns `false` (leaving the slice untouched) when the move would leave
/// the bounds: up on the first element, down on the last, or any index past
/// the end.
pub fn move_item<T>(items: &mut [T], index: usize, direction: MoveDirection) -> bool {
    if index >= items.len() {
        return false;
    }
    let target = match direction {
        MoveDirection::Up if index == 0 => return false,
        MoveDirection::Up => index - 1,
        MoveDirection::Down if index + 1 == items.len() => return false,
        MoveDirection::Down => index + 1,
    };
    items.swap(index, target);
    true
}

/// Renumbers every element with its 1-based position.
pub fn resequence<T: Sequenced>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_sequence_order(position as u32 + 1);
    }
}

/// Swap then renumber. Returns whether anything moved.
pub fn move_and_resequence<T: Sequenced>(
    items: &mut [T],
    index: usize,
    direction: MoveDirection,
) -> bool {
    let moved = move_item(items, index, direction);
    if moved {
        resequence(items);
    }
    moved
}
