use crate::arena::Slot;
use crate::binary_tree::{LinkedBinaryTree, Position, Side};
use crate::tree_map::Balance;
use std::cmp;

/// The AVL balancing policy.
///
/// Every node stores its balance factor, the height of its left subtree minus the height of its
/// right subtree. After each insertion or deletion the factors along the affected path are
/// updated and any node whose factor leaves `-1..=1` is repaired with a trinode restructure.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

type Tree<T> = LinkedBinaryTree<T, i32>;

fn balance_factor<T>(tree: &Tree<T>, slot: Slot) -> i32 {
    tree.node(slot).meta
}

// Updates the balance factors above `slot` after the height of its subtree changed by `delta`.
fn propagate<T>(tree: &mut Tree<T>, mut slot: Slot, mut delta: i32) {
    while delta != 0 {
        let parent = match tree.node(slot).parent {
            Some(parent) => parent,
            None => return,
        };
        let old = balance_factor(tree, parent);
        let (new_balance, old_height, new_height) = if tree.node(parent).left == Some(slot) {
            (old + delta, cmp::max(0, -old), cmp::max(delta, -old))
        } else {
            (old - delta, cmp::max(0, old), cmp::max(delta, old))
        };
        tree.node_mut(parent).meta = new_balance;
        delta = new_height - old_height;
        slot = parent;
    }
}

// Rotates `x` above its parent and fixes the balance factors of both nodes. Heights below are
// relative to one of the subtrees that keep their place.
fn rotate<T>(tree: &mut Tree<T>, x: Slot) {
    let y = match tree.node(x).parent {
        Some(parent) => parent,
        None => unreachable!(),
    };
    let bx = balance_factor(tree, x);
    let by = balance_factor(tree, y);

    let (x_balance, y_balance, old_height, new_height) = if tree.node(y).left == Some(x) {
        let hx = 1 + cmp::max(bx, 0);
        let hc = hx - by;
        let hy = 1 + cmp::max(0, hc);
        (bx - hy, -hc, 1 + cmp::max(hx, hc), 1 + cmp::max(bx, hy))
    } else {
        let hb = -bx;
        let hx = 1 + cmp::max(0, hb);
        let ha = by + hx;
        let hy = 1 + cmp::max(ha, 0);
        (hy - hb, ha, 1 + cmp::max(ha, hx), 1 + cmp::max(hy, hb))
    };

    tree.rotate_slot(x);
    tree.node_mut(x).meta = x_balance;
    tree.node_mut(y).meta = y_balance;
    trace!("avl rotation: balance factors now {} and {}", x_balance, y_balance);
    propagate(tree, x, new_height - old_height);
}

// Returns the taller child of `slot`, preferring the left child on ties when `favor_left` is set.
fn tall_child<T>(tree: &Tree<T>, slot: Slot, favor_left: bool) -> Slot {
    let node = tree.node(slot);
    let side = if node.meta + favor_left as i32 > 0 {
        Side::Left
    } else {
        Side::Right
    };
    match node.child(side) {
        Some(child) => child,
        None => unreachable!(),
    }
}

// Returns the grandchild of `slot` to restructure around. Ties favor the grandchild on the same
// side as the child, which yields a single rotation.
fn tall_grandchild<T>(tree: &Tree<T>, slot: Slot) -> Slot {
    let child = tall_child(tree, slot, false);
    let aligned_left = tree.node(slot).left == Some(child);
    tall_child(tree, child, aligned_left)
}

fn rebalance<T>(tree: &mut Tree<T>, slot: Slot) {
    let mut current = Some(slot);
    while let Some(slot) = current {
        if balance_factor(tree, slot).abs() > 1 {
            debug!("restoring avl balance, factor {}", balance_factor(tree, slot));
            let grandchild = tall_grandchild(tree, slot);
            let top = tree.restructure_slots(grandchild, rotate::<T>);
            current = tree.node(top).parent;
        } else {
            current = tree.node(slot).parent;
        }
    }
}

impl Balance for Avl {
    type Meta = i32;

    fn rebalance_insert<T>(tree: &mut Tree<T>, p: Position) {
        propagate(tree, p.slot(), 1);
        rebalance(tree, p.slot());
    }

    fn before_delete<T>(tree: &mut Tree<T>, p: Position) {
        propagate(tree, p.slot(), -1);
    }

    fn rebalance_delete<T>(tree: &mut Tree<T>, parent: Option<Position>) {
        if let Some(parent) = parent {
            rebalance(tree, parent.slot());
        }
    }
}
