//! Red-black tree set
//!
//! Arena-backed red-black tree used as the third contender in lookup
//! sweeps. Supports insertion with duplicate rejection, lookup and
//! ascending iteration; nodes are never removed.

use std::cmp::Ordering;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    color: Color,
    parent: usize,
    left: usize,
    right: usize,
}

/// Ordered set balanced with red-black coloring
#[derive(Debug, Clone)]
pub struct RedBlackTree<T> {
    nodes: Vec<Node<T>>,
    root: usize,
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
        }
    }
}

impl<T: Ord> RedBlackTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NIL,
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `value`, returning false if an equal value is already present
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = NIL;
        let mut cur = self.root;
        let mut go_left = false;

        while cur != NIL {
            parent = cur;
            match value.cmp(&self.nodes[cur].value) {
                Ordering::Less => {
                    cur = self.nodes[cur].left;
                    go_left = true;
                }
                Ordering::Greater => {
                    cur = self.nodes[cur].right;
                    go_left = false;
                }
                Ordering::Equal => return false,
            }
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });

        if parent == NIL {
            self.root = id;
        } else if go_left {
            self.nodes[parent].left = id;
        } else {
            self.nodes[parent].right = id;
        }

        self.rebalance_after_insert(id);
        true
    }

    /// Find the stored value equal to `value`
    pub fn find(&self, value: &T) -> Option<&T> {
        let mut cur = self.root;
        while cur != NIL {
            let node = &self.nodes[cur];
            match value.cmp(&node.value) {
                Ordering::Less => cur = node.left,
                Ordering::Greater => cur = node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Check whether an equal value is stored
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Iterate values in ascending order
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    fn color(&self, node: usize) -> Color {
        if node == NIL {
            Color::Black
        } else {
            self.nodes[node].color
        }
    }

    fn rebalance_after_insert(&mut self, mut node: usize) {
        // A red parent is never the root, so the grandparent exists.
        while node != self.root && self.color(self.nodes[node].parent) == Color::Red {
            let parent = self.nodes[node].parent;
            let grandparent = self.nodes[parent].parent;

            if parent == self.nodes[grandparent].left {
                let uncle = self.nodes[grandparent].right;
                if self.color(uncle) == Color::Red {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if node == self.nodes[parent].right {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.nodes[node].parent;
                    let grandparent = self.nodes[parent].parent;
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.nodes[grandparent].left;
                if self.color(uncle) == Color::Red {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if node == self.nodes[parent].left {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.nodes[node].parent;
                    let grandparent = self.nodes[parent].parent;
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.nodes[root].color = Color::Black;
    }

    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
        } else if self.nodes[parent].left == old {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.nodes[x].right;
        let inner = self.nodes[y].left;

        self.nodes[x].right = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }

        let x_parent = self.nodes[x].parent;
        self.nodes[y].parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, x: usize) {
        let y = self.nodes[x].left;
        let inner = self.nodes[y].right;

        self.nodes[x].left = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }

        let x_parent = self.nodes[x].parent;
        self.nodes[y].parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }
}

/// Ascending iterator over a [`RedBlackTree`]
pub struct Iter<'a, T> {
    tree: &'a RedBlackTree<T>,
    stack: Vec<usize>,
}

impl<T> Iter<'_, T> {
    fn push_left_spine(&mut self, mut node: usize) {
        while node != NIL {
            self.stack.push(node);
            node = self.tree.nodes[node].left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let right = self.tree.nodes[node].right;
        self.push_left_spine(right);
        Some(&self.tree.nodes[node].value)
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}
