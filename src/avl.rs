//! A self-balancing Binary Search Tree (an AVL tree) keyed by `i32` with `String` values. Every
//! node owns its children through an `Option<Box<Node>>` slot, and every mutation returns the
//! (possibly new) root of the subtree it touched so the caller can reassign its slot. That is how
//! rotations travel back up the tree without parent pointers.
//!
//! # Examples
//!
//! ```
//! use avldb::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(1).found());
//!
//! assert!(tree.insert(1, "one".to_string()));
//! assert_eq!(tree.search(1).value(), Some("one"));
//!
//! // Inserting an existing key doesn't overwrite anything.
//! assert!(!tree.insert(1, "uno".to_string()));
//! assert_eq!(tree.get(1), Some("one"));
//!
//! // `edit` does.
//! assert!(tree.edit(1, "uno".to_string()));
//! assert_eq!(tree.get(1), Some("uno"));
//!
//! assert!(tree.remove(1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::mem;

type Link = Option<Box<Node>>;

/// An AVL tree mapping `i32` keys to `String` values.
///
/// The tree keeps a live count of its records which is only touched at the two places a node is
/// created or spliced out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    root: Link,
    count: usize,
}

/// A single record in the tree along with the height of the subtree rooted at it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    key: i32,
    value: String,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
    left: Link,
    right: Link,
}

/// The outcome of [`Tree::search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Search<'a> {
    value: Option<&'a str>,
    comparisons: usize,
}

impl<'a> Search<'a> {
    /// Whether the key was in the tree.
    pub fn found(&self) -> bool {
        self.value.is_some()
    }

    /// The value stored at the key, if it was found.
    pub fn value(&self) -> Option<&'a str> {
        self.value
    }

    /// How many comparison units the search was charged.
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }
}

/// One entry of [`Tree::export`]: a node flattened out of the tree in pre-order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exported<'a> {
    /// The node's key.
    pub key: i32,
    /// The node's value.
    pub value: &'a str,
    /// The height of the subtree rooted at the node.
    pub height: usize,
    /// Whether the node has a left child.
    pub has_left: bool,
    /// Whether the node has a right child.
    pub has_right: bool,
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            count: 0,
        }
    }

    /// The number of records in the tree.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the tree has no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the whole tree. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// The root node, for read-only walks of the tree's shape.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Looks up `key` while counting comparisons.
    ///
    /// Every slot visited on the way down is charged one comparison unit. That includes the empty
    /// slot a miss ends at, so searching an empty tree costs 1 and a hit on the root costs 1.
    /// A node that doesn't match isn't charged a second unit for picking a side: the count is the
    /// number of slots on the search path.
    ///
    /// # Examples
    ///
    /// ```
    /// use avldb::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.search(5).comparisons(), 1);
    ///
    /// for key in [10, 20, 30] {
    ///     tree.insert(key, key.to_string());
    /// }
    ///
    /// let search = tree.search(30);
    /// assert_eq!(search.value(), Some("30"));
    /// assert_eq!(search.comparisons(), 2);
    /// ```
    pub fn search(&self, key: i32) -> Search<'_> {
        let mut comparisons = 0;
        let mut cur = self.root.as_deref();
        loop {
            comparisons += 1;
            let Some(node) = cur else {
                return Search {
                    value: None,
                    comparisons,
                };
            };
            match key.cmp(&node.key) {
                Ordering::Equal => {
                    return Search {
                        value: Some(&node.value),
                        comparisons,
                    }
                }
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }
    }

    /// Potentially finds the value associated with the given key without counting comparisons.
    pub fn get(&self, key: i32) -> Option<&str> {
        self.root().and_then(|n| n.find(key)).map(|n| n.value.as_str())
    }

    /// Inserts a new record. Returns `false` and leaves the tree untouched if `key` is already
    /// present.
    pub fn insert(&mut self, key: i32, value: String) -> bool {
        let old_count = self.count;
        self.root = Some(insert(self.root.take(), key, value, &mut self.count));
        self.count > old_count
    }

    /// Replaces the value stored at `key`. The shape of the tree never changes. Returns whether
    /// the key was found.
    pub fn edit(&mut self, key: i32, value: String) -> bool {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Equal => {
                    node.value = value;
                    return true;
                }
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
            }
        }
        false
    }

    /// Removes the record at `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: i32) -> bool {
        self.take(key).is_some()
    }

    /// Removes the record at `key` and returns its value.
    pub fn take(&mut self, key: i32) -> Option<String> {
        let mut removed = None;
        self.root = remove(self.root.take(), key, &mut self.count, &mut removed);
        removed
    }

    /// Flattens the tree in pre-order (node, left subtree, right subtree).
    ///
    /// This throws away which node is whose child so it can't be used to rebuild the same shape.
    pub fn export(&self) -> Vec<Exported<'_>> {
        self.preorder()
            .map(|node| Exported {
                key: node.key,
                value: &node.value,
                height: node.height,
                has_left: node.left.is_some(),
                has_right: node.right.is_some(),
            })
            .collect()
    }

    /// Iterates over the nodes in pre-order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: self.root().into_iter().collect(),
        }
    }

    /// Iterates over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root());
        iter
    }
}

impl FromIterator<(i32, String)> for Tree {
    fn from_iter<I: IntoIterator<Item = (i32, String)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<(i32, String)> for Tree {
    fn extend<I: IntoIterator<Item = (i32, String)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (i32, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator returned by [`Tree::preorder`].
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree comes out first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

/// In-order iterator returned by [`Tree::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut cur: Option<&'a Node>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i32, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some((node.key, &node.value))
    }
}

impl Node {
    fn new_boxed(key: i32, value: String) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// The node's key.
    pub fn key(&self) -> i32 {
        self.key
    }

    /// The node's value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The height of the subtree rooted at this node.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The height of the left subtree minus the height of the right subtree. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn find(&self, key: i32) -> Option<&Self> {
        match key.cmp(&self.key) {
            Ordering::Less => self.left().and_then(|n| n.find(key)),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right().and_then(|n| n.find(key)),
        }
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    fn leftmost(&self) -> &Self {
        let mut cur = self;
        while let Some(left) = cur.left() {
            cur = left;
        }
        cur
    }

    fn rightmost(&self) -> &Self {
        let mut cur = self;
        while let Some(right) = cur.right() {
            cur = right;
        }
        cur
    }
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_factor(link: &Link) -> isize {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

fn insert(link: Link, key: i32, value: String, count: &mut usize) -> Box<Node> {
    let Some(mut node) = link else {
        *count += 1;
        return Node::new_boxed(key, value);
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert(node.left.take(), key, value, count)),
        Ordering::Greater => node.right = Some(insert(node.right.take(), key, value, count)),
        Ordering::Equal => return node,
    }

    node.fix_height();
    let balance = node.balance_factor();

    // The new key went down the heavy side, so comparing it with the heavy child tells us whether
    // it landed on the outside (single rotation) or the inside (double rotation).
    if balance > 1 {
        match node.left.as_ref().map(|left| key.cmp(&left.key)) {
            Some(Ordering::Less) => return rotate_right(node),
            Some(Ordering::Greater) => {
                node.left = node.left.take().map(rotate_left);
                return rotate_right(node);
            }
            _ => {}
        }
    }
    if balance < -1 {
        match node.right.as_ref().map(|right| key.cmp(&right.key)) {
            Some(Ordering::Greater) => return rotate_left(node),
            Some(Ordering::Less) => {
                node.right = node.right.take().map(rotate_right);
                return rotate_left(node);
            }
            _ => {}
        }
    }

    node
}

/// Deletes `key` from the subtree in `link` and returns the new subtree. The removed value is
/// written to `removed`.
fn remove(link: Link, key: i32, count: &mut usize, removed: &mut Option<String>) -> Link {
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = remove(node.left.take(), key, count, removed),
        Ordering::Greater => node.right = remove(node.right.take(), key, count, removed),
        Ordering::Equal => {
            if node.left.is_none() || node.right.is_none() {
                *count -= 1;
                *removed = Some(mem::take(&mut node.value));
                return node.left.take().or_else(|| node.right.take());
            }

            // Two children. Promote the predecessor only when strictly left-heavy, otherwise the
            // successor, and then delete the promoted node from the subtree it came from.
            let mut promoted = None;
            if node.balance_factor() > 0 {
                let predecessor = node.left.as_deref().map(|n| n.rightmost().key);
                if let Some(predecessor) = predecessor {
                    node.left = remove(node.left.take(), predecessor, count, &mut promoted);
                    node.key = predecessor;
                }
            } else {
                let successor = node.right.as_deref().map(|n| n.leftmost().key);
                if let Some(successor) = successor {
                    node.right = remove(node.right.take(), successor, count, &mut promoted);
                    node.key = successor;
                }
            }
            *removed = Some(mem::replace(
                &mut node.value,
                promoted.unwrap_or_default(),
            ));
        }
    }

    Some(rebalance_after_remove(node))
}

fn rebalance_after_remove(mut node: Box<Node>) -> Box<Node> {
    node.fix_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if balance_factor(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        node = rotate_right(node);
    } else if balance < -1 {
        if balance_factor(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        node = rotate_left(node);
    }

    if cfg!(debug_assertions) {
        assert!(node.balance_factor().abs() <= 1);
    }
    node
}

/// Rotate `old_root` to the right. This moves the left child up vertically and `old_root` down
/// vertically. Used to rebalance the tree when the left child is too tall so a node without a
/// left child is handed back unchanged.
///
/// # Diagram
///
/// ```text
///       old_root               new_root
///        /     \               /     \
///   new_root    z   rotate ->  x    old_root
///    /  \                            /  \
///   x    y                          y    z
/// ```
fn rotate_right(mut old_root: Box<Node>) -> Box<Node> {
    let Some(mut new_root) = old_root.left.take() else {
        return old_root;
    };

    old_root.left = new_root.right.take();
    old_root.fix_height();

    new_root.right = Some(old_root);
    new_root.fix_height();
    new_root
}

/// The mirror image of [`rotate_right`]: the right child moves up and picks up `old_root` as its
/// left child, while its own left child becomes `old_root`'s right child.
fn rotate_left(mut old_root: Box<Node>) -> Box<Node> {
    let Some(mut new_root) = old_root.right.take() else {
        return old_root;
    };

    old_root.right = new_root.left.take();
    old_root.fix_height();

    new_root.left = Some(old_root);
    new_root.fix_height();
    new_root
}
