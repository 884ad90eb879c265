/// Index of a node slot in the [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// One occurrence of an element (or a level head) at one level.
///
/// ```text
/// Level 2:  HEAD ─────────────────► 20 ───────────────────► NIL
///            │                       │
/// Level 1:  HEAD ───────► 10 ◄────► 20 ───────► 35 ───────► NIL
///            │             │         │           │
/// Level 0:  HEAD ◄──► 10 ◄──► 20 ◄──► 25 ◄──► 35 ◄──► 50 ─► NIL
/// ```
///
/// Only the bottom copy of an element owns its value. Upper copies and
/// heads carry `None` and read the value through `base`, so a head
/// (whose base is itself) compares below every element.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub value: Option<T>,
    pub base: NodeId,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
    pub up: Option<NodeId>,
    pub down: Option<NodeId>,
    /// Number of levels this element spans. Meaningful on bottom copies.
    pub height: usize,
}

impl<T> Node<T> {
    fn new(value: Option<T>, base: NodeId) -> Self {
        Node {
            value,
            base,
            prev: None,
            next: None,
            up: None,
            down: None,
            height: 1,
        }
    }
}

/// Slot storage for nodes, addressed by [`NodeId`].
///
/// Freed slots go on a free list and are reused by later allocations.
/// Following a link into a vacant slot is a structural defect and panics.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Allocate a level head. A head is its own base and holds no value.
    pub fn alloc_head(&mut self) -> NodeId {
        let id = self.next_id();
        self.put(id, Node::new(None, id));
        id
    }

    /// Allocate the bottom copy of an element.
    pub fn alloc_element(&mut self, value: T) -> NodeId {
        let id = self.next_id();
        self.put(id, Node::new(Some(value), id));
        id
    }

    /// Allocate an upper copy of the element whose bottom copy is `base`.
    pub fn alloc_upper(&mut self, base: NodeId) -> NodeId {
        let id = self.next_id();
        self.put(id, Node::new(None, base));
        id
    }

    /// Free a slot, returning the node it held.
    pub fn release(&mut self, id: NodeId) -> Node<T> {
        match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => {
                self.free.push(id.0);
                node
            }
            None => panic!("skiplist arena: release of vacant slot {}", id.0),
        }
    }

    pub fn get(&self, id: NodeId) -> &Node<T> {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("skiplist arena: dangling link to slot {}", id.0),
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("skiplist arena: dangling link to slot {}", id.0),
        }
    }

    /// The element value a node stands for, or `None` for a level head.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        let base = self.get(id).base;
        self.get(base).value.as_ref()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    fn next_id(&mut self) -> NodeId {
        match self.free.pop() {
            Some(index) => NodeId(index),
            None => {
                self.slots.push(None);
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn put(&mut self, id: NodeId, node: Node<T>) {
        self.slots[id.0] = Some(node);
    }
}
