// Copyright (c) 2024-2026 jslcore contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The parse-node tree.
//!
//! Parse nodes own their children and are constructed strictly in
//! post-order, so the whole tree has a single owner -- the caller that
//! receives the root -- and no node ever needs a shared (`Rc`) reference
//! to another. The one place a node needs to point "up" is the
//! `parent`/`child_index` back-reference the testable properties require,
//! which would otherwise make the tree a cycle. An arena resolves that the
//! same way a lot of Rust tree code does: nodes live in one `Vec` inside
//! [`Tree`], and everything that used to be a pointer is an index into it.

use crate::kind::NodeKind;
use crate::opcode::Opcode;

/// An index into a [`Tree`]'s node arena. Only meaningful relative to the
/// `Tree` that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single parse-tree node.
///
/// `start_offset`/`end_offset` are `None` only for [`NodeKind::Reserved`]
/// grouping nodes (the classical `for`-header bundle and the `try` wrapper
/// around `catch`/`finally`), which exist purely to hold child slots and
/// are transparent to offset-walking consumers.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub opcode: Option<Opcode>,
    pub start_offset: Option<usize>,
    pub end_offset: Option<usize>,
    pub atom: Option<String>,
    pub children: Vec<Option<NodeId>>,
    pub no_semi: bool,
    pub end_comma: Option<NodeId>,
    pub fn_args: Option<Vec<NodeId>>,
    pub numeric_value: Option<f64>,
    pub left_hand_side: bool,
    pub parent: Option<NodeId>,
    pub child_index: usize,
}

/// Everything a freshly-parsed node needs before it is handed to
/// [`Tree::push`], which fills in `parent`/`child_index` on its children.
pub struct NewNode {
    pub kind: NodeKind,
    pub opcode: Option<Opcode>,
    pub start_offset: Option<usize>,
    pub end_offset: Option<usize>,
    pub atom: Option<String>,
    pub children: Vec<Option<NodeId>>,
    pub no_semi: bool,
    pub end_comma: Option<NodeId>,
    pub fn_args: Option<Vec<NodeId>>,
    pub numeric_value: Option<f64>,
}

impl NewNode {
    /// A bare node with no children, no comma, and no args -- the common
    /// case for leaves and simple operator nodes.
    pub fn leaf(kind: NodeKind, opcode: Option<Opcode>, start: usize, end: usize) -> Self {
        Self {
            kind,
            opcode,
            start_offset: Some(start),
            end_offset: Some(end),
            atom: None,
            children: Vec::new(),
            no_semi: false,
            end_comma: None,
            fn_args: None,
            numeric_value: None,
        }
    }

    /// A node with children but no atom, trailing comma, or fn_args --
    /// the common case for operators and compound statements. Callers set
    /// any of those fields afterward before handing the result to
    /// [`Tree::push`].
    pub fn with_children(kind: NodeKind, opcode: Option<Opcode>, start: usize, end: usize, children: Vec<Option<NodeId>>) -> Self {
        Self {
            kind,
            opcode,
            start_offset: Some(start),
            end_offset: Some(end),
            atom: None,
            children,
            no_semi: false,
            end_comma: None,
            fn_args: None,
            numeric_value: None,
        }
    }

    /// An offsetless internal grouping node (the classical `for`-header
    /// bundle) -- see [`NodeKind::Reserved`].
    pub fn reserved(opcode: Option<Opcode>, children: Vec<Option<NodeId>>) -> Self {
        Self {
            kind: NodeKind::Reserved,
            opcode,
            start_offset: None,
            end_offset: None,
            atom: None,
            children,
            no_semi: false,
            end_comma: None,
            fn_args: None,
            numeric_value: None,
        }
    }
}

/// Owns every node of a single parse. The root is the one node in the
/// arena with no parent.
#[derive(Default)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates `new_node`, wiring up `parent`/`child_index` on each of
    /// its non-null children.
    pub fn push(&mut self, new_node: NewNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        for (i, child) in new_node.children.iter().enumerate() {
            if let Some(child_id) = child {
                let child_node = &mut self.nodes[child_id.0];
                child_node.parent = Some(id);
                child_node.child_index = i;
            }
        }
        self.nodes.push(Node {
            kind: new_node.kind,
            opcode: new_node.opcode,
            start_offset: new_node.start_offset,
            end_offset: new_node.end_offset,
            atom: new_node.atom,
            children: new_node.children,
            no_semi: new_node.no_semi,
            end_comma: new_node.end_comma,
            fn_args: new_node.fn_args,
            numeric_value: new_node.numeric_value,
            left_hand_side: false,
            parent: None,
            child_index: 0,
        });
        id
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rewrites `id`'s opcode from its "get" form to the matching "set"
    /// form, e.g. `NAME -> SETNAME`. The sole in-place mutation this tree
    /// performs after construction, used only when the parser classifies
    /// an expression as an assignment target. Panics if `id`'s opcode has
    /// no set form -- callers must validate the assignment target first.
    pub fn rewrite_to_set_form(&mut self, id: NodeId) {
        let node = self.get_mut(id);
        let current = node.opcode.expect("assignment target node must carry an opcode");
        node.opcode = Some(current.to_set_form().expect("opcode has no 'set' form"));
    }

    pub fn mark_left_hand_side(&mut self, id: NodeId) {
        self.get_mut(id).left_hand_side = true;
    }
}
