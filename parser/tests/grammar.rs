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

//! End-to-end checks against §8's testable properties: parent/child
//! consistency and offset containment over a whole tree, automatic
//! semicolon insertion, the regexp/divide disambiguation, trailing-comma
//! tracking, base-offset-relative error reporting, and reparse determinism.

use jslcore::{find_comments, parse, Node, NodeId, NodeKind, Opcode, Tree, Version};
use jslcore_errors::ErrorCode;
use jslcore_span::Offset;

fn parse_ok(text: &str) -> (Tree, NodeId) {
    let mut err = None;
    let parsed = parse(text, Version::Default, |offset, code| err = Some((offset, code)), 0);
    match parsed {
        Some(p) => (p.tree, p.root),
        None => panic!("expected successful parse of {text:?}, got {err:?}"),
    }
}

fn parse_err(text: &str, base_offset: usize) -> (Offset, ErrorCode) {
    let mut err = None;
    let parsed = parse(text, Version::Default, |offset, code| err = Some((offset, code)), base_offset);
    assert!(parsed.is_none(), "expected parse of {text:?} to fail");
    err.expect("on_error must be invoked exactly once on failure")
}

/// Walks the whole tree checking: every non-null child's `parent`/
/// `child_index` point back correctly, and (modulo `Reserved` grouping
/// nodes, which carry no offsets of their own) a parent's span contains
/// each child's span.
fn check_invariants(tree: &Tree, id: NodeId) {
    let node = tree.get(id);
    for (i, child) in node.children.iter().enumerate() {
        let Some(child_id) = child else { continue };
        let child_node = tree.get(*child_id);
        assert_eq!(child_node.parent, Some(id), "child {i} of {:?} has wrong parent", node.kind);
        assert_eq!(child_node.child_index, i, "child {i} of {:?} has wrong child_index", node.kind);
        if node.kind != NodeKind::Reserved {
            let (start, end) = (node.start_offset.unwrap(), node.end_offset.unwrap());
            if child_node.kind != NodeKind::Reserved {
                let (cs, ce) = (child_node.start_offset.unwrap(), child_node.end_offset.unwrap());
                assert!(start <= cs && ce <= end, "{:?} [{start},{end}] does not contain child {:?} [{cs},{ce}]", node.kind, child_node.kind);
            }
        }
        check_invariants(tree, *child_id);
    }
}

const SAMPLE_PROGRAMS: &[&str] = &[
    "var x = 1 + 2 * (3 - 4);",
    "function f(a, b) { if (a) { return a + b; } else return b; }",
    "for (var i = 0; i < 10; i++) { x[i] = i * i; }",
    "for (var k in obj) { print(k); }",
    "try { risky(); } catch (e) { handle(e); } finally { cleanup(); }",
    "switch (x) { case 1: a(); break; case 2: case 3: b(); default: c(); }",
    "a = [1, , 3,];",
    "o = { x: 1, 'y': 2, 3: z };",
    "outer: for (;;) { continue outer; }",
    "with (obj) { x = y; }",
    "a = /foo\\/bar/gi;",
    "new Foo.Bar(1, 2).baz[0];",
];

#[test]
fn whole_tree_invariants_hold_for_sample_programs() {
    for text in SAMPLE_PROGRAMS {
        let (tree, root) = parse_ok(text);
        let root_node = tree.get(root);
        assert_eq!(root_node.parent, None, "root of {text:?} must have no parent");
        check_invariants(&tree, root);
    }
}

/// §8's ASI scenario: a `return` whose operand is pushed to the next line
/// by ASI becomes two statements, both implicitly terminated.
#[test]
fn asi_splits_return_from_following_expression() {
    let (tree, root) = parse_ok("return\nfoo");
    let program = tree.get(root);
    assert_eq!(program.children.len(), 2);

    let ret = tree.get(program.children[0].unwrap());
    assert_eq!(ret.kind, NodeKind::Return);
    assert!(ret.no_semi);
    assert_eq!(ret.children, vec![None], "return's expression child must be absent");

    let stmt = tree.get(program.children[1].unwrap());
    assert_eq!(stmt.kind, NodeKind::Semi);
    assert!(stmt.no_semi);
    let expr = tree.get(stmt.children[0].unwrap());
    assert_eq!(expr.kind, NodeKind::Name);
    assert_eq!(expr.atom.as_deref(), Some("foo"));
}

fn unwrap_assign_rhs(tree: &Tree, root: NodeId) -> &Node {
    let program = tree.get(root);
    let stmt = tree.get(program.children[0].unwrap());
    let assign = tree.get(stmt.children[0].unwrap());
    assert_eq!(assign.kind, NodeKind::Assign);
    tree.get(assign.children[1].unwrap())
}

/// §8's regex-vs-divide scenario, first half: `/\//g` parses as a single
/// `REGEXP` primary, not three divisions.
#[test]
fn slash_after_assign_rhs_position_is_a_regexp() {
    let (tree, root) = parse_ok(r"a = /\//g;");
    let rhs = unwrap_assign_rhs(&tree, root);
    assert_eq!(rhs.kind, NodeKind::Regexp);
    assert_eq!(rhs.atom.as_deref(), Some(r"/\//g"));
}

/// Second half: with no leading operand in a position a regexp could
/// start, repeated `/` is read as division, left-associatively.
#[test]
fn chained_slashes_after_name_are_division() {
    let (tree, root) = parse_ok("a = b/c/d;");
    let rhs = unwrap_assign_rhs(&tree, root);
    assert_eq!(rhs.kind, NodeKind::Star);
    assert_eq!(rhs.opcode, Some(Opcode::Div));
    let outer_lhs = tree.get(rhs.children[0].unwrap());
    assert_eq!(outer_lhs.kind, NodeKind::Star);
    assert_eq!(outer_lhs.opcode, Some(Opcode::Div));
    assert_eq!(tree.get(outer_lhs.children[0].unwrap()).atom.as_deref(), Some("b"));
    assert_eq!(tree.get(outer_lhs.children[1].unwrap()).atom.as_deref(), Some("c"));
    assert_eq!(tree.get(rhs.children[1].unwrap()).atom.as_deref(), Some("d"));
}

/// §8's trailing-comma scenario.
#[test]
fn sparse_array_with_trailing_comma_records_end_comma() {
    let (tree, root) = parse_ok("a=[,]");
    let program = tree.get(root);
    let stmt = tree.get(program.children[0].unwrap());
    let assign = tree.get(stmt.children[0].unwrap());
    let array = tree.get(assign.children[1].unwrap());
    assert_eq!(array.kind, NodeKind::Lb);
    assert_eq!(array.children, vec![None]);
    let comma = tree.get(array.end_comma.expect("trailing comma must be recorded"));
    assert_eq!(comma.start_offset, Some(3));
    assert_eq!(comma.end_offset, Some(3));
}

#[test]
fn dense_array_with_no_trailing_comma_has_no_end_comma() {
    let (tree, root) = parse_ok("a=[a,b,c]");
    let program = tree.get(root);
    let stmt = tree.get(program.children[0].unwrap());
    let assign = tree.get(stmt.children[0].unwrap());
    let array = tree.get(assign.children[1].unwrap());
    assert_eq!(array.children.len(), 3);
    assert!(array.children.iter().all(Option::is_some));
    assert!(array.end_comma.is_none());
}

/// §8's base-offset scenario: the offset of a failing token is absolute in
/// the enclosing document, not relative to the fragment's own text.
#[test]
fn syntax_errors_report_absolute_offsets_under_a_base() {
    let (offset, code) = parse_err(" ?", 2);
    assert_eq!(offset, Offset::new(3));
    assert_eq!(code, ErrorCode::SyntaxError);

    let (offset, code) = parse_err("\n ?", 2);
    assert_eq!(offset, Offset::new(4));
    assert_eq!(code, ErrorCode::SyntaxError);
}

/// Structural equality ignoring `NodeId` identity -- two parses of the same
/// text must produce isomorphic trees.
fn structurally_equal(a: &Tree, ai: NodeId, b: &Tree, bi: NodeId) -> bool {
    let (na, nb) = (a.get(ai), b.get(bi));
    if (na.kind, na.opcode, na.start_offset, na.end_offset, &na.atom, na.no_semi, na.numeric_value)
        != (nb.kind, nb.opcode, nb.start_offset, nb.end_offset, &nb.atom, nb.no_semi, nb.numeric_value)
    {
        return false;
    }
    if na.children.len() != nb.children.len() {
        return false;
    }
    na.children.iter().zip(nb.children.iter()).all(|(ca, cb)| match (ca, cb) {
        (None, None) => true,
        (Some(ca), Some(cb)) => structurally_equal(a, *ca, b, *cb),
        _ => false,
    })
}

#[test]
fn reparsing_identical_text_yields_structurally_identical_trees() {
    for text in SAMPLE_PROGRAMS {
        let (tree1, root1) = parse_ok(text);
        let (tree2, root2) = parse_ok(text);
        assert!(structurally_equal(&tree1, root1, &tree2, root2), "reparse of {text:?} diverged");
    }
}

/// `try` with neither `catch` nor `finally` is rejected.
#[test]
fn try_without_catch_or_finally_is_invalid() {
    let (_offset, code) = parse_err("try { a(); }", 0);
    assert_eq!(code, ErrorCode::InvalidCatch);
}

/// A bare assignment to a non-reference expression is rejected.
#[test]
fn assigning_to_a_literal_is_invalid() {
    let (_offset, code) = parse_err("1 = 2;", 0);
    assert_eq!(code, ErrorCode::InvalidAssign);
}

/// `e4x_deprecated` fires as a non-fatal warning on versions that support
/// the extension, and parsing still succeeds.
#[test]
fn e4x_deprecation_warns_but_does_not_fail_the_parse() {
    let mut warnings = Vec::new();
    let parsed = parse("var x = 1;", Version::V1_6, |offset, code| warnings.push((offset, code)), 0);
    assert!(parsed.is_some());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].1, ErrorCode::E4xDeprecated);
}

#[test]
fn e4x_deprecation_does_not_fire_on_versions_without_it() {
    let mut warnings = Vec::new();
    let parsed = parse("var x = 1;", Version::V1_5, |offset, code| warnings.push((offset, code)), 0);
    assert!(parsed.is_some());
    assert!(warnings.is_empty());
}

/// A `function` declaration found outside the top level or a function's own
/// top level is still accepted, but flagged with a distinct opcode.
#[test]
fn nested_function_declaration_gets_a_distinct_opcode() {
    let (tree, root) = parse_ok("if (x) { function f() {} }");
    let program = tree.get(root);
    let if_stmt = tree.get(program.children[0].unwrap());
    let then_block = tree.get(if_stmt.children[1].unwrap());
    let func = tree.get(then_block.children[0].unwrap());
    assert_eq!(func.kind, NodeKind::Function);
    assert_eq!(func.opcode, Some(Opcode::NestedClosure));
}

/// §8's regex-vs-divide scenario, comment half: a regexp literal
/// containing `/*`-shaped text isn't mistaken for the start of a block
/// comment by the (separate, tree-informed) comment extractor.
#[test]
fn comments_inside_a_regexp_literal_are_not_extracted() {
    let text = r"a = /\//g;";
    let (tree, root) = parse_ok(text);
    let comments = find_comments(text, 0, &tree, root);
    assert!(comments.is_empty());
}

#[test]
fn top_level_function_declaration_gets_the_ordinary_opcode() {
    let (tree, root) = parse_ok("function f() {}");
    let program = tree.get(root);
    let func = tree.get(program.children[0].unwrap());
    assert_eq!(func.kind, NodeKind::Function);
    assert_eq!(func.opcode, Some(Opcode::Closure));
}
