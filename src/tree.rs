//! Indentation tree construction.
//!
//! Decoding starts here: the input is split into lines, each line is
//! measured for leading spaces, and the lines are threaded into a tree in
//! which a line's parent is the nearest preceding line with strictly smaller
//! indent. The builder keeps a stack of open ancestors keyed by indent
//! width; a new line closes every open node at its own indent or deeper,
//! then opens itself.
//!
//! Blank lines (no content after the leading spaces) become nodes too,
//! since they carry the interior empty lines of `text` blocks, but they
//! hang off the innermost open line and never open a scope.
//!
//! The builder never fails. Indentation legality (children exactly two
//! spaces deeper, and so on) is the parser's concern, enforced where the
//! grammar constrains it. Tabs are not indentation: they stay in the
//! content and surface later as grammar errors. Only `\n` terminates a
//! line, so a trailing `\r` stays in the content as well.
//!
//! The tree borrows from the input and is owned by the `decode` call that
//! built it; nothing escapes.

/// One line of input, positioned in the indentation tree.
#[derive(Debug)]
pub(crate) struct Node<'a> {
    /// 1-based source line.
    pub line: usize,
    /// Count of leading ASCII spaces.
    pub indent: usize,
    /// Line content after the leading spaces.
    pub text: &'a str,
    pub children: Vec<Node<'a>>,
}

impl Node<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// 1-based column where the content starts.
    pub fn column(&self) -> usize {
        self.indent + 1
    }
}

/// Threads `input` into a tree under a synthetic root.
///
/// The root's stack entry sits at indent -2 so that indent-0 lines are
/// strictly deeper than it and always attach beneath it.
pub(crate) fn build(input: &str) -> Node<'_> {
    let root = Node {
        line: 0,
        indent: 0,
        text: "",
        children: Vec::new(),
    };
    let mut open: Vec<(isize, Node)> = vec![(-2, root)];

    for (index, raw) in input.split('\n').enumerate() {
        let text = raw.trim_start_matches(' ');
        let indent = raw.len() - text.len();
        let node = Node {
            line: index + 1,
            indent,
            text,
            children: Vec::new(),
        };

        if node.is_blank() {
            if let Some((_, parent)) = open.last_mut() {
                parent.children.push(node);
            }
            continue;
        }

        while open.last().map_or(false, |(depth, _)| *depth >= indent as isize) {
            close_top(&mut open);
        }
        open.push((indent as isize, node));
    }

    while open.len() > 1 {
        close_top(&mut open);
    }
    let (_, root) = open.remove(0);
    root
}

/// Pops the innermost open node and attaches it to its parent's children.
fn close_top(open: &mut Vec<(isize, Node)>) {
    if let Some((_, node)) = open.pop() {
        if let Some((_, parent)) = open.last_mut() {
            parent.children.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(node: &Node) -> String {
        let mut out = format!("{}:{:?}", node.indent, node.text);
        if !node.children.is_empty() {
            let inner: Vec<String> = node.children.iter().map(shape).collect();
            out.push_str(&format!("[{}]", inner.join(",")));
        }
        out
    }

    #[test]
    fn single_line() {
        let root = build("null\n");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].text, "null");
        assert_eq!(root.children[0].line, 1);
        // The newline terminator produces one final blank node.
        assert!(root.children[1].is_blank());
    }

    #[test]
    fn nesting_follows_indent() {
        let root = build("a\n  b\n    c\n  d\ne\n");
        let a = &root.children[0];
        assert_eq!(a.text, "a");
        assert_eq!(a.children[0].text, "b");
        assert_eq!(a.children[0].children[0].text, "c");
        assert_eq!(a.children[1].text, "d");
        assert_eq!(root.children[1].text, "e");
    }

    #[test]
    fn siblings_keep_document_order() {
        let root = build("p\n  one\n  two\n  three\n");
        let kids: Vec<&str> = root.children[0].children.iter().map(|n| n.text).collect();
        assert_eq!(kids, vec!["one", "two", "three"]);
    }

    #[test]
    fn blank_lines_attach_to_innermost_open_node() {
        let root = build("a\n  b\n\n  c");
        let a = &root.children[0];
        // The blank between b and c hangs off b, the innermost open line.
        assert_eq!(shape(a), "0:\"a\"[2:\"b\"[0:\"\"],2:\"c\"]");
    }

    #[test]
    fn blank_lines_never_become_parents() {
        let root = build("\n\na\n");
        assert!(root.children[0].is_blank());
        assert!(root.children[1].is_blank());
        assert_eq!(root.children[2].text, "a");
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn dedent_closes_to_nearest_shallower_ancestor() {
        let root = build("a\n    b\n  c\n");
        let a = &root.children[0];
        // b (indent 4) closes when c (indent 2) arrives; both are children
        // of a, the nearest line with strictly smaller indent.
        assert_eq!(a.children[0].text, "b");
        assert_eq!(a.children[1].text, "c");
    }

    #[test]
    fn carriage_return_stays_in_content() {
        let root = build("a\r\nb\n");
        assert_eq!(root.children[0].text, "a\r");
        assert_eq!(root.children[1].text, "b");
    }

    #[test]
    fn tabs_are_content_not_indentation() {
        let root = build("a\n\tb\n");
        // The tab-led line has indent 0, so it does not nest under `a`.
        assert_eq!(root.children[1].indent, 0);
        assert_eq!(root.children[1].text, "\tb");
    }

    #[test]
    fn whitespace_only_line_is_blank_with_indent() {
        let root = build("a\n    \n");
        let blank = &root.children[0].children[0];
        assert!(blank.is_blank());
        assert_eq!(blank.indent, 4);
    }

    #[test]
    fn empty_input_yields_one_blank_node() {
        let root = build("");
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].is_blank());
    }
}
