use super::RawNode;

/// Tokens of the Newick grammar. Literal runs cover names and numbers.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Comma,
    Colon,
    Literal(String),
}

/// Parse a Newick string into a raw tree.
///
/// Empty input yields a degenerate single node with no name, length or
/// children. Malformed input is not rejected: the parser consumes the
/// token pattern it recognizes and stops, which can yield a partial tree.
/// Callers that need strict validation must add it above this layer.
pub fn parse(newick: &str) -> RawNode {
    let tokens = tokenize(newick);
    let (node, _) = parse_subtree(&tokens, 0);
    node
}

fn tokenize(newick: &str) -> Vec<Token> {
    let trimmed = newick.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);

    let mut tokens = Vec::new();
    let mut literal = String::new();

    for ch in trimmed.chars() {
        let token = match ch {
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            ',' => Some(Token::Comma),
            ':' => Some(Token::Colon),
            _ => {
                literal.push(ch);
                None
            }
        };

        if let Some(token) = token {
            flush_literal(&mut literal, &mut tokens);
            tokens.push(token);
        }
    }
    flush_literal(&mut literal, &mut tokens);

    tokens
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    let text = literal.trim();
    if !text.is_empty() {
        tokens.push(Token::Literal(text.to_string()));
    }
    literal.clear();
}

fn parse_subtree(tokens: &[Token], mut pos: usize) -> (RawNode, usize) {
    if tokens.get(pos) == Some(&Token::Open) {
        pos += 1;

        let mut children = Vec::new();
        loop {
            let (child, next) = parse_subtree(tokens, pos);
            pos = next;
            children.push(child);

            if tokens.get(pos) == Some(&Token::Comma) {
                pos += 1;
            } else {
                break;
            }
        }

        if tokens.get(pos) == Some(&Token::Close) {
            pos += 1;
        }

        let (name, length, next) = parse_label(tokens, pos);
        let mut node = RawNode::new(name, length);
        node.children = children;
        (node, next)
    } else {
        let (name, length, next) = parse_label(tokens, pos);
        (RawNode::new(name, length), next)
    }
}

/// Label grammar: `Name:Length`, `Name`, `:Length`, or nothing.
fn parse_label(tokens: &[Token], mut pos: usize) -> (Option<String>, Option<f64>, usize) {
    let mut name = None;
    if let Some(Token::Literal(text)) = tokens.get(pos) {
        name = Some(text.clone());
        pos += 1;
    }

    let mut length = None;
    if tokens.get(pos) == Some(&Token::Colon) {
        pos += 1;
        if let Some(Token::Literal(text)) = tokens.get(pos) {
            length = text.parse::<f64>().ok().filter(|value| value.is_finite());
            pos += 1;
        }
    }

    (name, length, pos)
}

/// Serialize a raw tree back to Newick text with a trailing `;`.
pub fn write(node: &RawNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out.push(';');
    out
}

fn write_node(node: &RawNode, out: &mut String) {
    if !node.children.is_empty() {
        out.push('(');
        for (index, child) in node.children.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }
            write_node(child, out);
        }
        out.push(')');
    }

    if let Some(name) = &node.name {
        out.push_str(name);
    }
    if let Some(length) = node.length {
        out.push(':');
        out.push_str(&format_length(length));
    }
}

/// Up to six decimals, trailing zeros trimmed.
fn format_length(value: f64) -> String {
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_root_with_lengths() {
        let tree = parse("(A:0.1,B:0.2)Root:0.3;");

        assert_eq!(tree.name.as_deref(), Some("Root"));
        assert_eq!(tree.length, Some(0.3));
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].name.as_deref(), Some("A"));
        assert_eq!(tree.children[0].length, Some(0.1));
        assert_eq!(tree.children[1].name.as_deref(), Some("B"));
        assert_eq!(tree.children[1].length, Some(0.2));
        assert!(tree.children.iter().all(RawNode::is_leaf));
    }

    #[test]
    fn empty_input_yields_degenerate_node() {
        for input in ["", "   ", ";"] {
            let tree = parse(input);
            assert_eq!(tree.name, None);
            assert_eq!(tree.length, None);
            assert!(tree.is_leaf());
        }
    }

    #[test]
    fn parses_partial_labels() {
        let tree = parse(":0.5;");
        assert_eq!(tree.name, None);
        assert_eq!(tree.length, Some(0.5));

        let tree = parse("Taxon");
        assert_eq!(tree.name.as_deref(), Some("Taxon"));
        assert_eq!(tree.length, None);
    }

    #[test]
    fn unparseable_length_is_absent() {
        let tree = parse("(A:abc,B:0.2);");
        assert_eq!(tree.children[0].length, None);
        assert_eq!(tree.children[1].length, Some(0.2));
    }

    #[test]
    fn non_finite_length_is_absent() {
        let tree = parse("(A:inf,B:NaN);");
        assert_eq!(tree.children[0].length, None);
        assert_eq!(tree.children[1].length, None);
    }

    #[test]
    fn unclosed_parenthesis_yields_partial_tree() {
        let tree = parse("((A,B");
        assert_eq!(tree.children.len(), 1);
        let inner = &tree.children[0];
        assert_eq!(inner.children.len(), 2);
        assert_eq!(inner.children[0].name.as_deref(), Some("A"));
        assert_eq!(inner.children[1].name.as_deref(), Some("B"));
    }

    #[test]
    fn extra_close_parenthesis_stops_early() {
        let tree = parse("A)B;");
        assert_eq!(tree.name.as_deref(), Some("A"));
        assert!(tree.is_leaf());
    }

    #[test]
    fn whitespace_around_labels_is_ignored() {
        let tree = parse("( A : 0.1 , B : 0.2 );");
        assert_eq!(tree.children[0].name.as_deref(), Some("A"));
        assert_eq!(tree.children[0].length, Some(0.1));
    }

    #[test]
    fn nested_subtrees_parse_in_order() {
        let tree = parse("((A,B)AB:1.5,C);");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].name.as_deref(), Some("AB"));
        assert_eq!(tree.children[0].length, Some(1.5));
        assert_eq!(tree.children[0].children.len(), 2);
        assert_eq!(tree.children[1].name.as_deref(), Some("C"));
    }

    #[test]
    fn write_matches_parse() {
        let text = "(A:0.1,B:0.2)Root:0.3;";
        assert_eq!(write(&parse(text)), text);

        let text = "((A,B)AB:1.5,C);";
        assert_eq!(write(&parse(text)), text);
    }

    #[test]
    fn formats_lengths_without_trailing_zeros() {
        assert_eq!(format_length(0.1), "0.1");
        assert_eq!(format_length(0.0), "0");
        assert_eq!(format_length(1.25), "1.25");
        assert_eq!(format_length(2.0), "2");
    }
}
