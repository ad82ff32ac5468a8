use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a Newick file and return the first `;`-terminated tree chunk.
///
/// Files without a terminator fall back to the whole trimmed content;
/// the parser downstream tolerates both, including empty input.
pub fn load_newick(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read tree file: {}", path.display()))?;

    Ok(first_chunk(&raw))
}

fn first_chunk(raw: &str) -> String {
    for chunk in raw.split_inclusive(';') {
        let candidate = chunk.trim();
        if !candidate.is_empty() {
            return candidate.to_string();
        }
    }

    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_first_terminated_tree() {
        let raw = "(A:0.1,B:0.2);\n(C:0.3,D:0.4);\n";
        assert_eq!(first_chunk(raw), "(A:0.1,B:0.2);");
    }

    #[test]
    fn skips_leading_blank_lines() {
        let raw = "\n\n  (A,B);";
        assert_eq!(first_chunk(raw), "(A,B);");
    }

    #[test]
    fn unterminated_content_is_returned_whole() {
        assert_eq!(first_chunk("(A,B)"), "(A,B)");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(first_chunk("   \n"), "");
    }
}
