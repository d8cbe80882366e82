use indexmap::IndexMap;

use crate::error::{AtLine, Error};

/// Split a raw source line into whitespace-separated tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// A line is a label declaration iff its first token ends with `:`.
fn is_decl(line: &[String]) -> bool {
    line.first().map_or(false, |t| t.ends_with(':'))
}

/// Label table: name -> original index of the declaration line.
struct Labels(IndexMap<String, usize>);

impl Labels {
    fn collect(lines: &[Vec<String>]) -> Result<Self, AtLine> {
        let mut decls = IndexMap::new();
        for (idx, line) in lines.iter().enumerate() {
            if !is_decl(line) {
                continue;
            }
            if line.len() > 1 {
                let msg = "extraneous tokens other than a label".to_string();
                return Err(Error::Syntax(msg).at(idx + 1));
            }
            let head = &line[0];
            let name = head[..head.len() - 1].to_string();
            if decls.insert(name, idx).is_some() {
                return Err(Error::Syntax("label already exists".to_string()).at(idx + 1));
            }
        }
        Ok(Labels(decls))
    }
}

/// Resolve label references to signed relative offsets, in place.
///
/// Offsets are expressed in the compacted index space, which numbers only the
/// lines that hold a real instruction (neither label declaration nor blank).
/// Label-declaration and blank lines are overwritten with empty token lists;
/// original line positions are preserved so 1-based line numbers stay
/// meaningful for diagnostics.
pub fn resolve(lines: &mut Vec<Vec<String>>) -> Result<(), AtLine> {
    let labels = Labels::collect(lines)?;

    // Compacted index of every real instruction line, fixed before any
    // mutation.
    let mut compacted: Vec<Option<usize>> = vec![None; lines.len()];
    let mut next = 0;
    for (idx, line) in lines.iter().enumerate() {
        if line.is_empty() || is_decl(line) {
            continue;
        }
        compacted[idx] = Some(next);
        next += 1;
    }

    // Each label binds to the first real instruction after its declaration;
    // adjacent declarations and blank lines collapse onto the same target.
    let mut targets: IndexMap<&str, usize> = IndexMap::new();
    for (name, &decl) in &labels.0 {
        let Some(target) = (decl + 1..lines.len()).find_map(|i| compacted[i]) else {
            return Err(Error::Syntax("invalid label's position".to_string()).at(decl + 1));
        };
        targets.insert(name.as_str(), target);
    }

    // Rewrite every reference token with its signed offset.
    for idx in 0..lines.len() {
        let Some(here) = compacted[idx] else { continue };
        for token in lines[idx].iter_mut() {
            if let Some(&target) = targets.get(token.as_str()) {
                *token = (target as i64 - here as i64).to_string();
            }
        }
    }

    // Blank out everything that is not a real instruction.
    for (idx, line) in lines.iter_mut().enumerate() {
        if compacted[idx].is_none() {
            line.clear();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<Vec<String>> {
        src.iter().map(|l| tokenize(l)).collect()
    }

    fn joined(lines: &[Vec<String>]) -> Vec<String> {
        lines.iter().map(|l| l.join(" ")).collect()
    }

    #[test]
    fn label_line_is_blanked() {
        let mut prog = lines(&["test1:", "add x1, x2, x3"]);
        resolve(&mut prog).unwrap();
        assert_eq!(joined(&prog), ["", "add x1, x2, x3"]);
    }

    #[test]
    fn backward_reference_skips_blank_line() {
        let mut prog = lines(&["test1:", "", "add x1, x2, x3", "j test1"]);
        resolve(&mut prog).unwrap();
        assert_eq!(joined(&prog), ["", "", "add x1, x2, x3", "j -1"]);
    }

    #[test]
    fn forward_and_backward_reference() {
        let mut prog = lines(&["j test1", "test1:", "add x1, x2, x3", "j test1"]);
        resolve(&mut prog).unwrap();
        assert_eq!(joined(&prog), ["j 1", "", "add x1, x2, x3", "j -1"]);
    }

    #[test]
    fn adjacent_labels_share_target() {
        let mut prog = lines(&[
            "j test2",
            "test1:",
            "test2:",
            "add x1, x2, x3",
            "j test1",
        ]);
        resolve(&mut prog).unwrap();
        assert_eq!(joined(&prog), ["j 1", "", "", "add x1, x2, x3", "j -1"]);
    }

    #[test]
    fn reference_in_branch_operands() {
        let mut prog = lines(&["loop:", "blt x0, x1, loop", "bge x0, x1, loop"]);
        resolve(&mut prog).unwrap();
        assert_eq!(
            joined(&prog),
            ["", "blt x0, x1, 0", "bge x0, x1, -1"]
        );
    }

    #[test]
    fn duplicate_label() {
        let mut prog = lines(&["test1:", "add x1, x2, x3", "test1:", "sub x1, x2, x3"]);
        let err = resolve(&mut prog).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(matches!(err.kind, Error::Syntax(_)));
    }

    #[test]
    fn label_with_extra_tokens() {
        let mut prog = lines(&["test1: add", "add x1, x2, x3"]);
        let err = resolve(&mut prog).unwrap_err();
        assert_eq!(err.line, 1);
        assert!(matches!(err.kind, Error::Syntax(_)));
    }

    #[test]
    fn trailing_label_has_no_target() {
        let mut prog = lines(&["add x1, x2, x3", "end:", ""]);
        let err = resolve(&mut prog).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, Error::Syntax(_)));
    }

    #[test]
    fn tokenize_then_rejoin_is_idempotent() {
        let src = "add x1, x2, x3";
        assert_eq!(tokenize(src).join(" "), src);
        assert_eq!(tokenize("  add   x1,  x2, x3 ").join(" "), src);
    }
}
