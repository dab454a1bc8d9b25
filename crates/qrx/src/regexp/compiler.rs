// Pattern compiler
//
// Two passes: `parse` turns pattern bytes into a flat sequence of nodes
// (literals, classes, anchors and repetitions of a single unit), and `emit`
// lowers the nodes into the program the matcher walks, enforcing the cell
// budget as it goes.
//
// Syntax:
//   c        literal byte (compared case-insensitively when asked)
//   .        any byte
//   [set]    bracket expression; leading ^ negates, a-z ranges, \s, escapes
//   ^        beginning of subject, only as the first byte of the pattern
//   $        end of subject, only as the last byte of the pattern
//   *  +  ?  zero-or-more, one-or-more, zero-or-one of the preceding unit
//   \< \>    beginning / end of a word
//   \b       word boundary
//   \s       whitespace class
//   \n \r \t \f \xHH \NNN   byte escapes; \c is a literal c otherwise

use super::PatternError;
use super::class::ByteSet;
use super::program::{Instr, Program};
use super::wildcard::wildcard_to_regex;
use crate::options::CompileOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKind {
    ZeroOrMore, // *
    OneOrMore,  // +
    ZeroOrOne,  // ?
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Char(u8),
    Any,
    Class(ByteSet),
    Bol,
    Eol,
    Bow,
    Eow,
    WordBoundary,
    Repeat { kind: RepeatKind, unit: Box<Node> },
}

impl Node {
    /// Only single-byte units may carry a quantifier.
    fn is_quantifiable(&self) -> bool {
        matches!(self, Node::Char(_) | Node::Any | Node::Class(_))
    }
}

/// Compile pattern text into a program.
pub fn compile(
    pattern: &[u8],
    case_sensitive: bool,
    wildcard: bool,
    options: &CompileOptions,
) -> Result<Program, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    let translated;
    let source = if wildcard {
        translated = wildcard_to_regex(pattern);
        &translated[..]
    } else {
        pattern
    };
    let nodes = parse(source, case_sensitive)?;
    emit(&nodes, case_sensitive, options.max_cells)
}

pub fn parse(pattern: &[u8], case_sensitive: bool) -> Result<Vec<Node>, PatternError> {
    let mut nodes: Vec<Node> = Vec::with_capacity(pattern.len());
    let mut pos = 0;

    while pos < pattern.len() {
        let c = pattern[pos];
        match c {
            b'^' if pos == 0 => {
                nodes.push(Node::Bol);
                pos += 1;
            }
            b'$' if pos == pattern.len() - 1 => {
                nodes.push(Node::Eol);
                pos += 1;
            }
            b'.' => {
                nodes.push(Node::Any);
                pos += 1;
            }
            b'[' => {
                let (set, next) = parse_class(pattern, pos, case_sensitive)?;
                nodes.push(Node::Class(set));
                pos = next;
            }
            b'*' | b'+' | b'?' => {
                let unit = match nodes.pop() {
                    Some(last) if last.is_quantifiable() => last,
                    Some(Node::Repeat { .. }) => {
                        return Err(syntax(pos, "quantifier follows another quantifier"));
                    }
                    Some(_) => return Err(syntax(pos, "quantifier follows an anchor")),
                    None => return Err(syntax(pos, "nothing to repeat")),
                };
                let kind = match c {
                    b'*' => RepeatKind::ZeroOrMore,
                    b'+' => RepeatKind::OneOrMore,
                    _ => RepeatKind::ZeroOrOne,
                };
                nodes.push(Node::Repeat {
                    kind,
                    unit: Box::new(unit),
                });
                pos += 1;
            }
            b'\\' => {
                pos += 1;
                let Some(&e) = pattern.get(pos) else {
                    return Err(syntax(pos - 1, "pattern ends with '\\'"));
                };
                match e {
                    b'<' => {
                        nodes.push(Node::Bow);
                        pos += 1;
                    }
                    b'>' => {
                        nodes.push(Node::Eow);
                        pos += 1;
                    }
                    b'b' => {
                        nodes.push(Node::WordBoundary);
                        pos += 1;
                    }
                    b's' => {
                        nodes.push(Node::Class(ByteSet::whitespace()));
                        pos += 1;
                    }
                    _ => {
                        let b = escape_value(pattern, &mut pos);
                        nodes.push(literal(b, case_sensitive));
                    }
                }
            }
            _ => {
                nodes.push(literal(c, case_sensitive));
                pos += 1;
            }
        }
    }

    Ok(nodes)
}

#[inline]
fn literal(b: u8, case_sensitive: bool) -> Node {
    if case_sensitive {
        Node::Char(b)
    } else {
        Node::Char(b.to_ascii_lowercase())
    }
}

#[inline]
fn syntax(pos: usize, reason: &'static str) -> PatternError {
    PatternError::Syntax { pos, reason }
}

/// Decode the escape whose first byte is at `pattern[*pos]` (just past the
/// backslash), leaving `*pos` past the escape.
fn escape_value(pattern: &[u8], pos: &mut usize) -> u8 {
    let c = pattern[*pos];
    *pos += 1;
    match c {
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'f' => 0x0c,
        b'b' => 0x08,
        b'x' => {
            let mut value: u32 = 0;
            let mut digits = 0;
            while digits < 2
                && let Some(d) = pattern.get(*pos).and_then(|b| (*b as char).to_digit(16))
            {
                value = value * 16 + d;
                *pos += 1;
                digits += 1;
            }
            if digits == 0 { b'x' } else { value as u8 }
        }
        b'0'..=b'7' => {
            let mut value = u32::from(c - b'0');
            let mut digits = 1;
            while digits < 3
                && let Some(&d) = pattern.get(*pos)
                && (b'0'..=b'7').contains(&d)
            {
                value = value * 8 + u32::from(d - b'0');
                *pos += 1;
                digits += 1;
            }
            // \400 and above wrap, as a byte would
            (value & 0xff) as u8
        }
        _ => c,
    }
}

/// Parse `[...]` starting at `pattern[start] == b'['`.
/// Returns the set and the index just past the closing `]`.
fn parse_class(
    pattern: &[u8],
    start: usize,
    case_sensitive: bool,
) -> Result<(ByteSet, usize), PatternError> {
    let mut set = ByteSet::new();
    let mut pos = start + 1;

    let negated = pattern.get(pos) == Some(&b'^');
    if negated {
        pos += 1;
    }

    // Last single byte added, the candidate low end of a range.
    let mut prev: Option<u8> = None;

    // `]` right after `[` or `[^` is a literal
    if pattern.get(pos) == Some(&b']') {
        set.insert(b']');
        prev = Some(b']');
        pos += 1;
    }

    loop {
        let Some(&c) = pattern.get(pos) else {
            return Err(syntax(start, "unterminated '['"));
        };
        match c {
            b']' => {
                pos += 1;
                break;
            }
            b'-' if prev.is_some() && pattern.get(pos + 1).is_some_and(|&n| n != b']') => {
                pos += 1;
                let lo = prev.take().unwrap_or(b'-');
                match class_atom(pattern, &mut pos, start)? {
                    ClassAtom::Byte(hi) => set.insert_range(lo, hi),
                    // `a-\s` is not a range: keep both ends as they are
                    ClassAtom::Whitespace => {
                        set.insert(b'-');
                        set.insert_all(&crate::limits::WHITESPACE);
                    }
                }
            }
            _ => match class_atom(pattern, &mut pos, start)? {
                ClassAtom::Byte(b) => {
                    set.insert(b);
                    prev = Some(b);
                }
                ClassAtom::Whitespace => {
                    set.insert_all(&crate::limits::WHITESPACE);
                    prev = None;
                }
            },
        }
    }

    if !case_sensitive {
        set.fold_case();
    }
    if negated {
        set.negate();
    }
    Ok((set, pos))
}

enum ClassAtom {
    Byte(u8),
    Whitespace,
}

/// One member of a bracket expression: a plain byte, an escape, or `\s`.
fn class_atom(pattern: &[u8], pos: &mut usize, start: usize) -> Result<ClassAtom, PatternError> {
    let c = pattern[*pos];
    *pos += 1;
    if c != b'\\' {
        return Ok(ClassAtom::Byte(c));
    }
    match pattern.get(*pos) {
        None => Err(syntax(start, "unterminated '['")),
        Some(b's') => {
            *pos += 1;
            Ok(ClassAtom::Whitespace)
        }
        Some(_) => Ok(ClassAtom::Byte(escape_value(pattern, pos))),
    }
}

/// Lower parsed nodes into a program of at most `max_cells` cells.
pub fn emit(nodes: &[Node], case_sensitive: bool, max_cells: usize) -> Result<Program, PatternError> {
    let mut emitter = Emitter {
        out: Vec::with_capacity(nodes.len() + 1),
        cells: 0,
        max_cells,
    };
    for node in nodes {
        match node {
            Node::Repeat { kind, unit } => {
                let unit = unit_instr(unit);
                match kind {
                    RepeatKind::ZeroOrMore => emitter.wrap(Instr::Closure, unit)?,
                    RepeatKind::ZeroOrOne => emitter.wrap(Instr::Optional, unit)?,
                    RepeatKind::OneOrMore => {
                        emitter.push(unit)?;
                        emitter.wrap(Instr::Closure, unit)?;
                    }
                }
            }
            _ => emitter.push(unit_instr(node))?,
        }
    }
    emitter.push(Instr::End)?;
    Ok(Program::new(emitter.out, emitter.cells, case_sensitive))
}

fn unit_instr(node: &Node) -> Instr {
    match node {
        Node::Char(c) => Instr::Char(*c),
        Node::Any => Instr::Any,
        Node::Class(set) => Instr::Class(*set),
        Node::Bol => Instr::Bol,
        Node::Eol => Instr::Eol,
        Node::Bow => Instr::Bow,
        Node::Eow => Instr::Eow,
        Node::WordBoundary => Instr::WordBoundary,
        // The parser never nests repetitions
        Node::Repeat { unit, .. } => unit_instr(unit),
    }
}

struct Emitter {
    out: Vec<Instr>,
    cells: usize,
    max_cells: usize,
}

impl Emitter {
    fn push(&mut self, instr: Instr) -> Result<(), PatternError> {
        self.cells += instr.cells();
        if self.cells > self.max_cells {
            return Err(PatternError::Overflow {
                limit: self.max_cells,
            });
        }
        self.out.push(instr);
        Ok(())
    }

    /// `wrapper unit END`
    fn wrap(&mut self, wrapper: Instr, unit: Instr) -> Result<(), PatternError> {
        debug_assert!(unit.is_unit());
        self.push(wrapper)?;
        self.push(unit)?;
        self.push(Instr::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrs(pattern: &str) -> Vec<Instr> {
        compile(pattern.as_bytes(), true, false, &CompileOptions::default())
            .unwrap()
            .instrs()
            .to_vec()
    }

    fn error(pattern: &str) -> PatternError {
        compile(pattern.as_bytes(), true, false, &CompileOptions::default()).unwrap_err()
    }

    #[test]
    fn test_literals() {
        assert_eq!(instrs("ab"), vec![Instr::Char(b'a'), Instr::Char(b'b'), Instr::End]);
    }

    #[test]
    fn test_anchors_only_at_edges() {
        assert_eq!(instrs("^a$"), vec![Instr::Bol, Instr::Char(b'a'), Instr::Eol, Instr::End]);
        assert_eq!(
            instrs("a^$b"),
            vec![Instr::Char(b'a'), Instr::Char(b'^'), Instr::Char(b'$'), Instr::Char(b'b'), Instr::End]
        );
    }

    #[test]
    fn test_closure_layout() {
        assert_eq!(
            instrs("a*b"),
            vec![Instr::Closure, Instr::Char(b'a'), Instr::End, Instr::Char(b'b'), Instr::End]
        );
        assert_eq!(
            instrs("a?"),
            vec![Instr::Optional, Instr::Char(b'a'), Instr::End, Instr::End]
        );
    }

    #[test]
    fn test_plus_duplicates_unit() {
        assert_eq!(
            instrs(".+"),
            vec![Instr::Any, Instr::Closure, Instr::Any, Instr::End, Instr::End]
        );
    }

    #[test]
    fn test_case_insensitive_literal_is_lowered() {
        let program = compile(b"AbC", false, false, &CompileOptions::default()).unwrap();
        assert_eq!(
            program.instrs(),
            &[Instr::Char(b'a'), Instr::Char(b'b'), Instr::Char(b'c'), Instr::End]
        );
        assert!(!program.case_sensitive());
    }

    #[test]
    fn test_escapes() {
        assert_eq!(instrs(r"\n\t\x41\101\."), vec![
            Instr::Char(b'\n'),
            Instr::Char(b'\t'),
            Instr::Char(b'A'),
            Instr::Char(b'A'),
            Instr::Char(b'.'),
            Instr::End,
        ]);
        assert_eq!(instrs(r"\<\>\b"), vec![Instr::Bow, Instr::Eow, Instr::WordBoundary, Instr::End]);
        assert_eq!(instrs(r"\xg"), vec![Instr::Char(b'x'), Instr::Char(b'g'), Instr::End]);
    }

    #[test]
    fn test_class() {
        let program = instrs("[a-c_]");
        let Instr::Class(set) = program[0] else {
            panic!("expected class, got {:?}", program[0]);
        };
        assert_eq!(set.len(), 4);
        assert!(set.contains(b'b'));
        assert!(set.contains(b'_'));
        assert!(!set.contains(b'd'));
    }

    #[test]
    fn test_negated_class() {
        let Instr::Class(set) = instrs("[^0-9]")[0] else {
            panic!("expected class");
        };
        assert!(!set.contains(b'5'));
        assert!(set.contains(b'x'));
        assert_eq!(set.len(), 246);
    }

    #[test]
    fn test_class_edge_members() {
        let Instr::Class(set) = instrs("[]a-]")[0] else {
            panic!("expected class");
        };
        assert!(set.contains(b']'));
        assert!(set.contains(b'a'));
        assert!(set.contains(b'-'));
        assert_eq!(set.len(), 3);

        let Instr::Class(set) = instrs(r"[\s\]x]")[0] else {
            panic!("expected class");
        };
        assert!(set.contains(b' '));
        assert!(set.contains(b'\t'));
        assert!(set.contains(b']'));
        assert!(set.contains(b'x'));
    }

    #[test]
    fn test_case_insensitive_negated_class() {
        let program = compile(b"[^a]", false, false, &CompileOptions::default()).unwrap();
        let Instr::Class(set) = program.instrs()[0] else {
            panic!("expected class");
        };
        assert!(!set.contains(b'a'));
        assert!(!set.contains(b'A'));
        assert!(set.contains(b'b'));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(error("[abc"), PatternError::Syntax { pos: 0, .. }));
        assert!(matches!(error("*a"), PatternError::Syntax { pos: 0, .. }));
        assert!(matches!(error("^*"), PatternError::Syntax { pos: 1, .. }));
        assert!(matches!(error(r"\b+"), PatternError::Syntax { .. }));
        assert!(matches!(error(r"\<?"), PatternError::Syntax { .. }));
        assert!(matches!(error("a**"), PatternError::Syntax { pos: 2, .. }));
        assert!(matches!(error("a?+"), PatternError::Syntax { .. }));
        assert!(matches!(error("ab\\"), PatternError::Syntax { pos: 2, .. }));
        assert_eq!(error(""), PatternError::Empty);
    }

    #[test]
    fn test_cell_accounting() {
        let options = CompileOptions::default();
        assert_eq!(compile(b"a", true, false, &options).unwrap().cells(), 2);
        assert_eq!(compile(b"[a]", true, false, &options).unwrap().cells(), 18);
        assert_eq!(compile(b"a*", true, false, &options).unwrap().cells(), 4);
        assert_eq!(compile(b"a+", true, false, &options).unwrap().cells(), 5);
    }

    #[test]
    fn test_overflow_boundary() {
        let options = CompileOptions::default().with_max_cells(8);
        // seven literals plus END fill the budget exactly
        assert!(compile(b"aaaaaaa", true, false, &options).is_ok());
        assert_eq!(
            compile(b"aaaaaaaa", true, false, &options).unwrap_err(),
            PatternError::Overflow { limit: 8 }
        );
    }

    #[test]
    fn test_wildcard_compiles_translation() {
        let program = compile(b"*.c", true, true, &CompileOptions::default()).unwrap();
        assert_eq!(program.instrs(), &[
            Instr::Bol,
            Instr::Closure,
            Instr::Any,
            Instr::End,
            Instr::Char(b'.'),
            Instr::Char(b'c'),
            Instr::Eol,
            Instr::End,
        ]);
    }
}
