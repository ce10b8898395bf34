//! A recursive-descent parser from pattern bytes to an [`Ast`].
//!
//! The grammar (lowest precedence first):
//!
//! ```text
//! Regex      := Alt
//! Alt        := Concat ('|' Concat)*
//! Concat     := Quant*
//! Quant      := Atom ('*' | '+' | '?')?
//! Atom       := '(' Regex ')' | '[' Class ']' | '.' | '^' | '$' | Literal
//! Class      := '^'? ClassItem+
//! ClassItem  := Char ('-' Char)?
//! Literal    := any byte except ( ) [ ] . * + ? | ^ $ \
//!             | '\' any byte
//! ```
//!
//! Unlike the ancestor project's file-format parser (built on `nom`, which
//! reads a `&str` and reports errors via the remaining unparsed slice), every
//! error here must carry the exact zero-based *byte* offset into the
//! original pattern (§4.3), including offsets produced mid-escape or inside
//! a character class. A hand-written cursor over `&[u8]` that threads a
//! running position counter gives that directly; reconstructing it from a
//! `nom` remainder would be more indirect for no benefit, since this
//! grammar's tokens are single bytes, not the multi-byte-aware file format
//! the ancestor parses. The parser never recovers: the first error stops it.

use crate::ast::Ast;
use crate::error::{CompileError, ErrorKind};
use crate::predicate::{ByteSet, Predicate};

/// Parses `pattern` into an [`Ast`], or the first [`CompileError`] encountered.
pub(crate) fn parse(pattern: &[u8]) -> Result<Ast, CompileError> {
    Cursor::new(pattern).parse()
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn err(&self, kind: ErrorKind) -> CompileError {
        CompileError::new(kind, self.pos)
    }

    fn err_at(&self, kind: ErrorKind, position: usize) -> CompileError {
        CompileError::new(kind, position)
    }

    fn parse(mut self) -> Result<Ast, CompileError> {
        let ast = self.parse_alt()?;
        match self.peek() {
            None => Ok(ast),
            Some(b) => Err(self.err(ErrorKind::UnexpectedChar(b))),
        }
    }

    fn parse_alt(&mut self) -> Result<Ast, CompileError> {
        let mut left = self.parse_concat()?;
        while self.peek() == Some(b'|') {
            self.bump();
            let right = self.parse_concat()?;
            left = Ast::Alt(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_concat(&mut self) -> Result<Ast, CompileError> {
        let mut nodes = Vec::new();
        while let Some(b) = self.peek() {
            if b == b'|' || b == b')' {
                break;
            }
            nodes.push(self.parse_quant()?);
        }
        match nodes.len() {
            0 => Ok(Ast::Empty),
            1 => Ok(nodes.pop().expect("len checked above")),
            _ => {
                let mut nodes = nodes.into_iter();
                let first = nodes.next().expect("len checked above");
                Ok(nodes.fold(first, |acc, next| Ast::Concat(Box::new(acc), Box::new(next))))
            }
        }
    }

    fn parse_quant(&mut self) -> Result<Ast, CompileError> {
        let atom = self.parse_atom()?;
        match self.peek() {
            Some(b'*') => {
                self.bump();
                Ok(Ast::Star(Box::new(atom)))
            }
            Some(b'+') => {
                self.bump();
                Ok(Ast::Plus(Box::new(atom)))
            }
            Some(b'?') => {
                self.bump();
                Ok(Ast::Question(Box::new(atom)))
            }
            _ => Ok(atom),
        }
    }

    fn parse_atom(&mut self) -> Result<Ast, CompileError> {
        match self.peek() {
            None => Err(self.err(ErrorKind::UnexpectedEnd)),
            Some(b'(') => {
                let open_pos = self.pos;
                self.bump();
                let inner = self.parse_alt()?;
                if self.peek() == Some(b')') {
                    self.bump();
                    Ok(Ast::Group(Box::new(inner)))
                } else {
                    Err(self.err_at(ErrorKind::UnclosedGroup, open_pos))
                }
            }
            Some(b'[') => self.parse_class(),
            Some(b'.') => {
                self.bump();
                Ok(Ast::Char(Predicate::dot()))
            }
            Some(b'^') => {
                self.bump();
                Ok(Ast::AnchorStart)
            }
            Some(b'$') => {
                self.bump();
                Ok(Ast::AnchorEnd)
            }
            Some(b'*') | Some(b'+') | Some(b'?') => Err(self.err(ErrorKind::NothingToRepeat)),
            Some(b'\\') => {
                self.bump();
                match self.bump() {
                    Some(c) => Ok(Ast::Char(Predicate::literal(c))),
                    None => Err(self.err(ErrorKind::UnexpectedEnd)),
                }
            }
            Some(c) => {
                self.bump();
                Ok(Ast::Char(Predicate::literal(c)))
            }
        }
    }

    fn parse_class(&mut self) -> Result<Ast, CompileError> {
        let open_pos = self.pos;
        self.bump(); // consume '['
        let negated = if self.peek() == Some(b'^') {
            self.bump();
            true
        } else {
            false
        };

        let mut set = ByteSet::empty();
        let mut has_item = false;
        loop {
            match self.peek() {
                None => return Err(self.err_at(ErrorKind::UnclosedClass, open_pos)),
                Some(b']') if has_item => {
                    self.bump();
                    break;
                }
                _ => {
                    has_item = true;
                    let lo = self.read_class_byte(open_pos)?;
                    let is_range = self.peek() == Some(b'-')
                        && !matches!(self.peek_at(1), None | Some(b']'));
                    if is_range {
                        let dash_pos = self.pos;
                        self.bump(); // consume '-'
                        let hi = self.read_class_byte(open_pos)?;
                        if lo > hi {
                            return Err(self.err_at(ErrorKind::InvalidRange, dash_pos));
                        }
                        set.insert_range(lo, hi);
                    } else {
                        set.insert(lo);
                    }
                }
            }
        }
        Ok(Ast::Char(Predicate::class(set, negated)))
    }

    fn read_class_byte(&mut self, open_pos: usize) -> Result<u8, CompileError> {
        match self.bump() {
            None => Err(self.err_at(ErrorKind::UnclosedClass, open_pos)),
            Some(b'\\') => self
                .bump()
                .ok_or_else(|| self.err_at(ErrorKind::UnclosedClass, open_pos)),
            Some(b) => Ok(b),
        }
    }
}
