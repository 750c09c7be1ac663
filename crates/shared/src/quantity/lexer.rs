/// Vulgar fraction glyphs used in plans and the decimal each one stands for.
pub const FRACTION_GLYPHS: [(char, f64); 5] = [
    ('\u{bd}', 0.5),
    ('\u{bc}', 0.25),
    ('\u{be}', 0.75),
    ('\u{2153}', 0.333),
    ('\u{2154}', 0.667),
];

pub fn fraction_value(glyph: char) -> Option<f64> {
    FRACTION_GLYPHS
        .iter()
        .find(|(candidate, _)| *candidate == glyph)
        .map(|(_, value)| *value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// Digits with an optional `.` or `,` decimal part.
    Number(f64),
    /// A single fraction glyph such as `½`.
    Fraction(f64),
    /// A run of alphabetic characters.
    Word(&'a str),
    /// `(120g)` anywhere in the string.
    ParentheticalGrams(f64),
    Symbol(char),
}

/// A token and its byte range in the lexed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub start: usize,
    pub end: usize,
}

impl<'a> Spanned<'a> {
    pub fn word(&self) -> Option<&'a str> {
        match self.token {
            Token::Word(word) => Some(word),
            _ => None,
        }
    }
}

/// The amount a quantity string opens with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadingAmount {
    pub value: f64,
    /// Number of tokens the amount was built from.
    pub tokens: usize,
    /// Byte offset right after the amount.
    pub end: usize,
    /// Whether the amount is a lone fraction glyph (`½`, not `1½`).
    pub glyph_only: bool,
}

/// Amount at the very start of `tokens`: a fraction glyph, a number, or a
/// number with a fraction glyph glued to it (`1½`).
pub fn leading_amount(tokens: &[Spanned<'_>]) -> Option<LeadingAmount> {
    let first = tokens.first().filter(|t| t.start == 0)?;

    match first.token {
        Token::Fraction(value) => Some(LeadingAmount {
            value,
            tokens: 1,
            end: first.end,
            glyph_only: true,
        }),
        Token::Number(whole) => match tokens.get(1) {
            Some(Spanned {
                token: Token::Fraction(fraction),
                start,
                end,
            }) if *start == first.end => Some(LeadingAmount {
                value: whole + fraction,
                tokens: 2,
                end: *end,
                glyph_only: false,
            }),
            _ => Some(LeadingAmount {
                value: whole,
                tokens: 1,
                end: first.end,
                glyph_only: false,
            }),
        },
        _ => None,
    }
}

pub fn tokenize(input: &str) -> Vec<Spanned<'_>> {
    Lexer::new(input).collect()
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace_from(&self, from: usize) -> usize {
        let rest = &self.src[from..];
        from + (rest.len() - rest.trim_start().len())
    }

    /// Number literal starting at `start`, with the byte offset it ends at.
    fn number_at(&self, start: usize) -> Option<(f64, usize)> {
        let bytes = self.src.as_bytes();
        let int_len = bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_len == 0 {
            return None;
        }

        let mut end = start + int_len;
        if matches!(bytes.get(end), Some(b'.' | b',')) {
            let frac_len = bytes[end + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if frac_len > 0 {
                end += 1 + frac_len;
            }
        }

        let literal = self.src[start..end].replace(',', ".");
        literal.parse().ok().map(|value| (value, end))
    }

    /// `(` number `g` `)` at the current position, spaces allowed inside.
    fn parenthetical_grams(&self) -> Option<(f64, usize)> {
        let start = self.skip_whitespace_from(self.pos + 1);
        let (grams, after) = self.number_at(start)?;

        let unit = self.skip_whitespace_from(after);
        let rest = self.src[unit..].strip_prefix(|c: char| c.eq_ignore_ascii_case(&'g'))?;
        let close = self.skip_whitespace_from(self.src.len() - rest.len());

        self.src[close..]
            .starts_with(')')
            .then_some((grams, close + 1))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        self.pos = self.skip_whitespace_from(self.pos);
        let start = self.pos;
        let c = self.peek()?;

        let token = if c.is_ascii_digit() {
            match self.number_at(start) {
                Some((value, end)) => {
                    self.pos = end;
                    Token::Number(value)
                }
                None => {
                    self.bump();
                    Token::Symbol(c)
                }
            }
        } else if let Some(value) = fraction_value(c) {
            self.bump();
            Token::Fraction(value)
        } else if c == '(' {
            match self.parenthetical_grams() {
                Some((grams, end)) => {
                    self.pos = end;
                    Token::ParentheticalGrams(grams)
                }
                None => {
                    self.bump();
                    Token::Symbol(c)
                }
            }
        } else if c.is_alphabetic() {
            let len = src[start..]
                .find(|ch: char| !ch.is_alphabetic())
                .unwrap_or(src.len() - start);
            self.pos = start + len;
            Token::Word(&src[start..self.pos])
        } else {
            self.bump();
            Token::Symbol(c)
        };

        Some(Spanned {
            token,
            start,
            end: self.pos,
        })
    }
}
