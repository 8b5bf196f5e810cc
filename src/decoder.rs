use std::collections::HashMap;
use std::num::ParseIntError;

use thiserror::Error;

use crate::value::Value;

/// Single-pass cursor over the input text.
///
/// Every sub-decoder leaves `pos` just past the characters it consumed, so
/// a container picks up its next child exactly where the previous one left
/// the cursor.
pub struct Decoder<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Decodes the value beginning at the cursor, skipping leading spaces.
    ///
    /// Only the space character is skipped here; tabs and newlines are not
    /// whitespace outside of containers.
    pub fn decode(&mut self) -> Result<Value> {
        while self.curr() == Some(b' ') {
            self.pos += 1;
        }

        match self.curr() {
            Some(b'{') => self.decode_object(),
            Some(b'[') => self.decode_array(),
            Some(_) => self.decode_scalar(),
            None => Err(self.fail(DecodeErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn decode_object(&mut self) -> Result<Value> {
        self.pos += 1; // consume `{`
        let mut object = HashMap::new();

        loop {
            match self.curr_char() {
                // Commas are plain filler here, so properties with no comma
                // between them decode the same as comma-separated ones.
                Some(' ' | ',' | '\n' | '\r') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Ok(Value::Object(object));
                }
                Some('"') => {
                    let key = self.decode_string()?;
                    self.skip_past_colon()?;
                    let value = self.decode()?;
                    object.insert(key, value);
                }
                Some(c) => return Err(self.fail(DecodeErrorKind::UnexpectedToken(c))),
                None => return Err(self.fail(DecodeErrorKind::UnexpectedEndOfInput)),
            }
        }
    }

    fn decode_array(&mut self) -> Result<Value> {
        self.pos += 1; // consume `[`
        let mut array = Vec::new();

        loop {
            match self.curr_char() {
                Some(' ' | ',' | '\n' | '\r') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    return Ok(Value::Array(array));
                }
                // Anything else starts an element, so `[1 2]` decodes the
                // same as `[1, 2]`.
                Some(_) => array.push(self.decode()?),
                None => return Err(self.fail(DecodeErrorKind::UnexpectedEndOfInput)),
            }
        }
    }

    fn decode_scalar(&mut self) -> Result<Value> {
        let Some(c) = self.curr_char() else {
            return Err(self.fail(DecodeErrorKind::UnexpectedEndOfInput));
        };

        match c {
            // Literals are recognized by their first character alone; the
            // rest of the keyword is stepped over without inspection, and
            // the cursor may legally land past the end of the buffer.
            'n' => {
                self.pos += 4;
                Ok(Value::Null)
            }
            't' => {
                self.pos += 4;
                Ok(Value::Boolean(true))
            }
            'f' => {
                self.pos += 5;
                Ok(Value::Boolean(false))
            }
            '0'..='9' => self.decode_number(),
            '"' => Ok(Value::String(self.decode_string()?)),
            _ => Err(self.fail(DecodeErrorKind::UnknownCharacter(c))),
        }
    }

    fn decode_number(&mut self) -> Result<Value> {
        let start = self.pos;

        while self.curr().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }

        // Digit runs have no sign, fraction, or exponent, so the only way
        // the conversion fails is a run that does not fit in an i64.
        match self.input[start..self.pos].parse() {
            Ok(n) => Ok(Value::Integer(n)),
            Err(e) => Err(DecodeError {
                kind: DecodeErrorKind::InvalidNumber(e),
                offset: start,
            }),
        }
    }

    fn decode_string(&mut self) -> Result<String> {
        self.pos += 1; // consume the opening quote
        let mut content = String::new();
        let mut run = self.pos; // start of the current verbatim span

        loop {
            match self.curr() {
                Some(b'"') => {
                    content.push_str(&self.input[run..self.pos]);
                    self.pos += 1;
                    return Ok(content);
                }
                Some(b'\\') => {
                    content.push_str(&self.input[run..self.pos]);
                    self.pos += 1;

                    // Whatever follows the backslash is copied through
                    // untouched; there are no named escapes.
                    let Some(c) = self.curr_char() else {
                        return Err(self.fail(DecodeErrorKind::UnexpectedEndOfInput));
                    };
                    content.push(c);
                    self.pos += c.len_utf8();
                    run = self.pos;
                }
                Some(_) => self.pos += 1,
                None => return Err(self.fail(DecodeErrorKind::UnexpectedEndOfInput)),
            }
        }
    }

    /// Lenient delimiter scan: everything up to and including the first `:`
    /// is discarded, whatever it is.
    fn skip_past_colon(&mut self) -> Result<()> {
        while self.curr().is_some_and(|b| b != b':') {
            self.pos += 1;
        }

        if self.curr().is_none() {
            return Err(self.fail(DecodeErrorKind::UnexpectedEndOfInput));
        }

        self.pos += 1;
        Ok(())
    }

    fn curr(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn curr_char(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn fail(&self, kind: DecodeErrorKind) -> DecodeError {
        // The cursor can sit past the end of the buffer after an unchecked
        // literal, so clamp the reported offset to the input length.
        DecodeError {
            kind,
            offset: self.pos.min(self.input.len()),
        }
    }
}

#[derive(Debug, Error)]
#[error("Error at offset {offset}: {kind}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("unexpected token '{0}' in object")]
    UnexpectedToken(char),

    #[error("unknown character '{0}'")]
    UnknownCharacter(char),

    #[error("invalid number: {0}")]
    InvalidNumber(ParseIntError),
}

type Result<T> = std::result::Result<T, DecodeError>;
