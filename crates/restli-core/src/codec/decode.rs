use super::{EMPTY_STRING_TOKEN, LIST_PREFIX};
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of token")]
    UnexpectedEnd,
    #[error("unexpected character '{found}' at {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("trailing input at {0}")]
    TrailingInput(usize),
    #[error("escaped bytes at {0} are not valid utf-8")]
    InvalidUtf8(usize),
    #[error("query parameter `{0}` has no `=`")]
    MissingParamValue(String),
}

/// Parses a grammar token back into a structured value. The wire form is
/// untyped, so every scalar comes back as a string.
pub fn decode_value(input: &str) -> Result<Value, DecodeError> {
    if input.is_empty() {
        return Ok(Value::Null);
    }
    let mut parser = Parser { input, position: 0 };
    let value = parser.parse_value()?;
    if parser.position != input.len() {
        return Err(DecodeError::TrailingInput(parser.position));
    }
    Ok(value)
}

pub fn decode_params(query: &str) -> Result<Map<String, Value>, DecodeError> {
    let mut out = Map::new();
    if query.is_empty() {
        return Ok(out);
    }
    let mut offset = 0;
    for pair in query.split('&') {
        let Some((raw_key, raw_value)) = pair.split_once('=') else {
            return Err(DecodeError::MissingParamValue(pair.to_string()));
        };
        let key = percent_decode(raw_key, offset)?;
        let value_offset = offset + raw_key.len() + 1;
        let value = decode_value(raw_value).map_err(|error| shift(error, value_offset))?;
        out.insert(key, value);
        offset += pair.len() + 1;
    }
    Ok(out)
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        let rest = &self.input[self.position..];
        if rest.starts_with(LIST_PREFIX) {
            self.position += LIST_PREFIX.len();
            return self.parse_list();
        }
        if rest.starts_with('(') {
            self.position += 1;
            return self.parse_map();
        }
        Ok(match self.parse_scalar()? {
            Some(text) => Value::String(text),
            None => Value::Null,
        })
    }

    fn parse_list(&mut self) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        if self.eat(b')') {
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            if self.eat(b',') {
                continue;
            }
            self.expect(b')')?;
            return Ok(Value::Array(items));
        }
    }

    fn parse_map(&mut self) -> Result<Value, DecodeError> {
        let mut fields = Map::new();
        if self.eat(b')') {
            return Ok(Value::Object(fields));
        }
        loop {
            let key_position = self.position;
            let Some(key) = self.parse_scalar()? else {
                return Err(self.unexpected_at(key_position));
            };
            self.expect(b':')?;
            let value = self.parse_value()?;
            fields.insert(key, value);
            if self.eat(b',') {
                continue;
            }
            self.expect(b')')?;
            return Ok(Value::Object(fields));
        }
    }

    /// `None` for an empty token, which only a null can produce.
    fn parse_scalar(&mut self) -> Result<Option<String>, DecodeError> {
        let start = self.position;
        let bytes = self.input.as_bytes();
        while self.position < bytes.len() {
            match bytes[self.position] {
                b',' | b')' | b':' => break,
                b'(' => {
                    return Err(DecodeError::UnexpectedChar {
                        found: '(',
                        position: self.position,
                    })
                }
                _ => self.position += 1,
            }
        }
        let raw = &self.input[start..self.position];
        match raw {
            "" => Ok(None),
            EMPTY_STRING_TOKEN => Ok(Some(String::new())),
            _ => percent_decode(raw, start).map(Some),
        }
    }

    fn unexpected_at(&self, position: usize) -> DecodeError {
        match self.input[position..].chars().next() {
            Some(found) => DecodeError::UnexpectedChar { found, position },
            None => DecodeError::UnexpectedEnd,
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.input.as_bytes().get(self.position) == Some(&byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), DecodeError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.unexpected_at(self.position))
        }
    }
}

fn percent_decode(raw: &str, position: usize) -> Result<String, DecodeError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8(position))
}

fn shift(error: DecodeError, offset: usize) -> DecodeError {
    match error {
        DecodeError::UnexpectedChar { found, position } => DecodeError::UnexpectedChar {
            found,
            position: position + offset,
        },
        DecodeError::TrailingInput(position) => DecodeError::TrailingInput(position + offset),
        DecodeError::InvalidUtf8(position) => DecodeError::InvalidUtf8(position + offset),
        other => other,
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
