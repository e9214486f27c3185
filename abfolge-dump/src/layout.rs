//! Runtime counterpart of the codec for shapes that are only known at runtime, as given on the
//! command line. Layouts follow exactly the wire rules of the static codec.

use abfolge::{peek_count, ByteView, Decode, DecodeError, WireCategory, COUNT_SIZE};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    U8, U16, U32, U64, U128, Usize,
    I8, I16, I32, I64, I128, Isize,
    F32, F64,
    Bool,
    Char,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Scalar(ScalarKind),
    Str,
    Array(Box<Layout>),
    Fixed(Box<Layout>, usize),
    Set(Box<Layout>),
    Map(Box<Layout>, Box<Layout>),
    Tuple(Vec<Layout>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i128),
    UInt(u128),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Array(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Tuple(Vec<Value>),
}

fn scalar<T: Decode>(input: &mut ByteView<&[u8]>) -> Result<T, DecodeError> {
    let mut value = T::fresh();
    value.read(input)?;
    Ok(value)
}

/// Reads an element count and rejects it if the remaining input can not hold that many elements
/// of at least `min` bytes each.
fn decode_count(input: &mut ByteView<&[u8]>, min: usize) -> Result<usize, DecodeError> {
    let count: usize = scalar(input)?;
    match count.checked_mul(min) {
        Some(required) if required <= input.remaining() => Ok(count),
        required => Err(DecodeError::Eof { required: required.unwrap_or(usize::MAX), remaining: input.remaining() }),
    }
}

impl ScalarKind {

    pub fn size(&self) -> usize {
        use std::mem::size_of;
        match self {
            ScalarKind::U8 | ScalarKind::I8 | ScalarKind::Bool => 1,
            ScalarKind::U16 | ScalarKind::I16 => 2,
            ScalarKind::U32 | ScalarKind::I32 | ScalarKind::F32 | ScalarKind::Char => 4,
            ScalarKind::U64 | ScalarKind::I64 | ScalarKind::F64 => 8,
            ScalarKind::U128 | ScalarKind::I128 => 16,
            ScalarKind::Usize => size_of::<usize>(),
            ScalarKind::Isize => size_of::<isize>(),
        }
    }

    /// Every bit pattern is a valid value.
    fn trivial(&self) -> bool {
        !matches!(self, ScalarKind::Bool | ScalarKind::Char)
    }

    fn try_size_of(&self, input: &[u8]) -> Option<usize> {
        match self {
            ScalarKind::Bool => bool::try_size_of(input),
            ScalarKind::Char => char::try_size_of(input),
            _ if input.len() >= self.size() => Some(self.size()),
            _ => None,
        }
    }

    fn decode(&self, input: &mut ByteView<&[u8]>) -> Result<Value, DecodeError> {
        Ok(match self {
            ScalarKind::U8 => Value::UInt(scalar::<u8>(input)?.into()),
            ScalarKind::U16 => Value::UInt(scalar::<u16>(input)?.into()),
            ScalarKind::U32 => Value::UInt(scalar::<u32>(input)?.into()),
            ScalarKind::U64 => Value::UInt(scalar::<u64>(input)?.into()),
            ScalarKind::U128 => Value::UInt(scalar::<u128>(input)?),
            ScalarKind::Usize => Value::UInt(scalar::<usize>(input)? as u128),
            ScalarKind::I8 => Value::Int(scalar::<i8>(input)?.into()),
            ScalarKind::I16 => Value::Int(scalar::<i16>(input)?.into()),
            ScalarKind::I32 => Value::Int(scalar::<i32>(input)?.into()),
            ScalarKind::I64 => Value::Int(scalar::<i64>(input)?.into()),
            ScalarKind::I128 => Value::Int(scalar::<i128>(input)?),
            ScalarKind::Isize => Value::Int(scalar::<isize>(input)? as i128),
            ScalarKind::F32 => Value::Float(scalar::<f32>(input)?.into()),
            ScalarKind::F64 => Value::Float(scalar::<f64>(input)?),
            ScalarKind::Bool => Value::Bool(scalar(input)?),
            ScalarKind::Char => Value::Char(scalar(input)?),
        })
    }

}

impl Layout {

    pub fn category(&self) -> WireCategory {
        match self {
            Layout::Scalar(_) => WireCategory::Scalar,
            Layout::Str => WireCategory::ScalarArray,
            Layout::Array(elem) if matches!(**elem, Layout::Scalar(_)) => WireCategory::ScalarArray,
            Layout::Array(_) => WireCategory::DynamicArray,
            Layout::Fixed(..) => WireCategory::FixedArray,
            Layout::Set(_) | Layout::Map(..) => WireCategory::Container,
            Layout::Tuple(_) => WireCategory::Tuple,
        }
    }

    /// The encoded size if it does not depend on the content.
    pub fn static_size(&self) -> Option<usize> {
        match self {
            Layout::Scalar(kind) => Some(kind.size()),
            Layout::Fixed(elem, n) => elem.static_size()?.checked_mul(*n),
            Layout::Tuple(items) => items.iter().try_fold(0usize, |sum, item| sum.checked_add(item.static_size()?)),
            _ => None,
        }
    }

    fn trivial(&self) -> bool {
        match self {
            Layout::Scalar(kind) => kind.trivial(),
            Layout::Fixed(elem, _) => elem.trivial(),
            Layout::Tuple(items) => items.iter().all(Layout::trivial),
            _ => false,
        }
    }

    /// Number of bytes a complete, valid encoding at the start of `input` occupies.
    pub fn try_size_of(&self, input: &[u8]) -> Option<usize> {
        match self {
            Layout::Scalar(kind) => kind.try_size_of(input),
            Layout::Str => String::try_size_of(input),
            Layout::Array(elem) | Layout::Set(elem) => {
                let count = peek_count(input)?;
                elem.try_size_of_many(count, &input[COUNT_SIZE..]).map(|used| COUNT_SIZE + used)
            },
            Layout::Fixed(elem, n) => elem.try_size_of_many(*n, input),
            Layout::Map(key, value) => {
                let count = peek_count(input)?;
                if count > 0 && key.static_size() == Some(0) && value.static_size() == Some(0) {
                    key.try_size_of(&input[COUNT_SIZE..])?;
                    value.try_size_of(&input[COUNT_SIZE..])?;
                    return Some(COUNT_SIZE);
                }
                let mut used = COUNT_SIZE;
                for _ in 0..count {
                    used += key.try_size_of(&input[used..])?;
                    used += value.try_size_of(&input[used..])?;
                }
                Some(used)
            },
            Layout::Tuple(items) => {
                let mut used = 0;
                for item in items {
                    used += item.try_size_of(&input[used..])?;
                }
                Some(used)
            },
        }
    }

    fn try_size_of_many(&self, count: usize, input: &[u8]) -> Option<usize> {
        match self.static_size() {
            Some(0) => {
                if count > 0 {
                    self.try_size_of(input)?;
                }
                Some(0)
            },
            Some(size) if self.trivial() => {
                let total = count.checked_mul(size)?;
                if input.len() >= total { Some(total) } else { None }
            },
            _ => {
                let mut used = 0;
                for _ in 0..count {
                    used += self.try_size_of(&input[used..])?;
                }
                Some(used)
            },
        }
    }

    pub fn decode(&self, input: &mut ByteView<&[u8]>) -> Result<Value, DecodeError> {
        Ok(match self {
            Layout::Scalar(kind) => kind.decode(input)?,
            Layout::Str => Value::Str(scalar(input)?),
            Layout::Array(elem) => Value::Array(elem.decode_many(input)?),
            Layout::Set(elem) => Value::Set(elem.decode_many(input)?),
            Layout::Fixed(elem, n) => Value::Array((0..*n).map(|_| elem.decode(input)).collect::<Result<Vec<_>, DecodeError>>()?),
            Layout::Map(key, value) => {
                let min = key.static_size().unwrap_or(1).saturating_add(value.static_size().unwrap_or(1));
                let count = decode_count(input, min)?;
                let mut entries = Vec::new();
                entries.try_reserve_exact(count)?;
                for _ in 0..count {
                    entries.push((key.decode(input)?, value.decode(input)?));
                }
                Value::Map(entries)
            },
            Layout::Tuple(items) => Value::Tuple(items.iter().map(|item| item.decode(input)).collect::<Result<Vec<_>, DecodeError>>()?),
        })
    }

    fn decode_many(&self, input: &mut ByteView<&[u8]>) -> Result<Vec<Value>, DecodeError> {
        let count = decode_count(input, self.static_size().unwrap_or(1))?;
        let mut values = Vec::new();
        values.try_reserve_exact(count)?;
        for _ in 0..count {
            values.push(self.decode(input)?);
        }
        Ok(values)
    }

}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn block(items: impl Iterator<Item = String>) -> String {
            items.flat_map(|item| format!("{},", item).lines().map(|line| format!("  {}", line)).collect::<Vec<String>>())
                .collect::<Vec<String>>().join("\n")
        }
        match self {
            Value::Int(v)   => write!(f, "{}", v),
            Value::UInt(v)  => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v)  => write!(f, "{}", v),
            Value::Char(v)  => write!(f, "{:?}", v),
            Value::Str(v)   => write!(f, "{:?}", v),
            Value::Array(v) if v.is_empty() => f.write_str("[]"),
            Value::Array(v) => write!(f, "[\n{}\n]", block(v.iter().map(Value::to_string))),
            Value::Set(v) if v.is_empty() => f.write_str("{}"),
            Value::Set(v)   => write!(f, "{{\n{}\n}}", block(v.iter().map(Value::to_string))),
            Value::Map(v) if v.is_empty() => f.write_str("{}"),
            Value::Map(v)   => write!(f, "{{\n{}\n}}", block(v.iter().map(|(k, v)| format!("{}: {}", k, v)))),
            Value::Tuple(v) if v.is_empty() => f.write_str("()"),
            Value::Tuple(v) => write!(f, "(\n{}\n)", block(v.iter().map(Value::to_string))),
        }
    }
}
