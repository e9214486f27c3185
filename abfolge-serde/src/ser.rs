use serde::{ser, Serialize};
use abfolge::{ByteView, Encode, EncodeError};

use crate::error::{Error, Result};
use crate::size::serialized_size;

pub struct Serializer<B> {
    output: ByteView<B>,
}

/// Serializes `value` into a vector of exactly [`serialized_size`] bytes.
pub fn to_vec<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    let size = serialized_size(value)?;
    let mut serializer = Serializer::new(vec![0u8; size]);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serializes `value` to the start of `buf` and returns the number of bytes written. The size is
/// computed first, nothing is written if the value does not fit.
pub fn to_slice<T: ?Sized + Serialize>(value: &T, buf: &mut [u8]) -> Result<usize> {
    let required = serialized_size(value)?;
    if required > buf.len() {
        return Err(Error::Encode(EncodeError::Overflow { required, remaining: buf.len() }));
    }
    let mut serializer = Serializer::new(buf);
    value.serialize(&mut serializer)?;
    Ok(serializer.position())
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Serializer<B> {

    pub fn new(buf: B) -> Self {
        Self { output: ByteView::new(buf) }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.output.position()
    }

    pub fn into_inner(self) -> B {
        self.output.into_inner()
    }

    #[inline]
    fn emit<T: Encode + ?Sized>(&mut self, v: &T) -> Result<()> {
        v.write(&mut self.output)?;
        Ok(())
    }

}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::Serializer for &'a mut Serializer<B> {

    type Ok = ();
    type Error = Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.emit(&v)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.emit(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.emit(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.emit(&0u8)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        self.emit(&1u8)?;
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(self, _name: &'static str, index: u32, _variant: &'static str) -> Result<()> {
        self.emit(&index)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, index: u32, _variant: &'static str, value: &T) -> Result<()> {
        self.emit(&index)?;
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        match len {
            Some(l) => {
                self.emit(&l)?;
                Ok(self)
            },
            None => Err(Error::Length),
        }
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(self, _name: &'static str, index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant> {
        self.emit(&index)?;
        Ok(self)
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        self.serialize_seq(len)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(self, name: &'static str, index: u32, variant: &'static str, len: usize) -> Result<Self::SerializeStructVariant> {
        self.serialize_tuple_variant(name, index, variant, len)
    }

    fn is_human_readable(&self) -> bool {
        false
    }

}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::SerializeSeq for &'a mut Serializer<B> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::SerializeTuple for &'a mut Serializer<B> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::SerializeTupleStruct for &'a mut Serializer<B> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::SerializeTupleVariant for &'a mut Serializer<B> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::SerializeMap for &'a mut Serializer<B> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        key.serialize(&mut **self)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::SerializeStruct for &'a mut Serializer<B> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

impl<'a, B: AsRef<[u8]> + AsMut<[u8]>> ser::SerializeStructVariant for &'a mut Serializer<B> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}
