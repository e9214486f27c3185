use serde::ser::{self, Serialize};
use abfolge::{Encode, COUNT_SIZE};

use crate::error::{Error, Result};

/// Walks a value the way [`Serializer`](crate::Serializer) does and only adds up the sizes.
#[derive(Default, Debug)]
pub struct SizeCounter {
    total: usize,
}

/// Exact number of bytes [`to_vec`](crate::to_vec) produces for `value`.
pub fn serialized_size<T: ?Sized + Serialize>(value: &T) -> Result<usize> {
    let mut counter = SizeCounter::default();
    value.serialize(&mut counter)?;
    Ok(counter.total)
}

impl SizeCounter {

    #[inline]
    fn add<T: Encode + ?Sized>(&mut self, v: &T) -> Result<()> {
        self.total += v.size_of();
        Ok(())
    }

}

impl<'a> ser::Serializer for &'a mut SizeCounter {
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
        self.add(&v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.add(&v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.add(&v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.add(&v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.add(&v)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.add(&v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.add(&v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.add(&v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.add(&v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.add(&v)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.add(&v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.add(&v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.add(&v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.add(&v)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.add(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.add(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.add(&0u8)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        self.add(&1u8)?;
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(self, _name: &'static str, index: u32, _variant: &'static str) -> Result<()> {
        self.add(&index)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, index: u32, _variant: &'static str, value: &T) -> Result<()> {
        self.add(&index)?;
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        match len {
            Some(_) => {
                self.total += COUNT_SIZE;
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
        self.add(&index)?;
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

impl ser::SerializeSeq for &mut SizeCounter {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

impl ser::SerializeTuple for &mut SizeCounter {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for &mut SizeCounter {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for &mut SizeCounter {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeMap for &mut SizeCounter {
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

impl ser::SerializeStruct for &mut SizeCounter {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

impl ser::SerializeStructVariant for &mut SizeCounter {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}
