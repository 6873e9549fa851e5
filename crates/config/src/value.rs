//! Conversion of caller values into config data.
//!
//! Responsibilities:
//! - Turn any `Serialize` value into a `serde_json::Value`.
//! - Reject values that would not read back unchanged after a save.
//!
//! Invariants:
//! - Non-finite floats are rejected; JSON has no spelling for them and
//!   `serde_json` would silently store `null`.
//! - A stored value never nests deeper than `MAX_NESTING_DEPTH`, counting the
//!   root mapping and every mapping created along its path.

use std::fmt;

use serde::Serialize;
use serde::ser;
use serde_json::Value;
use thiserror::Error;

use crate::constants::MAX_NESTING_DEPTH;
use crate::error::{Result, StoreError};

/// Converts `value` for storage under a path of `segments` non-empty segments.
///
/// # Errors
/// Returns `InvalidArgument` if the value fails to serialize, holds a
/// non-finite float, or would nest too deeply at that path.
pub(crate) fn to_config_value<V: Serialize>(path: &str, segments: usize, value: V) -> Result<Value> {
    let rejected = |reason: &dyn fmt::Display| {
        StoreError::invalid(format!("config value for '{path}' cannot be stored: {reason}"))
    };

    value.serialize(DataCheck).map_err(|e| rejected(&e))?;
    let value = serde_json::to_value(value).map_err(|e| rejected(&e))?;

    let depth = segments + nesting(&value);
    if depth > MAX_NESTING_DEPTH {
        return Err(rejected(&format!(
            "nesting depth {depth} exceeds the limit of {MAX_NESTING_DEPTH}"
        )));
    }
    Ok(value)
}

/// Mapping/sequence levels inside `value`; scalars are 0.
fn nesting(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(nesting).max().unwrap_or(0),
        _ => 0,
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
struct Unrepresentable(String);

impl ser::Error for Unrepresentable {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

fn finite(v: f64) -> Checked {
    if v.is_finite() {
        Ok(())
    } else {
        Err(Unrepresentable(format!("{v} is not a finite number")))
    }
}

/// Serializer that produces nothing and only fails on non-data input.
struct DataCheck;

type Checked = std::result::Result<(), Unrepresentable>;

impl ser::Serializer for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _: bool) -> Checked {
        Ok(())
    }
    fn serialize_i8(self, _: i8) -> Checked {
        Ok(())
    }
    fn serialize_i16(self, _: i16) -> Checked {
        Ok(())
    }
    fn serialize_i32(self, _: i32) -> Checked {
        Ok(())
    }
    fn serialize_i64(self, _: i64) -> Checked {
        Ok(())
    }
    fn serialize_i128(self, _: i128) -> Checked {
        Ok(())
    }
    fn serialize_u8(self, _: u8) -> Checked {
        Ok(())
    }
    fn serialize_u16(self, _: u16) -> Checked {
        Ok(())
    }
    fn serialize_u32(self, _: u32) -> Checked {
        Ok(())
    }
    fn serialize_u64(self, _: u64) -> Checked {
        Ok(())
    }
    fn serialize_u128(self, _: u128) -> Checked {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> Checked {
        finite(f64::from(v))
    }
    fn serialize_f64(self, v: f64) -> Checked {
        finite(v)
    }
    fn serialize_char(self, _: char) -> Checked {
        Ok(())
    }
    fn serialize_str(self, _: &str) -> Checked {
        Ok(())
    }
    fn serialize_bytes(self, _: &[u8]) -> Checked {
        Ok(())
    }
    fn serialize_none(self) -> Checked {
        Ok(())
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Checked {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Checked {
        Ok(())
    }
    fn serialize_unit_struct(self, _: &'static str) -> Checked {
        Ok(())
    }
    fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Checked {
        Ok(())
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _: &'static str, value: &T) -> Checked {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Checked {
        value.serialize(self)
    }
    fn serialize_seq(self, _: Option<usize>) -> std::result::Result<Self, Unrepresentable> {
        Ok(self)
    }
    fn serialize_tuple(self, _: usize) -> std::result::Result<Self, Unrepresentable> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> std::result::Result<Self, Unrepresentable> {
        Ok(self)
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> std::result::Result<Self, Unrepresentable> {
        Ok(self)
    }
    fn serialize_map(self, _: Option<usize>) -> std::result::Result<Self, Unrepresentable> {
        Ok(self)
    }
    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> std::result::Result<Self, Unrepresentable> {
        Ok(self)
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> std::result::Result<Self, Unrepresentable> {
        Ok(self)
    }
}

impl ser::SerializeSeq for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Checked {
        value.serialize(DataCheck)
    }
    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeTuple for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Checked {
        value.serialize(DataCheck)
    }
    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Checked {
        value.serialize(DataCheck)
    }
    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Checked {
        value.serialize(DataCheck)
    }
    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeMap for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;

    // Key types are left to serde_json, which only accepts string-like keys.
    fn serialize_key<T: ?Sized + Serialize>(&mut self, _: &T) -> Checked {
        Ok(())
    }
    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Checked {
        value.serialize(DataCheck)
    }
    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeStruct for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _: &'static str, value: &T) -> Checked {
        value.serialize(DataCheck)
    }
    fn end(self) -> Checked {
        Ok(())
    }
}

impl ser::SerializeStructVariant for DataCheck {
    type Ok = ();
    type Error = Unrepresentable;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _: &'static str, value: &T) -> Checked {
        value.serialize(DataCheck)
    }
    fn end(self) -> Checked {
        Ok(())
    }
}
