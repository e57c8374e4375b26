//! Preprocessed binary cache format.
//!
//! Little-endian layout: `i32 pre_loop`, `i32 post_loop`, `i32 key_count`,
//! then per key `f32 position, f32 value, f32 tangent_in, f32 tangent_out,
//! i32 continuity`. Enum codes are the discriminants of [`LoopType`] and
//! [`Continuity`].

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use keyline_curve_core::{Continuity, LoopType};

use crate::definition::{continuity_from_code, loop_type_from_code, CurveDefinition, CurveKeyDef};
use crate::error::ContentError;

/// Write a definition to the binary cache layout.
pub fn write_curve_binary<W: Write>(def: &CurveDefinition, writer: &mut W) -> Result<(), ContentError> {
    writer.write_i32::<LittleEndian>(def.pre_loop as i32)?;
    writer.write_i32::<LittleEndian>(def.post_loop as i32)?;
    writer.write_i32::<LittleEndian>(def.keys.len() as i32)?;
    for key in &def.keys {
        writer.write_f32::<LittleEndian>(key.position)?;
        writer.write_f32::<LittleEndian>(key.value)?;
        writer.write_f32::<LittleEndian>(key.tangent_in)?;
        writer.write_f32::<LittleEndian>(key.tangent_out)?;
        writer.write_i32::<LittleEndian>(key.continuity as i32)?;
    }
    Ok(())
}

/// Read a definition from the binary cache layout.
pub fn read_curve_binary<R: Read>(reader: &mut R) -> Result<CurveDefinition, ContentError> {
    let pre_loop = loop_type_from_code(reader.read_i32::<LittleEndian>()?)?;
    let post_loop = loop_type_from_code(reader.read_i32::<LittleEndian>()?)?;
    let count = reader.read_i32::<LittleEndian>()?;
    if count < 0 {
        return Err(ContentError::BadKeyCount(count));
    }
    let mut keys = Vec::with_capacity(count as usize);
    for _ in 0..count {
        keys.push(CurveKeyDef {
            position: reader.read_f32::<LittleEndian>()?,
            value: reader.read_f32::<LittleEndian>()?,
            tangent_in: reader.read_f32::<LittleEndian>()?,
            tangent_out: reader.read_f32::<LittleEndian>()?,
            continuity: continuity_from_code(reader.read_i32::<LittleEndian>()?)?,
        });
    }
    let def = CurveDefinition {
        pre_loop,
        post_loop,
        keys,
    };
    log::debug!("read binary curve cache: {} keys", def.keys.len());
    Ok(def)
}
