use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

/// Encodes a value as a Bitcoin-style variable-length integer, always in
/// the shortest valid form.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    match value {
        0..=0xfc => out.push(value as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
    out
}

/// Reads a varint starting at `offset`, returning the value and the number
/// of bytes consumed (1, 3, 5 or 9). Every marker byte maps to a width;
/// the only failure mode is a buffer too short for the indicated width.
pub fn decode_varint(buffer: &[u8], offset: usize) -> Result<(u64, usize)> {
    let tail = buffer.get(offset..).ok_or_else(|| {
        Error::MalformedInput(format!(
            "varint offset {} past end of {}-byte buffer",
            offset,
            buffer.len()
        ))
    })?;
    let mut cursor = Cursor::new(tail);
    let marker = cursor
        .read_u8()
        .map_err(|_| Error::MalformedInput("varint buffer is empty".into()))?;
    let (value, size) = match marker {
        0xfd => (read_trunc(cursor.read_u16::<LittleEndian>())? as u64, 3),
        0xfe => (read_trunc(cursor.read_u32::<LittleEndian>())? as u64, 5),
        0xff => (read_trunc(cursor.read_u64::<LittleEndian>())?, 9),
        n => (n as u64, 1),
    };
    Ok((value, size))
}

fn read_trunc<T>(read: std::io::Result<T>) -> Result<T> {
    read.map_err(|_| Error::MalformedInput("varint buffer truncated".into()))
}
