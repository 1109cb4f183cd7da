//! Flat system memory.
//!
//! A single byte-addressed region starting at address 0. All multi-byte
//! accesses are little-endian and bounds-checked; nothing is mapped above
//! the configured size.

use thiserror::Error;

use crate::core::pipeline::signals::MemWidth;

/// An access that does not fit inside memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("access of {len} bytes at {addr:#x} is outside memory ({size:#x} bytes)")]
pub struct OutOfBounds {
    /// First byte of the access.
    pub addr: u64,
    /// Access length in bytes.
    pub len: u64,
    /// Memory size in bytes.
    pub size: u64,
}

/// Flat, zero-initialised memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Creates `size` bytes of zeroed memory.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Size in bytes.
    pub const fn size(&self) -> usize {
        self.bytes.len()
    }

    fn range(&self, addr: u64, len: u64) -> Result<std::ops::Range<usize>, OutOfBounds> {
        let size = self.bytes.len() as u64;
        match addr.checked_add(len) {
            Some(end) if end <= size => Ok(addr as usize..end as usize),
            _ => Err(OutOfBounds { addr, len, size }),
        }
    }

    fn read_array<const N: usize>(&self, addr: u64) -> Result<[u8; N], OutOfBounds> {
        let range = self.range(addr, N as u64)?;
        let mut buf = [0; N];
        buf.copy_from_slice(&self.bytes[range]);
        Ok(buf)
    }

    /// Reads a byte.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn read_u8(&self, addr: u64) -> Result<u8, OutOfBounds> {
        self.read_array::<1>(addr).map(|b| b[0])
    }

    /// Reads a half-word (16-bit, little-endian).
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn read_u16(&self, addr: u64) -> Result<u16, OutOfBounds> {
        self.read_array(addr).map(u16::from_le_bytes)
    }

    /// Reads a word (32-bit, little-endian).
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn read_u32(&self, addr: u64) -> Result<u32, OutOfBounds> {
        self.read_array(addr).map(u32::from_le_bytes)
    }

    /// Reads a double-word (64-bit, little-endian).
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn read_u64(&self, addr: u64) -> Result<u64, OutOfBounds> {
        self.read_array(addr).map(u64::from_le_bytes)
    }

    /// Writes a byte.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn write_u8(&mut self, addr: u64, val: u8) -> Result<(), OutOfBounds> {
        self.write_bytes(addr, &[val])
    }

    /// Writes a half-word (little-endian).
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn write_u16(&mut self, addr: u64, val: u16) -> Result<(), OutOfBounds> {
        self.write_bytes(addr, &val.to_le_bytes())
    }

    /// Writes a word (little-endian).
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), OutOfBounds> {
        self.write_bytes(addr, &val.to_le_bytes())
    }

    /// Writes a double-word (little-endian).
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn write_u64(&mut self, addr: u64, val: u64) -> Result<(), OutOfBounds> {
        self.write_bytes(addr, &val.to_le_bytes())
    }

    /// Copies `data` into memory at `addr`. Nothing is written on error.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] if any byte falls outside memory.
    pub fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), OutOfBounds> {
        let range = self.range(addr, data.len() as u64)?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Sets `len` bytes starting at `addr` to `val`.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] if the region leaves memory.
    pub fn fill(&mut self, addr: u64, len: u64, val: u8) -> Result<(), OutOfBounds> {
        let range = self.range(addr, len)?;
        self.bytes[range].fill(val);
        Ok(())
    }

    /// Reads `width` bytes, zero-extended.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn read(&self, addr: u64, width: MemWidth) -> Result<u64, OutOfBounds> {
        match width {
            MemWidth::Byte => self.read_u8(addr).map(u64::from),
            MemWidth::Half => self.read_u16(addr).map(u64::from),
            MemWidth::Word => self.read_u32(addr).map(u64::from),
            MemWidth::Double => self.read_u64(addr),
        }
    }

    /// Writes the low `width` bytes of `val`.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] outside memory.
    pub fn write(&mut self, addr: u64, width: MemWidth, val: u64) -> Result<(), OutOfBounds> {
        match width {
            MemWidth::Byte => self.write_u8(addr, val as u8),
            MemWidth::Half => self.write_u16(addr, val as u16),
            MemWidth::Word => self.write_u32(addr, val as u32),
            MemWidth::Double => self.write_u64(addr, val),
        }
    }

    /// Returns the bytes of the NUL-terminated string at `addr`, without the
    /// terminator.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] covering the scanned span if memory ends before the
    /// terminator.
    pub fn read_cstr(&self, addr: u64) -> Result<&[u8], OutOfBounds> {
        let size = self.bytes.len() as u64;
        let start = self.range(addr, 1)?.start;
        let tail = &self.bytes[start..];
        match tail.iter().position(|&b| b == 0) {
            Some(len) => Ok(&tail[..len]),
            None => Err(OutOfBounds {
                addr,
                len: size - addr,
                size,
            }),
        }
    }
}
