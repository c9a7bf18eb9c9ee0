//! Memory model for the crash inspector
//!
//! This module provides the inspected machine's memory:
//! - [`AddressSpace`]: the frozen RDRAM image and its virtual address map
//! - [`context`]: the crashed thread's register context
//! - [`symbols`]: an optional linker map for naming addresses
//!
//! # Address Map
//!
//! Only cached RAM is readable:
//! ```text
//! KSEG0  0x8000_0000..  cached window onto physical RDRAM
//! ```
//! The uncached KSEG1 mirror at 0xA000_0000 also overlaps device registers
//! on hardware, and the TLB-mapped segments need state a dump does not
//! carry, so both read as unreadable.
//!
//! # Safe Reads
//!
//! [`AddressSpace::try_read_word_aligned`] is the single gate between the
//! viewer and the image. It validates alignment and bounds before touching
//! the bytes and never panics.

pub mod context;
pub mod symbols;

use crate::bits::get_unaligned_be32;
use crate::error::LoadError;
use std::fs;
use std::path::Path;

/// Virtual address type (32-bit)
pub type Address = u32;

/// A machine word
pub type Word = u32;

/// Size of a machine word in bytes
pub const WORD_SIZE: u32 = 4;

/// Start of cached RAM (KSEG0)
pub const VIRTUAL_RAM_START: Address = 0x8000_0000;

/// Largest supported RDRAM image (Expansion Pak)
pub const MAX_RAM_SIZE: usize = 8 * 1024 * 1024;

/// The only way a crash-screen read can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    #[error("address {address:#010x} is unreadable")]
    Unreadable { address: Address },
}

/// The inspected RDRAM image
#[derive(Debug, Clone)]
pub struct AddressSpace {
    rdram: Vec<u8>,
}

impl AddressSpace {
    /// Wrap a raw RDRAM image (physical address 0 first)
    pub fn new(rdram: Vec<u8>) -> Result<Self, LoadError> {
        if rdram.is_empty() {
            return Err(LoadError::EmptyDump);
        }
        if rdram.len() > MAX_RAM_SIZE {
            return Err(LoadError::DumpTooLarge(rdram.len()));
        }
        Ok(AddressSpace { rdram })
    }

    /// Read a RAM dump from disk
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let rdram = fs::read(path)?;
        log::info!("loaded {} bytes of RDRAM from {}", rdram.len(), path.display());
        Self::new(rdram)
    }

    /// Size of the image in bytes
    pub fn ram_size(&self) -> u32 {
        // Bounded by MAX_RAM_SIZE in new()
        self.rdram.len() as u32
    }

    /// Last valid KSEG0 byte address (inclusive)
    pub fn ram_end(&self) -> Address {
        VIRTUAL_RAM_START + (self.ram_size() - 1)
    }

    /// Whether `addr` is a cached RAM address backed by the image
    pub fn is_valid_ram_addr(&self, addr: Address) -> bool {
        (VIRTUAL_RAM_START..=self.ram_end()).contains(&addr)
    }

    /// Translate a KSEG0 address into an offset into the image
    fn physical_offset(&self, addr: Address) -> Option<usize> {
        self.is_valid_ram_addr(addr)
            .then(|| (addr - VIRTUAL_RAM_START) as usize)
    }

    /// Read the word at a 4-byte aligned address.
    ///
    /// Returns `None` for unaligned addresses, addresses outside
    /// `VIRTUAL_RAM_START..=ram_end()`, and words that would run off the end
    /// of the image.
    pub fn try_read_word_aligned(&self, address: Address) -> Option<Word> {
        if address % WORD_SIZE != 0 {
            return None;
        }
        let offset = self.physical_offset(address)?;
        let bytes = self.rdram.get(offset..offset + WORD_SIZE as usize)?;
        Some(get_unaligned_be32(bytes))
    }

    /// Like [`try_read_word_aligned`](Self::try_read_word_aligned), with the
    /// failure as an error value.
    pub fn read_word(&self, address: Address) -> Result<Word, MemoryError> {
        self.try_read_word_aligned(address)
            .ok_or(MemoryError::Unreadable { address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> AddressSpace {
        let mut ram = vec![0u8; 0x100];
        ram[0..4].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        ram[0xFC..0x100].copy_from_slice(&[0x80, 0x00, 0x00, 0x10]);
        AddressSpace::new(ram).unwrap()
    }

    #[test]
    fn test_reads_cached_ram() {
        let mem = space();
        assert_eq!(mem.try_read_word_aligned(0x8000_0000), Some(0xDEAD_BEEF));
        assert_eq!(mem.try_read_word_aligned(0x8000_00FC), Some(0x8000_0010));
    }

    #[test]
    fn test_rejects_unreadable_addresses() {
        let mem = space();
        // Unaligned
        assert_eq!(mem.try_read_word_aligned(0x8000_0002), None);
        // Past the image
        assert_eq!(mem.try_read_word_aligned(0x8000_0100), None);
        // Uncached mirror, TLB-mapped and physical addresses
        assert_eq!(mem.try_read_word_aligned(0xA000_0000), None);
        assert_eq!(mem.try_read_word_aligned(0x0000_0000), None);
        assert_eq!(mem.try_read_word_aligned(0x7FFF_FFFC), None);
        assert_eq!(mem.try_read_word_aligned(0xC000_0000), None);
        assert_eq!(mem.try_read_word_aligned(0xFFFF_FFFC), None);
        assert_eq!(
            mem.read_word(0x8000_0100),
            Err(MemoryError::Unreadable { address: 0x8000_0100 })
        );
    }

    #[test]
    fn test_ram_bounds() {
        let mem = space();
        assert_eq!(mem.ram_end(), 0x8000_00FF);
        assert!(mem.is_valid_ram_addr(0x8000_0000));
        assert!(mem.is_valid_ram_addr(0x8000_00FF));
        assert!(!mem.is_valid_ram_addr(0x8000_0100));
        assert!(!mem.is_valid_ram_addr(0xA000_0000));
    }

    #[test]
    fn test_rejects_bad_images() {
        assert!(matches!(AddressSpace::new(Vec::new()), Err(LoadError::EmptyDump)));
        assert!(matches!(
            AddressSpace::new(vec![0; MAX_RAM_SIZE + 1]),
            Err(LoadError::DumpTooLarge(_))
        ));
    }
}
