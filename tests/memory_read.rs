// Checked RAM reads and the bit primitives behind them

use crashview::bits::{align_floor, get_unaligned_be32, put_unaligned_be32};
use crashview::error::LoadError;
use crashview::memory::{AddressSpace, MemoryError, MAX_RAM_SIZE, VIRTUAL_RAM_START};

const RAM_SIZE: u32 = 0x2000;

fn patterned_ram() -> Vec<u8> {
    (0..RAM_SIZE).map(|i| (i * 7 + 3) as u8).collect()
}

#[test]
fn test_reads_outside_ram_fail() {
    let space = AddressSpace::new(patterned_ram()).unwrap();

    let outside = [
        0x0000_0000,
        0x7FFF_FFFC,
        VIRTUAL_RAM_START + RAM_SIZE,
        VIRTUAL_RAM_START + RAM_SIZE + 0x1000,
        // Uncached mirror and TLB-mapped segments
        0xA000_0000,
        0xC000_0000,
        0xFFFF_FFFC,
    ];
    for addr in outside {
        assert_eq!(space.try_read_word_aligned(addr), None, "{:08X}", addr);
        assert_eq!(
            space.read_word(addr),
            Err(MemoryError::Unreadable { address: addr })
        );
    }
}

#[test]
fn test_reads_match_ram_contents() {
    let ram = patterned_ram();
    let space = AddressSpace::new(ram.clone()).unwrap();

    for offset in (0..RAM_SIZE).step_by(4) {
        let addr = VIRTUAL_RAM_START + offset;
        let expected = get_unaligned_be32(&ram[offset as usize..]);
        assert_eq!(space.try_read_word_aligned(addr), Some(expected));
    }
}

#[test]
fn test_unaligned_reads_fail() {
    let space = AddressSpace::new(patterned_ram()).unwrap();
    for delta in 1..4 {
        assert_eq!(space.try_read_word_aligned(VIRTUAL_RAM_START + delta), None);
    }
    assert!(space
        .try_read_word_aligned(align_floor(VIRTUAL_RAM_START + 3, 4))
        .is_some());
}

#[test]
fn test_partial_last_word_is_unreadable() {
    // The last word runs past the end of the image
    let space = AddressSpace::new(vec![0xAB; 6]).unwrap();
    assert_eq!(space.try_read_word_aligned(VIRTUAL_RAM_START), Some(0xABAB_ABAB));
    assert!(space.is_valid_ram_addr(VIRTUAL_RAM_START + 4));
    assert_eq!(space.try_read_word_aligned(VIRTUAL_RAM_START + 4), None);
}

#[test]
fn test_written_words_read_back() {
    let mut ram = vec![0u8; 0x100];
    put_unaligned_be32(0x8033_B170, &mut ram[0x40..]);
    let space = AddressSpace::new(ram).unwrap();
    assert_eq!(space.try_read_word_aligned(0x8000_0040), Some(0x8033_B170));
}

#[test]
fn test_rejects_bad_images() {
    assert!(matches!(AddressSpace::new(Vec::new()), Err(LoadError::EmptyDump)));
    assert!(matches!(
        AddressSpace::new(vec![0; MAX_RAM_SIZE + 1]),
        Err(LoadError::DumpTooLarge(_))
    ));
}
