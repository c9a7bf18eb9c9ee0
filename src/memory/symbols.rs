//! Linker map symbols
//!
//! The symbol map is a plain text file with one symbol per line:
//!
//! ```text
//! # addr     size     kind name
//! 80246000   000000C8 T    main_func
//! 8033B170   00000260 D    gMarioStates
//! ```
//!
//! `T`/`t` marks code; any other kind is data. Lookups are binary searches
//! over the symbols sorted by address.

use super::Address;
use crate::error::LoadError;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Code,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSymbol {
    pub addr: Address,
    pub size: u32,
    pub kind: SymbolKind,
    pub name: String,
}

impl MapSymbol {
    /// Whether `addr` falls inside this symbol. Zero-sized symbols only
    /// contain their own address.
    pub fn contains(&self, addr: Address) -> bool {
        addr.wrapping_sub(self.addr) < self.size.max(1)
    }
}

/// Sorted symbol table with name lookup
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<MapSymbol>,
    by_name: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new(mut symbols: Vec<MapSymbol>) -> Self {
        symbols.sort_by_key(|sym| sym.addr);
        let by_name = symbols
            .iter()
            .enumerate()
            .map(|(index, sym)| (sym.name.clone(), index))
            .collect();
        SymbolTable { symbols, by_name }
    }

    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut symbols = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let bad = |reason: &str| LoadError::BadSymbolLine {
                line: index + 1,
                reason: reason.to_string(),
            };

            let mut fields = line.split_whitespace();
            let (Some(addr), Some(size), Some(kind), Some(name)) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(bad("expected `ADDR SIZE KIND NAME`"));
            };
            if fields.next().is_some() {
                return Err(bad("trailing fields after symbol name"));
            }

            let addr = parse_hex(addr).ok_or_else(|| bad("address is not hex"))?;
            let size = parse_hex(size).ok_or_else(|| bad("size is not hex"))?;
            let kind = match kind {
                "T" | "t" => SymbolKind::Code,
                _ => SymbolKind::Data,
            };

            symbols.push(MapSymbol {
                addr,
                size,
                kind,
                name: name.to_string(),
            });
        }

        Ok(Self::new(symbols))
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        let table = Self::parse(&text)?;
        log::info!("loaded {} symbols from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Find the symbol containing `addr`
    pub fn get_map_symbol(&self, addr: Address) -> Option<&MapSymbol> {
        let upper = self.symbols.partition_point(|sym| sym.addr <= addr);
        let candidate = self.symbols.get(upper.checked_sub(1)?)?;
        candidate.contains(addr).then_some(candidate)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&MapSymbol> {
        self.by_name.get(name).map(|&index| &self.symbols[index])
    }

    pub fn is_in_code_segment(&self, addr: Address) -> bool {
        self.get_map_symbol(addr)
            .is_some_and(|sym| sym.kind == SymbolKind::Code)
    }
}

/// Parse a hex number with or without a `0x` prefix
pub fn parse_hex(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(&digits.replace('_', ""), 16).ok()
}
