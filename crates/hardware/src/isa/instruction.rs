//! Fixed-position fields of a 32-bit instruction word.

/// Opcode width mask, bits `[6:0]`.
pub const OPCODE_MASK: u32 = 0x7F;
/// Register specifier mask (5 bits).
pub const REG_MASK: u32 = 0x1F;
/// funct3 mask, bits `[14:12]`.
pub const FUNCT3_MASK: u32 = 0x7;
/// funct7 mask, bits `[31:25]`.
pub const FUNCT7_MASK: u32 = 0x7F;
/// funct6 mask, bits `[31:26]`; RV64 immediate shifts use bit 25 for `shamt`.
pub const FUNCT6_MASK: u32 = 0x3F;

/// Field accessors over a raw instruction word.
///
/// Only [`InstructionBits::field`] has to be provided; the named fields
/// are expressed through it.
///
/// ```
/// use tomasim_core::isa::instruction::InstructionBits;
///
/// // add a0,a1,a2
/// let word: u32 = 0x00C5_8533;
/// assert_eq!(word.opcode(), 0x33);
/// assert_eq!((word.rd(), word.rs1(), word.rs2()), (10, 11, 12));
/// assert_eq!(word.funct3(), 0);
/// ```
pub trait InstructionBits {
    /// `(word >> shift) & mask`.
    fn field(&self, shift: u32, mask: u32) -> u32;

    /// Major opcode.
    #[inline]
    fn opcode(&self) -> u32 {
        self.field(0, OPCODE_MASK)
    }

    /// Destination register.
    #[inline]
    fn rd(&self) -> usize {
        self.field(7, REG_MASK) as usize
    }

    /// First source register.
    #[inline]
    fn rs1(&self) -> usize {
        self.field(15, REG_MASK) as usize
    }

    /// Second source register.
    #[inline]
    fn rs2(&self) -> usize {
        self.field(20, REG_MASK) as usize
    }

    /// `funct3` selector.
    #[inline]
    fn funct3(&self) -> u32 {
        self.field(12, FUNCT3_MASK)
    }

    /// `funct7` selector.
    #[inline]
    fn funct7(&self) -> u32 {
        self.field(25, FUNCT7_MASK)
    }

    /// `funct6` selector.
    #[inline]
    fn funct6(&self) -> u32 {
        self.field(26, FUNCT6_MASK)
    }
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn field(&self, shift: u32, mask: u32) -> u32 {
        (self >> shift) & mask
    }
}
