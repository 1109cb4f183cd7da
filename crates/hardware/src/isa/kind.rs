//! Operation kinds.
//!
//! [`InstKind`] names every operation the decoder accepts. Classification
//! helpers here drive issue (control-flow serialisation), execute (unit
//! class, memory width) and statistics.

use serde::Serialize;

use crate::core::pipeline::signals::MemWidth;

/// Every supported RV64IM operation, plus `ecall`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum InstKind {
    Lui,
    Auipc,
    Jal,
    Jalr,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Lb,
    Lh,
    Lw,
    Ld,
    Lbu,
    Lhu,
    Lwu,
    Sb,
    Sh,
    Sw,
    Sd,
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Ecall,
    Addiw,
    Slliw,
    Srliw,
    Sraiw,
    Addw,
    Subw,
    Sllw,
    Srlw,
    Sraw,
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    Mulw,
    Divw,
    Divuw,
    Remw,
    Remuw,
}

impl InstKind {
    /// Lower-case assembler name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lui => "lui",
            Self::Auipc => "auipc",
            Self::Jal => "jal",
            Self::Jalr => "jalr",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Ld => "ld",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Lwu => "lwu",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Sd => "sd",
            Self::Addi => "addi",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Xori => "xori",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Slli => "slli",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
            Self::Ecall => "ecall",
            Self::Addiw => "addiw",
            Self::Slliw => "slliw",
            Self::Srliw => "srliw",
            Self::Sraiw => "sraiw",
            Self::Addw => "addw",
            Self::Subw => "subw",
            Self::Sllw => "sllw",
            Self::Srlw => "srlw",
            Self::Sraw => "sraw",
            Self::Mul => "mul",
            Self::Mulh => "mulh",
            Self::Mulhsu => "mulhsu",
            Self::Mulhu => "mulhu",
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Rem => "rem",
            Self::Remu => "remu",
            Self::Mulw => "mulw",
            Self::Divw => "divw",
            Self::Divuw => "divuw",
            Self::Remw => "remw",
            Self::Remuw => "remuw",
        }
    }

    /// Conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Bltu | Self::Bgeu
        )
    }

    /// Unconditional jumps.
    pub const fn is_jump(self) -> bool {
        matches!(self, Self::Jal | Self::Jalr)
    }

    /// Branches and jumps; issue stalls while one of these is in flight.
    pub const fn is_control_flow(self) -> bool {
        self.is_branch() || self.is_jump()
    }

    /// Instructions after which nothing may issue until they retire.
    pub const fn is_serializing(self) -> bool {
        self.is_control_flow() || matches!(self, Self::Ecall)
    }

    /// Memory reads.
    pub const fn is_load(self) -> bool {
        matches!(
            self,
            Self::Lb | Self::Lh | Self::Lw | Self::Ld | Self::Lbu | Self::Lhu | Self::Lwu
        )
    }

    /// Memory writes.
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Sb | Self::Sh | Self::Sw | Self::Sd)
    }

    /// Multiply and divide operations, 64-bit and word forms.
    pub const fn is_muldiv(self) -> bool {
        matches!(
            self,
            Self::Mul
                | Self::Mulh
                | Self::Mulhsu
                | Self::Mulhu
                | Self::Div
                | Self::Divu
                | Self::Rem
                | Self::Remu
                | Self::Mulw
                | Self::Divw
                | Self::Divuw
                | Self::Remw
                | Self::Remuw
        )
    }

    /// Access width of a load or store.
    pub const fn mem_width(self) -> Option<MemWidth> {
        match self {
            Self::Lb | Self::Lbu | Self::Sb => Some(MemWidth::Byte),
            Self::Lh | Self::Lhu | Self::Sh => Some(MemWidth::Half),
            Self::Lw | Self::Lwu | Self::Sw => Some(MemWidth::Word),
            Self::Ld | Self::Sd => Some(MemWidth::Double),
            _ => None,
        }
    }

    /// Whether a load sign-extends its result.
    pub const fn is_signed_load(self) -> bool {
        matches!(self, Self::Lb | Self::Lh | Self::Lw | Self::Ld)
    }
}
