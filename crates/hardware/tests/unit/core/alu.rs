//! # ALU Tests
//!
//! Edge cases of the RV64IM arithmetic: W-form sign extension, shift amount
//! masking, and the non-trapping division rules.

use rstest::rstest;
use tomasim_core::core::pipeline::signals::AluOp;
use tomasim_core::core::units::alu::{Alu, alu_form};
use tomasim_core::isa::kind::InstKind;

const NEG1: u64 = u64::MAX;

#[rstest]
#[case::add_wraps(AluOp::Add, u64::MAX, 1, false, 0)]
#[case::addw_sign_extends(AluOp::Add, 0x7FFF_FFFF, 1, true, 0xFFFF_FFFF_8000_0000)]
#[case::subw_truncates(AluOp::Sub, 0x1_0000_0000, 1, true, NEG1)]
#[case::sll_masks_to_6_bits(AluOp::Sll, 1, 64 + 3, false, 8)]
#[case::sllw_masks_to_5_bits(AluOp::Sll, 1, 32 + 3, true, 8)]
#[case::sra_keeps_sign(AluOp::Sra, 0x8000_0000_0000_0000, 63, false, NEG1)]
#[case::srl_is_logical(AluOp::Srl, 0x8000_0000_0000_0000, 63, false, 1)]
#[case::srlw_sign_extends_result(AluOp::Srl, 0xFFFF_FFFF, 0, true, NEG1)]
#[case::slt_signed(AluOp::Slt, NEG1, 0, false, 1)]
#[case::sltu_unsigned(AluOp::Sltu, NEG1, 0, false, 0)]
#[case::mul_low(AluOp::Mul, 6, 7, false, 42)]
#[case::mulh_signed(AluOp::Mulh, NEG1, NEG1, false, 0)]
#[case::mulhu_unsigned(AluOp::Mulhu, NEG1, NEG1, false, NEG1 - 1)]
#[case::mulhsu_mixed(AluOp::Mulhsu, NEG1, NEG1, false, NEG1)]
#[case::div_by_zero(AluOp::Div, 42, 0, false, NEG1)]
#[case::divu_by_zero(AluOp::Divu, 42, 0, false, NEG1)]
#[case::rem_by_zero(AluOp::Rem, 42, 0, false, 42)]
#[case::div_overflow_wraps(AluOp::Div, i64::MIN as u64, NEG1, false, i64::MIN as u64)]
#[case::rem_overflow_is_zero(AluOp::Rem, i64::MIN as u64, NEG1, false, 0)]
#[case::divw_overflow(AluOp::Div, i32::MIN as u64, NEG1, true, i32::MIN as i64 as u64)]
#[case::remuw_by_zero(AluOp::Remu, 0x8000_0001, 0, true, 0xFFFF_FFFF_8000_0001)]
#[case::div_truncates_toward_zero(AluOp::Div, -7i64 as u64, 2, false, -3i64 as u64)]
fn alu_cases(
    #[case] op: AluOp,
    #[case] a: u64,
    #[case] b: u64,
    #[case] is32: bool,
    #[case] expected: u64,
) {
    assert_eq!(Alu::execute(op, a, b, is32), expected);
}

#[test]
fn alu_form_classifies_operations() {
    let addi = alu_form(InstKind::Addi).unwrap();
    assert_eq!(addi.op, AluOp::Add);
    assert!(addi.uses_imm);
    assert!(!addi.is32);

    let subw = alu_form(InstKind::Subw).unwrap();
    assert_eq!(subw.op, AluOp::Sub);
    assert!(!subw.uses_imm);
    assert!(subw.is32);

    let remuw = alu_form(InstKind::Remuw).unwrap();
    assert_eq!(remuw.op, AluOp::Remu);
    assert!(remuw.is32);

    for kind in [InstKind::Lw, InstKind::Sd, InstKind::Beq, InstKind::Jal, InstKind::Lui, InstKind::Ecall] {
        assert!(alu_form(kind).is_none(), "{kind:?} is not an ALU form");
    }
}
