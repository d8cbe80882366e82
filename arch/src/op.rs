use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::alu::Alu;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OpKind {
    ADD,
    SUB,
    XOR,
    OR,
    AND,
    SRA,
    SRL,
    SLL,
    SLTS,
    SLTU,
    BLT,
    BLTU,
    BGE,
    BGEU,
    BEQ,
    BNE,
    LI,
    IN,
    J,
}

/// Mnemonic table, built once at startup and never mutated.
static MNEMONICS: Lazy<HashMap<String, OpKind>> = Lazy::new(|| {
    OpKind::iter().map(|op| (op.to_string(), op)).collect()
});

impl OpKind {
    pub fn parse(s: &str) -> Option<Self> {
        MNEMONICS.get(s.to_ascii_lowercase().as_str()).copied()
    }
}

/// Operand-shape category. Each variant determines both the operand grammar
/// and the bit layout of the encoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// `rd , rs1 , rs2`
    Calc(Alu),
    /// `rs1 , rs2 , imm`
    Branch(Alu),
    /// `rd , imm`
    Li,
    /// `imm`
    Jump,
    /// `rd`
    Io,
}

impl OpKind {
    pub fn class(self) -> Class {
        use OpKind::*;
        match self {
            ADD => Class::Calc(Alu::ADD),
            SUB => Class::Calc(Alu::SUB),
            XOR => Class::Calc(Alu::XOR),
            OR => Class::Calc(Alu::OR),
            AND => Class::Calc(Alu::AND),
            SRA => Class::Calc(Alu::SRA),
            SRL => Class::Calc(Alu::SRL),
            SLL => Class::Calc(Alu::SLL),
            SLTS => Class::Calc(Alu::SLTS),
            SLTU => Class::Calc(Alu::SLTU),
            BLT => Class::Branch(Alu::LTS),
            BLTU => Class::Branch(Alu::LTU),
            BGE => Class::Branch(Alu::GES),
            BGEU => Class::Branch(Alu::GEU),
            BEQ => Class::Branch(Alu::EQ),
            BNE => Class::Branch(Alu::NE),
            LI => Class::Li,
            IN => Class::Io,
            J => Class::Jump,
        }
    }
}

#[test]
fn test() {
    assert_eq!(OpKind::parse("add"), Some(OpKind::ADD));
    assert_eq!(OpKind::parse("J"), Some(OpKind::J));
    assert_eq!(OpKind::parse("addi"), None);
    assert_eq!(OpKind::BLTU.to_string(), "bltu");
    assert_eq!(OpKind::BLT.class(), Class::Branch(Alu::LTS));
}
