use num_enum::IntoPrimitive;

/// ALU function codes. Computational instructions carry them in a 5-bit
/// field, branches in a 7-bit field; the values themselves are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum Alu {
    ADD = 0b00000,
    SLL = 0b00001,
    SLTS = 0b00010,
    SLTU = 0b00011,
    XOR = 0b00100,
    SRL = 0b00101,
    OR = 0b00110,
    AND = 0b00111,
    SUB = 0b01000,
    SRA = 0b01101,
    EQ = 0b11000,
    NE = 0b11001,
    LTS = 0b11100,
    GES = 0b11101,
    LTU = 0b11110,
    GEU = 0b11111,
}

#[test]
fn test() {
    assert_eq!(u8::from(Alu::ADD), 0);
    assert_eq!(u8::from(Alu::SUB), 8);
    assert_eq!(u8::from(Alu::LTS), 28);
    assert_eq!(u8::from(Alu::GEU), 31);
}
