//! Opcode constants and dispatch metadata.
//!
//! The info table is a const 256-entry array built by the `opcodes!` macro.
//! Unassigned bytes stay `None` and fall through to the build-time
//! unassigned-opcode policy in the dispatch loop.

/// Information about an opcode: name, stack effect, base gas, and whether it
/// terminates the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCodeInfo {
    /// Name
    name: &'static str,
    /// Stack inputs.
    inputs: u8,
    /// Stack outputs.
    outputs: u8,
    /// Base gas charged by the opcode's handler.
    gas: u16,
    /// Whether the opcode stops execution.
    terminating: bool,
}

impl OpCodeInfo {
    /// Creates a new opcode info with the given name and default values.
    pub const fn new(name: &'static str) -> Self {
        Self { name, inputs: 0, outputs: 0, gas: 0, terminating: false }
    }

    /// Returns the name of the opcode.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of stack inputs.
    #[inline]
    pub const fn inputs(&self) -> u8 {
        self.inputs
    }

    /// Returns the number of stack outputs.
    #[inline]
    pub const fn outputs(&self) -> u8 {
        self.outputs
    }

    /// Returns the base gas charged by the opcode's handler.
    #[inline]
    pub const fn min_gas(&self) -> u16 {
        self.gas
    }

    /// Returns whether the opcode is terminating.
    #[inline]
    pub const fn terminating(&self) -> bool {
        self.terminating
    }
}

impl From<u8> for OpCodeInfo {
    #[inline]
    fn from(opcode: u8) -> Self {
        OPCODE_INFO_TABLE[opcode as usize].unwrap_or(OpCodeInfo {
            name: "unknown",
            inputs: 0,
            outputs: 0,
            gas: 0,
            terminating: true,
        })
    }
}

/// Sets the number of stack inputs and outputs.
#[inline]
pub const fn stack_io(mut op: OpCodeInfo, inputs: u8, outputs: u8) -> OpCodeInfo {
    op.inputs = inputs;
    op.outputs = outputs;
    op
}

/// Sets the base gas charged by the opcode's handler.
#[inline]
pub const fn min_gas(mut op: OpCodeInfo, gas: u16) -> OpCodeInfo {
    op.gas = gas;
    op
}

/// Sets the terminating flag to true.
#[inline]
pub const fn terminating(mut op: OpCodeInfo) -> OpCodeInfo {
    op.terminating = true;
    op
}

macro_rules! opcodes {
    ($($val:literal => $name:ident => $($modifier:ident $(( $($modifier_arg:expr),* ))?),*);* $(;)?) => {
        // create a constant for each opcode
        $(
            #[doc = concat!("The `", stringify!($val), "` (\"", stringify!($name), "\") opcode.")]
            pub const $name: u8 = $val;
        )*

        /// Maps each opcode to its info.
        pub const OPCODE_INFO_TABLE: [Option<OpCodeInfo>; 256] = {
            let mut map = [None; 256];
            $(
                let info = OpCodeInfo::new(stringify!($name));
                $(
                let info = $modifier(info $(, $($modifier_arg),*)?);
                )*
                map[$val as usize] = Some(info);
            )*
            map
        };

        /// Maps each opcode to its name.
        pub const OPCODE_NAME_TABLE: [&'static str; 256] = {
            let mut map = ["unknown"; 256];
            $(
                map[$val as usize] = stringify!($name);
            )*
            map
        };
    }
}

/// Get the name of an opcode.
#[inline]
pub fn opcode_name(opcode: u8) -> &'static str {
    OPCODE_NAME_TABLE[opcode as usize]
}

/// Base gas charged by an opcode's handler. Unassigned opcodes report the
/// stub cost used by the permissive dispatch policy.
#[inline]
pub const fn base_gas(opcode: u8) -> i64 {
    match OPCODE_INFO_TABLE[opcode as usize] {
        Some(info) => info.gas as i64,
        None => STUB_GAS,
    }
}

/// Gas charged for unassigned opcodes under the permissive dispatch policy.
pub const STUB_GAS: i64 = 3;

opcodes! {
    0x00 => STOP => terminating;

    0x01 => ADD => stack_io(2, 1), min_gas(3);
    0x02 => MUL => stack_io(2, 1), min_gas(5);
    0x03 => SUB => stack_io(2, 1), min_gas(3);
    0x04 => DIV => stack_io(2, 1), min_gas(5);
    0x06 => MOD => stack_io(2, 1), min_gas(5);

    0x10 => LT => stack_io(2, 1), min_gas(3);
    0x11 => GT => stack_io(2, 1), min_gas(3);
    0x14 => EQ => stack_io(2, 1), min_gas(3);
    0x15 => ISZERO => stack_io(1, 1), min_gas(3);
    0x16 => AND => stack_io(2, 1), min_gas(3);
    0x17 => OR => stack_io(2, 1), min_gas(3);
    0x18 => XOR => stack_io(2, 1), min_gas(3);
    0x19 => NOT => stack_io(1, 1), min_gas(3);

    0x50 => POP => stack_io(1, 0), min_gas(2);
    0x51 => MLOAD => stack_io(1, 1), min_gas(3);
    0x52 => MSTORE => stack_io(2, 0), min_gas(3);
    0x53 => MSTORE8 => stack_io(2, 0), min_gas(3);
    0x54 => SLOAD => stack_io(1, 1), min_gas(100);
    0x55 => SSTORE => stack_io(2, 0), min_gas(100);
    0x56 => JUMP => stack_io(1, 0), min_gas(8);
    0x57 => JUMPI => stack_io(2, 0), min_gas(10);
    0x58 => PC => stack_io(0, 1), min_gas(2);
    0x59 => MSIZE => stack_io(0, 1), min_gas(2);
    0x5a => GAS => stack_io(0, 1), min_gas(2);
    0x5b => JUMPDEST => min_gas(1);

    0x5f => PUSH0 => stack_io(0, 1), min_gas(2);
    0x60 => PUSH1 => stack_io(0, 1), min_gas(3);
    0x61 => PUSH2 => stack_io(0, 1), min_gas(3);
    0x62 => PUSH3 => stack_io(0, 1), min_gas(3);
    0x63 => PUSH4 => stack_io(0, 1), min_gas(3);
    0x64 => PUSH5 => stack_io(0, 1), min_gas(3);
    0x65 => PUSH6 => stack_io(0, 1), min_gas(3);
    0x66 => PUSH7 => stack_io(0, 1), min_gas(3);
    0x67 => PUSH8 => stack_io(0, 1), min_gas(3);
    0x68 => PUSH9 => stack_io(0, 1), min_gas(3);
    0x69 => PUSH10 => stack_io(0, 1), min_gas(3);
    0x6a => PUSH11 => stack_io(0, 1), min_gas(3);
    0x6b => PUSH12 => stack_io(0, 1), min_gas(3);
    0x6c => PUSH13 => stack_io(0, 1), min_gas(3);
    0x6d => PUSH14 => stack_io(0, 1), min_gas(3);
    0x6e => PUSH15 => stack_io(0, 1), min_gas(3);
    0x6f => PUSH16 => stack_io(0, 1), min_gas(3);
    0x70 => PUSH17 => stack_io(0, 1), min_gas(3);
    0x71 => PUSH18 => stack_io(0, 1), min_gas(3);
    0x72 => PUSH19 => stack_io(0, 1), min_gas(3);
    0x73 => PUSH20 => stack_io(0, 1), min_gas(3);
    0x74 => PUSH21 => stack_io(0, 1), min_gas(3);
    0x75 => PUSH22 => stack_io(0, 1), min_gas(3);
    0x76 => PUSH23 => stack_io(0, 1), min_gas(3);
    0x77 => PUSH24 => stack_io(0, 1), min_gas(3);
    0x78 => PUSH25 => stack_io(0, 1), min_gas(3);
    0x79 => PUSH26 => stack_io(0, 1), min_gas(3);
    0x7a => PUSH27 => stack_io(0, 1), min_gas(3);
    0x7b => PUSH28 => stack_io(0, 1), min_gas(3);
    0x7c => PUSH29 => stack_io(0, 1), min_gas(3);
    0x7d => PUSH30 => stack_io(0, 1), min_gas(3);
    0x7e => PUSH31 => stack_io(0, 1), min_gas(3);
    0x7f => PUSH32 => stack_io(0, 1), min_gas(3);

    0x80 => DUP1 => stack_io(1, 2), min_gas(3);
    0x81 => DUP2 => stack_io(2, 3), min_gas(3);
    0x82 => DUP3 => stack_io(3, 4), min_gas(3);
    0x83 => DUP4 => stack_io(4, 5), min_gas(3);
    0x84 => DUP5 => stack_io(5, 6), min_gas(3);
    0x85 => DUP6 => stack_io(6, 7), min_gas(3);
    0x86 => DUP7 => stack_io(7, 8), min_gas(3);
    0x87 => DUP8 => stack_io(8, 9), min_gas(3);
    0x88 => DUP9 => stack_io(9, 10), min_gas(3);
    0x89 => DUP10 => stack_io(10, 11), min_gas(3);
    0x8a => DUP11 => stack_io(11, 12), min_gas(3);
    0x8b => DUP12 => stack_io(12, 13), min_gas(3);
    0x8c => DUP13 => stack_io(13, 14), min_gas(3);
    0x8d => DUP14 => stack_io(14, 15), min_gas(3);
    0x8e => DUP15 => stack_io(15, 16), min_gas(3);
    0x8f => DUP16 => stack_io(16, 17), min_gas(3);

    0x90 => SWAP1 => stack_io(2, 2), min_gas(3);
    0x91 => SWAP2 => stack_io(3, 3), min_gas(3);
    0x92 => SWAP3 => stack_io(4, 4), min_gas(3);
    0x93 => SWAP4 => stack_io(5, 5), min_gas(3);
    0x94 => SWAP5 => stack_io(6, 6), min_gas(3);
    0x95 => SWAP6 => stack_io(7, 7), min_gas(3);
    0x96 => SWAP7 => stack_io(8, 8), min_gas(3);
    0x97 => SWAP8 => stack_io(9, 9), min_gas(3);
    0x98 => SWAP9 => stack_io(10, 10), min_gas(3);
    0x99 => SWAP10 => stack_io(11, 11), min_gas(3);
    0x9a => SWAP11 => stack_io(12, 12), min_gas(3);
    0x9b => SWAP12 => stack_io(13, 13), min_gas(3);
    0x9c => SWAP13 => stack_io(14, 14), min_gas(3);
    0x9d => SWAP14 => stack_io(15, 15), min_gas(3);
    0x9e => SWAP15 => stack_io(16, 16), min_gas(3);
    0x9f => SWAP16 => stack_io(17, 17), min_gas(3);

    0xfd => REVERT => stack_io(2, 0), terminating;
    0xfe => INVALID => terminating;
    0xff => SELFDESTRUCT => stack_io(1, 0), terminating;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        assert_eq!(STOP, 0x00);
        assert_eq!(ADD, 0x01);
        assert_eq!(JUMPDEST, 0x5b);
        assert_eq!(PUSH0, 0x5f);
        assert_eq!(PUSH32, 0x7f);
        assert_eq!(SWAP16, 0x9f);
        assert_eq!(INVALID, 0xfe);
    }

    #[test]
    fn test_info_table() {
        let add = OpCodeInfo::from(ADD);
        assert_eq!(add.name(), "ADD");
        assert_eq!(add.inputs(), 2);
        assert_eq!(add.outputs(), 1);
        assert_eq!(add.min_gas(), 3);
        assert!(!add.terminating());

        let stop = OpCodeInfo::from(STOP);
        assert!(stop.terminating());
        assert_eq!(stop.min_gas(), 0);
    }

    #[test]
    fn test_unassigned_opcode_info() {
        assert!(OPCODE_INFO_TABLE[0x21].is_none());
        assert_eq!(OpCodeInfo::from(0x21).name(), "unknown");
        assert_eq!(opcode_name(0x21), "unknown");
    }

    #[test]
    fn test_base_gas() {
        assert_eq!(base_gas(ADD), 3);
        assert_eq!(base_gas(MUL), 5);
        assert_eq!(base_gas(JUMP), 8);
        assert_eq!(base_gas(JUMPI), 10);
        assert_eq!(base_gas(JUMPDEST), 1);
        assert_eq!(base_gas(STOP), 0);
        assert_eq!(base_gas(PUSH0), 2);
        assert_eq!(base_gas(0x21), STUB_GAS);
    }

    #[test]
    fn test_opcode_name() {
        assert_eq!(opcode_name(JUMPDEST), "JUMPDEST");
        assert_eq!(opcode_name(SSTORE), "SSTORE");
    }
}
