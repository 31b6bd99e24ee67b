// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Minimal instruction model and predicates for locating rewrite anchors.
//!
//! Bytecode rewriting usually starts by finding a short run of instructions
//! such as "load local 2, call something, store local 2". This module gives
//! just enough structure to express those tests as [`Pattern`] steps.
//!
//! ```
//! use seqmatch::instruction::{loads_local_at, stores_local_at, Instruction, OpCode};
//! use seqmatch::pattern::predicate::{any, Pattern};
//! use seqmatch::sequence::MatchSequence;
//!
//! let body = [
//!     Instruction::local(OpCode::LdlocS, 2),
//!     Instruction::new(OpCode::Call),
//!     Instruction::local(OpCode::Stloc, 2),
//!     Instruction::new(OpCode::Ret),
//! ];
//! let pattern = Pattern::new()
//!     .with(loads_local_at(2))
//!     .with(any())
//!     .with(stores_local_at(2));
//! let anchor = MatchSequence::new(&body, &pattern).first().unwrap();
//! assert_eq!(anchor.first().range(), 0..3);
//! ```
//!
//! [`Pattern`]: crate::pattern::predicate::Pattern

use std::fmt;

/// Operation codes relevant to local-variable access, plus a catch-all.
///
/// The short (`*S`) forms differ from the long forms only in operand
/// encoding, so the predicates below treat both as the same operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OpCode {
    /// No operation.
    Nop,
    /// Load argument.
    Ldarg,
    /// Load local variable.
    Ldloc,
    /// Load local variable, short form.
    LdlocS,
    /// Load local variable address.
    Ldloca,
    /// Load local variable address, short form.
    LdlocaS,
    /// Store local variable.
    Stloc,
    /// Store local variable, short form.
    StlocS,
    /// Call a method.
    Call,
    /// Return from the current method.
    Ret,
    /// Any other operation, identified by its raw code.
    Other(u16),
}

impl OpCode {
    /// Returns true for `Ldloc` and `LdlocS`.
    #[must_use]
    #[inline]
    pub const fn is_load_local(self) -> bool {
        matches!(self, Self::Ldloc | Self::LdlocS)
    }

    /// Returns true for `Ldloca` and `LdlocaS`.
    #[must_use]
    #[inline]
    pub const fn is_load_local_address(self) -> bool {
        matches!(self, Self::Ldloca | Self::LdlocaS)
    }

    /// Returns true for `Stloc` and `StlocS`.
    #[must_use]
    #[inline]
    pub const fn is_store_local(self) -> bool {
        matches!(self, Self::Stloc | Self::StlocS)
    }
}

/// Instruction operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Operand {
    /// No operand.
    #[default]
    None,
    /// A local variable slot.
    Local(usize),
    /// An integer constant.
    Int(i64),
    /// A named member or label.
    Symbol(String),
}

/// A single instruction: an opcode with an optional operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// The operation.
    pub opcode: OpCode,
    /// The operand, if any.
    pub operand: Operand,
}

impl Instruction {
    /// Creates an instruction with no operand.
    #[must_use]
    pub const fn new(opcode: OpCode) -> Self {
        Self {
            opcode,
            operand: Operand::None,
        }
    }

    /// Creates an instruction with the given operand.
    #[must_use]
    pub const fn with_operand(opcode: OpCode, operand: Operand) -> Self {
        Self { opcode, operand }
    }

    /// Creates an instruction whose operand is local slot `index`.
    #[must_use]
    pub const fn local(opcode: OpCode, index: usize) -> Self {
        Self {
            opcode,
            operand: Operand::Local(index),
        }
    }

    /// The local slot referenced by the operand, if it is one.
    #[must_use]
    #[inline]
    pub const fn local_index(&self) -> Option<usize> {
        match self.operand {
            Operand::Local(index) => Some(index),
            _ => None,
        }
    }

    /// Returns true if this loads local slot `index`.
    #[must_use]
    pub const fn loads_local(&self, index: usize) -> bool {
        self.opcode.is_load_local() && self.refers_to_local(index)
    }

    /// Returns true if this loads the address of local slot `index`.
    #[must_use]
    pub const fn loads_local_address(&self, index: usize) -> bool {
        self.opcode.is_load_local_address() && self.refers_to_local(index)
    }

    /// Returns true if this stores to local slot `index`.
    #[must_use]
    pub const fn stores_local(&self, index: usize) -> bool {
        self.opcode.is_store_local() && self.refers_to_local(index)
    }

    const fn refers_to_local(&self, index: usize) -> bool {
        matches!(self.operand, Operand::Local(i) if i == index)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::None => write!(f, "{:?}", self.opcode),
            Operand::Local(i) => write!(f, "{:?} loc.{i}", self.opcode),
            Operand::Int(v) => write!(f, "{:?} {v}", self.opcode),
            Operand::Symbol(s) => write!(f, "{:?} {s}", self.opcode),
        }
    }
}

/// Matches instructions with the given opcode, whatever the operand.
#[must_use]
pub fn opcode_is(opcode: OpCode) -> impl Fn(&Instruction) -> bool {
    move |ins: &Instruction| ins.opcode == opcode
}

/// Matches loads of local slot `index` (long or short form).
#[must_use]
pub fn loads_local_at(index: usize) -> impl Fn(&Instruction) -> bool {
    move |ins: &Instruction| ins.loads_local(index)
}

/// Matches address loads of local slot `index` (long or short form).
#[must_use]
pub fn loads_local_address_at(index: usize) -> impl Fn(&Instruction) -> bool {
    move |ins: &Instruction| ins.loads_local_address(index)
}

/// Matches stores to local slot `index` (long or short form).
#[must_use]
pub fn stores_local_at(index: usize) -> impl Fn(&Instruction) -> bool {
    move |ins: &Instruction| ins.stores_local(index)
}
